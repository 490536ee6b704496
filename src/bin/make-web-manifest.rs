//! Write `manifest.webmanifest` into the build target.

use anyhow::{Context, Result};
use pwa_build_helpers::cli::{WebManifestCli, init_tracing, parse_or_exit};
use pwa_build_helpers::{BuildContext, PwaBuilder};

fn main() -> Result<()> {
  let cli: WebManifestCli = parse_or_exit();
  init_tracing();

  let options = cli.build.options();
  let builder = PwaBuilder::new(BuildContext {
    source: &cli.build.source,
    target: Some(cli.build.target.as_path()),
    options: &options,
  });
  builder.write_web_manifest().with_context(|| {
    format!(
      "failed to generate web manifest for {}",
      cli.build.target.display()
    )
  })?;
  Ok(())
}
