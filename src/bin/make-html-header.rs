//! Print the PWA head section for a page of a built site.

use anyhow::{Context, Result};
use pwa_build_helpers::cli::{HeaderCli, init_tracing, parse_or_exit};
use pwa_build_helpers::{BuildContext, PageContext, PwaBuilder};

fn main() -> Result<()> {
  let cli: HeaderCli = parse_or_exit();
  init_tracing();

  let mut options = cli.build.options();
  options.indent_size = cli.indent;

  let page = if cli.front_matter {
    PageContext::from_source(&cli.build.source, &cli.page)?
  } else {
    PageContext::new(cli.page.as_str())
  };
  options.service_worker_url = Some(page.service_worker_url());

  let builder = PwaBuilder::new(BuildContext {
    source: &cli.build.source,
    target: (!cli.preview).then_some(cli.build.target.as_path()),
    options: &options,
  });
  let html = builder
    .html_header(&page)
    .with_context(|| format!("failed to generate PWA header for {}", cli.page))?;

  print!("{html}");
  Ok(())
}
