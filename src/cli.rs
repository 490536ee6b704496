//! Command-line argument surface shared by the binaries.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser};
use tracing_subscriber::EnvFilter;

use crate::config::BuildOptions;

/// Positional build locations and manifest flags.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct BuildArgs {
  /// Build source directory.
  pub source: PathBuf,
  /// Build target directory.
  pub target: PathBuf,
  /// Content manifest path, overriding `<source>/locomote.json`.
  #[arg(short = 'm', value_name = "MANIFEST_PATH")]
  pub manifest_path: Option<PathBuf>,
  /// Content source revision to read the manifest from.
  #[arg(short = 'b', value_name = "MANIFEST_BRANCH")]
  pub manifest_branch: Option<String>,
}

impl BuildArgs {
  /// Build options carried by the flags.
  pub fn options(&self) -> BuildOptions {
    BuildOptions {
      manifest_path: self.manifest_path.clone(),
      manifest_branch: self.manifest_branch.clone(),
      ..BuildOptions::default()
    }
  }
}

/// Arguments of `make-html-header`.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(version, about = "Print the PWA head section for a page")]
pub struct HeaderCli {
  #[command(flatten)]
  #[allow(missing_docs)]
  pub build: BuildArgs,
  /// Page path relative to the repository root.
  #[arg(long, default_value = "index.html")]
  pub page: String,
  /// Read the page's front matter from the build source.
  #[arg(long)]
  pub front_matter: bool,
  /// Assume every PWA asset exists instead of probing the target.
  #[arg(long)]
  pub preview: bool,
  /// Spaces prefixed to each line; zero trims lines instead.
  #[arg(long)]
  pub indent: Option<usize>,
}

/// Arguments of `make-web-manifest`.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(version, about = "Write the merged web manifest into the build target")]
pub struct WebManifestCli {
  #[command(flatten)]
  #[allow(missing_docs)]
  pub build: BuildArgs,
}

/// Parse process arguments, exiting with status 1 on usage errors.
///
/// Help and version requests print to stdout and exit successfully.
pub fn parse_or_exit<P: Parser>() -> P {
  parse_or_exit_from(std::env::args_os())
}

/// Parse `args`, exiting with status 1 on usage errors.
pub fn parse_or_exit_from<P, I, T>(args: I) -> P
where
  P: Parser,
  I: IntoIterator<Item = T>,
  T: Into<OsString> + Clone,
{
  match P::try_parse_from(args) {
    Ok(parsed) => parsed,
    Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
      err.exit()
    }
    Err(err) => {
      // clap would exit with status 2 for usage errors.
      let _ = err.print();
      std::process::exit(1);
    }
  }
}

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`, defaulting to warnings.
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .try_init();
}
