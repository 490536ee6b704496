//! Error taxonomy shared by the loaders, probes and composers.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors surfaced while generating PWA head tags or web manifests.
///
/// Missing files with a documented fallback never reach this type; they are replaced by
/// their defaults at the point of reading.
#[derive(Debug, Error)]
pub enum BuildError {
  /// A file-system operation failed for a reason other than the file being absent.
  #[error("failed to access {}: {source}", .path.display())]
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: io::Error,
  },
  /// A JSON document exists but could not be parsed.
  #[error("failed to parse {}: {source}", .path.display())]
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
  /// A JSON document parsed but its top level is not an object.
  #[error("expected a JSON object in {}", .path.display())]
  NotAnObject {
    /// Path of the offending document.
    path: PathBuf,
  },
  /// Page front matter could not be read as JSON-compatible data.
  #[error("invalid front matter in {}: {reason}", .path.display())]
  FrontMatter {
    /// Page whose front matter was rejected.
    path: PathBuf,
    /// Human readable description of the failure.
    reason: String,
  },
  /// Generated output could not be serialised.
  #[error("failed to serialise output: {0}")]
  Serialize(#[from] serde_json::Error),
  /// Build options supplied by the caller were rejected.
  #[error("invalid build options: {0}")]
  InvalidOptions(String),
  /// The operation writes into the build target but none was configured.
  #[error("a build target directory is required to {0}")]
  MissingTarget(&'static str),
  /// Writing the output would overwrite the file it was read from.
  #[error("refusing to overwrite source file {}", .path.display())]
  SameFile {
    /// Path that is both input and output.
    path: PathBuf,
  },
}

/// Result type used across the crate.
pub type BuildResult<T> = Result<T, BuildError>;

impl BuildError {
  pub(crate) fn io(path: &Path, source: io::Error) -> Self {
    Self::Io {
      path: path.to_path_buf(),
      source,
    }
  }

  pub(crate) fn parse(path: &Path, source: serde_json::Error) -> Self {
    Self::Parse {
      path: path.to_path_buf(),
      source,
    }
  }
}
