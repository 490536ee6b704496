//! Typed build options accepted by the composers.

use std::path::PathBuf;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{BuildError, BuildResult};

/// Indent applied to header lines when no indent size is configured.
pub const DEFAULT_INDENT_SIZE: usize = 4;

/// Options controlling manifest resolution and header formatting.
///
/// Recognised keys are `fileMode`, `serviceWorkerURL`, `indentSize`, `manifestPath` and
/// `manifestBranch`; any other key is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct BuildOptions {
  /// Whether the site is rendered from a live file tree rather than a simulated server.
  pub file_mode: bool,
  /// Relative URL of the service worker script for the page being rendered.
  #[serde(rename = "serviceWorkerURL")]
  pub service_worker_url: Option<String>,
  /// Number of spaces prefixed to each header line; zero trims lines instead.
  pub indent_size: Option<usize>,
  /// Explicit content manifest location.
  pub manifest_path: Option<PathBuf>,
  /// Content source revision the manifest should be read from.
  pub manifest_branch: Option<String>,
}

impl BuildOptions {
  /// Parse options from template tag arguments.
  ///
  /// `null` yields the defaults; anything other than an object of recognised keys is an
  /// error.
  pub fn from_tag_args(args: &Value) -> BuildResult<Self> {
    if args.is_null() {
      return Ok(Self::default());
    }
    Self::deserialize(args).map_err(|err| BuildError::InvalidOptions(err.to_string()))
  }

  /// Effective indent size.
  pub fn indent(&self) -> usize {
    self.indent_size.unwrap_or(DEFAULT_INDENT_SIZE)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn defaults_when_no_arguments_given() {
    let options = BuildOptions::from_tag_args(&Value::Null).unwrap();
    assert_eq!(options, BuildOptions::default());
    assert_eq!(options.indent(), 4);
  }

  #[test]
  fn reads_recognised_keys() {
    let options = BuildOptions::from_tag_args(&json!({
      "fileMode": true,
      "serviceWorkerURL": "../sw.js",
      "indentSize": 2,
      "manifestPath": "content/locomote.json",
      "manifestBranch": "preview"
    }))
    .unwrap();

    assert!(options.file_mode);
    assert_eq!(options.service_worker_url.as_deref(), Some("../sw.js"));
    assert_eq!(options.indent(), 2);
    assert_eq!(
      options.manifest_path,
      Some(PathBuf::from("content/locomote.json"))
    );
    assert_eq!(options.manifest_branch.as_deref(), Some("preview"));
  }

  #[test]
  fn rejects_unknown_keys() {
    let result = BuildOptions::from_tag_args(&json!({ "indent": 2 }));
    assert!(matches!(result, Err(BuildError::InvalidOptions(_))));
  }
}
