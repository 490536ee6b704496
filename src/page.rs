//! The page a header is rendered for.

use std::fs;
use std::path::Path;

use gray_matter::{Matter, engine::YAML};
use serde_json::Value;

use crate::error::{BuildError, BuildResult};

/// Page being rendered: its path relative to the repository root and its front matter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContext {
  path: String,
  front_matter: Option<Value>,
}

impl PageContext {
  /// Page at `path` without front matter.
  pub fn new(path: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      front_matter: None,
    }
  }

  /// Attach front-matter data to the page.
  pub fn with_front_matter(mut self, front_matter: Value) -> Self {
    self.front_matter = Some(front_matter);
    self
  }

  /// Read a page below `source_dir`, extracting its YAML front matter.
  pub fn from_source(source_dir: &Path, page_path: &str) -> BuildResult<Self> {
    let file = source_dir.join(page_path);
    let content = fs::read_to_string(&file).map_err(|err| BuildError::io(&file, err))?;

    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(&content).map_err(|err| BuildError::FrontMatter {
      path: file.clone(),
      reason: err.to_string(),
    })?;

    let front_matter = parsed
      .data
      .map(|yaml: serde_yaml::Value| serde_json::to_value(yaml))
      .transpose()
      .map_err(|err| BuildError::FrontMatter {
        path: file.clone(),
        reason: err.to_string(),
      })?;

    Ok(Self {
      path: page_path.to_string(),
      front_matter,
    })
  }

  /// Path of the page relative to the repository root.
  pub fn path(&self) -> &str {
    &self.path
  }

  /// Front-matter data, if the page has any.
  pub fn front_matter(&self) -> Option<&Value> {
    self.front_matter.as_ref()
  }

  /// Relative URL from the page to the service worker script at the repository root.
  ///
  /// One `..` is emitted per directory segment of the page path.
  pub fn service_worker_url(&self) -> String {
    let trimmed = self.path.trim_start_matches('/');
    let depth = trimmed.split('/').count().saturating_sub(1);
    let mut segments = vec![".."; depth];
    segments.push("sw.js");
    segments.join("/")
  }
}
