//! `pwa_header` template tag for site generators.

use std::path::PathBuf;

use serde_json::Value;

use crate::builder::{BuildContext, PwaBuilder};
use crate::config::BuildOptions;
use crate::error::BuildResult;
use crate::page::PageContext;

/// Site level information the template engine exposes to tags.
#[derive(Debug, Clone, Default)]
pub struct SiteContext {
  /// Build source directory.
  pub source: PathBuf,
  /// Build target directory, if the build output exists.
  pub target: Option<PathBuf>,
  /// Whether the engine serves pages from a simulated server.
  pub server_mode: bool,
}

/// Renders the PWA head section for the page being templated.
#[derive(Debug, Clone, Default)]
pub struct PwaHeaderTag {
  site: SiteContext,
}

impl PwaHeaderTag {
  /// Name under which the tag is registered with the template engine.
  pub const NAME: &'static str = "pwa_header";

  /// Create a tag bound to a site.
  pub fn new(site: SiteContext) -> Self {
    Self { site }
  }

  /// Render the tag for `page` using the tag's arguments.
  ///
  /// The service worker URL is derived from the page path, assuming the worker script
  /// lives at the repository root.
  pub fn render(&self, page: &PageContext, args: &Value) -> BuildResult<String> {
    let mut options = BuildOptions::from_tag_args(args)?;
    options.file_mode = self.site.server_mode;
    options.service_worker_url = Some(page.service_worker_url());

    let builder = PwaBuilder::new(BuildContext {
      source: &self.site.source,
      target: self.site.target.as_deref(),
      options: &options,
    });
    builder.html_header(page)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::BuildError;
  use serde_json::json;
  use std::fs;
  use tempfile::tempdir;

  #[test]
  fn renders_with_page_relative_service_worker() {
    let temp = tempdir().unwrap();
    fs::write(
      temp.path().join("locomote.json"),
      r#"{ "pwa": { "name": "App" }, "serviceWorker": { "version": "1.0.0" } }"#,
    )
    .unwrap();

    let tag = PwaHeaderTag::new(SiteContext {
      source: temp.path().to_path_buf(),
      target: None,
      server_mode: true,
    });
    let page = PageContext::new("docs/guide/index.html");
    let html = tag.render(&page, &json!({ "indentSize": 0 })).unwrap();

    assert!(html.contains(r#"<meta name="locomote-service-worker-url" content="../../sw.js" />"#));
    assert!(html.lines().all(|line| !line.starts_with(' ')));
  }

  #[test]
  fn rejects_unknown_arguments() {
    let tag = PwaHeaderTag::default();
    let result = tag.render(&PageContext::new("index.html"), &json!({ "bogus": true }));
    assert!(matches!(result, Err(BuildError::InvalidOptions(_))));
  }
}
