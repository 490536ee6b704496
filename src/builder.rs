//! Build orchestrator: load the content manifest, probe the target, compose the output.

use std::path::{Path, PathBuf};

use same_file::is_same_file;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::asset_paths::AssetAvailability;
use crate::config::BuildOptions;
use crate::error::{BuildError, BuildResult};
use crate::header::compose_header;
use crate::manifest::load_manifest;
use crate::models::ContentManifest;
use crate::page::PageContext;
use crate::settings::WEB_MANIFEST_NAME;
use crate::support::{ensure_dir_for_file, read_json, write};
use crate::web_manifest::{compose_web_manifest, list_app_icons, to_json};

/// Locations and options for one build invocation.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
  /// Build source directory holding the content manifest.
  pub source: &'a Path,
  /// Build target directory; `None` renders as if every asset exists.
  pub target: Option<&'a Path>,
  /// Caller supplied options.
  pub options: &'a BuildOptions,
}

/// High-level helper for generating PWA head sections and web manifests.
pub struct PwaBuilder<'a> {
  context: BuildContext<'a>,
}

impl<'a> PwaBuilder<'a> {
  /// Create a builder for the provided build context.
  pub fn new(context: BuildContext<'a>) -> Self {
    Self { context }
  }

  /// Load the content manifest for this build.
  pub fn load_manifest(&self) -> BuildResult<ContentManifest> {
    let options = self.context.options;
    if let Some(branch) = options.manifest_branch.as_deref() {
      debug!(branch, "reading content manifest from the working tree");
    }
    load_manifest(self.context.source, options.manifest_path.as_deref())
  }

  /// Probe the build target for optional PWA assets.
  pub fn probe_assets(&self) -> BuildResult<AssetAvailability> {
    AssetAvailability::probe(self.context.target)
  }

  /// Generate the head section for `page`.
  pub fn html_header(&self, page: &PageContext) -> BuildResult<String> {
    let manifest = self.load_manifest()?;
    let availability = self.probe_assets()?;
    debug!(page = page.path(), "composing PWA header");
    compose_header(self.context.options, &manifest, &availability, page)
  }

  /// Generate the merged web manifest document.
  pub fn web_manifest_document(&self) -> BuildResult<Map<String, Value>> {
    let manifest = self.load_manifest()?;
    let source_path = self.source_web_manifest_path();
    let source_web_manifest = match read_json::<Value>(&source_path)? {
      Some(Value::Object(map)) => Some(map),
      Some(_) => return Err(BuildError::NotAnObject { path: source_path }),
      None => None,
    };

    // Images are expected to have been generated into the target before this runs.
    let icons = list_app_icons(&self.probe_assets()?);
    compose_web_manifest(&manifest, &icons, source_web_manifest.as_ref())
  }

  /// Generate the web manifest as JSON text.
  pub fn web_manifest(&self) -> BuildResult<String> {
    to_json(&self.web_manifest_document()?)
  }

  /// Write the web manifest into the build target and return its path.
  pub fn write_web_manifest(&self) -> BuildResult<PathBuf> {
    let target = self
      .context
      .target
      .ok_or(BuildError::MissingTarget("write the web manifest"))?;
    let destination = target.join(WEB_MANIFEST_NAME);
    let source = self.source_web_manifest_path();

    if destination.exists() && source.exists() {
      let same = is_same_file(&source, &destination)
        .map_err(|err| BuildError::io(&destination, err))?;
      if same {
        return Err(BuildError::SameFile { path: destination });
      }
    }

    let json = self.web_manifest()?;
    ensure_dir_for_file(&destination).map_err(|err| BuildError::io(&destination, err))?;
    write(&destination, json.as_bytes())?;
    info!(path = %destination.display(), "wrote web manifest");
    Ok(destination)
  }

  fn source_web_manifest_path(&self) -> PathBuf {
    self.context.source.join(WEB_MANIFEST_NAME)
  }
}
