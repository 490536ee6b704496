//! Loading the content manifest and normalising its PWA section.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{BuildError, BuildResult};
use crate::manifest::layers::fill_defaults;
use crate::models::ContentManifest;
use crate::settings::{CONTENT_MANIFEST_NAME, default_content_manifest, default_pwa_section};
use crate::support::read_json;

/// Resolve the content manifest location, preferring an explicit override.
pub fn resolve_manifest_path(source_dir: &Path, manifest_path: Option<&Path>) -> PathBuf {
  match manifest_path {
    Some(path) => path.to_path_buf(),
    None => source_dir.join(CONTENT_MANIFEST_NAME),
  }
}

/// Load the content manifest for a build source.
///
/// A missing file yields the built-in default manifest. A manifest without a `pwa` key
/// stays without one; a present `pwa` section has the PWA defaults layered under it.
/// Malformed documents are errors.
pub fn load_manifest(
  source_dir: &Path,
  manifest_path: Option<&Path>,
) -> BuildResult<ContentManifest> {
  let path = resolve_manifest_path(source_dir, manifest_path);

  let document: Cow<'_, Map<String, Value>> = match read_json::<Value>(&path)? {
    Some(Value::Object(map)) => Cow::Owned(map),
    Some(_) => return Err(BuildError::NotAnObject { path }),
    None => {
      debug!(path = %path.display(), "content manifest not found, using defaults");
      Cow::Borrowed(default_content_manifest())
    }
  };

  parse_manifest(document.into_owned()).map_err(|err| BuildError::parse(&path, err))
}

/// Normalise and deserialise a content manifest document.
///
/// Keys set to `null` read as if they were absent.
pub fn parse_manifest(mut document: Map<String, Value>) -> serde_json::Result<ContentManifest> {
  let pwa_document = match document.get_mut("pwa") {
    Some(Value::Object(pwa)) => {
      fill_defaults(pwa, default_pwa_section());
      Some(pwa.clone())
    }
    _ => None,
  };

  let mut manifest: ContentManifest = serde_json::from_value(Value::Object(document))?;
  manifest.pwa_document = pwa_document;
  Ok(manifest)
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use tempfile::tempdir;

  fn write_manifest(dir: &Path, content: &str) {
    fs::write(dir.join(CONTENT_MANIFEST_NAME), content).unwrap();
  }

  #[test]
  fn missing_manifest_falls_back_to_defaults() {
    let temp = tempdir().unwrap();
    let manifest = load_manifest(temp.path(), None).unwrap();

    let pwa = manifest.pwa.expect("default manifest carries a pwa section");
    assert_eq!(pwa.background_color, "#000000");
    assert!(pwa.ios.show_install_banner);
    assert!(manifest.service_worker.is_none());
  }

  #[test]
  fn absent_pwa_key_is_not_synthesised() {
    let temp = tempdir().unwrap();
    write_manifest(temp.path(), r#"{ "site": { "title": "Docs" } }"#);

    let manifest = load_manifest(temp.path(), None).unwrap();
    assert!(manifest.pwa.is_none());
    assert_eq!(manifest.site.title.as_deref(), Some("Docs"));
  }

  #[test]
  fn pwa_section_is_normalised() {
    let temp = tempdir().unwrap();
    write_manifest(
      temp.path(),
      r#"{ "pwa": { "name": "App", "display": "fullscreen", "ios": { "statusBarStyle": "black" } } }"#,
    );

    let pwa = load_manifest(temp.path(), None).unwrap().pwa.unwrap();
    assert_eq!(pwa.name, "App");
    assert_eq!(pwa.short_name, "");
    assert_eq!(pwa.background_color, "#000000");
    assert_eq!(pwa.display.as_deref(), Some("fullscreen"));
    assert_eq!(pwa.ios.status_bar_style.as_deref(), Some("black"));
    assert!(pwa.ios.show_install_banner);
  }

  #[test]
  fn explicit_path_overrides_source_location() {
    let temp = tempdir().unwrap();
    write_manifest(temp.path(), r#"{ "site": { "title": "Source" } }"#);
    let other = temp.path().join("other.json");
    fs::write(&other, r#"{ "site": { "title": "Override" } }"#).unwrap();

    let manifest = load_manifest(temp.path(), Some(other.as_path())).unwrap();
    assert_eq!(manifest.site.title.as_deref(), Some("Override"));
  }

  #[test]
  fn malformed_manifest_is_an_error() {
    let temp = tempdir().unwrap();
    write_manifest(temp.path(), "{ \"pwa\": ");

    let result = load_manifest(temp.path(), None);
    assert!(matches!(result, Err(BuildError::Parse { .. })));
  }

  #[test]
  fn non_object_manifest_is_an_error() {
    let temp = tempdir().unwrap();
    write_manifest(temp.path(), "[1, 2, 3]");

    let result = load_manifest(temp.path(), None);
    assert!(matches!(result, Err(BuildError::NotAnObject { .. })));
  }

  #[test]
  fn null_values_fall_back_to_defaults() {
    let temp = tempdir().unwrap();
    write_manifest(
      temp.path(),
      r#"{ "site": null, "pwa": { "name": null, "background_color": null, "ios": null } }"#,
    );

    let manifest = load_manifest(temp.path(), None).unwrap();
    assert_eq!(manifest.site.title, None);
    let pwa = manifest.pwa.unwrap();
    assert_eq!(pwa.name, "");
    assert_eq!(pwa.background_color, "#000000");
    assert!(pwa.ios.show_install_banner);
    assert_eq!(
      manifest.pwa_document.unwrap()["ios"],
      serde_json::json!({ "showInstallBanner": true })
    );
  }

  #[test]
  fn null_ios_flag_takes_the_default() {
    let temp = tempdir().unwrap();
    write_manifest(
      temp.path(),
      r#"{ "pwa": { "ios": { "statusBarStyle": null, "showInstallBanner": null } } }"#,
    );

    let pwa = load_manifest(temp.path(), None).unwrap().pwa.unwrap();
    assert_eq!(pwa.ios.status_bar_style, None);
    assert!(pwa.ios.show_install_banner);
  }

  #[test]
  fn keeps_authored_pwa_key_order() {
    let manifest = parse_manifest(
      serde_json::json!({ "pwa": { "start_url": "/", "display": "fullscreen", "name": "App" } })
        .as_object()
        .cloned()
        .unwrap(),
    )
    .unwrap();

    let document = manifest.pwa_document.unwrap();
    let keys: Vec<&str> = document.keys().map(String::as_str).collect();
    assert_eq!(
      keys,
      vec!["start_url", "display", "name", "short_name", "background_color", "ios"]
    );
  }

  #[test]
  fn reads_service_worker_version() {
    let temp = tempdir().unwrap();
    write_manifest(temp.path(), r#"{ "serviceWorker": { "version": "1.2.3" } }"#);

    let manifest = load_manifest(temp.path(), None).unwrap();
    let worker = manifest.service_worker.unwrap();
    assert_eq!(worker.version.as_deref(), Some("1.2.3"));
  }
}
