//! Generation of `manifest.webmanifest` from the content manifest and the available icons.
//!
//! Inputs:
//! - the `pwa` section of the content manifest,
//! - the user-authored `manifest.webmanifest` in the build source, if any,
//! - the app icons found in the build target.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::asset_paths::AssetAvailability;
use crate::error::BuildResult;
use crate::manifest::merge_layers;
use crate::models::{ContentManifest, IconSizes, PlatformTarget, WebManifestIcon};
use crate::settings::{APP_ICON_SVG_PATH, app_icons, default_web_manifest};
use crate::support::to_json_string;

/// List the standard app icons available in the build target.
///
/// PNG icons are listed in catalog order. Only when no PNG size exists at all and the SVG
/// icon does is a single SVG entry covering every size listed instead.
pub fn list_app_icons(availability: &AssetAvailability) -> Vec<WebManifestIcon> {
  let mut icons = Vec::new();
  let mut missing = Vec::new();

  for icon in app_icons(PlatformTarget::Std) {
    if availability.contains(icon) {
      icons.push(WebManifestIcon {
        src: icon.relative_path(),
        sizes: IconSizes::Single(icon.size_label()),
      });
    } else {
      missing.push(icon.size_label());
    }
  }

  if icons.is_empty() && availability.has_svg_icon() {
    icons.push(WebManifestIcon {
      src: APP_ICON_SVG_PATH.to_string(),
      sizes: IconSizes::Many(missing),
    });
  }

  icons
}

/// Merge the web manifest layers, lowest precedence first:
/// computed icons, built-in defaults, the `pwa` section, then the user's source file.
pub fn compose_web_manifest(
  manifest: &ContentManifest,
  icons: &[WebManifestIcon],
  source_web_manifest: Option<&Map<String, Value>>,
) -> BuildResult<Map<String, Value>> {
  let mut icon_layer = Map::new();
  icon_layer.insert("icons".into(), serde_json::to_value(icons)?);

  let pwa_layer = match (&manifest.pwa_document, &manifest.pwa) {
    (Some(document), _) => Cow::Borrowed(document),
    (None, Some(pwa)) => match serde_json::to_value(pwa)? {
      Value::Object(map) => Cow::Owned(map),
      _ => Cow::Owned(Map::new()),
    },
    (None, None) => Cow::Owned(Map::new()),
  };
  let empty = Map::new();

  let layers = [
    &icon_layer,
    default_web_manifest(),
    &*pwa_layer,
    source_web_manifest.unwrap_or(&empty),
  ];
  Ok(merge_layers(layers))
}

/// Render a web manifest document as four-space indented JSON.
pub fn to_json(document: &Map<String, Value>) -> BuildResult<String> {
  to_json_string(document)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::manifest::parse_manifest;
  use crate::settings::APP_ICONS;
  use serde_json::json;

  fn manifest(value: Value) -> ContentManifest {
    parse_manifest(value.as_object().cloned().unwrap()).unwrap()
  }

  #[test]
  fn empty_inputs_produce_icons_and_display_only() {
    let document = compose_web_manifest(&manifest(json!({})), &[], None).unwrap();
    assert_eq!(
      Value::Object(document.clone()),
      json!({ "icons": [], "display": "standalone" })
    );
    assert_eq!(
      to_json(&document).unwrap(),
      "{\n    \"icons\": [],\n    \"display\": \"standalone\"\n}"
    );
  }

  #[test]
  fn partial_icons_do_not_trigger_svg_fallback() {
    let availability = AssetAvailability::from_parts([APP_ICONS[4]], false, true);
    let icons = list_app_icons(&availability);

    assert_eq!(icons, vec![WebManifestIcon {
      src: "pwa/std/192x192.png".into(),
      sizes: IconSizes::Single("192x192".into()),
    }]);
  }

  #[test]
  fn svg_fallback_stands_in_when_no_png_exists() {
    let none = AssetAvailability::from_parts([], false, true);
    let icons = list_app_icons(&none);
    assert_eq!(icons, vec![WebManifestIcon {
      src: "pwa/std/appicon.svg".into(),
      sizes: IconSizes::Many(vec!["192x192".into(), "512x512".into()]),
    }]);
  }

  #[test]
  fn no_icons_without_png_or_svg() {
    let availability = AssetAvailability::from_parts([], false, false);
    assert!(list_app_icons(&availability).is_empty());
  }

  #[test]
  fn later_layers_override_earlier_ones() {
    let manifest = manifest(json!({
      "pwa": { "name": "App", "display": "fullscreen", "start_url": "/app/" }
    }));
    let icons = list_app_icons(&AssetAvailability::assumed());
    let source = json!({ "name": "User App", "icons": [] });

    let document =
      compose_web_manifest(&manifest, &icons, source.as_object()).unwrap();

    assert_eq!(document["name"], json!("User App"));
    assert_eq!(document["display"], json!("fullscreen"));
    assert_eq!(document["start_url"], json!("/app/"));
    assert_eq!(document["background_color"], json!("#000000"));
    assert_eq!(document["icons"], json!([]));

    let keys: Vec<&str> = document.keys().map(String::as_str).collect();
    assert_eq!(&keys[..2], &["icons", "display"]);
  }

  #[test]
  fn pwa_keys_keep_authored_order() {
    let manifest = manifest(json!({
      "pwa": { "theme_color": "#101010", "name": "App", "ios": { "statusBarStyle": "black" } }
    }));

    let document = compose_web_manifest(&manifest, &[], None).unwrap();
    let keys: Vec<&str> = document.keys().map(String::as_str).collect();
    assert_eq!(
      keys,
      vec![
        "icons",
        "display",
        "theme_color",
        "name",
        "ios",
        "short_name",
        "background_color"
      ]
    );
    assert_eq!(
      document["ios"],
      json!({ "statusBarStyle": "black", "showInstallBanner": true })
    );
  }

  #[test]
  fn pwa_layer_keeps_computed_icons_unless_overridden() {
    let manifest = manifest(json!({ "pwa": { "name": "App" } }));
    let icons = list_app_icons(&AssetAvailability::assumed());

    let document = compose_web_manifest(&manifest, &icons, None).unwrap();
    assert_eq!(
      document["icons"],
      json!([
        { "src": "pwa/std/192x192.png", "sizes": "192x192" },
        { "src": "pwa/std/512x512.png", "sizes": "512x512" }
      ])
    );
  }
}
