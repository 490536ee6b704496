//! Default values, asset catalogs and hosted script locations.

use std::sync::OnceLock;

use serde_json::{Map, Value, json};

use crate::models::{AssetDescriptor, PlatformTarget};

/// Name of the content manifest file at the root of the build source.
pub const CONTENT_MANIFEST_NAME: &str = "locomote.json";

/// Name of the web manifest file in the build source and target.
pub const WEB_MANIFEST_NAME: &str = "manifest.webmanifest";

/// Directory under the build target holding app icons and splashscreens.
pub const TARGET_IMAGE_PATH: &str = "pwa";

/// Scalable app icon used for standard icon sizes without a PNG rendition.
pub const APP_ICON_SVG_PATH: &str = "pwa/std/appicon.svg";

/// Colour used when the PWA section does not name a background colour.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#000000";

/// Service worker SDK version used when the content manifest does not pin one.
pub const SW_CURRENT_VERSION: &str = "0.8.2";

/// Base URL of the hosted script CDN.
pub const CDN_URL: &str = "//cdn.locomote.sh";

/// Placeholder resolved by the service worker client to the scope's worker script.
pub const SW_URL_PLACEHOLDER: &str = "{locomote-scope-prefix}/sw.js";

/// Apple status bar styles accepted verbatim.
pub const STATUS_BAR_STYLES: [&str; 3] = ["default", "black", "black-translucent"];

/// App icon definitions.
pub static APP_ICONS: [AssetDescriptor; 6] = [
  AssetDescriptor::icon(120, PlatformTarget::Ios),
  AssetDescriptor::icon(152, PlatformTarget::Ios),
  AssetDescriptor::icon(167, PlatformTarget::Ios),
  AssetDescriptor::icon(180, PlatformTarget::Ios),
  AssetDescriptor::icon(192, PlatformTarget::Std),
  AssetDescriptor::icon(512, PlatformTarget::Std),
];

/// Splashscreen definitions.
pub static SPLASHSCREENS: [AssetDescriptor; 8] = [
  // iPhone 5
  AssetDescriptor::splash(640, 1136, 320, 568, 2),
  // iPhone 6
  AssetDescriptor::splash(750, 1334, 375, 667, 2),
  // iPhone+
  AssetDescriptor::splash(1863, 3312, 621, 1104, 3),
  // iPhone X
  AssetDescriptor::splash(1125, 2436, 375, 812, 3),
  // iPad
  AssetDescriptor::splash(1536, 2048, 768, 1024, 2),
  // iPad Pro 1
  AssetDescriptor::splash(1668, 2224, 834, 1112, 2),
  // iPad Pro 2
  AssetDescriptor::splash(2048, 2732, 1024, 1366, 2),
  // Android etc.
  AssetDescriptor::icon(512, PlatformTarget::Std),
];

/// App icons for the given platform, in catalog order.
pub fn app_icons(target: PlatformTarget) -> impl Iterator<Item = &'static AssetDescriptor> {
  APP_ICONS.iter().filter(move |icon| icon.target == target)
}

/// Splashscreens for the given platform, in catalog order.
pub fn splashscreens(target: PlatformTarget) -> impl Iterator<Item = &'static AssetDescriptor> {
  SPLASHSCREENS
    .iter()
    .filter(move |splash| splash.target == target)
}

/// PWA section layered under an authored `pwa` object.
pub fn default_pwa_section() -> &'static Map<String, Value> {
  static DEFAULTS: OnceLock<Map<String, Value>> = OnceLock::new();
  DEFAULTS.get_or_init(|| {
    object(json!({
      "name": "",
      "short_name": "",
      "background_color": DEFAULT_BACKGROUND_COLOR,
      "ios": {
        "showInstallBanner": true
      }
    }))
  })
}

/// Content manifest used when the build source has no manifest file.
pub fn default_content_manifest() -> &'static Map<String, Value> {
  static DEFAULTS: OnceLock<Map<String, Value>> = OnceLock::new();
  DEFAULTS.get_or_init(|| {
    let mut manifest = Map::new();
    manifest.insert("pwa".into(), Value::Object(default_pwa_section().clone()));
    manifest
  })
}

/// Web manifest values layered under the PWA settings.
pub fn default_web_manifest() -> &'static Map<String, Value> {
  static DEFAULTS: OnceLock<Map<String, Value>> = OnceLock::new();
  DEFAULTS.get_or_init(|| object(json!({ "display": "standalone" })))
}

/// URL of the service worker client script for an SDK version.
pub fn sw_client_url(version: &str) -> String {
  format!("{CDN_URL}/sw/{version}/locomote-sw-client.js")
}

/// URL of a named service worker plugin for an SDK version.
///
/// `__sw` is the core service worker; returns `None` for unknown plugins.
pub fn sw_plugin_url(plugin: &str, version: &str) -> Option<String> {
  let file = match plugin {
    "__sw" => "locomote-sw.js",
    "search" => "locomote-search.js",
    _ => return None,
  };
  Some(format!("{CDN_URL}/sw/{version}/{file}"))
}

/// URL of the iOS install banner script.
pub fn install_banner_js_url() -> String {
  format!("{CDN_URL}/ios-install-banner/index.js")
}

/// URL of the iOS install banner stylesheet.
pub fn install_banner_css_url() -> String {
  format!("{CDN_URL}/ios-install-banner/styles.css")
}

fn object(value: Value) -> Map<String, Value> {
  match value {
    Value::Object(map) => map,
    _ => Map::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn partitions_catalogs_by_platform() {
    assert_eq!(app_icons(PlatformTarget::Ios).count(), 4);
    assert_eq!(app_icons(PlatformTarget::Std).count(), 2);
    assert_eq!(splashscreens(PlatformTarget::Ios).count(), 7);
    assert_eq!(splashscreens(PlatformTarget::Std).count(), 1);
  }

  #[test]
  fn versioned_urls_embed_version() {
    assert_eq!(
      sw_client_url("1.2.3"),
      "//cdn.locomote.sh/sw/1.2.3/locomote-sw-client.js"
    );
    assert_eq!(
      sw_plugin_url("__sw", "1.2.3").as_deref(),
      Some("//cdn.locomote.sh/sw/1.2.3/locomote-sw.js")
    );
    assert_eq!(
      sw_plugin_url("search", "0.8.2").as_deref(),
      Some("//cdn.locomote.sh/sw/0.8.2/locomote-search.js")
    );
    assert!(sw_plugin_url("unknown", "0.8.2").is_none());
  }

  #[test]
  fn default_manifest_carries_pwa_defaults() {
    let pwa = default_content_manifest()
      .get("pwa")
      .and_then(Value::as_object)
      .unwrap();
    assert_eq!(pwa.get("background_color"), Some(&json!("#000000")));
    assert_eq!(pwa["ios"]["showInstallBanner"], json!(true));
    assert_eq!(default_web_manifest().get("display"), Some(&json!("standalone")));
  }
}
