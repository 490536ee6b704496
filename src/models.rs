//! Data structures shared by the manifest loader and the composers.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::settings::{DEFAULT_BACKGROUND_COLOR, TARGET_IMAGE_PATH};

/// Platform whose head-tag conventions an image variant belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlatformTarget {
  /// Apple touch icons and startup images.
  Ios,
  /// Standard web-app-manifest icons.
  Std,
}

impl PlatformTarget {
  /// Directory name used for the platform under the image path.
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Ios => "ios",
      Self::Std => "std",
    }
  }
}

impl fmt::Display for PlatformTarget {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Device geometry a splashscreen is intended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceGeometry {
  /// Device width in CSS pixels.
  pub width: u32,
  /// Device height in CSS pixels.
  pub height: u32,
  /// Device pixel ratio.
  pub pixel_ratio: u32,
}

/// Static definition of one required image variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssetDescriptor {
  /// Image width in pixels.
  pub width: u32,
  /// Image height in pixels.
  pub height: u32,
  /// Target device for splashscreens; icons have none.
  pub device: Option<DeviceGeometry>,
  /// Platform the image is generated for.
  pub target: PlatformTarget,
}

impl AssetDescriptor {
  pub(crate) const fn icon(size: u32, target: PlatformTarget) -> Self {
    Self {
      width: size,
      height: size,
      device: None,
      target,
    }
  }

  pub(crate) const fn splash(
    width: u32,
    height: u32,
    device_width: u32,
    device_height: u32,
    pixel_ratio: u32,
  ) -> Self {
    Self {
      width,
      height,
      device: Some(DeviceGeometry {
        width: device_width,
        height: device_height,
        pixel_ratio,
      }),
      target: PlatformTarget::Ios,
    }
  }

  /// Size label in `WxH` form.
  pub fn size_label(&self) -> String {
    format!("{}x{}", self.width, self.height)
  }

  /// Conventional path of the image relative to the build target.
  pub fn relative_path(&self) -> String {
    format!(
      "{}/{}/{}.png",
      TARGET_IMAGE_PATH,
      self.target,
      self.size_label()
    )
  }
}

/// The site's authoring configuration read from the content manifest file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContentManifest {
  /// PWA settings; absent means no PWA metadata was requested.
  #[serde(default)]
  pub pwa: Option<PwaSettings>,
  /// The normalised `pwa` section as authored, keys in document order.
  #[serde(skip)]
  pub pwa_document: Option<Map<String, Value>>,
  /// General site settings.
  #[serde(default, deserialize_with = "null_as_default")]
  pub site: SiteSettings,
  /// Service worker settings; absent means no service worker is installed.
  #[serde(default, rename = "serviceWorker")]
  pub service_worker: Option<ServiceWorkerSettings>,
  /// Remaining top-level keys, preserved untouched.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// PWA section of the content manifest after defaults have been layered under it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PwaSettings {
  /// Application name.
  #[serde(default, deserialize_with = "null_as_default")]
  pub name: String,
  /// Short application name used on home screens.
  #[serde(default, deserialize_with = "null_as_default")]
  pub short_name: String,
  /// Background and theme colour.
  #[serde(default = "default_background_color")]
  pub background_color: String,
  /// Web app display mode.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub display: Option<String>,
  /// iOS specific settings.
  #[serde(default, deserialize_with = "null_as_default")]
  pub ios: IosSettings,
  /// Any other web manifest keys supplied by the author.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// iOS specific PWA settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IosSettings {
  /// Requested status bar style.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status_bar_style: Option<String>,
  /// Whether the iOS install banner is included.
  #[serde(default = "default_show_install_banner")]
  pub show_install_banner: bool,
  /// Remaining iOS keys.
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Default for IosSettings {
  fn default() -> Self {
    Self {
      status_bar_style: None,
      show_install_banner: default_show_install_banner(),
      extra: Map::new(),
    }
  }
}

/// General site settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SiteSettings {
  /// Site title used when the PWA name is empty.
  #[serde(default)]
  pub title: Option<String>,
  #[serde(flatten)]
  #[allow(missing_docs)]
  pub extra: Map<String, Value>,
}

/// Service worker settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceWorkerSettings {
  /// SDK version of the hosted service worker client.
  #[serde(default)]
  pub version: Option<String>,
  #[serde(flatten)]
  #[allow(missing_docs)]
  pub extra: Map<String, Value>,
}

/// Icon entry of a web app manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebManifestIcon {
  /// Icon path relative to the build target.
  pub src: String,
  /// Icon size, or the list of sizes an SVG icon stands in for.
  pub sizes: IconSizes,
}

/// The `sizes` member of a web manifest icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IconSizes {
  /// A single `WxH` size.
  Single(String),
  /// Several `WxH` sizes covered by one scalable icon.
  Many(Vec<String>),
}

fn default_background_color() -> String {
  DEFAULT_BACKGROUND_COLOR.to_string()
}

fn default_show_install_banner() -> bool {
  true
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de> + Default,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
