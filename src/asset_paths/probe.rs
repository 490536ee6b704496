use std::collections::BTreeSet;
use std::path::Path;

use rayon::prelude::*;
use tracing::debug;

use crate::error::{BuildError, BuildResult};
use crate::models::AssetDescriptor;
use crate::settings::{APP_ICON_SVG_PATH, APP_ICONS, SPLASHSCREENS, WEB_MANIFEST_NAME};
use crate::support::file_exists;

/// Determine which descriptors have an image at their conventional path under `target_dir`.
///
/// Without a target directory every descriptor is reported as available, so headers can be
/// previewed before the build output exists. Checks run in parallel and are joined before
/// returning; a failure other than "not found" aborts the whole call.
pub fn find_available(
  target_dir: Option<&Path>,
  descriptors: &[AssetDescriptor],
) -> BuildResult<BTreeSet<AssetDescriptor>> {
  let Some(target_dir) = target_dir else {
    return Ok(descriptors.iter().copied().collect());
  };

  let checks: Vec<(AssetDescriptor, bool)> = descriptors
    .par_iter()
    .map(|descriptor| -> BuildResult<(AssetDescriptor, bool)> {
      let present = target_file_exists(target_dir, &descriptor.relative_path())?;
      Ok((*descriptor, present))
    })
    .collect::<BuildResult<_>>()?;

  Ok(
    checks
      .into_iter()
      .filter_map(|(descriptor, present)| present.then_some(descriptor))
      .collect(),
  )
}

/// Check for a single optional file under the target, using the same optimistic policy.
pub fn file_available(target_dir: Option<&Path>, relative_path: &str) -> BuildResult<bool> {
  match target_dir {
    Some(dir) => target_file_exists(dir, relative_path),
    None => Ok(true),
  }
}

fn target_file_exists(target_dir: &Path, relative_path: &str) -> BuildResult<bool> {
  let path = target_dir.join(relative_path);
  file_exists(&path).map_err(|err| BuildError::io(&path, err))
}

/// Snapshot of which optional target assets exist for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetAvailability {
  descriptors: BTreeSet<AssetDescriptor>,
  web_manifest: bool,
  svg_icon: bool,
}

impl AssetAvailability {
  /// Availability used when no build target exists yet: everything is assumed present.
  pub fn assumed() -> Self {
    Self {
      descriptors: APP_ICONS.iter().chain(SPLASHSCREENS.iter()).copied().collect(),
      web_manifest: true,
      svg_icon: true,
    }
  }

  /// Build an availability snapshot from explicit parts.
  pub fn from_parts(
    descriptors: impl IntoIterator<Item = AssetDescriptor>,
    web_manifest: bool,
    svg_icon: bool,
  ) -> Self {
    Self {
      descriptors: descriptors.into_iter().collect(),
      web_manifest,
      svg_icon,
    }
  }

  /// Probe the full icon and splashscreen catalog plus the optional manifest and SVG icon.
  pub fn probe(target_dir: Option<&Path>) -> BuildResult<Self> {
    let Some(dir) = target_dir else {
      debug!("no build target given, assuming all PWA assets exist");
      return Ok(Self::assumed());
    };

    let catalog: Vec<AssetDescriptor> =
      APP_ICONS.iter().chain(SPLASHSCREENS.iter()).copied().collect();
    let ((descriptors, web_manifest), svg_icon) = rayon::join(
      || {
        rayon::join(
          || find_available(Some(dir), &catalog),
          || file_available(Some(dir), WEB_MANIFEST_NAME),
        )
      },
      || file_available(Some(dir), APP_ICON_SVG_PATH),
    );

    let availability = Self {
      descriptors: descriptors?,
      web_manifest: web_manifest?,
      svg_icon: svg_icon?,
    };
    debug!(
      dir = %dir.display(),
      images = availability.descriptors.len(),
      web_manifest = availability.web_manifest,
      svg_icon = availability.svg_icon,
      "probed PWA assets"
    );
    Ok(availability)
  }

  /// Whether the image for `descriptor` is available.
  pub fn contains(&self, descriptor: &AssetDescriptor) -> bool {
    self.descriptors.contains(descriptor)
  }

  /// Whether the target holds a web manifest.
  pub fn has_web_manifest(&self) -> bool {
    self.web_manifest
  }

  /// Whether the target holds the scalable fallback app icon.
  pub fn has_svg_icon(&self) -> bool {
    self.svg_icon
  }
}
