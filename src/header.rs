//! Composition of the PWA `<head>` section for a page.
//!
//! The header is assembled as an ordered list of blocks. A block whose preconditions are
//! not met is dropped entirely, and the remaining blocks are separated by a single blank
//! line, so omitted sections never leave stray separators behind.

use maud::html;
use tracing::warn;

use crate::asset_paths::AssetAvailability;
use crate::config::BuildOptions;
use crate::error::BuildResult;
use crate::models::{ContentManifest, PlatformTarget, PwaSettings};
use crate::page::PageContext;
use crate::settings::{
  STATUS_BAR_STYLES, SW_CURRENT_VERSION, SW_URL_PLACEHOLDER, WEB_MANIFEST_NAME, app_icons,
  install_banner_css_url, install_banner_js_url, splashscreens, sw_client_url,
};

/// Render the head section for `page`.
pub fn compose_header(
  options: &BuildOptions,
  manifest: &ContentManifest,
  availability: &AssetAvailability,
  page: &PageContext,
) -> BuildResult<String> {
  let pwa = manifest.pwa.as_ref();
  let mut printer = Printer::new(options.indent());

  let mut head = vec![
    r#"<meta charset="utf-8" />"#.to_string(),
    r#"<meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no" />"#
      .to_string(),
  ];
  if let Some(pwa) = pwa {
    head.push(format!(
      r#"<meta name="theme-color" content="{}" />"#,
      escape(&pwa.background_color)
    ));
  }
  printer.block(head);

  printer.block([format!("<title>{}</title>", escape(&page_title(manifest)))]);

  if let Some(pwa) = pwa {
    if availability.has_web_manifest() {
      printer.block([format!(r#"<link rel="manifest" href="{WEB_MANIFEST_NAME}" />"#)]);
    }

    printer.block(
      app_icons(PlatformTarget::Ios)
        .filter(|icon| availability.contains(icon))
        .map(|icon| {
          format!(
            r#"<link rel="apple-touch-icon" sizes="{}" href="{}" />"#,
            icon.size_label(),
            icon.relative_path()
          )
        }),
    );

    printer.block(
      splashscreens(PlatformTarget::Ios)
        .filter(|splash| availability.contains(splash))
        .filter_map(|splash| {
          let device = splash.device?;
          Some(format!(
            r#"<link rel="apple-touch-startup-image" href="{}" media="(device-width: {}px) and (device-height: {}px) and (-webkit-device-pixel-ratio: {})" />"#,
            splash.relative_path(),
            device.width,
            device.height,
            device.pixel_ratio
          ))
        }),
    );

    printer.block([
      format!(
        r#"<meta name="apple-mobile-web-app-title" content="{}" />"#,
        escape(&pwa.short_name)
      ),
      format!(
        r#"<meta name="apple-mobile-web-app-capable" content="{}" />"#,
        web_app_capable(pwa)
      ),
      format!(
        r#"<meta name="apple-mobile-web-app-status-bar-style" content="{}" />"#,
        status_bar_style(pwa)
      ),
    ]);
  }

  if let Some(worker) = &manifest.service_worker {
    let version = worker.version.as_deref().unwrap_or(SW_CURRENT_VERSION);
    let url = options
      .service_worker_url
      .as_deref()
      .unwrap_or(SW_URL_PLACEHOLDER);
    printer.block([
      format!(
        r#"<meta name="locomote-service-worker-url" content="{}" />"#,
        escape(url)
      ),
      format!(
        r#"<script defer src="{}"></script>"#,
        escape(&sw_client_url(version))
      ),
    ]);
  }

  if pwa.is_some_and(|pwa| pwa.ios.show_install_banner) {
    printer.block([
      format!(
        r#"<link rel="stylesheet" href="{}" />"#,
        install_banner_css_url()
      ),
      format!(
        r#"<script defer src="{}"></script>"#,
        install_banner_js_url()
      ),
    ]);
  }

  if let Some(front_matter) = page.front_matter() {
    let json = serde_json::to_string(front_matter)?;
    printer.block([format!(
      r#"<meta name="locomote:frontmatter" content="{}" />"#,
      escape(&json)
    )]);
  }

  Ok(printer.finish())
}

/// Page title: the PWA name, else the site title, else empty.
fn page_title(manifest: &ContentManifest) -> String {
  manifest
    .pwa
    .as_ref()
    .map(|pwa| pwa.name.as_str())
    .filter(|name| !name.is_empty())
    .or(manifest.site.title.as_deref())
    .unwrap_or_default()
    .to_string()
}

fn web_app_capable(pwa: &PwaSettings) -> &'static str {
  if is_fullscreen(pwa) { "yes" } else { "no" }
}

fn status_bar_style(pwa: &PwaSettings) -> &str {
  if let Some(style) = pwa.ios.status_bar_style.as_deref() {
    if STATUS_BAR_STYLES.contains(&style) {
      return style;
    }
    warn!(style, "ignoring unsupported iOS status bar style");
  }

  if is_fullscreen(pwa) {
    "black-translucent"
  } else {
    "default"
  }
}

fn is_fullscreen(pwa: &PwaSettings) -> bool {
  pwa.display.as_deref() == Some("fullscreen")
}

fn escape(value: &str) -> String {
  html! { (value) }.into_string()
}

/// Accumulates header blocks, applying indentation and blank-line separators.
struct Printer {
  indent: String,
  trim: bool,
  result: String,
  blocks: usize,
}

impl Printer {
  fn new(indent_size: usize) -> Self {
    Self {
      indent: " ".repeat(indent_size),
      trim: indent_size == 0,
      result: String::new(),
      blocks: 0,
    }
  }

  fn block<I, S>(&mut self, lines: I)
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let mut lines = lines.into_iter().peekable();
    if lines.peek().is_none() {
      return;
    }
    if self.blocks > 0 {
      self.result.push('\n');
    }
    self.blocks += 1;

    for line in lines {
      let line = line.as_ref();
      let line = if self.trim { line.trim() } else { line };
      self.result.push_str(&self.indent);
      self.result.push_str(line);
      self.result.push('\n');
    }
  }

  fn finish(self) -> String {
    self.result
  }
}
