//! Content manifest loading broken into focused submodules for easier testing.

mod layers;
mod loader;

pub use layers::{fill_defaults, merge_layers};
pub use loader::{load_manifest, parse_manifest, resolve_manifest_path};
