//! Discovery of the optional icon, splashscreen and manifest files in a build target.
//!
//! Every image lives at a conventional, forward-slash path derived from its descriptor
//! (`pwa/{platform}/{W}x{H}.png`), so probing reduces to a set of independent existence
//! checks. When no target is supplied the probe is optimistic and reports every asset as
//! present, which lets headers be rendered before the images have been generated.

mod probe;

pub use probe::{AssetAvailability, file_available, find_available};
