#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod asset_paths;
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod header;
pub mod manifest;
pub mod models;
pub mod page;
pub mod settings;
pub mod support;
pub mod tag;
pub mod web_manifest;

pub use asset_paths::AssetAvailability;
pub use builder::{BuildContext, PwaBuilder};
pub use config::BuildOptions;
pub use error::{BuildError, BuildResult};
pub use page::PageContext;
pub use tag::{PwaHeaderTag, SiteContext};
