//! Client configuration and layered config loading.
//!
//! This crate owns the config schema for the mod notes client (API endpoint,
//! credentials, listing defaults, bound subreddit) and the JSON5 layer
//! merging used to build it.

mod error;
mod loader;
mod model;

/// Public error type returned by config loading and validation APIs.
pub use error::ConfigError;
/// Layered config types and loader options.
pub use loader::{ConfigLayer, ConfigLayerSource, LayeredConfig, LayeredConfigOptions};
/// Configuration schema models.
pub use model::*;
