//! Layered configuration loader.
//!
//! Discovers configuration layers (user, cwd, runtime overrides), validates
//! each against the schema, merges them in precedence order, and produces a
//! final `ModNotesConfig`.

mod layer_io;
mod merge;
mod schema;


use crate::{ConfigError, ModNotesConfig};
use log::{debug, info};
use modnotes_rs_protocol::MAX_PAGE_SIZE;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config filename in local layers.
const DEFAULT_CONFIG_FILE: &str = "modnotes.json5";
/// Default config directory under the user's home.
const DEFAULT_CONFIG_DIR: &str = ".modnotes";

/// Effective config plus metadata about which layers were loaded.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// The merged, validated config.
    pub config: ModNotesConfig,
    /// Metadata for each layer that contributed to the config.
    pub layers: Vec<ConfigLayer>,
}

/// Origin for a single config layer in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// User-specific configuration.
    User,
    /// Current working directory configuration.
    Cwd,
    /// Runtime overrides (highest precedence).
    Runtime,
}

/// Metadata about a loaded config layer.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    /// Layer origin.
    pub source: ConfigLayerSource,
    /// Location on disk.
    pub path: PathBuf,
}

/// Options controlling layered config discovery and overrides.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Working directory holding the cwd layer.
    pub cwd: PathBuf,
    /// Optional user config path (defaults to `~/.modnotes/modnotes.json5`).
    pub user_config_path: Option<PathBuf>,
    /// Runtime override config paths applied last, in order.
    pub runtime_paths: Vec<PathBuf>,
}

impl LayeredConfigOptions {
    /// Create options with default layer locations for the provided cwd.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        Self {
            cwd: cwd.as_ref().to_path_buf(),
            user_config_path: layer_io::default_user_config_path(),
            runtime_paths: Vec::new(),
        }
    }

    /// Replace the user config path (`None` skips the user layer).
    pub fn with_user_path(mut self, path: Option<PathBuf>) -> Self {
        self.user_config_path = path;
        self
    }

    /// Add a runtime override config path that is applied last.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl ModNotesConfig {
    /// Load a single config from a path (no layering).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let contents = fs::read_to_string(path)?;
        let value: Value = json5::from_str(&contents)?;
        config_from_value(value, "config")
    }

    /// Load a single config from JSON5 contents (no layering).
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value: Value = json5::from_str(contents)?;
        config_from_value(value, "config")
    }

    /// Load a layered config stack using the default layer locations.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        info!(
            "loading layered config with defaults (cwd={})",
            cwd.as_ref().display()
        );
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load a layered config stack using explicit layer locations and overrides.
    ///
    /// Layer precedence (low -> high): user, cwd, runtime overrides. User and
    /// cwd layers are optional; runtime override files must exist.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let cwd = canonical_or_self(&options.cwd);
        debug!("normalized cwd for config load: {}", cwd.display());
        let mut layers = Vec::new();
        let mut merge_layers = Vec::new();
        let mut seen_paths = HashSet::new();

        let cwd_path = cwd.join(DEFAULT_CONFIG_FILE);
        for (source, path) in [
            (ConfigLayerSource::User, options.user_config_path.as_deref()),
            (ConfigLayerSource::Cwd, Some(cwd_path.as_path())),
        ] {
            let Some(layer) = layer_io::load_optional_layer(source, path)? else {
                continue;
            };
            if !seen_paths.insert(canonical_or_self(&layer.meta.path)) {
                debug!(
                    "skipping duplicate layer (source={:?}, path={})",
                    source,
                    layer.meta.path.display()
                );
                continue;
            }
            debug!("loaded {:?} layer", source);
            layers.push(layer.meta.clone());
            merge_layers.push(layer);
        }

        for runtime_path in &options.runtime_paths {
            let loaded = layer_io::load_required_layer(ConfigLayerSource::Runtime, runtime_path)?;
            debug!("loaded runtime layer (path={})", runtime_path.display());
            layers.push(loaded.meta.clone());
            merge_layers.push(loaded);
        }

        let mut merged = Value::Object(serde_json::Map::new());
        for layer in merge_layers {
            merge::merge_json_values(&mut merged, &layer.value);
        }

        let config = config_from_value(merged, "effective")?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid("api.base_url cannot be empty".to_string()));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::Invalid(
                "api.base_url must be an http(s) URL".to_string(),
            ));
        }
        if self.api.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "api.user_agent cannot be empty".to_string(),
            ));
        }
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "api.timeout_ms must be positive".to_string(),
            ));
        }
        if self.notes.page_size == 0 || self.notes.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "notes.page_size must be between 1 and {MAX_PAGE_SIZE}"
            )));
        }
        if let Some(subreddit) = &self.notes.subreddit {
            if subreddit.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "notes.subreddit cannot be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Internal representation of a loaded config layer.
#[derive(Debug, Clone)]
struct LoadedLayer {
    meta: ConfigLayer,
    value: Value,
}

/// Canonical form of `path`, or `path` itself when it cannot be resolved.
fn canonical_or_self(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn config_from_value(value: Value, label: &str) -> Result<ModNotesConfig, ConfigError> {
    schema::validate_layer_schema(&value, label)?;
    let config: ModNotesConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
