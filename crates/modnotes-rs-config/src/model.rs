//! Configuration schema for the mod notes client.

use serde::{Deserialize, Serialize};

/// Root config for the mod notes client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModNotesConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub notes: NotesConfig,
}

impl ModNotesConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> ModNotesConfigBuilder {
        ModNotesConfigBuilder::new()
    }
}

/// Builder for assembling a `ModNotesConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct ModNotesConfigBuilder {
    config: ModNotesConfig,
}

impl ModNotesConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: ModNotesConfig::default(),
        }
    }

    /// Replace the API connection configuration.
    pub fn api(mut self, api: ApiConfig) -> Self {
        self.config.api = api;
        self
    }

    /// Replace the notes defaults.
    pub fn notes(mut self, notes: NotesConfig) -> Self {
        self.config.notes = notes;
        self
    }

    /// Set the bearer token sent with every request.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config.api.access_token = Some(token.into());
        self
    }

    /// Bind a default subreddit for calls that do not name one.
    pub fn subreddit(mut self, subreddit: impl Into<String>) -> Self {
        self.config.notes.subreddit = Some(subreddit.into());
        self
    }

    /// Finalize and return the built `ModNotesConfig`.
    pub fn build(self) -> ModNotesConfig {
        self.config
    }
}

/// Connection settings for the HTTP transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// OAuth bearer token obtained out of band.
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: default_user_agent(),
            access_token: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_base_url() -> String {
    "https://oauth.reddit.com".to_string()
}

fn default_user_agent() -> String {
    format!("modnotes-rs/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_ms() -> u64 {
    30_000
}

/// Defaults applied to note queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Subreddit used when a call names none.
    #[serde(default)]
    pub subreddit: Option<String>,
    /// Total notes a listing yields by default; `None` means no cap.
    #[serde(default = "default_listing_limit")]
    pub listing_limit: Option<usize>,
    /// Notes requested per listing page.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            subreddit: None,
            listing_limit: default_listing_limit(),
            page_size: default_page_size(),
        }
    }
}

fn default_listing_limit() -> Option<usize> {
    Some(100)
}

fn default_page_size() -> usize {
    modnotes_rs_protocol::MAX_PAGE_SIZE
}
