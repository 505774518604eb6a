//! Backend configuration.
//!
//! Sources in order of precedence (later sources override earlier):
//! 1. Bundled defaults (`runscope.toml` shipped with the crate)
//! 2. `~/.config/runscope/runscope.toml`
//! 3. `./runscope.toml`
//! 4. An explicitly supplied file
//! 5. `SUPABASE_URL` / `SUPABASE_SERVICE_KEY` (or their `VITE_` prefixed forms)
//!
//! A missing endpoint or key is logged but never fails loading; calls made with
//! such a configuration fail individually.

use config::{Config, File, FileFormat};
use runscope_error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error, instrument};

const DEFAULT_CONFIG: &str = include_str!("../../../runscope.toml");

const URL_VARS: [&str; 2] = ["SUPABASE_URL", "VITE_SUPABASE_URL"];
const KEY_VARS: [&str; 2] = ["SUPABASE_SERVICE_KEY", "VITE_SUPABASE_SERVICE_KEY"];

/// Names of the backend collections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TableNames {
    /// Search runs
    pub runs: String,
    /// Step logs of search runs
    pub step_logs: String,
    /// Chat messages
    pub chat_messages: String,
    /// User profiles
    pub user_profiles: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            runs: "nutri_search_runs".to_string(),
            step_logs: "nutri_search_step_logs".to_string(),
            chat_messages: "chat_messages".to_string(),
            user_profiles: "user_profiles".to_string(),
        }
    }
}

fn default_run_limit() -> usize {
    50
}

fn default_chat_message_limit() -> usize {
    500
}

/// Connection and query settings for the hosted backend.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://abc.supabase.co`
    #[serde(default)]
    pub url: String,
    /// Service credential sent with every request
    #[serde(default)]
    pub service_key: String,
    /// Number of runs listed by default
    #[serde(default = "default_run_limit")]
    pub run_limit: usize,
    /// Ceiling on messages fetched for one user
    #[serde(default = "default_chat_message_limit")]
    pub chat_message_limit: usize,
    /// Collection names
    #[serde(default)]
    pub tables: TableNames,
}

impl std::fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendConfig")
            .field("url", &self.url)
            .field("service_key", &if self.service_key.is_empty() { "" } else { "<redacted>" })
            .field("run_limit", &self.run_limit)
            .field("chat_message_limit", &self.chat_message_limit)
            .field("tables", &self.tables)
            .finish()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            service_key: String::new(),
            run_limit: default_run_limit(),
            chat_message_limit: default_chat_message_limit(),
            tables: TableNames::default(),
        }
    }
}

impl BackendConfig {
    /// Load configuration from all sources, see the module docs for precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be parsed or `explicit` does
    /// not exist. Missing credentials are not an error.
    #[instrument(skip(explicit))]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        debug!("Loading backend configuration");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/runscope/runscope.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("runscope").required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path));
        }

        let mut config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.apply_env();
        config.report_missing();
        Ok(config)
    }

    /// Override the endpoint URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Override the service key.
    pub fn with_service_key(mut self, key: impl Into<String>) -> Self {
        self.service_key = key.into();
        self
    }

    /// Whether both the endpoint and the credential are present.
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.service_key.trim().is_empty()
    }

    fn apply_env(&mut self) {
        if let Some(url) = first_env(&URL_VARS) {
            self.url = url;
        }
        if let Some(key) = first_env(&KEY_VARS) {
            self.service_key = key;
        }
    }

    fn report_missing(&self) {
        if self.url.trim().is_empty() || self.service_key.trim().is_empty() {
            error!(
                url_set = !self.url.trim().is_empty(),
                key_set = !self.service_key.trim().is_empty(),
                "Backend credentials are missing. Set SUPABASE_URL and SUPABASE_SERVICE_KEY"
            );
        }
    }
}

fn first_env(names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
