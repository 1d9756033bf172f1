mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

use crate::error::PolyglotError;
use crate::locale::LocaleSettings;
use defaults::*;

/// Top-level Polyglot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub polyglot: PolyglotConfig,
    #[serde(default)]
    pub locales: LocaleConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolyglotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for PolyglotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            log_level: default_log_level(),
        }
    }
}

/// Locale configuration -- the deployment's default and available locales.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleConfig {
    #[serde(default = "default_locale")]
    pub default: String,
    /// Locales offered by the site. Empty = only the default locale.
    #[serde(default = "default_available_locales")]
    pub available: Vec<String>,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            default: default_locale(),
            available: default_available_locales(),
        }
    }
}

impl LocaleConfig {
    /// Validate the configured locales and build the settings handed to the resolver.
    pub fn validate(&self) -> Result<LocaleSettings, PolyglotError> {
        if !self.available.is_empty() && !self.available.contains(&self.default) {
            warn!(
                "default locale '{}' missing from available locales, adding it",
                self.default
            );
        }
        LocaleSettings::new(&self.default, self.available.iter().map(String::as_str))
    }
}

/// Content store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_backend")]
    pub backend: String,
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_store_backend(),
            db_path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, PolyglotError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| PolyglotError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    parse(&content)
}

/// Parse configuration from TOML text.
pub fn parse(content: &str) -> Result<Config, PolyglotError> {
    toml::from_str(content)
        .map_err(|e| PolyglotError::Config(format!("failed to parse config: {}", e)))
}
