//! User settings and preferences
//!
//! Manages settings stored in ~/.sqlcell/config.toml

use crate::config::ConnectionConfig;
use crate::detect::DEFAULT_SQL_MAGIC;
use crate::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Magic prefix marking SQL lines and cells
    #[serde(default = "default_sql_magic")]
    pub sql_magic: String,

    /// Words never taken as a table alias, on top of the join keywords
    #[serde(default = "default_reserved_aliases")]
    pub reserved_aliases: Vec<String>,
}

fn default_log_filter() -> String {
    "warn".to_string()
}

fn default_sql_magic() -> String {
    DEFAULT_SQL_MAGIC.to_string()
}

fn default_reserved_aliases() -> Vec<String> {
    [
        "on", "using", "where", "group", "order", "having", "limit", "offset", "cross", "outer",
        "natural", "lateral",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
            sql_magic: default_sql_magic(),
            reserved_aliases: default_reserved_aliases(),
        }
    }
}

/// Load settings from the default config file
pub fn load_settings() -> ConfigResult<Settings> {
    load_settings_from(&ConnectionConfig::config_dir()?.join("config.toml"))
}

/// Load settings from `path`; a missing file means defaults
pub fn load_settings_from(path: &Path) -> ConfigResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::NotFound(format!("Failed to read settings file: {}", e)))?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}
