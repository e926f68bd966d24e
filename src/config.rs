//! Configuration module
//!
//! Reads `config.toml` from `$ERP_CONFIG` or the user config directory
//! (`~/.config/erp-service/config.toml` on Linux). Every section is optional.
//!
//! ```toml
//! [database]
//! url = "sqlite://./erp.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [pagination]
//! default_limit = 20
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;
use validator::Validate;

use crate::infrastructure::database::DatabaseConfig;
use crate::shared::{InfraError, DEFAULT_LIMIT};

/// Environment variable that overrides the config file location
pub const CONFIG_PATH_ENV: &str = "ERP_CONFIG";

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    #[validate(nested)]
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `info` or `erp_core=debug,sea_orm=warn`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Validate)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when a request does not specify one
    #[validate(range(min = 1, max = 100))]
    pub default_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
        }
    }
}

impl AppConfig {
    /// Load from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|e| InfraError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, InfraError> {
        let config: Self =
            toml::from_str(raw).map_err(|e| InfraError::Config(e.to_string()))?;
        config
            .validate()
            .map_err(|e| InfraError::Config(e.to_string()))?;
        Ok(config)
    }
}

/// Default config location: `$ERP_CONFIG`, else `<config dir>/erp-service/config.toml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("erp-service")
        .join("config.toml")
}
