// src/config/mod.rs
//
// Application configuration
//
// Read once at startup from `{data_dir}/popmovies/config.json`. A missing
// file means defaults; environment variables win over the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::db::default_database_path;
use crate::domain::SortOrder;
use crate::error::{AppError, AppResult};

/// Environment variable holding the catalog API key
pub const ENV_API_KEY: &str = "TMDB_API_KEY";

/// Environment variable overriding the favorites database location
pub const ENV_DATABASE: &str = "POPMOVIES_DATABASE";

const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog API key; every network call is refused without one
    #[serde(default)]
    pub api_key: Option<String>,

    /// Favorites database file; `None` means the default data path
    #[serde(default)]
    pub database_path: Option<PathBuf>,

    #[serde(default = "default_poster_size")]
    pub poster_size: String,

    #[serde(default)]
    pub default_sort_order: SortOrder,

    /// chrono format used when showing release dates
    #[serde(default = "default_display_date_format")]
    pub display_date_format: String,
}

fn default_poster_size() -> String {
    "w500".to_string()
}

fn default_display_date_format() -> String {
    "%b %-d, %Y".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            database_path: None,
            poster_size: default_poster_size(),
            default_sort_order: SortOrder::default(),
            display_date_format: default_display_date_format(),
        }
    }
}

impl AppConfig {
    /// Load from the default location and apply environment overrides
    pub fn load() -> AppResult<Self> {
        let mut config = match default_config_path() {
            Some(path) => Self::load_from(&path)?,
            None => {
                log::warn!("No data directory available, using default configuration");
                Self::default()
            }
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            log::debug!("No configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&raw)?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Write to `path`, creating the parent directory if needed
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Apply overrides from a variable lookup; blank values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(path) = lookup(ENV_DATABASE).filter(|v| !v.trim().is_empty()) {
            self.database_path = Some(PathBuf::from(path));
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// The API key, or `MissingApiKey`
    pub fn require_api_key(&self) -> AppResult<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(AppError::MissingApiKey),
        }
    }

    /// Configured database file or the default data path
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => default_database_path(),
        }
    }
}

/// `{data_dir}/popmovies/config.json`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("popmovies").join(CONFIG_FILE_NAME))
}
