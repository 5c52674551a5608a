//! Persistent desk settings.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

const DEFAULT_LOG_FILTER: &str = "frontdesk=info,frontdesk_core=info";

/// Settings read from `settings.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// IANA time zone used for date filters and printed dates.
    pub timezone: String,
    /// Database location; defaults to the data directory.
    pub database_path: Option<PathBuf>,
    /// Log filter used when `RUST_LOG` is unset.
    pub log_filter: Option<String>,
    /// Heading of printed listings.
    pub print_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            database_path: None,
            log_filter: None,
            print_title: "Posts List".to_string(),
        }
    }
}

impl Settings {
    /// `<config dir>/frontdesk/settings.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("frontdesk")
            .join("settings.json")
    }

    /// Load settings, falling back to defaults when the file is missing.
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Invalid settings file {}", path.display()))
    }

    /// Parsed presentation time zone.
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow!("Unknown time zone {:?}: {e}", self.timezone))
    }

    /// Database location, creating its parent directory.
    pub fn database_path(&self) -> Result<PathBuf> {
        let path = self.database_path.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("frontdesk")
                .join("frontdesk.db")
        });

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        Ok(path)
    }

    /// Log filter to use when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }
}
