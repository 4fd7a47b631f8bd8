//! Global settings for the finances client
//!
//! Covers the responsive breakpoint, event loop timing, the startup update
//! check and the default log filter.

use serde::{Deserialize, Serialize};

use super::paths::FinancesPaths;
use crate::error::FinancesError;

/// Update check settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCheckSettings {
    /// Whether the startup update check runs at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Endpoint listing release tags (`[{"name": "v1.2.3"}, ...]`)
    #[serde(default = "default_tags_url")]
    pub tags_url: String,

    /// Where the "open changelog" hint points
    #[serde(default = "default_changelog_url")]
    pub changelog_url: String,
}

impl Default for UpdateCheckSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            tags_url: default_tags_url(),
            changelog_url: default_changelog_url(),
        }
    }
}

/// Global settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Terminal widths below this are treated as a narrow viewport
    #[serde(default = "default_narrow_breakpoint")]
    pub narrow_breakpoint: u16,

    /// Event loop tick rate in milliseconds
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Delay between mount and the startup sync
    #[serde(default = "default_startup_delay_ms")]
    pub startup_delay_ms: u64,

    #[serde(default)]
    pub update_check: UpdateCheckSettings,

    /// Filter used when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_narrow_breakpoint() -> u16 {
    100
}

fn default_tick_rate_ms() -> u64 {
    50
}

fn default_startup_delay_ms() -> u64 {
    100
}

fn default_log_filter() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tags_url() -> String {
    "https://api.github.com/repos/actualbudget/actual/tags".to_string()
}

fn default_changelog_url() -> String {
    "https://actualbudget.org/docs/releases".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            narrow_breakpoint: default_narrow_breakpoint(),
            tick_rate_ms: default_tick_rate_ms(),
            startup_delay_ms: default_startup_delay_ms(),
            update_check: UpdateCheckSettings::default(),
            log_filter: default_log_filter(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FinancesPaths) -> Result<Self, FinancesError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FinancesError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FinancesError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FinancesPaths) -> Result<(), FinancesError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FinancesError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FinancesError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
