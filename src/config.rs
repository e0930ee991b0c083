use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::Result;

/// Configuration settings for monthline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_data_directory")]
    pub data_directory: String,

    /// Below this terminal width the gantt view falls back to list mode.
    #[serde(default = "default_list_mode_breakpoint")]
    pub list_mode_breakpoint: u16,

    /// Empty rows appended under the placed bars so a create drag has
    /// open space without scrolling.
    #[serde(default = "default_trailing_empty_rows")]
    pub trailing_empty_rows: usize,

    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
}

fn default_data_directory() -> String {
    "~".to_string()
}

fn default_list_mode_breakpoint() -> u16 {
    70
}

fn default_trailing_empty_rows() -> usize {
    3
}

fn default_tick_rate_ms() -> u64 {
    250
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory(),
            list_mode_breakpoint: default_list_mode_breakpoint(),
            trailing_empty_rows: default_trailing_empty_rows(),
            tick_rate_ms: default_tick_rate_ms(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.monthline.json)
    fn config_file_path() -> PathBuf {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".monthline.json")
    }

    /// Ensure the config file exists, creating it with defaults if not
    fn ensure_config_file() -> Result<()> {
        let config_path = Self::config_file_path();
        if !config_path.exists() {
            let default_config = Config::default();
            let data = serde_json::to_string_pretty(&default_config)?;
            fs::write(&config_path, data)?;
        }
        Ok(())
    }

    /// Format a data directory path, expanding ~ to home directory
    fn format_data_dir(path: &str) -> PathBuf {
        if path.starts_with('~') {
            let home = dirs::home_dir().expect("Could not find home directory");
            let rest = path.trim_start_matches('~').trim_start_matches('/');
            if rest.is_empty() {
                home
            } else {
                home.join(rest)
            }
        } else {
            PathBuf::from(path)
        }
    }

    /// Load configuration from file, merging with defaults
    pub fn load() -> Result<Self> {
        Self::ensure_config_file()?;

        let config_path = Self::config_file_path();
        let content = fs::read_to_string(&config_path)?;
        let mut config: Config = serde_json::from_str(&content)?;

        if config.data_directory.starts_with('~') {
            config.data_directory = Self::format_data_dir(&config.data_directory)
                .to_string_lossy()
                .to_string();
        }

        Ok(config)
    }

    /// Get the resolved data directory path
    pub fn get_data_directory(&self) -> PathBuf {
        Self::format_data_dir(&self.data_directory)
    }
}
