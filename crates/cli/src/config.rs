//! Configuration management for the CLI

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration
///
/// Layered from `~/.config/appdiag/config.json` (or an explicit path) and
/// `APPDIAG_*` environment variables, the latter taking precedence.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Default output format (table or json)
    #[serde(default)]
    pub default_format: Option<String>,

    /// Log line format (text or json)
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: None,
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from the config file and environment
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        let path = match override_path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::config_path(),
        };
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Json)
                    .required(override_path.is_some()),
            );
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("APPDIAG"))
            .build()
            .context("Failed to load configuration")?;

        settings
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Output format to use when none is given on the command line
    pub fn output_format(&self) -> OutputFormat {
        match self.default_format.as_deref().map(str::to_lowercase).as_deref() {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Table,
        }
    }

    /// Get the configuration file path
    fn config_path() -> Option<PathBuf> {
        let home = dirs_next::home_dir()?;
        Some(home.join(".config").join("appdiag").join("config.json"))
    }
}
