//! CLI argument definitions for the Tembea terminal assistant.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;
use tembea_core::types::Role;
use tembea_core::TembeaConfig;

/// Tembea: chat with a Kenya travel assistant from the terminal.
#[derive(Parser, Debug)]
#[command(name = "tembea", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Role to chat as (traveler, host, admin).
    #[arg(short = 'r', long = "role", default_value = "traveler")]
    pub role: Role,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Places catalog JSON, replacing the bundled one.
    #[arg(long = "places")]
    pub places: Option<PathBuf>,

    /// Events catalog JSON, replacing the bundled one.
    #[arg(long = "events")]
    pub events: Option<PathBuf>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > TEMBEA_CONFIG env var > ~/.tembea/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("TEMBEA_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Log filter directive: --log-level flag > config file value.
    pub fn resolve_log_level(&self, config: &TembeaConfig) -> String {
        self.log_level
            .clone()
            .unwrap_or_else(|| config.general.log_level.clone())
    }

    /// Write catalog path overrides into `config`.
    pub fn apply_overrides(&self, config: &mut TembeaConfig) {
        if let Some(ref p) = self.places {
            config.catalog.places_path = Some(p.to_string_lossy().to_string());
        }
        if let Some(ref p) = self.events {
            config.catalog.events_path = Some(p.to_string_lossy().to_string());
        }
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".tembea").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".tembea").join("config.toml");
    }
    PathBuf::from("config.toml")
}
