use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, TembeaError};

/// Top-level configuration for the Tembea assistant.
///
/// Loaded from `~/.tembea/config.toml` by default. Every section falls back
/// to its defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TembeaConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub saved: SavedConfig,
}

impl TembeaConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TembeaConfig = toml::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Reject values the chat pipeline cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.chat.max_recommendations == 0 {
            return Err(TembeaError::Config(
                "chat.max_recommendations must be at least 1".to_string(),
            ));
        }
        if self.chat.max_message_length == 0 {
            return Err(TembeaError::Config(
                "chat.max_message_length must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// What the session does with a submission that arrives while a response
/// is still pending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPolicy {
    /// Accept it; every pending response is delivered in turn.
    #[default]
    Allow,
    /// Refuse it until the pending response has been appended.
    Reject,
}

/// Chat assistant configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Whether the assistant accepts messages at all.
    pub enabled: bool,
    /// Simulated typing delay for free-text messages, in milliseconds.
    pub typing_delay_ms: u64,
    /// Simulated typing delay for trip planner selections, in milliseconds.
    pub planner_delay_ms: u64,
    /// Maximum recommendations attached to a single reply.
    pub max_recommendations: usize,
    /// Maximum accepted message length in characters.
    pub max_message_length: usize,
    /// Handling of submissions while a response is pending.
    pub submit_policy: SubmitPolicy,
    /// Open every session with the assistant greeting.
    pub greeting: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            typing_delay_ms: 1500,
            planner_delay_ms: 1000,
            max_recommendations: 3,
            max_message_length: 2000,
            submit_policy: SubmitPolicy::Allow,
            greeting: true,
        }
    }
}

/// Content catalog locations. Unset paths use the bundled dataset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Path to a `places.json` file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub places_path: Option<String>,
    /// Path to an `events.json` file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events_path: Option<String>,
}

/// Ids of the places and events the user has saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedConfig {
    pub place_ids: Vec<String>,
    pub event_ids: Vec<String>,
}

impl Default for SavedConfig {
    fn default() -> Self {
        Self {
            place_ids: vec!["masai-mara".to_string(), "diani-beach".to_string()],
            event_ids: vec![
                "lamu-cultural-festival".to_string(),
                "nairobi-food-festival".to_string(),
            ],
        }
    }
}
