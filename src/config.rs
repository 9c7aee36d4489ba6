use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::constants::{DEFAULT_TICK_COUNT, DEFAULT_TICK_INTERVAL_MS};
use crate::error::{PickError, Result};

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Runtime settings, optionally read from a JSON file. Missing fields keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Cosmetic draws per spin.
    pub tick_count: u32,
    pub tick_interval_ms: u64,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
    pub recommender: RecommenderConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_count: DEFAULT_TICK_COUNT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            seed: None,
            recommender: RecommenderConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_count == 0 {
            return Err(PickError::InvalidInput(
                "tick_count must be at least 1".to_string(),
            ));
        }
        if self.recommender.enabled && self.recommender.model.trim().is_empty() {
            return Err(PickError::InvalidInput(
                "recommender.model must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Settings for the text-generation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    pub enabled: bool,
    pub model: String,
    pub base_url: String,
    /// Falls back to `GEMINI_API_KEY`, then `GOOGLE_API_KEY`.
    pub api_key: Option<String>,
    /// Transport timeout; expiry counts as a failed request.
    pub timeout_secs: u64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl RecommenderConfig {
    pub fn resolved_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }
}

/// Load settings from `path`, or defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let config: EngineConfig = serde_json::from_str(&content)?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => EngineConfig::default(),
    };

    config.validate()?;
    Ok(config)
}
