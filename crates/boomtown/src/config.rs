//! Host configuration loaded from a TOML file.
//!
//! A missing file is created with the defaults so a first run always starts.

use anyhow::{Context, Result};
use boomtown_engine::GameConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Application configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Rules of the hosted game
    #[serde(default)]
    pub game: GameConfig,
    /// Automated players
    #[serde(default)]
    pub autoplay: AutoplaySettings,
    /// Logging configuration settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Default pause between bot polls
fn default_poll_interval() -> u64 {
    5
}

/// Bots that play the hosted game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoplaySettings {
    /// Bot names in join order; the first one owns the game
    pub players: Vec<String>,
    /// Milliseconds a bot waits before checking again while it cannot move
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
}

impl Default for AutoplaySettings {
    fn default() -> Self {
        Self {
            players: vec![
                "Dad Joiner".to_string(),
                "Doc Lloyd".to_string(),
                "H. L. Hunt".to_string(),
            ],
            poll_interval_ms: default_poll_interval(),
        }
    }
}

/// Logging system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,
    /// Whether to output logs in JSON format
    pub json_format: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            autoplay: AutoplaySettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file, writing the defaults there first
    /// if it does not exist.
    pub async fn load_from_file(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let config: AppConfig = toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            Ok(config)
        } else {
            let default_config = AppConfig::default();
            let toml_content = toml::to_string_pretty(&default_config)
                .context("Failed to serialize default configuration")?;
            tokio::fs::write(path, toml_content)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Created default configuration file: {}", path.display());
            Ok(default_config)
        }
    }

    /// Validates the configuration for consistency and correctness.
    pub fn validate(&self) -> Result<(), String> {
        self.game.validate().map_err(|e| e.to_string())?;

        if self.autoplay.players.is_empty() {
            return Err("At least one autoplay player is required".to_string());
        }
        if let Some(name) = self.autoplay.players.iter().find(|n| n.trim().is_empty()) {
            return Err(format!("Invalid autoplay player name: {name:?}"));
        }
        if self.autoplay.poll_interval_ms == 0 {
            return Err("Autoplay poll interval must be at least 1ms".to_string());
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {valid_levels:?}",
                &self.logging.level
            ));
        }

        Ok(())
    }
}
