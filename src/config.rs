//! Store configuration loaded from TOML.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::games::tictactoe::{Player, Players};

/// Configuration for a store instance.
#[derive(Debug, Clone, Getters, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Key the session state is stored under.
    #[serde(default = "default_storage_key")]
    storage_key: String,

    /// Directory for file-backed storage.
    #[serde(default = "default_storage_dir")]
    storage_dir: PathBuf,

    /// The two players.
    #[serde(default = "default_players")]
    players: Vec<Player>,
}

#[instrument]
fn default_storage_key() -> String {
    "game-state-key".to_string()
}

#[instrument]
fn default_storage_dir() -> PathBuf {
    PathBuf::from(".strictly_rounds")
}

#[instrument]
fn default_players() -> Vec<Player> {
    Players::default().iter().cloned().collect()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            storage_dir: default_storage_dir(),
            players: default_players(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration from TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(storage_key = %config.storage_key, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the text is not a valid configuration.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Pairs the configured players by seat.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] unless exactly players 1 and 2 are configured.
    #[instrument(skip(self), fields(count = self.players.len()))]
    pub fn players_by_seat(&self) -> Result<Players, ConfigError> {
        match self.players.as_slice() {
            [a, b] => Players::try_new(a.clone(), b.clone())
                .map_err(|e| ConfigError::new(format!("Invalid players: {}", e))),
            other => Err(ConfigError::new(format!(
                "Expected 2 players, found {}",
                other.len()
            ))),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
