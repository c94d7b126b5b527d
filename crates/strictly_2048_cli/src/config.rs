//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use strictly_2048::DEFAULT_SIZE;
use tracing::{debug, info, instrument};

/// Largest board the terminal front-end will create.
pub const MAX_SIZE: usize = 16;

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board side length.
    size: usize,

    /// Seed for tile spawns; `None` draws from OS entropy.
    seed: Option<u64>,

    /// `tracing` filter used when `RUST_LOG` is unset.
    log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            seed: None,
            log_filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "warn".to_string()
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        info!(size = config.size, seed = ?config.seed, "Config loaded successfully");
        Ok(config)
    }

    /// Loads the file at `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.display()))]
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Applies command-line overrides and re-validates.
    pub fn with_overrides(mut self, size: Option<usize>, seed: Option<u64>) -> Result<Self, ConfigError> {
        if let Some(size) = size {
            self.size = size;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.size == 0 || self.size > MAX_SIZE {
            return Err(ConfigError::new(format!(
                "Board size must be between 1 and {}, got {}",
                MAX_SIZE, self.size
            )));
        }
        Ok(())
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
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(*config.size(), 4);
        assert_eq!(*config.seed(), None);
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: GameConfig = toml::from_str("seed = 7").unwrap();
        assert_eq!(*config.size(), 4);
        assert_eq!(*config.seed(), Some(7));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let config = GameConfig::default().with_overrides(Some(6), Some(1)).unwrap();
        assert_eq!(*config.size(), 6);
        assert_eq!(*config.seed(), Some(1));

        let kept = config.with_overrides(None, None).unwrap();
        assert_eq!(*kept.seed(), Some(1));
    }

    #[test]
    fn test_zero_size_rejected() {
        let err = GameConfig::default().with_overrides(Some(0), None).unwrap_err();
        assert!(err.message.contains("got 0"));
        assert!(err.file.ends_with("config.rs"));
    }
}
