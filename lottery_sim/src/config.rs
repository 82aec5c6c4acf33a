//! Session configuration, loadable from JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for `SessionConfig`
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The config parsed but describes an impossible session
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates an invalid-config error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

/// Longest accepted delay between draws (one day).
pub const MAX_INTERVAL_MS: u64 = 24 * 60 * 60 * 1000;

/// Configuration for a timed draw session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Master seed for determinism (0 = random from time)
    pub seed: u64,

    /// Descriptive label carried into the report
    pub channel_name: Option<String>,

    /// Default replacement policy of the pool
    pub replacement: bool,

    /// Number of sequential draws
    pub winners: usize,

    /// Delay between draws in milliseconds
    pub interval_ms: u64,

    /// Participants, in entry order
    pub entries: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            channel_name: None,
            replacement: true,
            winners: 20,
            interval_ms: 500,
            entries: (1..=9).map(|i| i.to_string()).collect(),
        }
    }
}

impl SessionConfig {
    /// Parses a config from a JSON string. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON config file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Rejects sessions that could never draw anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.winners == 0 {
            return Err(ConfigError::invalid("winners must be at least 1"));
        }
        if self.interval_ms > MAX_INTERVAL_MS {
            return Err(ConfigError::invalid(format!(
                "interval_ms must be at most {} (one day), got {}",
                MAX_INTERVAL_MS, self.interval_ms
            )));
        }
        if self.entries.iter().any(|e| e.trim().is_empty()) {
            return Err(ConfigError::invalid("entries must not be blank"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_grid_demo() {
        let config = SessionConfig::default();
        assert_eq!(config.entries.len(), 9);
        assert_eq!(config.winners, 20);
        assert_eq!(config.interval_ms, 500);
        assert!(config.replacement);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = SessionConfig::from_json(r#"{"seed": 7, "replacement": false, "entries": ["a", "b"]}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert!(!config.replacement);
        assert_eq!(config.entries, vec!["a", "b"]);
        assert_eq!(config.winners, 20);
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(matches!(
            SessionConfig::from_json(r#"{"winners": 0}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            SessionConfig::from_json(r#"{"entries": ["a", " "]}"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(SessionConfig::from_json("not json"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_interval_bounds() {
        let config = SessionConfig::from_json(&format!(r#"{{"interval_ms": {}}}"#, MAX_INTERVAL_MS)).unwrap();
        assert_eq!(config.interval_ms, MAX_INTERVAL_MS);

        assert!(matches!(
            SessionConfig::from_json(r#"{"interval_ms": 10000000000000}"#),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = SessionConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }
}
