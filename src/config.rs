//! Configuration management for session-gate.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file (JSON)
//! 3. Default values

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SessionGateError;
use crate::Result;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Route guard configuration.
    pub guard: GuardSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Route guard configuration section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GuardSection {
    /// Where unauthenticated visitors are sent.
    pub login_path: String,
    /// Where authenticated visitors with the wrong role are sent.
    pub unauthorized_path: String,
}

impl Default for GuardSection {
    fn default() -> Self {
        Self {
            login_path: "/login".to_string(),
            unauthorized_path: "/unauthorized".to_string(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (error, warn, info, debug, trace).
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(Into::into)
    }

    /// Load configuration from a JSON file if it exists, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) if p.exists() => Self::from_file(p)?,
            _ => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(path) = std::env::var("SESSION_GATE_LOGIN_PATH") {
            self.guard.login_path = path;
        }
        if let Ok(path) = std::env::var("SESSION_GATE_UNAUTHORIZED_PATH") {
            self.guard.unauthorized_path = path;
        }
        if let Ok(level) = std::env::var("SESSION_GATE_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Check the configuration for values that cannot work.
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("guard.login_path", &self.guard.login_path),
            ("guard.unauthorized_path", &self.guard.unauthorized_path),
        ] {
            if !path.starts_with('/') {
                return Err(SessionGateError::Config(format!(
                    "{} must start with '/': got {:?}",
                    name, path
                )));
            }
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            other => Err(SessionGateError::Config(format!(
                "unknown log level: {:?}",
                other
            ))),
        }
    }
}
