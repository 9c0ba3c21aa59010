//! Error types for session-gate.

use thiserror::Error;

/// Main error type for session-gate operations.
///
/// Remote-collaborator failures (bad credentials, dead network, rejected
/// tokens) never appear here: SessionStore converts them into structured
/// outcomes or swallows them on the fail-safe logout paths. This enum only
/// covers local faults: poisoned locks, storage I/O, malformed config.
#[derive(Error, Debug)]
pub enum SessionGateError {
    /// Internal lock was poisoned.
    #[error("internal lock poisoned")]
    LockPoisoned,

    /// Persistent storage operation failed.
    #[error("storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience Result type for session-gate operations.
pub type Result<T> = std::result::Result<T, SessionGateError>;
