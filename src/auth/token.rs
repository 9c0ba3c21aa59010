//! Opaque bearer token type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque bearer token issued by the auth collaborator.
///
/// The token is never interpreted locally; it is stored, replayed to the
/// collaborator, and cleared. `Display` redacts the value so tokens cannot
/// leak through log output.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Expose the raw token value, for replaying to the collaborator.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Check whether the token is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for AuthToken {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for AuthToken {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(***{} bytes)", self.0.len())
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthToken(***{} bytes)", self.0.len())
    }
}
