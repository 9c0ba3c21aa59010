//! Auth collaborator seam.
//!
//! The crate never talks to an auth backend directly; it goes through the
//! [`AuthService`] trait so the application can plug in its HTTP client,
//! an in-memory fake, or whatever else. The trait's error type models
//! transport-level failure only: "bad credentials" is a *successful*
//! round-trip with a [`AuthResponse::Denied`] payload.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use super::AuthToken;
use crate::session::UserProfile;

/// Registration payload forwarded to the collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterData {
    /// Contact email, also the login identifier.
    pub email: String,
    /// Plaintext password; the collaborator is responsible for hashing.
    pub password: String,
    /// Display name.
    pub name: String,
    /// Requested role label. Collaborators may override this.
    pub role: Option<String>,
}

/// Outcome of a credential round-trip that reached the collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthResponse {
    /// Credentials accepted; a fresh token and the authoritative profile.
    Granted {
        token: AuthToken,
        user: UserProfile,
    },
    /// Credentials rejected with a human-readable reason and optional
    /// per-field validation messages (registration only).
    Denied {
        error: String,
        field_errors: HashMap<String, String>,
    },
}

impl AuthResponse {
    /// Shorthand for a denial with no per-field detail.
    pub fn denied(error: impl Into<String>) -> Self {
        Self::Denied {
            error: error.into(),
            field_errors: HashMap::new(),
        }
    }
}

/// Transport-level failure talking to the auth collaborator.
///
/// These never escape [`SessionStore`](crate::SessionStore): credential
/// operations convert them into rejections, logout paths swallow them after
/// logging, and initialize treats them as an invalid token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The collaborator could not be reached.
    #[error("auth service unreachable: {0}")]
    Unreachable(String),

    /// The collaborator rejected the presented token.
    #[error("token rejected")]
    TokenRejected,

    /// The collaborator answered with something unintelligible.
    #[error("malformed auth response: {0}")]
    Malformed(String),
}

/// External authentication collaborator.
///
/// Implementations are expected to be cheap to clone behind an `Arc` and
/// callable from async contexts. All token state lives in the session store;
/// the service itself is stateless from the crate's point of view (it may of
/// course keep its own HTTP client, base URL, etc.).
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchange credentials for a token and profile.
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError>;

    /// Create an account and sign it in.
    async fn register(&self, data: RegisterData) -> Result<AuthResponse, AuthError>;

    /// Invalidate the current token server-side.
    async fn logout(&self, token: &AuthToken) -> Result<(), AuthError>;

    /// Invalidate every token for the account server-side.
    async fn logout_all(&self, token: &AuthToken) -> Result<(), AuthError>;

    /// Fetch the authoritative profile for the given token.
    ///
    /// Used by startup re-validation: an `Err` here (rejected token or dead
    /// network alike) means the persisted session is no longer trustworthy.
    async fn get_user(&self, token: &AuthToken) -> Result<UserProfile, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denied_shorthand() {
        let resp = AuthResponse::denied("Invalid credentials");
        match resp {
            AuthResponse::Denied {
                error,
                field_errors,
            } => {
                assert_eq!(error, "Invalid credentials");
                assert!(field_errors.is_empty());
            }
            _ => panic!("expected Denied"),
        }
    }

    #[test]
    fn test_auth_error_display() {
        let err = AuthError::Unreachable("connection refused".into());
        assert!(err.to_string().contains("unreachable"));
        assert!(err.to_string().contains("connection refused"));

        assert!(AuthError::TokenRejected.to_string().contains("rejected"));
    }

    #[test]
    fn test_register_data_default() {
        let data = RegisterData::default();
        assert!(data.email.is_empty());
        assert!(data.role.is_none());
    }
}
