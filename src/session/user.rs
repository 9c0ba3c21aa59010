//! User profile snapshot.

use serde::{Deserialize, Serialize};

/// Snapshot of the signed-in user's identity.
///
/// Owned exclusively by [`SessionStore`](crate::SessionStore); guard code
/// only ever reads clones. The `role` field drives route-level access checks
/// and is treated as an opaque label; the crate does not define a role
/// hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable user identifier assigned by the auth collaborator.
    pub id: String,
    /// Access role label (e.g., "user", "admin", "stylist").
    pub role: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
}

impl UserProfile {
    /// Create a profile with the given id and role and empty display fields.
    pub fn new(id: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            role: role.into(),
            name: String::new(),
            email: String::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the contact email.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Check whether this user's role matches the given label.
    pub fn has_role(&self, role: &str) -> bool {
        self.role == role
    }
}
