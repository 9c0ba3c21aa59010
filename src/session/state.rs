//! Session data holder and its pairing invariant.

use crate::auth::AuthToken;

use super::UserProfile;

/// The local record of who is currently signed in.
///
/// Fields are private so every mutation goes through methods that keep the
/// pairing invariant: token and user are installed together and cleared
/// together, never observed one without the other. `is_authenticated` is
/// derived on every read and never cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: Option<UserProfile>,
    token: Option<AuthToken>,
    loading: bool,
}

impl Session {
    /// Create an empty session in the loading phase.
    ///
    /// A fresh session starts with `loading = true`; it stays there until
    /// startup initialization has resolved one way or the other.
    pub fn new() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
        }
    }

    /// True iff both token and user are present.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    /// Whether startup initialization is still in flight.
    pub fn loading(&self) -> bool {
        self.loading
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    /// The current bearer token, if any.
    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Install a token/user pair atomically.
    ///
    /// Replaces any previously held pair wholesale.
    pub(crate) fn establish(&mut self, token: AuthToken, user: UserProfile) {
        self.token = Some(token);
        self.user = Some(user);
    }

    /// Drop both token and user.
    pub(crate) fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    /// Replace the user snapshot without touching the token.
    ///
    /// Only applies while a user is already present; on an empty session this
    /// is a no-op and returns false, so a stray profile edit can never
    /// produce a user without a token.
    pub(crate) fn replace_user(&mut self, user: UserProfile) -> bool {
        if self.user.is_some() {
            self.user = Some(user);
            true
        } else {
            false
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
