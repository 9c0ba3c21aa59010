//! Session store: the client-side authentication state machine.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::auth::{AuthResponse, AuthService, AuthToken, RegisterData};
use crate::error::SessionGateError;
use crate::Result;

use super::storage::SessionStorage;
use super::{Session, UserProfile};

/// Outcome of a credential operation, as seen by the caller.
///
/// Transport failures and rejected credentials both surface as `Rejected`;
/// the store's public operations never propagate collaborator errors.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthAttempt {
    /// Signed in; the session now holds this user and a fresh token.
    Accepted(UserProfile),
    /// Not signed in; prior session state is untouched.
    Rejected {
        /// Human-readable reason.
        error: String,
        /// Per-field validation messages, populated by `register`.
        field_errors: HashMap<String, String>,
    },
}

impl AuthAttempt {
    fn rejected(error: impl Into<String>) -> Self {
        Self::Rejected {
            error: error.into(),
            field_errors: HashMap::new(),
        }
    }

    /// True for the `Accepted` variant.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// Holds the current session and reconciles it with the auth collaborator.
///
/// Construct one per application at startup and share it behind an `Arc`;
/// there is deliberately no global instance. Mutating operations are
/// serialized internally, so a login racing a logout runs strictly one
/// after the other in arrival order.
pub struct SessionStore {
    auth: Arc<dyn AuthService>,
    storage: Arc<dyn SessionStorage>,
    session: RwLock<Session>,
    /// Serializes initialize/login/register/logout against each other.
    op_lock: tokio::sync::Mutex<()>,
}

/// Clears the loading flag on every exit path, including early returns.
struct LoadingGuard<'a> {
    session: &'a RwLock<Session>,
}

impl<'a> LoadingGuard<'a> {
    fn engage(session: &'a RwLock<Session>) -> Result<Self> {
        session
            .write()
            .map_err(|_| SessionGateError::LockPoisoned)?
            .set_loading(true);
        Ok(Self { session })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut session) = self.session.write() {
            session.set_loading(false);
        }
    }
}

impl SessionStore {
    /// Create a store with the given collaborators.
    ///
    /// The session starts empty with `loading = true`; call
    /// [`initialize`](Self::initialize) once to resolve it.
    pub fn new(auth: Arc<dyn AuthService>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            auth,
            storage,
            session: RwLock::new(Session::new()),
            op_lock: tokio::sync::Mutex::new(()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Session>> {
        self.session.read().map_err(|_| SessionGateError::LockPoisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Session>> {
        self.session.write().map_err(|_| SessionGateError::LockPoisoned)
    }

    /// Get a clone of the current session.
    pub fn snapshot(&self) -> Result<Session> {
        Ok(self.read()?.clone())
    }

    /// Derived authentication flag: token AND user present.
    pub fn is_authenticated(&self) -> bool {
        self.session
            .read()
            .map(|s| s.is_authenticated())
            .unwrap_or(false)
    }

    /// Whether startup initialization is still in flight.
    pub fn loading(&self) -> bool {
        self.session.read().map(|s| s.loading()).unwrap_or(true)
    }

    /// A clone of the signed-in user, if any.
    pub fn current_user(&self) -> Option<UserProfile> {
        self.session.read().ok().and_then(|s| s.user().cloned())
    }

    /// Restore and re-validate a persisted session. Run once at startup.
    ///
    /// If storage holds both a token and a user, they are installed
    /// optimistically and then re-validated against the collaborator; a
    /// failed round-trip (rejected token or dead network alike) forces a
    /// local logout. With either value absent no remote call is made. The
    /// loading flag is cleared on every exit path.
    pub async fn initialize(&self) -> Result<()> {
        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::engage(&self.session)?;

        let token = self.storage.load_token().unwrap_or_else(|e| {
            warn!(error = %e, "failed to read persisted token");
            None
        });
        let user = self.storage.load_user().unwrap_or_else(|e| {
            warn!(error = %e, "failed to read persisted user");
            None
        });

        let (token, user) = match (token, user) {
            (Some(token), Some(user)) => (token, user),
            _ => {
                debug!("no persisted session to restore");
                return Ok(());
            }
        };

        // Optimistic install, then authoritative re-validation.
        self.write()?.establish(token.clone(), user);

        match self.auth.get_user(&token).await {
            Ok(fresh) => {
                self.write()?.replace_user(fresh.clone());
                if let Err(e) = self.storage.store_user(&fresh) {
                    warn!(error = %e, "failed to persist refreshed user");
                }
                info!(user = %fresh.id, "session restored");
            }
            Err(e) => {
                warn!(error = %e, "persisted session failed re-validation");
                self.logout_inner(false).await?;
            }
        }

        Ok(())
    }

    /// Exchange credentials for a session.
    ///
    /// On acceptance the token/user pair replaces the session wholesale and
    /// is persisted. On rejection (including transport failure) prior state
    /// is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthAttempt> {
        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::engage(&self.session)?;

        match self.auth.login(email, password).await {
            Ok(AuthResponse::Granted { token, user }) => {
                self.install(token, user.clone())?;
                info!(user = %user.id, "login accepted");
                Ok(AuthAttempt::Accepted(user))
            }
            Ok(AuthResponse::Denied {
                error,
                field_errors,
            }) => {
                debug!(error = %error, "login denied");
                Ok(AuthAttempt::Rejected {
                    error,
                    field_errors,
                })
            }
            Err(e) => {
                warn!(error = %e, "login failed to reach auth service");
                Ok(AuthAttempt::rejected(e.to_string()))
            }
        }
    }

    /// Create an account and sign it in. Same contract shape as `login`;
    /// `field_errors` carries the collaborator's validation payload.
    pub async fn register(&self, data: RegisterData) -> Result<AuthAttempt> {
        let _op = self.op_lock.lock().await;
        let _loading = LoadingGuard::engage(&self.session)?;

        match self.auth.register(data).await {
            Ok(AuthResponse::Granted { token, user }) => {
                self.install(token, user.clone())?;
                info!(user = %user.id, "registration accepted");
                Ok(AuthAttempt::Accepted(user))
            }
            Ok(AuthResponse::Denied {
                error,
                field_errors,
            }) => {
                debug!(error = %error, "registration denied");
                Ok(AuthAttempt::Rejected {
                    error,
                    field_errors,
                })
            }
            Err(e) => {
                warn!(error = %e, "registration failed to reach auth service");
                Ok(AuthAttempt::rejected(e.to_string()))
            }
        }
    }

    /// Sign out of the current session.
    ///
    /// Remote invalidation is best-effort: failures are logged and swallowed,
    /// and local token/user are cleared unconditionally. A dead network must
    /// never trap the user in a session they cannot exit.
    pub async fn logout(&self) -> Result<()> {
        let _op = self.op_lock.lock().await;
        self.logout_inner(false).await
    }

    /// Sign out everywhere: invalidates all of the account's sessions.
    /// Same unconditional local-clear guarantee as [`logout`](Self::logout).
    pub async fn logout_all(&self) -> Result<()> {
        let _op = self.op_lock.lock().await;
        self.logout_inner(true).await
    }

    /// Replace the local user snapshot and persist it.
    ///
    /// Does not touch the token and makes no remote call; intended for
    /// profile edits where the server-side update happened elsewhere.
    /// Returns false (and changes nothing) when no session is active.
    pub fn update_user(&self, user: UserProfile) -> Result<bool> {
        let replaced = self.write()?.replace_user(user.clone());
        if replaced {
            self.storage.store_user(&user)?;
            debug!(user = %user.id, "user snapshot updated");
        } else {
            warn!("update_user ignored: no active session");
        }
        Ok(replaced)
    }

    /// Install and persist a fresh token/user pair.
    ///
    /// Persistence failures are logged, not propagated: the in-memory
    /// session is already valid, the cost is a sign-in lost across restart.
    fn install(&self, token: AuthToken, user: UserProfile) -> Result<()> {
        self.write()?.establish(token.clone(), user.clone());
        if let Err(e) = self.storage.store_token(&token) {
            warn!(error = %e, "failed to persist token");
        }
        if let Err(e) = self.storage.store_user(&user) {
            warn!(error = %e, "failed to persist user");
        }
        Ok(())
    }

    /// Shared logout path. Caller must hold `op_lock`.
    async fn logout_inner(&self, everywhere: bool) -> Result<()> {
        let token = self.read()?.token().cloned();

        if let Some(token) = token {
            let result = if everywhere {
                self.auth.logout_all(&token).await
            } else {
                self.auth.logout(&token).await
            };
            if let Err(e) = result {
                warn!(error = %e, "remote logout failed; clearing local session anyway");
            }
        }

        self.write()?.clear();
        if let Err(e) = self.storage.clear() {
            warn!(error = %e, "failed to clear persisted session");
        }
        info!("session cleared");
        Ok(())
    }
}
