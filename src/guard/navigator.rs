//! Navigation side effects, fired once per state transition.

use std::sync::Arc;

use tracing::debug;

use crate::session::Session;

use super::{RouteDecision, RouteGuard};

/// Imperative "go to path" collaborator.
///
/// The crate never performs navigation itself; the application plugs in
/// whatever its host environment uses (history API, router handle, ...).
pub trait Navigator: Send + Sync {
    /// Navigate to the given path.
    fn navigate(&self, path: &str);
}

/// The tuple a navigation reaction is keyed on. Two observations with the
/// same key belong to the same state transition and must not fire twice.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ObservationKey {
    loading: bool,
    authenticated: bool,
    user: Option<(String, String)>,
    required_role: Option<String>,
}

impl ObservationKey {
    fn of(session: &Session, guard: &RouteGuard) -> Self {
        Self {
            loading: session.loading(),
            authenticated: session.is_authenticated(),
            user: session.user().map(|u| (u.id.clone(), u.role.clone())),
            required_role: guard.required_role().map(str::to_string),
        }
    }
}

/// Executes a guard's redirects, at most once per state transition.
///
/// [`RouteGuard::decide`] stays a pure projection; this executor is the one
/// place the side effect happens. Each observation is keyed on
/// (loading, authenticated, user identity+role, required role) and the
/// navigator is only invoked when the key changes; re-observing an
/// unchanged session (a re-render) fires nothing.
pub struct NavigationExecutor {
    guard: RouteGuard,
    navigator: Arc<dyn Navigator>,
    last_key: Option<ObservationKey>,
}

impl NavigationExecutor {
    /// Create an executor for the given guard and navigator.
    pub fn new(guard: RouteGuard, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            guard,
            navigator,
            last_key: None,
        }
    }

    /// The guard this executor reacts for.
    pub fn guard(&self) -> &RouteGuard {
        &self.guard
    }

    /// Observe a session snapshot: evaluate the decision table and, when the
    /// observed state differs from the previous observation, perform any
    /// redirect it calls for. Returns the decision so the caller can render
    /// accordingly.
    pub fn observe(&mut self, session: &Session) -> RouteDecision {
        let decision = self.guard.decide(session);
        let key = ObservationKey::of(session, &self.guard);

        if self.last_key.as_ref() == Some(&key) {
            return decision;
        }
        self.last_key = Some(key);

        if let RouteDecision::Redirect(path) = &decision {
            debug!(path = %path, "redirecting");
            self.navigator.navigate(path);
        }
        decision
    }

    /// Forget the previous observation, forcing the next one to react.
    ///
    /// Matches the teardown/remount of a guarded view: a remounted guard
    /// must redirect again even if session state never changed while it was
    /// gone.
    pub fn reset(&mut self) {
        self.last_key = None;
    }
}
