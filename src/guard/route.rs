//! Route protection decision table.

use crate::config::GuardSection;
use crate::session::Session;

/// What a guarded route should do for the current session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Startup validation is still resolving; show a loading indicator only.
    Loading,
    /// Render nothing and navigate to the given path.
    Redirect(String),
    /// Session passes every check; render the protected content.
    Render,
}

impl RouteDecision {
    /// True for the `Render` variant.
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render)
    }
}

/// Decides whether a protected route may render.
///
/// The guard owns no state of its own: [`decide`](Self::decide) is a pure
/// function of the session snapshot, so the decision table can be tested in
/// isolation from any navigation side effect. Pair it with a
/// [`NavigationExecutor`](super::NavigationExecutor) to actually perform
/// redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    required_role: Option<String>,
    fallback_path: String,
    unauthorized_path: String,
}

impl RouteGuard {
    /// Guard with default paths and no role requirement.
    pub fn new() -> Self {
        Self::from_config(&GuardSection::default())
    }

    /// Guard configured from the `guard` config section.
    pub fn from_config(section: &GuardSection) -> Self {
        Self {
            required_role: None,
            fallback_path: section.login_path.clone(),
            unauthorized_path: section.unauthorized_path.clone(),
        }
    }

    /// Require the signed-in user to hold the given role.
    pub fn with_required_role(mut self, role: impl Into<String>) -> Self {
        self.required_role = Some(role.into());
        self
    }

    /// Override where unauthenticated visitors are sent.
    pub fn with_fallback_path(mut self, path: impl Into<String>) -> Self {
        self.fallback_path = path.into();
        self
    }

    /// Override where role-mismatched visitors are sent.
    pub fn with_unauthorized_path(mut self, path: impl Into<String>) -> Self {
        self.unauthorized_path = path.into();
        self
    }

    /// The role this guard requires, if any.
    pub fn required_role(&self) -> Option<&str> {
        self.required_role.as_deref()
    }

    /// Evaluate the decision table for a session snapshot.
    ///
    /// | loading | authenticated | role ok | decision |
    /// |---------|---------------|---------|----------|
    /// | true    | any           | any     | Loading  |
    /// | false   | false         | any     | Redirect(fallback) |
    /// | false   | true          | no      | Redirect(unauthorized) |
    /// | false   | true          | yes     | Render   |
    pub fn decide(&self, session: &Session) -> RouteDecision {
        if session.loading() {
            return RouteDecision::Loading;
        }
        if !session.is_authenticated() {
            return RouteDecision::Redirect(self.fallback_path.clone());
        }
        if let Some(required) = &self.required_role {
            let holds = session.user().map(|u| u.has_role(required)).unwrap_or(false);
            if !holds {
                return RouteDecision::Redirect(self.unauthorized_path.clone());
            }
        }
        RouteDecision::Render
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new()
    }
}
