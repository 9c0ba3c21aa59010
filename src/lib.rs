//! # session-gate
//!
//! Client-side session lifecycle and route guarding for booking applications.
//!
//! This crate is the authentication core of a booking-style web client: it
//! owns who is currently signed in, reconciles that state with an external
//! auth backend, and decides whether protected routes may render. Payments,
//! OTP verification, CAPTCHA checks, and the UI itself live elsewhere; this
//! crate talks to them only through collaborator traits.
//!
//! ## Features
//!
//! - **Session lifecycle**: unauthenticated → loading → authenticated, with
//!   startup restore and re-validation of a persisted token
//! - **Fail-safe logout**: local state is cleared even when the backend is
//!   unreachable; signing out never appears to fail
//! - **Route guarding**: a pure decision table plus a navigation executor
//!   that fires redirects at most once per state transition
//! - **Pluggable collaborators**: auth backend, persistence, and navigation
//!   are traits the application implements
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use session_gate::{MemoryStorage, RouteGuard, SessionStore};
//! # use session_gate::{AuthError, AuthResponse, AuthService, AuthToken, RegisterData, UserProfile};
//! # struct BackendClient;
//! # #[async_trait::async_trait]
//! # impl AuthService for BackendClient {
//! #     async fn login(&self, _: &str, _: &str) -> Result<AuthResponse, AuthError> {
//! #         Ok(AuthResponse::denied("stub"))
//! #     }
//! #     async fn register(&self, _: RegisterData) -> Result<AuthResponse, AuthError> {
//! #         Ok(AuthResponse::denied("stub"))
//! #     }
//! #     async fn logout(&self, _: &AuthToken) -> Result<(), AuthError> { Ok(()) }
//! #     async fn logout_all(&self, _: &AuthToken) -> Result<(), AuthError> { Ok(()) }
//! #     async fn get_user(&self, _: &AuthToken) -> Result<UserProfile, AuthError> {
//! #         Err(AuthError::TokenRejected)
//! #     }
//! # }
//!
//! #[tokio::main]
//! async fn main() -> session_gate::Result<()> {
//!     // Initialize logging
//!     session_gate::logging::try_init().ok();
//!
//!     // One store per application, collaborators injected
//!     let store = SessionStore::new(Arc::new(BackendClient), Arc::new(MemoryStorage::new()));
//!     store.initialize().await?;
//!
//!     // Decide what a protected admin route should do
//!     let guard = RouteGuard::new().with_required_role("admin");
//!     let decision = guard.decide(&store.snapshot()?);
//!     println!("decision: {:?}", decision);
//!
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod guard;
pub mod logging;
pub mod session;

// Re-export commonly used types
pub use auth::{AuthError, AuthResponse, AuthService, AuthToken, RegisterData};
pub use config::Config;
pub use error::{Result, SessionGateError};
pub use guard::{NavigationExecutor, Navigator, RouteDecision, RouteGuard};
pub use session::{
    AuthAttempt, FileStorage, MemoryStorage, Session, SessionStorage, SessionStore, UserProfile,
};
