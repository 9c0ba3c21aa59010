//! Session management module.
//!
//! This module provides the session data holder, the user profile snapshot,
//! the persistence collaborator seam, and [`SessionStore`], the state
//! machine that reconciles local session state with the auth collaborator.

mod state;
mod storage;
mod store;
mod user;

pub use state::Session;
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::{AuthAttempt, SessionStore};
pub use user::UserProfile;
