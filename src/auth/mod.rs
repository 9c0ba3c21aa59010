//! Authentication collaborator interface.
//!
//! This module defines the seam between the session core and the external
//! auth backend: the opaque bearer token, the request/response payloads,
//! and the [`AuthService`] trait the application implements.

mod service;
mod token;

pub use service::{AuthError, AuthResponse, AuthService, RegisterData};
pub use token::AuthToken;
