//! Route protection.
//!
//! [`RouteGuard`] is a pure decision table over the session snapshot;
//! [`NavigationExecutor`] turns its redirect decisions into at-most-once
//! navigation side effects through the [`Navigator`] collaborator.

mod navigator;
mod route;

pub use navigator::{NavigationExecutor, Navigator};
pub use route::{RouteDecision, RouteGuard};
