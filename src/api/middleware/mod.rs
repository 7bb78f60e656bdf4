//! HTTP middleware for request processing and protection.
//!
//! Provides the privileged-access check, session cookies and request
//! tracing.

pub mod auth;
pub mod session;
pub mod tracing;
