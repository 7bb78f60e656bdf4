//! REST API layer for HTTP request/response handling.
//!
//! Translates HTTP requests into service calls and wraps results in the
//! `{status, message, data}` envelope.
//!
//! # Modules
//!
//! - [`dto`] - Request forms and response payloads
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authorization, session cookies and tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
