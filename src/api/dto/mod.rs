//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies are form-encoded, as the frontend posts HTML forms, and
//! validated with `validator`. Responses are wrapped in
//! [`envelope::ApiResponse`].

pub mod auth;
pub mod envelope;
pub mod record;
pub mod status;
