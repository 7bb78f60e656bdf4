//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::record_service::RecordService`] - Shortening, resolution, deletion and purge
//! - [`services::dictionary_service::DictionaryService`] - Vocabulary loading and pool stats
//! - [`services::auth_service::AuthService`] - Administrator credentials and bearer checks

pub mod services;
