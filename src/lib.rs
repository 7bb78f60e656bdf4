//! # wordlink
//!
//! A URL shortener whose short keys are words drawn from a curated
//! dictionary, built with Axum and SQLite.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, lookup rules and repository traits
//! - **Application Layer** ([`application`]) - Record, dictionary and auth services
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite persistence with retrying transactions
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//!
//! ## Guarantees
//!
//! - Shortening the same URL twice returns the same key
//! - Two live records never share a key, even under concurrent requests
//! - Deleting a record returns its word to the pool; a purge returns all of them
//! - Keys are drawn uniformly at random from the unused words
//!
//! ## Quick Start
//!
//! ```bash
//! export SECRET_KEY="change-me"
//! export DICTIONARY_PATH="./dictionary.txt"
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, DictionaryService, RecordService};
    pub use crate::domain::entities::{Allocation, PoolStats, UrlMapping};
    pub use crate::domain::lookup::{Lookup, LookupField};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
