//! Domain layer containing business entities and logic.
//!
//! Defines the mapping and dictionary entities, the repository contracts the
//! infrastructure layer fulfils, and the pure matching rules used when an
//! administrator deletes a record from free-form input.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`lookup`] - Field selectors shared by lookups and matching
//! - [`matching`] - Ordered candidate generation for deletion input

pub mod entities;
pub mod lookup;
pub mod matching;
pub mod repositories;
