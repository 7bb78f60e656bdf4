//! SQLite persistence.
//!
//! Repository implementations of the domain traits, built on the
//! table-level query modules [`dictionary_pool`] and [`mapping_store`] and
//! the retrying write transactions in [`transaction`].
//!
//! # Repositories
//!
//! - [`SqliteRecordRepository`] - Mapping allocation, lookup and reclamation
//! - [`SqliteDictionaryRepository`] - Vocabulary loading and pool stats
//! - [`SqliteCredentialRepository`] - Administrator password hashes

pub mod database;
pub mod dictionary_pool;
pub mod mapping_store;
pub mod sqlite_credential_repository;
pub mod sqlite_dictionary_repository;
pub mod sqlite_record_repository;
pub mod transaction;

pub use database::{DatabaseOptions, connect, migrate};
pub use sqlite_credential_repository::SqliteCredentialRepository;
pub use sqlite_dictionary_repository::SqliteDictionaryRepository;
pub use sqlite_record_repository::SqliteRecordRepository;
pub use transaction::{RetryPolicy, TxError};
