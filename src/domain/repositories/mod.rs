//! Repository trait definitions for data access abstraction.
//!
//! Traits here are implemented by [`crate::infrastructure::persistence`] and
//! mocked with `mockall` in unit tests.

pub mod credential_repository;
pub mod dictionary_repository;
pub mod record_repository;

pub use credential_repository::CredentialRepository;
pub use dictionary_repository::DictionaryRepository;
pub use record_repository::RecordRepository;

#[cfg(test)]
pub use credential_repository::MockCredentialRepository;
#[cfg(test)]
pub use dictionary_repository::MockDictionaryRepository;
#[cfg(test)]
pub use record_repository::MockRecordRepository;
