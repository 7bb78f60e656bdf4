//! Business logic services for the application layer.

pub mod auth_service;
pub mod dictionary_service;
pub mod record_service;

pub use auth_service::AuthService;
pub use dictionary_service::DictionaryService;
pub use record_service::RecordService;
