//! Core domain entities.
//!
//! - [`UrlMapping`] - an original URL bound to a dictionary token
//! - [`Allocation`] - whether a shortening call reused or created a mapping
//! - [`DictionaryWord`] / [`PoolStats`] - the token pool
//! - [`Credential`] - the administrator login

pub mod credential;
pub mod mapping;
pub mod word;

pub use credential::Credential;
pub use mapping::{Allocation, UrlMapping};
pub use word::{DictionaryWord, PoolStats};
