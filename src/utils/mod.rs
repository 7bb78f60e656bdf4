//! Utility functions for URL and vocabulary processing.
//!
//! - [`url_normalizer`] - default protocol handling
//! - [`vocabulary`] - dictionary word sanitization

pub mod url_normalizer;
pub mod vocabulary;
