//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod auth;
pub mod records;
pub mod status;

pub use auth::{admin_check_handler, change_pass_handler, login_handler, logout_handler};
pub use records::{
    create_record_handler, delete_record_handler, get_all_records_handler,
    purge_all_records_handler, search_record_handler,
};
pub use status::status_handler;
