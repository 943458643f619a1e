//! Error handling
//!
//! Defines error types and exit-code mapping for the FTP client.

pub mod handlers;
pub mod types;

pub use handlers::{error_to_exit_code, handle_error};
pub use types::*;
