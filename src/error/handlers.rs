//! Error handlers
//!
//! Reports fatal errors and maps them to process exit codes.

use crate::client::TransferDirection;
use crate::error::types::ClientError;
use log::error;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_LOGIN: i32 = 2;
pub const EXIT_DOWNLOAD: i32 = 3;
pub const EXIT_UPLOAD: i32 = 4;
pub const EXIT_CONNECT: i32 = 5;

/// Log a fatal client error
pub fn handle_error(err: &ClientError) {
    error!("FTP Client Error: {}", err);
}

/// Convert error to process exit code.
///
/// Local file and transfer failures are attributed to the direction of the
/// copy that was under way; without one they count as usage errors.
pub fn error_to_exit_code(err: &ClientError, direction: Option<TransferDirection>) -> i32 {
    match err {
        ClientError::Usage(_) | ClientError::Parse(_) | ClientError::Config(_) => EXIT_USAGE,
        ClientError::Connect(_) => EXIT_CONNECT,
        ClientError::Auth(_) => EXIT_LOGIN,
        ClientError::Transfer(_) | ClientError::Io(_) => match direction {
            Some(TransferDirection::Download) => EXIT_DOWNLOAD,
            Some(TransferDirection::Upload) => EXIT_UPLOAD,
            None => EXIT_USAGE,
        },
    }
}
