//! FTP Response handling
//!
//! Structured forms of the replies this client consumes.

use std::fmt;

/// USER accepted without a password
pub const LOGGED_IN: u16 = 230;
/// Lowest code that signals a failed command
pub const FIRST_FAILURE_CODE: u16 = 400;

/// One reply line decoded as `<code> <message>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerResponse {
    pub code: u16,
    pub message: String,
}

impl ServerResponse {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// 1xx replies announce that another reply will follow
    pub fn is_preliminary(&self) -> bool {
        (100..200).contains(&self.code)
    }
}

impl fmt::Display for ServerResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.message)
    }
}

/// Passive-mode data endpoint announced in a 227 reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEndpoint {
    /// Dotted-quad IPv4 address
    pub host: String,
    pub port: u16,
}

impl fmt::Display for DataEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
