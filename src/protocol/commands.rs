//! Module `commands`
//!
//! Defines the FTP commands this client issues on the control channel
//! and how each one is rendered on the wire.

use std::fmt;

use crate::transfer::TransferType;

/// An FTP command sent by the client.
///
/// Only the commands needed for a single passive-mode copy exist here.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    USER(String),       // Username for login
    PASS(String),       // Password for login
    TYPE(TransferType), // Representation type
    PASV,               // Request a passive data endpoint
    RETR(String),       // Retrieve/download file
    STOR(String),       // Store/upload file
}

impl Command {
    /// Command verb, used to tag errors
    pub fn name(&self) -> &'static str {
        match self {
            Command::USER(_) => "USER",
            Command::PASS(_) => "PASS",
            Command::TYPE(_) => "TYPE",
            Command::PASV => "PASV",
            Command::RETR(_) => "RETR",
            Command::STOR(_) => "STOR",
        }
    }

    /// Newline-terminated line written to the control channel
    pub fn to_wire(&self) -> String {
        format!("{}\n", self)
    }

    /// Loggable form of the command with the password masked
    pub fn redacted(&self) -> String {
        match self {
            Command::PASS(_) => "PASS ****".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::USER(user) => write!(f, "USER {}", user),
            Command::PASS(pass) => write!(f, "PASS {}", pass),
            Command::TYPE(kind) => write!(f, "TYPE {}", kind.code()),
            Command::PASV => write!(f, "PASV"),
            Command::RETR(path) => write!(f, "RETR {}", path),
            Command::STOR(path) => write!(f, "STOR {}", path),
        }
    }
}
