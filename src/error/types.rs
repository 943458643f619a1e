//! Error types
//!
//! Defines domain-specific error types for each stage of an FTP copy.

use std::fmt;
use std::io;
use std::net::SocketAddr;

use crate::protocol::rejection_message;

/// Failures decoding server text or command-line targets
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Reply line has no space between code and message
    MalformedResponse(String),
    /// Reply code prefix is not a base-10 integer
    InvalidReplyCode(String),
    MalformedPasvReply(String),
    /// `user@host:path` argument is missing a delimiter or a component
    MalformedTarget(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MalformedResponse(r) => write!(f, "Malformed server response: {:?}", r),
            ParseError::InvalidReplyCode(c) => write!(f, "Invalid reply code: {:?}", c),
            ParseError::MalformedPasvReply(r) => write!(f, "Malformed PASV reply: {:?}", r),
            ParseError::MalformedTarget(t) => {
                write!(f, "Malformed remote target {:?}, expected user@host:path", t)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Connection opener errors
#[derive(Debug)]
pub enum ConnectError {
    Resolve { host: String, source: io::Error },
    NoIpv4Address(String),
    Refused(SocketAddr),
    Timeout(SocketAddr),
    Failed(SocketAddr, io::Error),
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectError::Resolve { host, source } => {
                write!(f, "Failed to resolve {}: {}", host, source)
            }
            ConnectError::NoIpv4Address(host) => write!(f, "No IPv4 address found for {}", host),
            ConnectError::Refused(addr) => write!(f, "Connection refused by {}", addr),
            ConnectError::Timeout(addr) => write!(f, "Timed out connecting to {}", addr),
            ConnectError::Failed(addr, e) => write!(f, "Failed to connect to {}: {}", addr, e),
        }
    }
}

impl std::error::Error for ConnectError {}

/// Control channel read/write errors
#[derive(Debug)]
pub enum ControlError {
    Io(io::Error),
    /// Server closed the control connection while a reply was expected
    Closed,
    /// Reply line exceeded the configured limit without a newline
    LineTooLong(usize),
    Parse(ParseError),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::Io(e) => write!(f, "Control channel I/O error: {}", e),
            ControlError::Closed => write!(f, "Control connection closed by server"),
            ControlError::LineTooLong(limit) => {
                write!(f, "Reply line longer than {} bytes", limit)
            }
            ControlError::Parse(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ControlError {}

impl From<io::Error> for ControlError {
    fn from(error: io::Error) -> Self {
        ControlError::Io(error)
    }
}

impl From<ParseError> for ControlError {
    fn from(error: ParseError) -> Self {
        ControlError::Parse(error)
    }
}

/// Login exchange stage at which authentication stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStage {
    Greeting,
    User,
    Pass,
}

impl fmt::Display for AuthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthStage::Greeting => write!(f, "greeting"),
            AuthStage::User => write!(f, "USER"),
            AuthStage::Pass => write!(f, "PASS"),
        }
    }
}

/// Session authenticator errors
#[derive(Debug)]
pub enum AuthError {
    Rejected {
        stage: AuthStage,
        code: u16,
        message: String,
    },
    Channel {
        stage: AuthStage,
        source: ControlError,
    },
}

impl AuthError {
    pub fn stage(&self) -> AuthStage {
        match self {
            AuthError::Rejected { stage, .. } | AuthError::Channel { stage, .. } => *stage,
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Rejected {
                stage,
                code,
                message,
            } => write!(
                f,
                "Login rejected at {}: {}",
                stage,
                rejection_message(*code, message)
            ),
            AuthError::Channel { stage, source } => {
                write!(f, "Login failed at {}: {}", stage, source)
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Transfer engine errors
#[derive(Debug)]
pub enum TransferError {
    /// TYPE or PASV refused by the server
    Preamble {
        command: &'static str,
        code: u16,
        message: String,
    },
    MalformedPasv(ParseError),
    /// RETR or STOR refused, either early or in the completion reply
    CommandRejected {
        command: &'static str,
        code: u16,
        message: String,
    },
    DataConnect(ConnectError),
    Control(ControlError),
    /// Data channel or local file failure
    Io(io::Error),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::Preamble {
                command,
                code,
                message,
            } => write!(f, "{} failed: {}", command, rejection_message(*code, message)),
            TransferError::MalformedPasv(e) => write!(f, "{}", e),
            TransferError::CommandRejected {
                command,
                code,
                message,
            } => write!(f, "{} rejected: {}", command, rejection_message(*code, message)),
            TransferError::DataConnect(e) => write!(f, "Data connection failed: {}", e),
            TransferError::Control(e) => write!(f, "{}", e),
            TransferError::Io(e) => write!(f, "Transfer I/O error: {}", e),
        }
    }
}

impl std::error::Error for TransferError {}

impl From<ControlError> for TransferError {
    fn from(error: ControlError) -> Self {
        TransferError::Control(error)
    }
}

impl From<io::Error> for TransferError {
    fn from(error: io::Error) -> Self {
        TransferError::Io(error)
    }
}

/// General client error that encompasses all error types
#[derive(Debug)]
pub enum ClientError {
    /// Bad arguments, e.g. both or neither path is remote
    Usage(String),
    Parse(ParseError),
    Config(config::ConfigError),
    Connect(ConnectError),
    Auth(AuthError),
    Transfer(TransferError),
    /// Local file could not be opened
    Io(io::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Usage(e) => write!(f, "Usage error: {}", e),
            ClientError::Parse(e) => write!(f, "Parse error: {}", e),
            ClientError::Config(e) => write!(f, "Configuration error: {}", e),
            ClientError::Connect(e) => write!(f, "Connection error: {}", e),
            ClientError::Auth(e) => write!(f, "Authentication error: {}", e),
            ClientError::Transfer(e) => write!(f, "Transfer error: {}", e),
            ClientError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<ParseError> for ClientError {
    fn from(error: ParseError) -> Self {
        ClientError::Parse(error)
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(error: config::ConfigError) -> Self {
        ClientError::Config(error)
    }
}

impl From<ConnectError> for ClientError {
    fn from(error: ConnectError) -> Self {
        ClientError::Connect(error)
    }
}

impl From<AuthError> for ClientError {
    fn from(error: AuthError) -> Self {
        ClientError::Auth(error)
    }
}

impl From<TransferError> for ClientError {
    fn from(error: TransferError) -> Self {
        ClientError::Transfer(error)
    }
}

impl From<io::Error> for ClientError {
    fn from(error: io::Error) -> Self {
        ClientError::Io(error)
    }
}
