//! FTP Protocol implementation
//!
//! Handles command rendering, reply parsing and reply classification.

pub mod classifier;
pub mod commands;
pub mod parser;
pub mod responses;

pub use classifier::{Verdict, classify, rejection_message};
pub use commands::Command;
pub use parser::{multiline_terminator, parse_pasv, parse_response};
pub use responses::{DataEndpoint, ServerResponse};
