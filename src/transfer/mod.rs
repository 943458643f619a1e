//! Transfer module for the FTP client
//!
//! Handles connection setup, the control channel, passive-mode data
//! transfers and the local file side of a copy.

pub mod connection;
pub mod control;
pub mod engine;
pub mod file_ops;
pub mod modes;

// Re-export key types and functions
pub use connection::open_connection;
pub use control::ControlChannel;
pub use engine::{retrieve, store};
pub use file_ops::{LocalSink, copy_stream, open_source};
pub use modes::TransferType;
