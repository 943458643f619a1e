//! Authentication
//!
//! Logs a user in over an open control channel.

pub mod login;

pub use login::login;
