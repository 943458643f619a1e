//! FTP transfer types
//!
//! Representation types selectable with the TYPE command.

use std::fmt;

/// FTP representation type for the data transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransferType {
    /// `TYPE A`; any line-ending conversion happens on the server side only
    Ascii,
    /// `TYPE I`; bytes are copied unchanged
    #[default]
    Binary,
}

impl TransferType {
    /// The single-letter type code sent on the wire
    pub fn code(self) -> char {
        match self {
            TransferType::Ascii => 'A',
            TransferType::Binary => 'I',
        }
    }
}

impl fmt::Display for TransferType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferType::Ascii => write!(f, "ascii"),
            TransferType::Binary => write!(f, "binary"),
        }
    }
}
