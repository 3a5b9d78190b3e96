use thiserror::Error;

/// Errors produced while decoding bencode. Every variant carries the
/// absolute byte offset in the input where decoding failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BencodeError {
    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEnd { offset: usize },

    #[error("unexpected byte 0x{byte:02x} at offset {offset}")]
    UnexpectedByte { offset: usize, byte: u8 },

    #[error("invalid integer at offset {offset}: {reason}")]
    InvalidInteger { offset: usize, reason: String },

    #[error("invalid string length at offset {offset}: {reason}")]
    InvalidLength { offset: usize, reason: String },

    #[error("dictionary key at offset {offset} must be a byte string")]
    InvalidKey { offset: usize },

    #[error("nesting deeper than {limit} levels at offset {offset}")]
    NestingTooDeep { offset: usize, limit: usize },

    #[error("trailing data after value at offset {offset}")]
    TrailingData { offset: usize },
}

