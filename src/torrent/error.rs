use std::path::PathBuf;

use thiserror::Error;

use crate::bencode::BencodeError;

#[derive(Debug, Error)]
pub enum TorrentError {
    #[error("I/O error while reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bencode error: {0}")]
    Decode(#[from] BencodeError),

    #[error("missing '{0}'")]
    MissingKey(String),

    #[error("'{key}' must be a {expected}, found {found}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("'{key}' value not valid UTF-8")]
    InvalidUtf8 { key: String },

    #[error("'{key}' must not be negative, found {value}")]
    NegativeInteger { key: String, value: i64 },

    #[error("total length of files overflows u64")]
    LengthOverflow,

    #[error("pieces length {len} is not a multiple of 20")]
    MalformedPieces { len: usize },
}
