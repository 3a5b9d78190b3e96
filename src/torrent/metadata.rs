use std::{fs, path::Path};

use log::{debug, warn};

use crate::bencode::{decode_bencode, BDict, BValue};
use crate::torrent::{info_hash, PieceHashes, PieceLayout, TorrentError};

/// A decoded .torrent file: the `info` dictionary plus the rest of the root.
///
/// Root keys such as `announce` are only interpreted when asked for, so a
/// malformed tracker URL never gets in the way of reading the pieces.
#[derive(Debug, Clone, PartialEq)]
pub struct Metainfo {
    pub root: BDict, // Top-level keys other than `info`
    pub info: BDict, // Torrent metadata, kept in encoded order
}

/// Human-facing summary of a torrent, as printed by the `info` command.
#[derive(Debug, Clone, PartialEq)]
pub struct TorrentSummary {
    pub announce: Option<String>,
    pub name: Option<String>,
    pub length: Option<u64>,
    pub piece_length: Option<u64>,
    pub info_hash: [u8; 20],
    pub pieces: PieceHashes,
}

/// Reads a .torrent file from disk and decodes it.
///
/// The whole file is buffered before decoding.
pub fn read_torrent<P: AsRef<Path>>(path: P) -> Result<BValue, TorrentError> {
    let path = path.as_ref();
    let buf = fs::read(path).map_err(|source| TorrentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes from {}", buf.len(), path.display());

    decode_torrent(&buf)
}

/// Decodes torrent bytes. Bytes after the top-level value are ignored with a
/// warning.
pub fn decode_torrent(buf: &[u8]) -> Result<BValue, TorrentError> {
    let (consumed, value) = decode_bencode(buf)?;
    if consumed < buf.len() {
        warn!(
            "ignoring {} trailing bytes after offset {}",
            buf.len() - consumed,
            consumed
        );
    }
    Ok(value)
}

impl Metainfo {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TorrentError> {
        Self::from_bvalue(read_torrent(path)?)
    }

    /// Creates a `Metainfo` from a decoded value.
    ///
    /// The root must be a dictionary holding an `info` dictionary.
    pub fn from_bvalue(value: BValue) -> Result<Self, TorrentError> {
        let mut root = match value {
            BValue::Dict(d) => d,
            other => {
                return Err(TorrentError::WrongType {
                    key: "(root)".to_string(),
                    expected: "dictionary",
                    found: other.kind(),
                })
            }
        };

        let info = match root.remove(b"info") {
            Some(BValue::Dict(d)) => d,
            Some(other) => {
                return Err(TorrentError::WrongType {
                    key: "info".to_string(),
                    expected: "dictionary",
                    found: other.kind(),
                })
            }
            None => return Err(TorrentError::MissingKey("info".to_string())),
        };

        Ok(Metainfo { root, info })
    }

    /// The tracker URL, if present.
    pub fn announce(&self) -> Result<Option<String>, TorrentError> {
        get_optional_string(&self.root, "announce")
    }

    /// The raw `pieces` byte string of the info dictionary.
    pub fn pieces(&self) -> Result<&[u8], TorrentError> {
        lookup_bytestring(&self.info, "pieces")
    }

    pub fn piece_hashes(&self, layout: PieceLayout) -> Result<PieceHashes, TorrentError> {
        PieceHashes::from_bytes(self.pieces()?, layout)
    }

    pub fn info_hash(&self) -> [u8; 20] {
        info_hash(&self.info)
    }

    /// Total content length: `length` for single-file torrents, the sum of
    /// `files[*].length` for multi-file ones.
    pub fn total_length(&self) -> Result<Option<u64>, TorrentError> {
        if let Some(length) = get_optional_integer(&self.info, "length")? {
            return Ok(Some(non_negative("length", length)?));
        }

        let files = match self.info.get(b"files") {
            Some(BValue::List(files)) => files,
            Some(other) => {
                return Err(TorrentError::WrongType {
                    key: "files".to_string(),
                    expected: "list",
                    found: other.kind(),
                })
            }
            None => return Ok(None),
        };

        let mut total = 0u64;
        for file in files {
            let file = file.as_dict().ok_or_else(|| TorrentError::WrongType {
                key: "files".to_string(),
                expected: "list of dictionaries",
                found: file.kind(),
            })?;
            let length = non_negative("length", get_integer(file, "length")?)?;
            total = total
                .checked_add(length)
                .ok_or(TorrentError::LengthOverflow)?;
        }
        Ok(Some(total))
    }

    pub fn summary(&self, layout: PieceLayout) -> Result<TorrentSummary, TorrentError> {
        let piece_length = get_optional_integer(&self.info, "piece length")?
            .map(|l| non_negative("piece length", l))
            .transpose()?;

        Ok(TorrentSummary {
            announce: self.announce()?,
            name: get_optional_string(&self.info, "name")?,
            length: self.total_length()?,
            piece_length,
            info_hash: self.info_hash(),
            pieces: self.piece_hashes(layout)?,
        })
    }
}

fn non_negative(key: &str, value: i64) -> Result<u64, TorrentError> {
    u64::try_from(value).map_err(|_| TorrentError::NegativeInteger {
        key: key.to_string(),
        value,
    })
}

/// Looks up a key, failing with `MissingKey` if it is absent.
pub fn lookup_value<'a>(dict: &'a BDict, key: &str) -> Result<&'a BValue, TorrentError> {
    dict.get(key.as_bytes())
        .ok_or_else(|| TorrentError::MissingKey(key.to_string()))
}

fn wrong_type(key: &str, expected: &'static str, found: &BValue) -> TorrentError {
    TorrentError::WrongType {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

pub fn lookup_dict<'a>(dict: &'a BDict, key: &str) -> Result<&'a BDict, TorrentError> {
    let val = lookup_value(dict, key)?;
    val.as_dict().ok_or_else(|| wrong_type(key, "dictionary", val))
}

/// Looks up a key and returns a byte slice if the value is a ByteString.
pub fn lookup_bytestring<'a>(dict: &'a BDict, key: &str) -> Result<&'a [u8], TorrentError> {
    let val = lookup_value(dict, key)?;
    val.as_bytes().ok_or_else(|| wrong_type(key, "byte string", val))
}

/// Gets a ByteString from the dictionary and converts it into a UTF-8 String.
pub fn get_string(dict: &BDict, key: &str) -> Result<String, TorrentError> {
    let bytes = lookup_bytestring(dict, key)?;
    String::from_utf8(bytes.to_vec()).map_err(|_| TorrentError::InvalidUtf8 {
        key: key.to_string(),
    })
}

pub fn get_integer(dict: &BDict, key: &str) -> Result<i64, TorrentError> {
    let val = lookup_value(dict, key)?;
    val.as_integer().ok_or_else(|| wrong_type(key, "integer", val))
}

/// Like [`get_string`], but an absent key is `Ok(None)`.
pub fn get_optional_string(dict: &BDict, key: &str) -> Result<Option<String>, TorrentError> {
    if !dict.contains_key(key.as_bytes()) {
        return Ok(None);
    }
    get_string(dict, key).map(Some)
}

pub fn get_optional_integer(dict: &BDict, key: &str) -> Result<Option<i64>, TorrentError> {
    if !dict.contains_key(key.as_bytes()) {
        return Ok(None);
    }
    get_integer(dict, key).map(Some)
}
