use std::io::{self, Write};

use crate::bencode::BValue;
use crate::torrent::metadata::{lookup_bytestring, lookup_dict};
use crate::torrent::TorrentError;

/// SHA-1 digests are 20 bytes each.
pub const HASH_LEN: usize = 20;

/// What to do with a `pieces` string whose length is not a multiple of 20.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PieceLayout {
    /// Reject the torrent as malformed.
    #[default]
    Strict,
    /// Keep the short trailing chunk as the last hash.
    Truncate,
}

/// The concatenated piece hashes of an info dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieceHashes {
    raw: Vec<u8>,
}

impl PieceHashes {
    pub fn from_bytes(bytes: &[u8], layout: PieceLayout) -> Result<Self, TorrentError> {
        if layout == PieceLayout::Strict && bytes.len() % HASH_LEN != 0 {
            return Err(TorrentError::MalformedPieces { len: bytes.len() });
        }
        Ok(PieceHashes {
            raw: bytes.to_vec(),
        })
    }

    /// Raw length of the `pieces` byte string.
    pub fn byte_len(&self) -> usize {
        self.raw.len()
    }

    /// Number of hashes, counting a short trailing chunk as one.
    pub fn len(&self) -> usize {
        (self.raw.len() + HASH_LEN - 1) / HASH_LEN
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &[u8]> {
        self.raw.chunks(HASH_LEN)
    }

    /// Lowercase hex of every hash, 40 characters per full hash.
    pub fn to_hex(&self) -> Vec<String> {
        self.iter().map(hex::encode).collect()
    }

    /// Writes one `Piece <n> hash: <hex>` line per hash, numbered from 1.
    pub fn write_piece_lines<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for (i, hash) in self.iter().enumerate() {
            writeln!(out, "Piece {} hash: {}", i + 1, hex::encode(hash))?;
        }
        Ok(())
    }
}

/// Looks up `info` -> `pieces` in a decoded torrent and returns the raw bytes.
pub fn pieces_from_metadata(value: &BValue) -> Result<&[u8], TorrentError> {
    let root = value.as_dict().ok_or_else(|| TorrentError::WrongType {
        key: "(root)".to_string(),
        expected: "dictionary",
        found: value.kind(),
    })?;
    let info = lookup_dict(root, "info")?;
    lookup_bytestring(info, "pieces")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bencode::decode_bencode;

    const ZERO_HASH: &str = "0000000000000000000000000000000000000000";

    #[test]
    fn test_exact_multiple() {
        let bytes: Vec<u8> = (0..60).collect();
        let hashes = PieceHashes::from_bytes(&bytes, PieceLayout::Strict).unwrap();
        assert_eq!(hashes.len(), 3);
        assert_eq!(hashes.byte_len(), 60);
        for hash in hashes.iter() {
            assert_eq!(hash.len(), HASH_LEN);
        }
        for hex in hashes.to_hex() {
            assert_eq!(hex.len(), 40);
        }
        assert_eq!(hashes.iter().nth(1), Some(&bytes[20..40]));
    }

    #[test]
    fn test_hex_is_lowercase() {
        let hashes = PieceHashes::from_bytes(&[0xab; 20], PieceLayout::Strict).unwrap();
        assert_eq!(hashes.to_hex(), vec!["ab".repeat(20)]);
    }

    #[test]
    fn test_two_zero_pieces() {
        let hashes = PieceHashes::from_bytes(&[0u8; 40], PieceLayout::Strict).unwrap();
        let mut out = Vec::new();
        hashes.write_piece_lines(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            format!("Piece 1 hash: {ZERO_HASH}\nPiece 2 hash: {ZERO_HASH}\n")
        );
    }

    #[test]
    fn test_partial_chunk_strict() {
        let err = PieceHashes::from_bytes(&[0u8; 25], PieceLayout::Strict).unwrap_err();
        assert!(matches!(err, TorrentError::MalformedPieces { len: 25 }));
    }

    #[test]
    fn test_partial_chunk_truncate() {
        let hashes = PieceHashes::from_bytes(&[0u8; 25], PieceLayout::Truncate).unwrap();
        assert_eq!(hashes.len(), 2);
        let hex = hashes.to_hex();
        assert_eq!(hex[0], ZERO_HASH);
        assert_eq!(hex[1], "0000000000");
    }

    #[test]
    fn test_empty_pieces() {
        let hashes = PieceHashes::from_bytes(&[], PieceLayout::Strict).unwrap();
        assert!(hashes.is_empty());
        assert_eq!(hashes.len(), 0);
    }

    #[test]
    fn test_pieces_from_metadata() {
        let (_, value) = decode_bencode(b"d4:infod6:pieces3:abcee").unwrap();
        assert_eq!(pieces_from_metadata(&value).unwrap(), b"abc");

        let (_, value) = decode_bencode(b"d4:infoi1ee").unwrap();
        assert!(matches!(
            pieces_from_metadata(&value),
            Err(TorrentError::WrongType { .. })
        ));

        let (_, value) = decode_bencode(b"d4:infodee").unwrap();
        assert!(matches!(
            pieces_from_metadata(&value),
            Err(TorrentError::MissingKey(_))
        ));

        let (_, value) = decode_bencode(b"le").unwrap();
        assert!(pieces_from_metadata(&value).is_err());
    }
}
