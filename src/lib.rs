// lib.rs - Library interface for the piecehash CLI

pub mod bencode;
pub mod cli;
pub mod config;
pub mod engine;
pub mod torrent;

// Re-export commonly used types for easier testing
pub use bencode::{
    bvalue_to_json, decode_bencode, decode_exact, encode_bvalue, BDict, BValue, BencodeError,
};
pub use config::Config;
pub use engine::use_command;
pub use torrent::{
    info_hash, pieces_from_metadata, Metainfo, PieceHashes, PieceLayout, TorrentError,
    TorrentSummary, HASH_LEN,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_simple_bencode() {
        let (_, value) = decode_bencode(b"i42e").unwrap();
        assert_eq!(value, BValue::Integer(42));

        let (_, value) = decode_bencode(b"4:spam").unwrap();
        assert_eq!(value, BValue::ByteString(b"spam".to_vec()));

        let (_, value) = decode_bencode(b"l4:spam4:eggse").unwrap();
        assert_eq!(value, BValue::List(vec![BValue::from("spam"), BValue::from("eggs")]));

        let (_, value) = decode_bencode(b"d3:fooi42ee").unwrap();
        assert_eq!(bvalue_to_json(&value), serde_json::json!({"foo": 42}));
    }

    #[test]
    fn test_decode_invalid_bencode() {
        assert!(decode_bencode(b"d").is_err());
        assert!(decode_bencode(b"4:ab").is_err());
        assert!(decode_bencode(b"invalid").is_err());
        assert!(matches!(
            decode_bencode(b"i e"),
            Err(BencodeError::InvalidInteger { .. })
        ));
    }

    #[test]
    fn test_roundtrip_torrent() {
        let info: BDict = vec![
            ("length", BValue::Integer(40)),
            ("name", BValue::from("zeros.bin")),
            ("piece length", BValue::Integer(20)),
            ("pieces", BValue::ByteString(vec![0; 40])),
        ]
        .into_iter()
        .collect();
        let root = BValue::Dict(vec![("info", BValue::Dict(info))].into_iter().collect());

        let encoded = encode_bvalue(&root);
        let value = decode_exact(&encoded).unwrap();
        assert_eq!(value, root);

        let pieces = pieces_from_metadata(&value).unwrap();
        let hashes = PieceHashes::from_bytes(pieces, PieceLayout::Strict).unwrap();
        assert_eq!(hashes.len(), 2);
        assert!(hashes.to_hex().iter().all(|h| h == &"0".repeat(40)));
    }

    #[test]
    fn test_hash_count_for_multiples_of_twenty() {
        for k in [1usize, 2, 7, 64] {
            let bytes: Vec<u8> = (0..20 * k).map(|i| i as u8).collect();
            let hashes = PieceHashes::from_bytes(&bytes, PieceLayout::Strict).unwrap();
            assert_eq!(hashes.len(), k);
            assert!(hashes.iter().all(|h| h.len() == HASH_LEN));
        }
    }
}
