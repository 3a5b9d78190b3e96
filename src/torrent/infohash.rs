// infohash.rs
use sha1::{Digest, Sha1};

use crate::bencode::{encode_bdict, BDict};

/// SHA-1 of the bencoded info dictionary, re-encoded in its decoded order.
pub fn info_hash(info: &BDict) -> [u8; 20] {
    let encoded = encode_bdict(info);

    let mut hasher = Sha1::new();
    hasher.update(&encoded);
    let result = hasher.finalize();

    let mut hash_bytes = [0u8; 20];
    hash_bytes.copy_from_slice(&result);
    hash_bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bencode::decode_bencode;

    #[test]
    fn test_info_hash_of_empty_dict() {
        // sha1("de")
        assert_eq!(
            hex::encode(info_hash(&BDict::new())),
            "600ccd1b71569232d01d110bc63e906beab04d8c"
        );
    }

    #[test]
    fn test_info_hash_matches_raw_bytes() {
        let raw = b"d6:lengthi3e4:name1:a12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaae";
        let (_, value) = decode_bencode(raw).unwrap();

        let mut hasher = Sha1::new();
        hasher.update(raw);
        let expected: [u8; 20] = hasher.finalize().into();

        assert_eq!(info_hash(value.as_dict().unwrap()), expected);
    }
}
