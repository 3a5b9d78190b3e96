pub mod bvalue;
pub mod decode;
pub mod encode;
pub mod error;

pub use bvalue::{BDict, BValue}; // re-export
pub use decode::{decode_bencode, decode_exact}; // re-export
pub use encode::{bvalue_to_json, encode_bdict, encode_bvalue}; // re-export
pub use error::BencodeError;
