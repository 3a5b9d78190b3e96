pub mod error;
pub mod infohash;
pub mod metadata;
pub mod pieces;

pub use error::TorrentError;
pub use infohash::info_hash;
pub use metadata::{
    get_integer, get_string, lookup_bytestring, lookup_dict, read_torrent, Metainfo, TorrentSummary,
};
pub use pieces::{pieces_from_metadata, PieceHashes, PieceLayout, HASH_LEN};
