use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::torrent::PieceLayout;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Torrent read by `pieces` when no path is given on the command line.
    pub torrent_path: PathBuf,
    /// Keep a short trailing chunk of `pieces` instead of rejecting it.
    pub allow_partial_pieces: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            torrent_path: PathBuf::from("sample.torrent"),
            allow_partial_pieces: false,
        }
    }
}

impl Config {
    pub const DEFAULT_PATH: &'static str = "piecehash.toml";

    /// Loads the config at `path`, falling back to defaults if it does not
    /// exist. The file is never written.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Piece layout, with `allow_partial` from the command line taking priority.
    pub fn piece_layout(&self, allow_partial: bool) -> PieceLayout {
        if allow_partial || self.allow_partial_pieces {
            PieceLayout::Truncate
        } else {
            PieceLayout::Strict
        }
    }
}
