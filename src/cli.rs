use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect BitTorrent metadata files
#[derive(Debug, Parser)]
#[command(name = "piecehash", version)]
pub struct Cli {
    /// Config file to read
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the length of `pieces` and every piece hash
    Pieces {
        /// Path to the .torrent file (defaults to `torrent_path` from the config)
        path: Option<PathBuf>,

        /// Keep a short trailing chunk instead of failing
        #[arg(long)]
        allow_partial: bool,
    },

    /// Print tracker, length, info hash and piece hashes
    Info {
        path: PathBuf,

        #[arg(long)]
        allow_partial: bool,
    },

    /// Decode a bencoded string and print it as JSON
    Decode { value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pieces() {
        let cli = Cli::parse_from(["piecehash", "pieces", "a.torrent", "--allow-partial"]);
        assert_eq!(
            cli.command,
            Command::Pieces {
                path: Some(PathBuf::from("a.torrent")),
                allow_partial: true,
            }
        );
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_pieces_without_path() {
        let cli = Cli::parse_from(["piecehash", "--config", "c.toml", "pieces"]);
        assert_eq!(
            cli.command,
            Command::Pieces {
                path: None,
                allow_partial: false,
            }
        );
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }

    #[test]
    fn test_parse_decode() {
        let cli = Cli::parse_from(["piecehash", "decode", "i42e"]);
        assert_eq!(
            cli.command,
            Command::Decode {
                value: "i42e".to_string()
            }
        );
    }

    #[test]
    fn test_info_requires_path() {
        assert!(Cli::try_parse_from(["piecehash", "info"]).is_err());
    }
}
