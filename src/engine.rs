// src/engine.rs
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use log::{debug, info};

use crate::bencode::{bvalue_to_json, decode_exact};
use crate::cli::Command;
use crate::config::Config;
use crate::torrent::{pieces_from_metadata, read_torrent, Metainfo, PieceHashes, PieceLayout};

/// Runs one command, writing its report to `out`.
pub fn use_command<W: Write>(command: &Command, config: &Config, out: &mut W) -> anyhow::Result<()> {
    match command {
        Command::Pieces { path, allow_partial } => {
            let path = path.as_deref().unwrap_or(config.torrent_path.as_path());
            print_pieces(path, config.piece_layout(*allow_partial), out)
        }
        Command::Info { path, allow_partial } => {
            print_info(path, config.piece_layout(*allow_partial), out)
        }
        Command::Decode { value } => {
            let decoded = decode_exact(value.as_bytes())
                .with_context(|| format!("could not decode {:?}", value))?;
            writeln!(out, "{}", serde_json::to_string(&bvalue_to_json(&decoded))?)?;
            Ok(())
        }
    }
}

fn load(path: &Path) -> anyhow::Result<Metainfo> {
    debug!("loading torrent from {}", path.display());
    Metainfo::from_file(path).with_context(|| format!("could not load {}", path.display()))
}

// Only `info` -> `pieces` is looked at, so other malformed keys are harmless.
fn print_pieces<W: Write>(path: &Path, layout: PieceLayout, out: &mut W) -> anyhow::Result<()> {
    debug!("reading pieces from {}", path.display());
    let value = read_torrent(path).with_context(|| format!("could not load {}", path.display()))?;
    let hashes = PieceHashes::from_bytes(pieces_from_metadata(&value)?, layout)?;
    info!("{} piece hashes in {}", hashes.len(), path.display());

    writeln!(out, "{}", hashes.byte_len())?;
    hashes.write_piece_lines(out)?;
    Ok(())
}

fn print_info<W: Write>(path: &Path, layout: PieceLayout, out: &mut W) -> anyhow::Result<()> {
    let summary = load(path)?.summary(layout)?;
    let unknown = || "unknown".to_string();

    writeln!(out, "Tracker URL: {}", summary.announce.unwrap_or_else(unknown))?;
    if let Some(name) = &summary.name {
        writeln!(out, "Name: {}", name)?;
    }
    writeln!(
        out,
        "Length: {}",
        summary.length.map(|l| l.to_string()).unwrap_or_else(unknown)
    )?;
    writeln!(out, "Info Hash: {}", hex::encode(summary.info_hash))?;
    writeln!(
        out,
        "Piece Length: {}",
        summary.piece_length.map(|l| l.to_string()).unwrap_or_else(unknown)
    )?;
    writeln!(out, "Piece Hashes:")?;
    for hash in summary.pieces.to_hex() {
        writeln!(out, "{}", hash)?;
    }
    Ok(())
}
