use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::error;

use piecehash::cli::Cli;
use piecehash::config::Config;
use piecehash::engine::use_command;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        error!("{:#}", err);
        let _ = report_error(&err, &mut io::stderr());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from(Config::DEFAULT_PATH));
    let config = Config::load(&config_path)
        .with_context(|| format!("could not load config {}", config_path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    use_command(&cli.command, &config, &mut out)
}

/// Writes the full error chain, whatever the log filter is.
fn report_error<W: Write>(err: &anyhow::Error, out: &mut W) -> io::Result<()> {
    writeln!(out, "Error: {:#}", err)
}
