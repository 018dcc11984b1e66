//! `kwic` command-line entry point

use anyhow::Result;
use clap::Parser;
use kwic_cli::commands::Commands;

/// Keyword-in-context concordances for text corpora
#[derive(Debug, Parser)]
#[command(name = "kwic", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
