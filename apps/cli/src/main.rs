//! LeadScout CLI — key-person discovery for company research.
//!
//! Queries configured people sources, merges and ranks the results, and
//! prints the top contacts with predicted email addresses.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
