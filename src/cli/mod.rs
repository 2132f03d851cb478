//! Command-line interface for the GenUI cache service.

mod cache;
mod serve;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Single-slot cache service for LLM-generated UI components.
#[derive(Parser, Debug)]
#[command(name = "genui", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the retrieval API server
    Serve {
        /// Bind address override
        #[arg(long)]
        bind: Option<String>,
        /// Listen port override
        #[arg(long)]
        port: Option<u16>,
    },
    /// Delete the cached component artifacts to force regeneration
    ClearCache,
    /// Show configuration and cache slot status
    Status,
}

/// Dispatch a parsed CLI invocation.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve { bind, port } => serve::cmd_serve(bind, port).await,
        Command::ClearCache => cache::cmd_clear_cache(),
        Command::Status => cache::cmd_status(),
    }
}
