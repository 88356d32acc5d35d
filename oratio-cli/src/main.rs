//! oratio CLI - Daily prayer subject server and tooling
//!
//! This is the main entry point for the oratio command-line tool, which provides:
//! - The HTTP API server over a file- or Postgres-backed store (`serve` subcommand)
//! - Health inspection of a running server (`status` subcommand)

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "oratio",
    author,
    version,
    about = "Daily prayer subject API server",
    long_about = "Serve one prayer subject per calendar day over a small JSON API. \
                  Records live in a single JSON file by default, or in Postgres \
                  when a database URL is configured."
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Only log warnings and errors (for script consumption)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Query a running server's health endpoint
    Status(commands::status::StatusArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_setup::init(cli.debug, cli.quiet).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Status(args) => commands::run_status(args).await?,
    }
    Ok(())
}
