//! Status command - query a running server's health endpoint
//!
//! Useful for checking whether the store connection is up without tailing
//! server logs. The server keeps /health reachable while still connecting.

use anyhow::{Context, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Arguments for the status command
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Base URL of the running server
    #[arg(
        long,
        env = "ORATIO_SERVER_URL",
        default_value = "http://127.0.0.1:3000"
    )]
    pub server: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Health payload served by the API
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthDocument {
    pub status: String,
    pub store_connected: bool,
    pub timestamp: String,
}

/// Query the health endpoint of a running server
pub async fn run_status(args: StatusArgs) -> Result<()> {
    let url = format!("{}/health", args.server.trim_end_matches('/'));
    let health: HealthDocument = reqwest::get(&url)
        .await
        .with_context(|| format!("Failed to reach {}", url))?
        .error_for_status()
        .context("Server answered with an error status")?
        .json()
        .await
        .context("Health payload was not valid JSON")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&health)?);
    } else {
        println!("server:    {}", args.server);
        println!("status:    {}", health.status);
        println!(
            "store:     {}",
            if health.store_connected {
                "connected"
            } else {
                "not connected"
            }
        );
        println!("timestamp: {}", health.timestamp);
    }

    Ok(())
}
