//! Live Analytics Rust Service
//!
//! Replays a live game: loads a snapshot, reads socket messages from stdin
//! (one JSON object per line) and writes the recomputed `{home, away}`
//! analytics to stdout after every change.

use anyhow::Result;
use dotenv::dotenv;
use live_analytics_rust::{Config, Replay};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // Logs go to stderr; stdout carries the analytics stream
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    info!("Starting Live Analytics Service...");

    let config = Config::from_env()?;
    let mut replay = Replay::load(config).await?;

    let stdin = BufReader::new(tokio::io::stdin());
    let stats = replay.run(stdin, tokio::io::stdout()).await?;

    info!(
        "Replay finished: {} lines, {} applied, {} malformed, {} refreshes, {} emissions",
        stats.lines_read,
        stats.messages_applied,
        stats.parse_failures,
        stats.refreshes,
        stats.emissions
    );
    Ok(())
}
