//! Configuration for the live analytics replay service
//!
//! - Snapshot file location
//! - Output formatting
//! - Live session settings (log capacity, event merging)

use anyhow::{Context, Result};
use sideline_rust_core::live::parse_flag;
use sideline_rust_core::LiveSessionConfig;
use std::env;
use std::path::PathBuf;

/// Pretty-print emitted analytics by default?
pub const DEFAULT_PRETTY_OUTPUT: bool = false;

#[derive(Debug, Clone)]
pub struct Config {
    pub snapshot_path: PathBuf,
    pub pretty_output: bool,
    pub live: LiveSessionConfig,
}

impl Config {
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            snapshot_path: snapshot_path.into(),
            pretty_output: DEFAULT_PRETTY_OUTPUT,
            live: LiveSessionConfig::default(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let snapshot_path = env::var("SNAPSHOT_PATH")
            .context("SNAPSHOT_PATH must point at a game snapshot JSON file")?;

        let pretty_output = env::var("PRETTY_OUTPUT")
            .map(|v| parse_flag(&v))
            .unwrap_or(DEFAULT_PRETTY_OUTPUT);

        Ok(Self {
            snapshot_path: PathBuf::from(snapshot_path),
            pretty_output,
            live: LiveSessionConfig::from_env(),
        })
    }
}
