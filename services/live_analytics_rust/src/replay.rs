//! Replay driver: feeds socket messages through a live session and emits
//! the analytics after every recompute.

use crate::config::Config;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sideline_rust_core::analytics::parse_snapshot;
use sideline_rust_core::{GameAnalytics, GameSnapshot, LiveAction, LiveGameSession, SocketMessage};
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, error, info, warn};

/// One analytics emission on stdout
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Emission {
    pub seq: u64,
    pub emitted_at: DateTime<Utc>,
    pub reason: String,
    pub analytics: GameAnalytics,
}

/// Counters for one replay run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub lines_read: u64,
    pub messages_applied: u64,
    pub parse_failures: u64,
    pub refreshes: u64,
    pub emissions: u64,
}

pub struct Replay {
    config: Config,
    session: LiveGameSession,
    stats: ReplayStats,
    next_seq: u64,
}

impl Replay {
    /// Load the snapshot file and start a session on it.
    pub async fn load(config: Config) -> Result<Self> {
        let snapshot = read_snapshot(&config.snapshot_path).await?;
        let mut session = LiveGameSession::new(config.live.clone());
        session.replace_snapshot(snapshot);
        info!(
            "Loaded snapshot from {} (log capacity {}, merge events: {})",
            config.snapshot_path.display(),
            config.live.event_log_capacity,
            config.live.merge_live_events
        );
        Ok(Self {
            config,
            session,
            stats: ReplayStats::default(),
            next_seq: 0,
        })
    }

    pub fn session(&self) -> &LiveGameSession {
        &self.session
    }

    pub fn stats(&self) -> &ReplayStats {
        &self.stats
    }

    /// Analytics for the snapshot as loaded.
    pub fn initial_emission(&mut self) -> Emission {
        self.emit("initial")
    }

    /// Apply one line of input. Returns an emission when analytics changed.
    pub async fn handle_line(&mut self, line: &str) -> Option<Emission> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        self.stats.lines_read += 1;

        let message = match SocketMessage::parse(line) {
            Ok(m) => m,
            Err(e) => {
                self.stats.parse_failures += 1;
                warn!("Skipping socket message: {}", e);
                return None;
            }
        };
        self.stats.messages_applied += 1;

        match self.session.apply_message(message) {
            LiveAction::Refreshed { reason } => {
                self.stats.refreshes += 1;
                Some(self.emit(&reason))
            }
            LiveAction::RefreshRequested { reason } => {
                self.stats.refreshes += 1;
                match read_snapshot(&self.config.snapshot_path).await {
                    Ok(snapshot) => {
                        self.session.replace_snapshot(snapshot);
                        Some(self.emit(&reason))
                    }
                    Err(e) => {
                        error!(
                            "Refresh after {} failed, keeping last snapshot: {:#}",
                            reason, e
                        );
                        None
                    }
                }
            }
            LiveAction::Appended { seq, merged } => {
                debug!("Appended live event #{} (merged: {})", seq, merged);
                merged.then(|| self.emit("live_event"))
            }
        }
    }

    /// Emit the initial analytics, then one line per recompute until the
    /// reader is exhausted.
    pub async fn run<R, W>(&mut self, reader: R, mut writer: W) -> Result<ReplayStats>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let initial = self.initial_emission();
        self.write_emission(&mut writer, &initial).await?;

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await.context("Failed to read socket input")? {
            if let Some(emission) = self.handle_line(&line).await {
                self.write_emission(&mut writer, &emission).await?;
            }
        }

        writer.flush().await?;
        Ok(self.stats.clone())
    }

    fn emit(&mut self, reason: &str) -> Emission {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.stats.emissions += 1;
        Emission {
            seq,
            emitted_at: Utc::now(),
            reason: reason.to_string(),
            analytics: self.session.analytics().clone(),
        }
    }

    async fn write_emission<W: AsyncWrite + Unpin>(
        &self,
        writer: &mut W,
        emission: &Emission,
    ) -> Result<()> {
        let mut out = if self.config.pretty_output {
            serde_json::to_string_pretty(emission)?
        } else {
            serde_json::to_string(emission)?
        };
        out.push('\n');
        writer
            .write_all(out.as_bytes())
            .await
            .context("Failed to write analytics")?;
        Ok(())
    }
}

/// Read a snapshot file. IO failures are errors; a file that holds
/// malformed JSON or a malformed snapshot is treated as no snapshot.
async fn read_snapshot(path: &Path) -> Result<Option<GameSnapshot>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;

    let value: Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            warn!("Snapshot {} is not valid JSON: {}", path.display(), e);
            return Ok(None);
        }
    };
    match parse_snapshot(&value) {
        Ok(snapshot) => Ok(snapshot),
        Err(e) => {
            warn!("Snapshot {} rejected: {}", path.display(), e);
            Ok(None)
        }
    }
}
