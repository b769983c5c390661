//! Live game session: snapshot, live log and the analytics derived from them.
//!
//! Every recompute is a fresh pure call, so when triggers pile up the latest
//! result simply replaces the previous one.

use super::{LiveEventLog, LiveUpdate, SocketMessage};
use crate::analytics::{calculate_analytics, GameAnalytics};
use crate::models::{GameEvent, GameSnapshot};
use std::env;
use tracing::{debug, info};

/// Default number of socket events kept in the local log
pub const DEFAULT_EVENT_LOG_CAPACITY: usize = 200;

/// Upper bound on the local log size
pub const MAX_EVENT_LOG_CAPACITY: usize = 10_000;

/// Configuration for a live session
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSessionConfig {
    pub event_log_capacity: usize,
    /// Merge appended events into the snapshot right away instead of waiting
    /// for the next refresh to carry them.
    pub merge_live_events: bool,
}

impl Default for LiveSessionConfig {
    fn default() -> Self {
        Self {
            event_log_capacity: DEFAULT_EVENT_LOG_CAPACITY,
            merge_live_events: true,
        }
    }
}

impl LiveSessionConfig {
    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let event_log_capacity = env::var("LIVE_EVENT_LOG_CAPACITY")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_EVENT_LOG_CAPACITY)
            .clamp(1, MAX_EVENT_LOG_CAPACITY);

        let merge_live_events = env::var("LIVE_MERGE_EVENTS")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        Self {
            event_log_capacity,
            merge_live_events,
        }
    }
}

/// Truthy env flag: `1`, `true` or `yes`, case-insensitive.
pub fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

/// What the session did with a socket message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiveAction {
    /// Lifecycle message carried a fresh snapshot; analytics recomputed.
    Refreshed { reason: String },
    /// Lifecycle message without a snapshot; the caller must refetch and
    /// hand the result to [`LiveGameSession::replace_snapshot`].
    RefreshRequested { reason: String },
    /// Event appended to the live log. `merged` when it was also folded into
    /// the snapshot and analytics recomputed.
    Appended { seq: u64, merged: bool },
}

impl LiveAction {
    pub fn recomputed(&self) -> bool {
        matches!(
            self,
            LiveAction::Refreshed { .. } | LiveAction::Appended { merged: true, .. }
        )
    }
}

#[derive(Debug, Clone)]
pub struct LiveGameSession {
    config: LiveSessionConfig,
    snapshot: Option<GameSnapshot>,
    log: LiveEventLog,
    analytics: GameAnalytics,
    recomputes: u64,
}

impl LiveGameSession {
    pub fn new(config: LiveSessionConfig) -> Self {
        let log = LiveEventLog::new(config.event_log_capacity);
        Self {
            config,
            snapshot: None,
            log,
            analytics: GameAnalytics::empty(),
            recomputes: 0,
        }
    }

    pub fn with_snapshot(config: LiveSessionConfig, snapshot: GameSnapshot) -> Self {
        let mut session = Self::new(config);
        session.replace_snapshot(Some(snapshot));
        session
    }

    /// Swap in a new snapshot and recompute. Last write wins.
    pub fn replace_snapshot(&mut self, snapshot: Option<GameSnapshot>) -> &GameAnalytics {
        self.snapshot = snapshot;
        self.recompute()
    }

    pub fn apply_message(&mut self, message: SocketMessage) -> LiveAction {
        match message.update() {
            LiveUpdate::RefreshSnapshot => {
                let reason = message.kind.clone();
                match message.snapshot() {
                    Some(snapshot) => {
                        info!("Snapshot refreshed by {}", reason);
                        self.replace_snapshot(Some(snapshot));
                        LiveAction::Refreshed { reason }
                    }
                    None => {
                        debug!("Refresh requested by {}", reason);
                        LiveAction::RefreshRequested { reason }
                    }
                }
            }
            LiveUpdate::AppendEvent => {
                let event = message.as_event();
                let seq = self.log.push(message);
                let merged = self.config.merge_live_events
                    && event.map_or(false, |e| self.merge_event(e));
                if merged {
                    self.recompute();
                }
                LiveAction::Appended { seq, merged }
            }
        }
    }

    pub fn analytics(&self) -> &GameAnalytics {
        &self.analytics
    }

    pub fn snapshot(&self) -> Option<&GameSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn log(&self) -> &LiveEventLog {
        &self.log
    }

    pub fn config(&self) -> &LiveSessionConfig {
        &self.config
    }

    /// Number of times analytics have been recomputed.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// Fold an event into the snapshot's event list. Events without a team
    /// id can't be attributed to a side and stay log-only.
    fn merge_event(&mut self, event: GameEvent) -> bool {
        if event.team_id.as_ref().map_or(true, |id| id.is_blank()) {
            return false;
        }
        let Some(sport) = self.snapshot.as_mut().and_then(|s| s.sport.as_mut()) else {
            return false;
        };
        sport.events.get_or_insert_with(Vec::new).push(event);
        true
    }

    fn recompute(&mut self) -> &GameAnalytics {
        self.analytics = calculate_analytics(self.snapshot.as_ref());
        self.recomputes += 1;
        &self.analytics
    }
}
