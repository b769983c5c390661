//! Live game glue: socket message triage, the local event log and the
//! session that keeps analytics current as messages arrive.
//!
//! Lifecycle messages (`game_started`, `game_ended`, `period_changed`,
//! `status_changed`) mean the snapshot itself is stale and must be
//! refetched. Everything else is a play-by-play event that only needs a
//! local append.

use crate::error::LiveMessageError;
use crate::models::{GameEvent, GameSnapshot};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub mod log;
pub mod session;

pub use log::{LiveEntry, LiveEventLog};
pub use session::{parse_flag, LiveAction, LiveGameSession, LiveSessionConfig};

/// Message types that invalidate the whole snapshot.
pub const REFRESH_MESSAGE_TYPES: &[&str] = &[
    "game_started",
    "game_ended",
    "period_changed",
    "status_changed",
];

/// What a socket message asks the live view to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiveUpdate {
    RefreshSnapshot,
    AppendEvent,
}

/// Triage a socket message by its `type`.
pub fn classify(message_type: &str) -> LiveUpdate {
    if REFRESH_MESSAGE_TYPES.contains(&message_type) {
        LiveUpdate::RefreshSnapshot
    } else {
        LiveUpdate::AppendEvent
    }
}

/// A message delivered over the game's socket room: `{type, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SocketMessage {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl SocketMessage {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Map::new(),
        }
    }

    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.payload.insert(key.to_string(), value);
        self
    }

    pub fn parse(raw: &str) -> Result<Self, LiveMessageError> {
        let value: Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, LiveMessageError> {
        let Value::Object(mut payload) = value else {
            return Err(LiveMessageError::NotAnObject);
        };
        let kind = match payload.remove("type") {
            Some(Value::String(kind)) if !kind.trim().is_empty() => kind,
            _ => return Err(LiveMessageError::MissingType),
        };
        Ok(Self { kind, payload })
    }

    pub fn update(&self) -> LiveUpdate {
        classify(&self.kind)
    }

    /// The game event this message carries: either a nested `event` object
    /// or the message itself, keyed by its `type`.
    pub fn as_event(&self) -> Option<GameEvent> {
        let mut fields = match self.payload.get("event") {
            Some(Value::Object(event)) => event.clone(),
            _ => self.payload.clone(),
        };
        if !fields.contains_key("eventType") && !fields.contains_key("type") {
            fields.insert("type".to_string(), Value::String(self.kind.clone()));
        }
        serde_json::from_value(Value::Object(fields)).ok()
    }

    /// A fresh snapshot pushed along with a lifecycle message, if any.
    pub fn snapshot(&self) -> Option<GameSnapshot> {
        let value = self.payload.get("snapshot")?;
        serde_json::from_value(value.clone()).ok()
    }
}
