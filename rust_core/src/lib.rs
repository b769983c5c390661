//! Sideline Core - live game analytics for team-management views.
//!
//! This module provides:
//! - Game snapshot models (football, basketball, baseball, anything else)
//! - Event normalization across mixed naming conventions
//! - Per-sport team analytics with a generic fallback
//! - Side-by-side comparisons and player breakdowns
//! - Live socket triage and a session that keeps analytics current
//!
//! Analytics are a best-effort display feature: nothing here returns an
//! error for bad game data. Unusable snapshots produce a fully-populated
//! empty record instead.

pub mod analytics;
pub mod comparison;
pub mod error;
pub mod live;
pub mod models;
pub mod player;

pub use analytics::{
    batch_calculate_analytics, calculate_analytics, calculate_analytics_json, GameAnalytics,
    TeamAnalytics,
};
pub use comparison::{compare, Comparison, ComparisonRow};
pub use error::{LiveMessageError, SnapshotError};
pub use live::{LiveAction, LiveGameSession, LiveSessionConfig, SocketMessage};
pub use models::{EntityId, GameEvent, GameSnapshot, PlayerStatRecord, Side, Sport};
pub use player::{player_breakdown, top_performers, PlayerLine};
