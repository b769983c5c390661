//! Error types for snapshot validation and live message parsing.
//!
//! These never cross the public analytics boundary: the orchestrator logs
//! them and degrades to the empty record pair instead.

use crate::models::Side;
use thiserror::Error;

/// Why a snapshot could not be aggregated.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("no game snapshot supplied")]
    Missing,

    #[error("snapshot has no base game info")]
    MissingBase,

    #[error("snapshot has no sport document")]
    MissingSportDocument,

    #[error("snapshot has neither player stats nor events")]
    NoStatData,

    #[error("snapshot is missing the {0} team id")]
    MissingTeamId(Side),

    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Why a socket message could not be interpreted.
#[derive(Debug, Error)]
pub enum LiveMessageError {
    #[error("socket message is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("socket message must be a JSON object")]
    NotAnObject,

    #[error("socket message has no type")]
    MissingType,
}
