//! Live Analytics Service Library
//!
//! Exposes the config and replay driver for integration tests.

pub mod config;
pub mod replay;

pub use config::Config;
pub use replay::{Emission, Replay, ReplayStats};
