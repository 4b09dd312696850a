//! Crate-level error aggregating configuration and move failures.

use super::action::MoveError;
use super::config::ConfigError;
use derive_more::{Display, Error, From};

/// Any failure the engine can report.
#[derive(Debug, Clone, Display, Error, From)]
pub enum EngineError {
    /// The match configuration was rejected.
    #[display("{}", _0)]
    Config(ConfigError),
    /// A move was rejected.
    #[display("{}", _0)]
    Move(MoveError),
}
