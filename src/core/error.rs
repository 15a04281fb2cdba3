//! Engine error type.

use thiserror::Error;

use super::state::PlayerRole;

/// Errors surfaced by the engine, the resolver and configuration loading.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum GameError {
    /// The human issued an action for the role they are not playing.
    #[error("cannot {attempted} while {role}")]
    InvalidRoleAction {
        /// The role the human currently has.
        role: PlayerRole,
        /// What they tried to do.
        attempted: &'static str,
    },

    /// Pitch type not present in the outcome tables.
    #[error("unknown pitch type: {0}")]
    UnknownPitchType(String),

    /// Side name other than `home` or `away`.
    #[error("invalid side: {0} (expected home or away)")]
    InvalidSide(String),

    /// A weight table reached the sampler empty or with zero total weight.
    #[error("weight table is empty or has zero total weight")]
    DegenerateWeightTable,

    /// Action issued after the final out.
    #[error("game is already finished")]
    GameFinished,

    /// Negative, NaN or infinite weight.
    #[error("invalid weight {weight} for category {category}")]
    InvalidWeight {
        /// Category name.
        category: String,
        /// Offending value.
        weight: f64,
    },

    /// Balance table missing categories or summing to zero.
    #[error("invalid {family} table for {pitch}: {reason}")]
    InvalidTable {
        /// `swing`, `take` or `cpu_pitch`.
        family: &'static str,
        /// Pitch type the table belongs to.
        pitch: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Lineup that is not exactly nine batters.
    #[error("lineup for {team} has {len} batters, expected 9")]
    InvalidLineup {
        /// Team name.
        team: String,
        /// Actual lineup length.
        len: usize,
    },

    /// Balance data could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for GameError {
    fn from(err: serde_json::Error) -> Self {
        GameError::Config(err.to_string())
    }
}

impl From<std::convert::Infallible> for GameError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

/// Result alias used throughout the crate.
pub type GameResult<T> = Result<T, GameError>;
