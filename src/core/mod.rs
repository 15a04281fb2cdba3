//! Core engine types: sides, players, state, RNG, configuration, errors.
//!
//! Everything else in the crate builds on these. Balance data and rules
//! knobs live in `EngineConfig`, never in module-level globals.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod side;
pub mod state;

pub use config::EngineConfig;
pub use error::{GameError, GameResult};
pub use player::{Batter, BatterStats, Pitcher, PitcherStats, PlayerId};
pub use rng::{GameRng, GameRngState, RandomSource};
pub use side::{Side, SideMap};
pub use state::{
    Bases, BoxScoreRow, Count, GameState, GameStatus, PitcherStatLine, PlayerRole, ScorecardEntry, TeamSetup,
    TeamState, LINEUP_SIZE,
};
