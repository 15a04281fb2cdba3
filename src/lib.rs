//! # rust-baseball
//!
//! A turn-based baseball game engine: one human against a CPU opponent,
//! resolved one pitch at a time from weighted outcome tables.
//!
//! ## Design Principles
//!
//! 1. **Data-Driven Balance**: Outcome weights, weather effects and
//!    fatigue curves are configuration (`EngineConfig`), loadable from
//!    JSON. The engine never hardcodes a probability.
//!
//! 2. **Injectable Randomness**: Every draw goes through `RandomSource`.
//!    Seeded `GameRng` streams make whole games reproducible; tests can
//!    script exact draws.
//!
//! 3. **Typed Categories**: Pitch types, outcomes and weather are enums,
//!    so a misspelled category is a parse error rather than a silent
//!    zero weight.
//!
//! ## Architecture
//!
//! - **Resolution Pipeline**: base table, then fatigue, weather and
//!   player quality, then one weighted draw.
//!
//! - **Named Transitions**: count, at-bat, half-inning and substitution
//!   are separate functions over `GameState`, each testable on its own.
//!
//! - **Persistent Play Log**: the log uses `im-rs` so snapshots of the
//!   state are cheap to clone.
//!
//! ## Modules
//!
//! - `core`: players, sides, state, RNG, configuration, errors
//! - `outcomes`: categories, weight tables, the sampler, balance tables
//! - `modifiers`: fatigue, weather and player-quality adjustments
//! - `cpu`: CPU pitch selection, swing decisions, bullpen hook
//! - `resolver`: the full pitch resolution pipeline
//! - `engine`: `GameEngine` and the game state machine

pub mod core;
pub mod outcomes;
pub mod modifiers;
pub mod cpu;
pub mod resolver;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Batter, BatterStats, Pitcher, PitcherStats, PlayerId,
    Side, SideMap,
    GameRng, GameRngState, RandomSource,
    EngineConfig, GameError, GameResult,
    GameState, GameStatus, PlayerRole, TeamSetup, TeamState,
    Bases, Count, BoxScoreRow, PitcherStatLine, ScorecardEntry,
};

pub use crate::outcomes::{
    Category, OutcomeCategory, PitchResult, PitchType, SwingOutcome, TakeOutcome,
    WeightTable, OutcomeTables, weighted_choice,
};

pub use crate::modifiers::{
    apply_fatigue_mod, apply_weather_modifiers,
    calculate_adjusted_outcomes, calculate_adjusted_take_outcomes,
    FatigueConfig, Weather, WeatherModifiers,
};

pub use crate::cpu::{CpuPolicy, StandardCpu};

pub use crate::resolver::{Outcome, OutcomeResolver, ResolutionContext};

pub use crate::engine::{AtBatEvent, BatterAction, GameEngine, PitchReport};
