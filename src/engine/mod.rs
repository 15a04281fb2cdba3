//! Game engine and state machine.
//!
//! - `game`: `GameEngine` and the human-facing operations
//! - `transitions`: named, randomness-free state transitions
//! - `report`: per-pitch results for the presentation layer

pub mod game;
pub mod report;
pub mod transitions;

pub use game::GameEngine;
pub use report::{AtBatEvent, BatterAction, PitchReport};
pub use transitions::AtBatSummary;
