//! Probability modifiers applied to base outcome tables.
//!
//! Three independent transforms, each returning a new table over the same
//! categories:
//! - `fatigue`: pitch count past a threshold
//! - `weather`: per-condition multipliers
//! - `quality`: batter stats on swings, pitcher stats on takes
//!
//! The resolver always applies them in that order.

pub mod fatigue;
pub mod quality;
pub mod weather;

pub use fatigue::{apply_fatigue_mod, FatigueConfig};
pub use quality::{calculate_adjusted_outcomes, calculate_adjusted_take_outcomes};
pub use weather::{apply_weather_modifiers, Weather, WeatherModifiers};
