//! Engine configuration.
//!
//! Everything the engine treats as game-balance or rules data lives here:
//! - `OutcomeTables`: base swing/take tables and the CPU pitch mix
//! - `WeatherModifiers`: per-condition multipliers
//! - `FatigueConfig`: the pitch-count fatigue curve
//! - rules: regulation length, CPU bullpen hook
//!
//! Built once at startup and passed to `GameEngine` explicitly.

use serde::{Deserialize, Serialize};

use super::error::GameResult;
use crate::modifiers::{FatigueConfig, WeatherModifiers};
use crate::outcomes::OutcomeTables;

/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base outcome tables and CPU pitch weights.
    pub tables: OutcomeTables,

    /// Weather multiplier sets.
    pub weather: WeatherModifiers,

    /// Fatigue curve.
    pub fatigue: FatigueConfig,

    /// Innings in a regulation game (default: 9).
    pub regulation_innings: u32,

    /// CPU pulls its pitcher at the start of an at-bat once the pitch
    /// count reaches this (default: 100). Needs a non-empty bullpen.
    pub cpu_hook_pitch_count: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tables: OutcomeTables::standard(),
            weather: WeatherModifiers::standard(),
            fatigue: FatigueConfig::default(),
            regulation_innings: 9,
            cpu_hook_pitch_count: 100,
        }
    }
}

impl EngineConfig {
    /// Load a full configuration from JSON. Tables are validated.
    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Use different balance tables.
    #[must_use]
    pub fn with_tables(mut self, tables: OutcomeTables) -> Self {
        self.tables = tables;
        self
    }

    /// Use different weather multipliers.
    #[must_use]
    pub fn with_weather(mut self, weather: WeatherModifiers) -> Self {
        self.weather = weather;
        self
    }

    /// Use a different fatigue curve.
    #[must_use]
    pub fn with_fatigue(mut self, fatigue: FatigueConfig) -> Self {
        self.fatigue = fatigue;
        self
    }

    /// Change the regulation length (at least one inning).
    #[must_use]
    pub fn with_regulation_innings(mut self, innings: u32) -> Self {
        self.regulation_innings = innings.max(1);
        self
    }

    /// Change the CPU bullpen hook.
    #[must_use]
    pub fn with_cpu_hook(mut self, pitch_count: u32) -> Self {
        self.cpu_hook_pitch_count = pitch_count;
        self
    }
}
