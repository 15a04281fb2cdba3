//! Outcome resolution: base table → modifier pipeline → sampler.
//!
//! The pipeline order is fixed: fatigue, then weather, then player
//! quality (batter stats on swings, pitcher stats on takes). Given the
//! same inputs the adjusted table is identical every time; only the final
//! draw is random.

use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::error::GameResult;
use crate::core::player::{BatterStats, PitcherStats};
use crate::core::rng::RandomSource;
use crate::modifiers::{
    apply_fatigue_mod, apply_weather_modifiers, calculate_adjusted_outcomes, calculate_adjusted_take_outcomes,
    FatigueConfig, Weather, WeatherModifiers,
};
use crate::outcomes::{
    weighted_choice, Category, OutcomeCategory, OutcomeTables, PitchResult, PitchType, SwingOutcome, TakeOutcome,
    WeightTable,
};

/// A resolved pitch: one category from the swing or take family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Swing(SwingOutcome),
    Take(TakeOutcome),
}

impl Outcome {
    /// The result the engine applies.
    #[must_use]
    pub fn result(self) -> PitchResult {
        match self {
            Outcome::Swing(o) => o.result(),
            Outcome::Take(o) => o.result(),
        }
    }

    /// Category key, e.g. `"strike_swinging"`.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Outcome::Swing(o) => o.key(),
            Outcome::Take(o) => o.key(),
        }
    }

    #[must_use]
    pub fn swung(self) -> bool {
        matches!(self, Outcome::Swing(_))
    }
}

/// Live game context for one resolution.
#[derive(Clone, Copy, Debug)]
pub struct ResolutionContext<'a> {
    /// Pitches thrown so far by the pitcher on the mound.
    pub pitch_count: u32,
    pub weather: Weather,
    pub batter: &'a BatterStats,
    pub pitcher: &'a PitcherStats,
}

/// Resolves pitches against the configured balance data.
#[derive(Clone, Copy, Debug)]
pub struct OutcomeResolver<'a> {
    tables: &'a OutcomeTables,
    weather: &'a WeatherModifiers,
    fatigue: &'a FatigueConfig,
}

impl<'a> OutcomeResolver<'a> {
    #[must_use]
    pub fn new(config: &'a EngineConfig) -> Self {
        Self {
            tables: &config.tables,
            weather: &config.weather,
            fatigue: &config.fatigue,
        }
    }

    /// Swing table for this pitch after the full modifier pipeline.
    pub fn adjusted_swing_table(
        &self,
        pitch: PitchType,
        ctx: &ResolutionContext<'_>,
    ) -> GameResult<WeightTable<SwingOutcome>> {
        let base = self.tables.swing(pitch)?;
        let env = self.environment(base, ctx);
        Ok(calculate_adjusted_outcomes(&env, ctx.batter))
    }

    /// Take table for this pitch after the full modifier pipeline.
    pub fn adjusted_take_table(
        &self,
        pitch: PitchType,
        ctx: &ResolutionContext<'_>,
    ) -> GameResult<WeightTable<TakeOutcome>> {
        let base = self.tables.take(pitch)?;
        let env = self.environment(base, ctx);
        Ok(calculate_adjusted_take_outcomes(&env, ctx.pitcher))
    }

    /// Resolve one pitch.
    ///
    /// Fails with `UnknownPitchType` before drawing anything if the pitch
    /// has no table.
    pub fn determine_outcome(
        &self,
        pitch: PitchType,
        swung: bool,
        ctx: &ResolutionContext<'_>,
        rng: &mut dyn RandomSource,
    ) -> GameResult<Outcome> {
        let outcome = if swung {
            let table = self.adjusted_swing_table(pitch, ctx)?;
            Outcome::Swing(weighted_choice(&table, rng)?)
        } else {
            let table = self.adjusted_take_table(pitch, ctx)?;
            Outcome::Take(weighted_choice(&table, rng)?)
        };

        tracing::debug!(
            pitch = %pitch,
            swung,
            pitch_count = ctx.pitch_count,
            weather = %ctx.weather,
            outcome = outcome.key(),
            "resolved pitch"
        );
        Ok(outcome)
    }

    /// Fatigue then weather.
    fn environment<K: OutcomeCategory>(&self, base: &WeightTable<K>, ctx: &ResolutionContext<'_>) -> WeightTable<K> {
        let tired = apply_fatigue_mod(base, ctx.pitch_count, self.fatigue);
        apply_weather_modifiers(&tired, ctx.weather, self.weather)
    }
}
