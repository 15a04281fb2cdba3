//! Weather conditions and their outcome multipliers.
//!
//! Each condition carries a sparse multiplier set keyed by `PitchResult`.
//! Matched categories are multiplied, everything else passes through.
//! `Clear` has no entries and is the identity.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::GameResult;
use crate::outcomes::tables::standard_table;
use crate::outcomes::{OutcomeCategory, PitchResult, WeightTable};

/// Game-day conditions.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash,
    Serialize, Deserialize, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Weather {
    #[default]
    Clear,
    /// Blowing out to the outfield.
    WindOut,
    /// Blowing in from the outfield.
    WindIn,
    Rain,
    Hot,
    Cold,
}

/// Per-condition multiplier sets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherModifiers {
    conditions: FxHashMap<Weather, WeightTable<PitchResult>>,
}

impl WeatherModifiers {
    /// Build from explicit multiplier sets.
    #[must_use]
    pub fn new(conditions: FxHashMap<Weather, WeightTable<PitchResult>>) -> Self {
        Self { conditions }
    }

    /// Load multiplier sets from JSON.
    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Built-in multipliers.
    #[must_use]
    pub fn standard() -> Self {
        use PitchResult::*;

        let sets: [(Weather, &[(PitchResult, f64)]); 5] = [
            (Weather::WindOut, &[(Homerun, 1.35), (Double, 1.05), (Flyout, 0.9)]),
            (Weather::WindIn, &[(Homerun, 0.65), (Flyout, 1.1)]),
            (Weather::Rain, &[(Ball, 1.1), (HitByPitch, 1.1), (Homerun, 0.9)]),
            (Weather::Hot, &[(Homerun, 1.15), (Double, 1.05)]),
            (Weather::Cold, &[(Homerun, 0.85), (StrikeSwinging, 1.05)]),
        ];

        let conditions = sets
            .into_iter()
            .map(|(weather, entries)| (weather, standard_table(entries.iter().copied())))
            .collect();

        Self { conditions }
    }

    /// Multiplier for one result under a condition, `1.0` if unmatched.
    #[must_use]
    pub fn multiplier(&self, weather: Weather, result: PitchResult) -> f64 {
        self.conditions
            .get(&weather)
            .and_then(|set| set.get(result))
            .unwrap_or(1.0)
    }
}

impl Default for WeatherModifiers {
    fn default() -> Self {
        Self::standard()
    }
}

/// Apply a condition's multipliers to a weight table.
#[must_use]
pub fn apply_weather_modifiers<K: OutcomeCategory>(
    weights: &WeightTable<K>,
    weather: Weather,
    modifiers: &WeatherModifiers,
) -> WeightTable<K> {
    weights.map_weights(|key, w| w * modifiers.multiplier(weather, key.result()))
}
