//! Balance data: base outcome tables per pitch type and the CPU pitch mix.
//!
//! Built once (either `standard()` or `from_json`) and handed to the
//! resolver and CPU model by reference. Never mutated afterwards; the
//! modifier pipeline works on copies.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::category::{Category, PitchType, SwingOutcome, TakeOutcome};
use super::table::WeightTable;
use crate::core::error::{GameError, GameResult};

/// Swing, take and CPU pitch-selection tables.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawOutcomeTables", into = "RawOutcomeTables")]
pub struct OutcomeTables {
    swing: FxHashMap<PitchType, WeightTable<SwingOutcome>>,
    take: FxHashMap<PitchType, WeightTable<TakeOutcome>>,
    cpu_pitch_weights: WeightTable<PitchType>,
}

/// Unvalidated wire form.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawOutcomeTables {
    swing: FxHashMap<PitchType, WeightTable<SwingOutcome>>,
    take: FxHashMap<PitchType, WeightTable<TakeOutcome>>,
    cpu_pitch_weights: WeightTable<PitchType>,
}

impl OutcomeTables {
    /// Build and validate tables.
    ///
    /// Every swing table must cover the full `SwingOutcome` set and every
    /// take table the full `TakeOutcome` set, so modifiers apply uniformly.
    /// Every table, including the CPU mix, needs a positive total.
    pub fn new(
        swing: FxHashMap<PitchType, WeightTable<SwingOutcome>>,
        take: FxHashMap<PitchType, WeightTable<TakeOutcome>>,
        cpu_pitch_weights: WeightTable<PitchType>,
    ) -> GameResult<Self> {
        for (pitch, table) in &swing {
            check_table("swing", *pitch, table)?;
        }
        for (pitch, table) in &take {
            check_table("take", *pitch, table)?;
        }
        if cpu_pitch_weights.total() <= 0.0 {
            return Err(GameError::InvalidTable {
                family: "cpu_pitch",
                pitch: "all".to_string(),
                reason: "total weight is zero".to_string(),
            });
        }
        // The CPU may only throw what the resolver can resolve.
        for pitch in cpu_pitch_weights.keys() {
            if !swing.contains_key(&pitch) || !take.contains_key(&pitch) {
                return Err(GameError::InvalidTable {
                    family: "cpu_pitch",
                    pitch: pitch.key().to_string(),
                    reason: "no swing/take table for this pitch".to_string(),
                });
            }
        }

        Ok(Self {
            swing,
            take,
            cpu_pitch_weights,
        })
    }

    /// Load versioned balance data from JSON.
    pub fn from_json(json: &str) -> GameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Built-in balance data.
    #[must_use]
    pub fn standard() -> Self {
        use SwingOutcome::*;

        let swing_rows: [(PitchType, [f64; 9]); 4] = [
            //                     1B    2B   3B   HR    FO    GO    LO    K     F
            (PitchType::Fastball, [18.0, 6.0, 1.0, 4.0, 16.0, 16.0, 6.0, 17.0, 16.0]),
            (PitchType::Curveball, [15.0, 5.0, 1.0, 3.0, 14.0, 18.0, 5.0, 24.0, 15.0]),
            (PitchType::Slider, [15.0, 5.0, 1.0, 3.0, 14.0, 17.0, 5.0, 26.0, 14.0]),
            (PitchType::Changeup, [16.0, 5.0, 1.0, 3.0, 15.0, 19.0, 5.0, 22.0, 14.0]),
        ];
        let swing_keys = [Single, Double, Triple, Homerun, Flyout, Groundout, Lineout, StrikeSwinging, Foul];

        let take_rows: [(PitchType, [f64; 3]); 4] = [
            (PitchType::Fastball, [52.0, 46.0, 2.0]),
            (PitchType::Curveball, [58.0, 40.0, 2.0]),
            (PitchType::Slider, [60.0, 38.0, 2.0]),
            (PitchType::Changeup, [60.0, 39.0, 1.0]),
        ];

        let swing = swing_rows
            .into_iter()
            .map(|(pitch, weights)| (pitch, standard_table(swing_keys.into_iter().zip(weights))))
            .collect();
        let take = take_rows
            .into_iter()
            .map(|(pitch, weights)| (pitch, standard_table(TakeOutcome::ALL.iter().copied().zip(weights))))
            .collect();
        let cpu_pitch_weights = standard_table([
            (PitchType::Fastball, 50.0),
            (PitchType::Slider, 20.0),
            (PitchType::Curveball, 15.0),
            (PitchType::Changeup, 15.0),
        ]);

        Self {
            swing,
            take,
            cpu_pitch_weights,
        }
    }

    /// Base swing table for a pitch type.
    pub fn swing(&self, pitch: PitchType) -> GameResult<&WeightTable<SwingOutcome>> {
        self.swing
            .get(&pitch)
            .ok_or_else(|| GameError::UnknownPitchType(pitch.key().to_string()))
    }

    /// Base take table for a pitch type.
    pub fn take(&self, pitch: PitchType) -> GameResult<&WeightTable<TakeOutcome>> {
        self.take
            .get(&pitch)
            .ok_or_else(|| GameError::UnknownPitchType(pitch.key().to_string()))
    }

    /// CPU pitch-selection weights.
    #[must_use]
    pub fn cpu_pitch_weights(&self) -> &WeightTable<PitchType> {
        &self.cpu_pitch_weights
    }

    /// Pitch types with outcome tables.
    #[must_use]
    pub fn pitch_types(&self) -> Vec<PitchType> {
        PitchType::ALL
            .iter()
            .copied()
            .filter(|p| self.swing.contains_key(p) && self.take.contains_key(p))
            .collect()
    }
}

impl Default for OutcomeTables {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<RawOutcomeTables> for OutcomeTables {
    type Error = GameError;

    fn try_from(raw: RawOutcomeTables) -> Result<Self, Self::Error> {
        Self::new(raw.swing, raw.take, raw.cpu_pitch_weights)
    }
}

impl From<OutcomeTables> for RawOutcomeTables {
    fn from(tables: OutcomeTables) -> Self {
        Self {
            swing: tables.swing,
            take: tables.take,
            cpu_pitch_weights: tables.cpu_pitch_weights,
        }
    }
}

fn check_table<K: Category>(family: &'static str, pitch: PitchType, table: &WeightTable<K>) -> GameResult<()> {
    let missing = table.missing();
    if !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(|k| k.key()).collect();
        return Err(GameError::InvalidTable {
            family,
            pitch: pitch.key().to_string(),
            reason: format!("missing categories: {}", names.join(", ")),
        });
    }
    if table.total() <= 0.0 {
        return Err(GameError::InvalidTable {
            family,
            pitch: pitch.key().to_string(),
            reason: "total weight is zero".to_string(),
        });
    }
    Ok(())
}

/// Built-in weights are literals known to be valid.
pub(crate) fn standard_table<K: Category>(entries: impl IntoIterator<Item = (K, f64)>) -> WeightTable<K> {
    match WeightTable::new(entries) {
        Ok(table) => table,
        Err(err) => unreachable!("built-in balance data is invalid: {err}"),
    }
}
