//! Pitcher fatigue by pitch count.
//!
//! At or below the threshold the transform is the identity. Past it, a
//! multiplier grows linearly with each extra pitch (capped): hit, ball and
//! hit-by-pitch weights are multiplied by it, swinging and called strikes
//! divided by it. Fouls and batted outs pass through.

use serde::{Deserialize, Serialize};

use crate::outcomes::{OutcomeCategory, PitchResult, WeightTable};

/// Fatigue curve parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FatigueConfig {
    /// Pitch count at which fatigue starts (observed: 85).
    pub threshold: u32,
    /// Multiplier growth per pitch past the threshold.
    pub rate_per_pitch: f64,
    /// Upper bound on the multiplier.
    pub max_multiplier: f64,
}

impl Default for FatigueConfig {
    fn default() -> Self {
        Self {
            threshold: 85,
            rate_per_pitch: 0.02,
            max_multiplier: 2.0,
        }
    }
}

impl FatigueConfig {
    /// Multiplier for a pitch count. `1.0` at or below the threshold,
    /// non-decreasing above it.
    #[must_use]
    pub fn multiplier(&self, pitch_count: u32) -> f64 {
        let excess = pitch_count.saturating_sub(self.threshold);
        if excess == 0 {
            return 1.0;
        }
        (1.0 + f64::from(excess) * self.rate_per_pitch).clamp(1.0, self.max_multiplier.max(1.0))
    }
}

/// Apply fatigue for the acting pitcher's pitch count.
#[must_use]
pub fn apply_fatigue_mod<K: OutcomeCategory>(
    weights: &WeightTable<K>,
    pitch_count: u32,
    config: &FatigueConfig,
) -> WeightTable<K> {
    let m = config.multiplier(pitch_count);
    if m == 1.0 {
        return weights.clone();
    }

    weights.map_weights(|key, w| match key.result() {
        r if r.is_hit() => w * m,
        PitchResult::Ball | PitchResult::HitByPitch => w * m,
        PitchResult::StrikeSwinging | PitchResult::StrikeCalled => w / m,
        _ => w,
    })
}
