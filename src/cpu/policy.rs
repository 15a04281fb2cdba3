//! Decision policies for the CPU-controlled side.
//!
//! - `pick_pitch`: what the CPU throws when the human bats
//! - `decide_swing`: whether the CPU batter swings when the human pitches
//! - `wants_pitching_change`: when the CPU goes to its bullpen

use crate::core::player::BatterStats;
use crate::core::rng::RandomSource;
use crate::core::state::Count;
use crate::core::error::GameResult;
use crate::outcomes::{weighted_choice, OutcomeTables, PitchType};

/// Policy for the side the human does not control.
pub trait CpuPolicy {
    /// Choose a pitch to throw.
    fn pick_pitch(&self, tables: &OutcomeTables, rng: &mut dyn RandomSource) -> GameResult<PitchType>;

    /// Decide whether the batter swings at this pitch.
    fn decide_swing(&self, pitch: PitchType, count: Count, batter: &BatterStats, rng: &mut dyn RandomSource) -> bool;

    /// Decide whether to replace the pitcher before the next at-bat.
    fn wants_pitching_change(&self, pitch_count: u32, hook: u32, bullpen_size: usize) -> bool {
        bullpen_size > 0 && pitch_count >= hook
    }
}

/// Default CPU: samples the configured pitch mix and swings according to
/// count pressure, pitch type and batter aggressiveness.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardCpu;

impl StandardCpu {
    /// Probability that the CPU batter swings.
    ///
    /// More takes early in the count and when ahead, more swings with two
    /// strikes; free swingers (high strikeout rate) chase more.
    #[must_use]
    pub fn swing_probability(pitch: PitchType, count: Count, batter: &BatterStats) -> f64 {
        let base = match pitch {
            PitchType::Fastball => 0.52,
            PitchType::Slider => 0.46,
            PitchType::Changeup => 0.47,
            PitchType::Curveball => 0.42,
        };

        let mut p = base + 0.08 * f64::from(count.strikes);
        if count.strikes == 2 {
            p += 0.04;
        }
        if count.is_fresh() {
            p -= 0.05;
        }
        if count.balls == 3 && count.strikes < 2 {
            p -= 0.15;
            if count.strikes == 0 {
                p -= 0.15;
            }
        }
        if batter.k_rate.is_finite() {
            p += (batter.k_rate - 0.22) * 0.5;
        }

        p.clamp(0.05, 0.95)
    }
}

impl CpuPolicy for StandardCpu {
    fn pick_pitch(&self, tables: &OutcomeTables, rng: &mut dyn RandomSource) -> GameResult<PitchType> {
        let pitch = weighted_choice(tables.cpu_pitch_weights(), rng)?;
        tracing::debug!(pitch = %pitch, "cpu picks pitch");
        Ok(pitch)
    }

    fn decide_swing(&self, pitch: PitchType, count: Count, batter: &BatterStats, rng: &mut dyn RandomSource) -> bool {
        let p = Self::swing_probability(pitch, count, batter);
        let swung = rng.gen_bool(p);
        tracing::debug!(pitch = %pitch, count = %count, probability = p, swung, "cpu swing decision");
        swung
    }
}
