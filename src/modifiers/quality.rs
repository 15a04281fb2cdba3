//! Player-quality adjustments relative to a league baseline.
//!
//! Each stat becomes a ratio against the league average, squashed in log
//! space into `(0.2, 5.0)`, and scales the categories it drives. The
//! squash is strictly increasing, so a better stat always means a
//! strictly better multiplier, however extreme the inputs.
//!
//! Batter side:
//! - average lifts singles, average and slugging lift doubles/triples
//! - slugging (and home-run rate) lifts home runs
//! - strikeout rate lifts whiffs and damps every hit category
//!
//! Pitcher side:
//! - walks per 9 lifts balls and hit-by-pitch
//! - strikeouts per 9 lifts called and swinging strikes

use crate::core::player::{BatterStats, PitcherStats};
use crate::outcomes::{OutcomeCategory, PitchResult, WeightTable};

/// League-average hitter and pitcher the ratios are taken against.
pub mod baseline {
    pub const AVG: f64 = 0.250;
    pub const SLG: f64 = 0.400;
    pub const K_RATE: f64 = 0.220;
    pub const HR_RATE: f64 = 0.030;
    pub const K_PER_9: f64 = 8.5;
    pub const BB_PER_9: f64 = 3.2;
}

/// Multipliers approach `1 / MAX_RATIO` and `MAX_RATIO` but never reach
/// them for a positive finite stat.
const MAX_RATIO: f64 = 5.0;

/// `exp(b * x / (b + |x|))` with `x = ln(value / league)` and
/// `b = ln(MAX_RATIO)`: identity slope at league average, strictly
/// increasing, bounded. Missing (non-finite) stats are neutral.
fn ratio(value: f64, league: f64) -> f64 {
    if !value.is_finite() {
        return 1.0;
    }
    if value <= 0.0 {
        return MAX_RATIO.recip();
    }
    let x = (value / league).ln();
    if x.is_infinite() {
        return MAX_RATIO;
    }
    let bound = MAX_RATIO.ln();
    (bound * x / (bound + x.abs())).exp()
}

/// Scale swing outcomes for the batter at the plate.
#[must_use]
pub fn calculate_adjusted_outcomes<K: OutcomeCategory>(weights: &WeightTable<K>, batter: &BatterStats) -> WeightTable<K> {
    let contact = ratio(batter.avg, baseline::AVG);
    let power = ratio(batter.slg, baseline::SLG);
    let whiff = ratio(batter.k_rate, baseline::K_RATE);
    // hr_rate is optional in scouting data; zero means "unknown"
    let hr = if batter.hr_rate > 0.0 {
        ratio(batter.hr_rate, baseline::HR_RATE).sqrt()
    } else {
        1.0
    };
    let contact_penalty = 1.0 / whiff.sqrt();

    weights.map_weights(|key, w| match key.result() {
        PitchResult::Single => w * contact * contact_penalty,
        PitchResult::Double | PitchResult::Triple => w * (contact * power).sqrt() * contact_penalty,
        PitchResult::Homerun => w * power * hr * contact_penalty,
        PitchResult::StrikeSwinging => w * whiff,
        _ => w,
    })
}

/// Scale take outcomes for the pitcher on the mound.
#[must_use]
pub fn calculate_adjusted_take_outcomes<K: OutcomeCategory>(
    weights: &WeightTable<K>,
    pitcher: &PitcherStats,
) -> WeightTable<K> {
    let control = ratio(pitcher.bb_per_9, baseline::BB_PER_9);
    let stuff = ratio(pitcher.k_per_9, baseline::K_PER_9);

    weights.map_weights(|key, w| match key.result() {
        PitchResult::Ball | PitchResult::HitByPitch => w * control,
        PitchResult::StrikeCalled => w * stuff.sqrt(),
        PitchResult::StrikeSwinging => w * stuff,
        _ => w,
    })
}
