//! Closed category enums for pitches, swing results and take results.
//!
//! Balance data is keyed by these enums rather than free strings, so an
//! unrecognized category fails when the table is built or loaded, not in
//! the middle of an inning.
//!
//! ## Families
//!
//! - `PitchType`: keys of every outcome table and of the CPU pitch mix
//! - `SwingOutcome`: what happens when the batter swings
//! - `TakeOutcome`: what happens when the batter takes
//! - `PitchResult`: union of both families, what the engine applies

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

use crate::core::error::GameError;

/// A closed set of table keys.
///
/// `ALL` lists every variant in canonical order. Weight tables keep their
/// entries in this order, which keeps sampling reproducible.
pub trait Category: Copy + Eq + Ord + Hash + Debug + 'static {
    /// Every variant, in declaration order.
    const ALL: &'static [Self];

    /// Snake-case key used in balance data and logs.
    fn key(self) -> &'static str;

    /// Look up a variant by its key.
    fn from_key(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.key() == key)
    }
}

/// A category that resolves to a concrete pitch result.
pub trait OutcomeCategory: Category {
    /// The result the engine applies for this category.
    fn result(self) -> PitchResult;
}

/// Kind of pitch thrown.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PitchType {
    Fastball,
    Curveball,
    Slider,
    Changeup,
}

impl Category for PitchType {
    const ALL: &'static [Self] = &[
        PitchType::Fastball,
        PitchType::Curveball,
        PitchType::Slider,
        PitchType::Changeup,
    ];

    fn key(self) -> &'static str {
        self.into()
    }
}

impl std::str::FromStr for PitchType {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(&s.to_ascii_lowercase()).ok_or_else(|| GameError::UnknownPitchType(s.to_string()))
    }
}

/// Result categories when the batter swings.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SwingOutcome {
    Single,
    Double,
    Triple,
    Homerun,
    Flyout,
    Groundout,
    Lineout,
    StrikeSwinging,
    Foul,
}

impl Category for SwingOutcome {
    const ALL: &'static [Self] = &[
        SwingOutcome::Single,
        SwingOutcome::Double,
        SwingOutcome::Triple,
        SwingOutcome::Homerun,
        SwingOutcome::Flyout,
        SwingOutcome::Groundout,
        SwingOutcome::Lineout,
        SwingOutcome::StrikeSwinging,
        SwingOutcome::Foul,
    ];

    fn key(self) -> &'static str {
        self.into()
    }
}

impl OutcomeCategory for SwingOutcome {
    fn result(self) -> PitchResult {
        match self {
            SwingOutcome::Single => PitchResult::Single,
            SwingOutcome::Double => PitchResult::Double,
            SwingOutcome::Triple => PitchResult::Triple,
            SwingOutcome::Homerun => PitchResult::Homerun,
            SwingOutcome::Flyout => PitchResult::Flyout,
            SwingOutcome::Groundout => PitchResult::Groundout,
            SwingOutcome::Lineout => PitchResult::Lineout,
            SwingOutcome::StrikeSwinging => PitchResult::StrikeSwinging,
            SwingOutcome::Foul => PitchResult::Foul,
        }
    }
}

/// Result categories when the batter takes.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TakeOutcome {
    Ball,
    StrikeCalled,
    HitByPitch,
}

impl Category for TakeOutcome {
    const ALL: &'static [Self] = &[TakeOutcome::Ball, TakeOutcome::StrikeCalled, TakeOutcome::HitByPitch];

    fn key(self) -> &'static str {
        self.into()
    }
}

impl OutcomeCategory for TakeOutcome {
    fn result(self) -> PitchResult {
        match self {
            TakeOutcome::Ball => PitchResult::Ball,
            TakeOutcome::StrikeCalled => PitchResult::StrikeCalled,
            TakeOutcome::HitByPitch => PitchResult::HitByPitch,
        }
    }
}

/// Every result a single pitch can produce.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize, strum::Display, strum::AsRefStr, strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PitchResult {
    Single,
    Double,
    Triple,
    Homerun,
    Flyout,
    Groundout,
    Lineout,
    StrikeSwinging,
    Foul,
    Ball,
    StrikeCalled,
    HitByPitch,
}

impl Category for PitchResult {
    const ALL: &'static [Self] = &[
        PitchResult::Single,
        PitchResult::Double,
        PitchResult::Triple,
        PitchResult::Homerun,
        PitchResult::Flyout,
        PitchResult::Groundout,
        PitchResult::Lineout,
        PitchResult::StrikeSwinging,
        PitchResult::Foul,
        PitchResult::Ball,
        PitchResult::StrikeCalled,
        PitchResult::HitByPitch,
    ];

    fn key(self) -> &'static str {
        self.into()
    }
}

impl PitchResult {
    /// Bases awarded to the batter on a hit, `None` otherwise.
    #[must_use]
    pub const fn hit_bases(self) -> Option<u8> {
        match self {
            PitchResult::Single => Some(1),
            PitchResult::Double => Some(2),
            PitchResult::Triple => Some(3),
            PitchResult::Homerun => Some(4),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_hit(self) -> bool {
        self.hit_bases().is_some()
    }

    /// Ball put in play and caught or thrown out.
    #[must_use]
    pub const fn is_batted_out(self) -> bool {
        matches!(self, PitchResult::Flyout | PitchResult::Groundout | PitchResult::Lineout)
    }

    /// Called or swinging strike.
    #[must_use]
    pub const fn is_strike(self) -> bool {
        matches!(self, PitchResult::StrikeSwinging | PitchResult::StrikeCalled)
    }
}
