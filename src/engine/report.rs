//! What a single engine call produced.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::player::PlayerId;
use crate::outcomes::{PitchResult, PitchType};
use crate::resolver::Outcome;

/// The human batter's choice.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash,
    Serialize, Deserialize, strum::Display, strum::EnumString, strum::AsRefStr, strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum BatterAction {
    Swing,
    Take,
}

/// How a plate appearance ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AtBatEvent {
    Single,
    Double,
    Triple,
    Homerun,
    Walk,
    HitByPitch,
    Strikeout,
    Flyout,
    Groundout,
    Lineout,
}

impl AtBatEvent {
    /// Event for a pitch result that ends the at-bat by itself.
    ///
    /// Balls and strikes only end it on the fourth ball or third strike,
    /// which the caller decides from the count, so they map to `None` here.
    #[must_use]
    pub const fn from_result(result: PitchResult) -> Option<Self> {
        match result {
            PitchResult::Single => Some(AtBatEvent::Single),
            PitchResult::Double => Some(AtBatEvent::Double),
            PitchResult::Triple => Some(AtBatEvent::Triple),
            PitchResult::Homerun => Some(AtBatEvent::Homerun),
            PitchResult::Flyout => Some(AtBatEvent::Flyout),
            PitchResult::Groundout => Some(AtBatEvent::Groundout),
            PitchResult::Lineout => Some(AtBatEvent::Lineout),
            PitchResult::HitByPitch => Some(AtBatEvent::HitByPitch),
            PitchResult::Ball | PitchResult::StrikeCalled | PitchResult::StrikeSwinging | PitchResult::Foul => None,
        }
    }

    /// Scorecard notation.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            AtBatEvent::Single => "1B",
            AtBatEvent::Double => "2B",
            AtBatEvent::Triple => "3B",
            AtBatEvent::Homerun => "HR",
            AtBatEvent::Walk => "BB",
            AtBatEvent::HitByPitch => "HBP",
            AtBatEvent::Strikeout => "K",
            AtBatEvent::Flyout => "F",
            AtBatEvent::Groundout => "G",
            AtBatEvent::Lineout => "L",
        }
    }

    /// Bases the batter reaches on a hit.
    #[must_use]
    pub const fn hit_bases(self) -> Option<usize> {
        match self {
            AtBatEvent::Single => Some(1),
            AtBatEvent::Double => Some(2),
            AtBatEvent::Triple => Some(3),
            AtBatEvent::Homerun => Some(4),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_out(self) -> bool {
        matches!(
            self,
            AtBatEvent::Strikeout | AtBatEvent::Flyout | AtBatEvent::Groundout | AtBatEvent::Lineout
        )
    }

    /// Walks and hit-by-pitch do not count as official at-bats.
    #[must_use]
    pub const fn charged_at_bat(self) -> bool {
        !matches!(self, AtBatEvent::Walk | AtBatEvent::HitByPitch)
    }
}

/// Side-channel result of one pitch, for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PitchReport {
    pub pitch: PitchType,
    pub outcome: Outcome,
    /// Text appended to the play log.
    pub description: String,
    /// Set when the pitch ended the plate appearance.
    pub at_bat: Option<AtBatEvent>,
    /// Runners (and batter) who scored on the play.
    pub runs_scored: SmallVec<[PlayerId; 4]>,
    pub half_inning_over: bool,
    pub game_over: bool,
}

impl PitchReport {
    #[must_use]
    pub fn swung(&self) -> bool {
        self.outcome.swung()
    }

    #[must_use]
    pub fn runs(&self) -> u32 {
        self.runs_scored.len() as u32
    }
}
