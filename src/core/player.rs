//! Player identity and the two stat views the engine reads.
//!
//! A `Batter` carries hitting quality, a `Pitcher` carries pitching
//! quality. The engine never looks at anything else about a player.

use serde::{Deserialize, Serialize};

/// Player identifier, unique within one game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hitting quality. Rates are fractions (`0.280`, not `280`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatterStats {
    /// Batting average.
    pub avg: f64,
    /// Slugging percentage.
    pub slg: f64,
    /// Strikeouts per plate appearance.
    pub k_rate: f64,
    /// Home runs per plate appearance.
    pub hr_rate: f64,
}

impl Default for BatterStats {
    /// League-average hitter.
    fn default() -> Self {
        Self {
            avg: 0.250,
            slg: 0.400,
            k_rate: 0.220,
            hr_rate: 0.030,
        }
    }
}

/// Pitching quality.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PitcherStats {
    /// Earned-run average.
    pub era: f64,
    /// Strikeouts per nine innings.
    pub k_per_9: f64,
    /// Walks per nine innings.
    pub bb_per_9: f64,
}

impl Default for PitcherStats {
    /// League-average pitcher.
    fn default() -> Self {
        Self {
            era: 4.20,
            k_per_9: 8.5,
            bb_per_9: 3.2,
        }
    }
}

/// A lineup entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Batter {
    pub id: PlayerId,
    pub name: String,
    /// Fielding position, display only.
    pub position: String,
    pub stats: BatterStats,
}

impl Batter {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, stats: BatterStats) -> Self {
        Self {
            id,
            name: name.into(),
            position: "UT".to_string(),
            stats,
        }
    }

    /// Set the fielding position.
    #[must_use]
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = position.into();
        self
    }
}

/// A starting or relief pitcher.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pitcher {
    pub id: PlayerId,
    pub name: String,
    pub stats: PitcherStats,
}

impl Pitcher {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>, stats: PitcherStats) -> Self {
        Self {
            id,
            name: name.into(),
            stats,
        }
    }
}
