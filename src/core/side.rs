//! Team sides and per-side data storage.
//!
//! ## Side
//!
//! `Home` or `Away`. Parses from `"home"` / `"away"`; anything else is
//! [`GameError::InvalidSide`].
//!
//! ## SideMap
//!
//! Two-slot storage indexed by `Side`, so the engine never branches on
//! `home_*` / `away_*` field pairs.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use super::error::GameError;

/// One of the two teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    /// Visiting team, bats in the top half.
    Away,
    /// Home team, bats in the bottom half.
    Home,
}

impl Side {
    /// Both sides in batting order (away first).
    pub const BOTH: [Side; 2] = [Side::Away, Side::Home];

    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Away => Side::Home,
            Side::Home => Side::Away,
        }
    }
}

impl FromStr for Side {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(Side::Home),
            "away" => Ok(Side::Away),
            _ => Err(GameError::InvalidSide(s.to_string())),
        }
    }
}

impl TryFrom<&str> for Side {
    type Error = GameError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Per-side data storage with O(1) access.
///
/// ```
/// use rust_baseball::core::{Side, SideMap};
///
/// let mut runs: SideMap<u32> = SideMap::with_value(0);
/// runs[Side::Home] += 3;
/// assert_eq!(runs[Side::Home], 3);
/// assert_eq!(runs[Side::Away], 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    away: T,
    home: T,
}

impl<T> SideMap<T> {
    /// Create from explicit values.
    pub fn new(away: T, home: T) -> Self {
        Self { away, home }
    }

    /// Create with values from a factory function.
    pub fn from_fn(factory: impl Fn(Side) -> T) -> Self {
        Self {
            away: factory(Side::Away),
            home: factory(Side::Home),
        }
    }

    /// Create with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            away: value.clone(),
            home: value,
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Away => &self.away,
            Side::Home => &self.home,
        }
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Away => &mut self.away,
            Side::Home => &mut self.home,
        }
    }

    /// Iterate over (Side, &T) pairs, away first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Away, &self.away), (Side::Home, &self.home)].into_iter()
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
