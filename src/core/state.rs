//! Game state: the single mutable aggregate for one game.
//!
//! ## GameState
//!
//! - Inning, half, outs, count, bases
//! - Both teams (`SideMap<TeamState>`)
//! - Human role and game status
//! - Weather, play log, last play
//!
//! ## TeamState
//!
//! Lineup and batting cursor, active pitcher and pitch count, box score,
//! pitcher stat lines, bullpen, line score and scorecard.
//!
//! Built once by the host through `GameState::new`, then mutated only by
//! the engine. The play log is append-only and exposed read-only.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::error::{GameError, GameResult};
use super::player::{Batter, Pitcher, PlayerId};
use super::side::{Side, SideMap};
use crate::engine::AtBatEvent;
use crate::modifiers::Weather;

/// Players per lineup.
pub const LINEUP_SIZE: usize = 9;

/// What the human is doing this half-inning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayerRole {
    Pitching,
    Batting,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Active,
    Finished,
}

/// Balls and strikes. Four balls or three strikes never rest here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Count {
    pub balls: u8,
    pub strikes: u8,
}

impl Count {
    #[must_use]
    pub const fn new(balls: u8, strikes: u8) -> Self {
        Self { balls, strikes }
    }

    #[must_use]
    pub const fn is_fresh(self) -> bool {
        self.balls == 0 && self.strikes == 0
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.balls, self.strikes)
    }
}

/// Base occupancy. Each occupied base holds the runner's lineup slot.
///
/// Index 0 is first base, 2 is third.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bases {
    runners: [Option<usize>; 3],
}

impl Bases {
    /// Occupancy flags, first to third.
    #[must_use]
    pub fn occupied(&self) -> [bool; 3] {
        self.runners.map(|r| r.is_some())
    }

    /// Lineup slot of the runner on a base (0 = first).
    #[must_use]
    pub fn runner(&self, base: usize) -> Option<usize> {
        self.runners.get(base).copied().flatten()
    }

    /// Put a runner on a base.
    pub fn set(&mut self, base: usize, slot: Option<usize>) {
        self.runners[base] = slot;
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runners.iter().all(Option::is_none)
    }

    #[must_use]
    pub fn runner_count(&self) -> usize {
        self.runners.iter().flatten().count()
    }

    pub fn clear(&mut self) {
        self.runners = [None; 3];
    }

    /// Move every runner up `bases` bases and put the batter on base
    /// `bases` (a 4-base hit scores the batter too).
    ///
    /// Returns the lineup slots that crossed home, lead runner first.
    pub fn advance_all(&mut self, bases: usize, batter: usize) -> Vec<usize> {
        let mut scored = Vec::new();
        let mut next = [None; 3];

        for base in (0..3).rev() {
            if let Some(runner) = self.runners[base] {
                let target = base + bases;
                if target >= 3 {
                    scored.push(runner);
                } else {
                    next[target] = Some(runner);
                }
            }
        }

        if bases >= 4 {
            scored.push(batter);
        } else {
            next[bases - 1] = Some(batter);
        }

        self.runners = next;
        scored
    }

    /// Walk / hit-by-pitch: the batter takes first and only forced runners
    /// move up. Returns the runner forced home, if any.
    pub fn force_advance(&mut self, batter: usize) -> Option<usize> {
        let mut scored = None;
        if self.runners[0].is_some() {
            if self.runners[1].is_some() {
                if self.runners[2].is_some() {
                    scored = self.runners[2];
                }
                self.runners[2] = self.runners[1];
            }
            self.runners[1] = self.runners[0];
        }
        self.runners[0] = Some(batter);
        scored
    }
}

/// Per-batter line in the box score.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxScoreRow {
    pub id: PlayerId,
    pub name: String,
    pub pos: String,
    pub ab: u32,
    pub r: u32,
    pub h: u32,
    #[serde(rename = "2b")]
    pub doubles: u32,
    #[serde(rename = "3b")]
    pub triples: u32,
    pub hr: u32,
    pub rbi: u32,
    pub bb: u32,
    pub so: u32,
    pub sb: u32,
}

impl BoxScoreRow {
    /// Empty row for a lineup entry.
    #[must_use]
    pub fn for_batter(batter: &Batter) -> Self {
        Self {
            id: batter.id,
            name: batter.name.clone(),
            pos: batter.position.clone(),
            ..Self::default()
        }
    }
}

/// Cumulative line for one pitcher.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PitcherStatLine {
    pub id: PlayerId,
    pub name: String,
    pub ip_outs: u32,
    pub h: u32,
    pub r: u32,
    pub er: u32,
    pub bb: u32,
    pub so: u32,
}

impl PitcherStatLine {
    /// Empty line for a pitcher entering the game.
    #[must_use]
    pub fn for_pitcher(pitcher: &Pitcher) -> Self {
        Self {
            id: pitcher.id,
            name: pitcher.name.clone(),
            ..Self::default()
        }
    }

    /// Innings pitched in box-score notation (`5.2` = five and two thirds).
    #[must_use]
    pub fn innings_pitched(&self) -> String {
        format!("{}.{}", self.ip_outs / 3, self.ip_outs % 3)
    }
}

/// One completed plate appearance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorecardEntry {
    pub inning: u32,
    pub batter: PlayerId,
    pub event: AtBatEvent,
}

/// What the host supplies for each team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSetup {
    pub name: String,
    pub abbreviation: String,
    /// Exactly nine batters in batting order.
    pub lineup: Vec<Batter>,
    pub pitcher: Pitcher,
    pub bullpen: Vec<Pitcher>,
}

/// Everything the engine tracks for one team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamState {
    pub name: String,
    pub abbreviation: String,
    pub lineup: Vec<Batter>,
    /// Next batter up, always `< LINEUP_SIZE`.
    pub batter_index: usize,
    pub pitcher: Pitcher,
    /// Pitches thrown by the active pitcher. Reset only on substitution.
    pub pitch_count: u32,
    /// One row per lineup slot.
    pub box_score: Vec<BoxScoreRow>,
    /// Every pitcher who has appeared, in order of appearance.
    pub pitcher_stats: Vec<PitcherStatLine>,
    pub bullpen: Vec<Pitcher>,
    /// Runs per inning. Grows in extra innings.
    pub line_score: Vec<u32>,
    pub total: u32,
    pub scorecard: Vec<ScorecardEntry>,
}

impl TeamState {
    fn from_setup(setup: TeamSetup, innings: usize) -> GameResult<Self> {
        if setup.lineup.len() != LINEUP_SIZE {
            return Err(GameError::InvalidLineup {
                team: setup.name,
                len: setup.lineup.len(),
            });
        }

        let box_score = setup.lineup.iter().map(BoxScoreRow::for_batter).collect();
        let pitcher_stats = vec![PitcherStatLine::for_pitcher(&setup.pitcher)];

        Ok(Self {
            name: setup.name,
            abbreviation: setup.abbreviation,
            lineup: setup.lineup,
            batter_index: 0,
            pitcher: setup.pitcher,
            pitch_count: 0,
            box_score,
            pitcher_stats,
            bullpen: setup.bullpen,
            line_score: vec![0; innings],
            total: 0,
            scorecard: Vec::new(),
        })
    }

    /// Batter due up.
    #[must_use]
    pub fn current_batter(&self) -> &Batter {
        &self.lineup[self.batter_index]
    }

    /// Move the cursor to the next batter, wrapping after the ninth.
    pub fn advance_batter(&mut self) {
        self.batter_index = (self.batter_index + 1) % LINEUP_SIZE;
    }

    /// Stat line for the active pitcher.
    #[must_use]
    pub fn active_pitcher_stats(&self) -> Option<&PitcherStatLine> {
        self.pitcher_stats.iter().find(|line| line.id == self.pitcher.id)
    }

    /// Mutable stat line for the active pitcher, created on first use.
    pub fn active_pitcher_stats_mut(&mut self) -> &mut PitcherStatLine {
        let id = self.pitcher.id;
        let pos = match self.pitcher_stats.iter().position(|line| line.id == id) {
            Some(pos) => pos,
            None => {
                self.pitcher_stats.push(PitcherStatLine::for_pitcher(&self.pitcher));
                self.pitcher_stats.len() - 1
            }
        };
        &mut self.pitcher_stats[pos]
    }

    /// Credit runs to an inning (1-based), growing the line score as needed.
    pub fn add_runs(&mut self, inning: u32, runs: u32) {
        let idx = inning.saturating_sub(1) as usize;
        if self.line_score.len() <= idx {
            self.line_score.resize(idx + 1, 0);
        }
        self.line_score[idx] += runs;
        self.total += runs;
    }
}

/// Complete state of one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Current inning (starts at 1).
    pub inning: u32,

    /// Top half: away bats, home fields.
    pub is_top: bool,

    /// Outs in the current half, 0..=2 at rest.
    pub outs: u8,

    pub count: Count,

    pub bases: Bases,

    pub teams: SideMap<TeamState>,

    /// Team the human controls.
    pub human_side: Side,

    /// Human's role this half-inning.
    pub player_role: PlayerRole,

    pub status: GameStatus,

    pub weather: Weather,

    /// Most recent description or rejection message.
    pub last_play: String,

    play_log: Vector<String>,
}

impl GameState {
    /// Start a nine-inning game in the top of the first.
    ///
    /// The home side fields first, so a human playing home starts on the
    /// mound and a human playing away starts at the plate.
    pub fn new(away: TeamSetup, home: TeamSetup, weather: Weather, human_side: Side) -> GameResult<Self> {
        Self::with_innings(away, home, weather, human_side, 9)
    }

    /// Start a game whose line scores are sized for `regulation_innings`
    /// (at least one). Extra innings still grow them.
    pub fn with_innings(
        away: TeamSetup,
        home: TeamSetup,
        weather: Weather,
        human_side: Side,
        regulation_innings: u32,
    ) -> GameResult<Self> {
        let innings = regulation_innings.max(1) as usize;
        let teams = SideMap::new(
            TeamState::from_setup(away, innings)?,
            TeamState::from_setup(home, innings)?,
        );

        let mut state = Self {
            inning: 1,
            is_top: true,
            outs: 0,
            count: Count::default(),
            bases: Bases::default(),
            teams,
            human_side,
            player_role: PlayerRole::Pitching,
            status: GameStatus::Active,
            weather,
            last_play: String::new(),
            play_log: Vector::new(),
        };
        state.sync_role();
        Ok(state)
    }

    /// Team at the plate.
    #[must_use]
    pub fn batting_side(&self) -> Side {
        if self.is_top {
            Side::Away
        } else {
            Side::Home
        }
    }

    /// Team in the field.
    #[must_use]
    pub fn fielding_side(&self) -> Side {
        self.batting_side().opponent()
    }

    #[must_use]
    pub fn team(&self, side: Side) -> &TeamState {
        &self.teams[side]
    }

    pub fn team_mut(&mut self, side: Side) -> &mut TeamState {
        &mut self.teams[side]
    }

    /// Batter at the plate.
    #[must_use]
    pub fn current_batter(&self) -> &Batter {
        self.teams[self.batting_side()].current_batter()
    }

    #[must_use]
    pub fn current_batter_name(&self) -> &str {
        &self.current_batter().name
    }

    /// Pitcher on the mound.
    #[must_use]
    pub fn current_pitcher(&self) -> &Pitcher {
        &self.teams[self.fielding_side()].pitcher
    }

    #[must_use]
    pub fn pitch_count(&self, side: Side) -> u32 {
        self.teams[side].pitch_count
    }

    /// Running total for a side.
    #[must_use]
    pub fn score(&self, side: Side) -> u32 {
        self.teams[side].total
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Finished
    }

    /// Leader once the game is over; `None` while active or tied.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        if !self.is_finished() {
            return None;
        }
        let (away, home) = (self.score(Side::Away), self.score(Side::Home));
        match away.cmp(&home) {
            std::cmp::Ordering::Greater => Some(Side::Away),
            std::cmp::Ordering::Less => Some(Side::Home),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Ordered play descriptions.
    #[must_use]
    pub fn play_log(&self) -> &Vector<String> {
        &self.play_log
    }

    /// Append a play description and mirror it into `last_play`.
    pub fn log(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        self.last_play.clone_from(&entry);
        self.play_log.push_back(entry);
    }

    /// Human-readable half-inning, e.g. "top of the 3rd".
    #[must_use]
    pub fn half_label(&self) -> String {
        let half = if self.is_top { "top" } else { "bottom" };
        format!("{half} of the {}", ordinal(self.inning))
    }

    /// Recompute the human's role from the half-inning.
    pub(crate) fn sync_role(&mut self) {
        self.player_role = if self.human_side == self.fielding_side() {
            PlayerRole::Pitching
        } else {
            PlayerRole::Batting
        };
    }
}

/// `1` → "1st", `12` → "12th".
#[must_use]
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::{BatterStats, PitcherStats};

    fn setup(name: &str, base_id: u32) -> TeamSetup {
        TeamSetup {
            name: name.to_string(),
            abbreviation: name[..3].to_uppercase(),
            lineup: (0..9)
                .map(|i| Batter::new(PlayerId::new(base_id + i), format!("Batter {}", i + 1), BatterStats::default()))
                .collect(),
            pitcher: Pitcher::new(PlayerId::new(base_id + 50), format!("{name} Ace"), PitcherStats::default()),
            bullpen: vec![Pitcher::new(PlayerId::new(base_id + 60), "Reliever", PitcherStats::default())],
        }
    }

    fn state(human: Side) -> GameState {
        GameState::new(setup("Away", 100), setup("Home", 200), Weather::Clear, human).unwrap()
    }

    #[test]
    fn test_new_game() {
        let s = state(Side::Home);
        assert_eq!(s.inning, 1);
        assert!(s.is_top);
        assert_eq!(s.outs, 0);
        assert!(s.count.is_fresh());
        assert!(s.bases.is_empty());
        assert_eq!(s.player_role, PlayerRole::Pitching);
        assert_eq!(s.status, GameStatus::Active);
        assert!(s.play_log().is_empty());
        assert_eq!(s.team(Side::Home).line_score, vec![0; 9]);
        assert_eq!(s.team(Side::Away).box_score.len(), 9);
        assert_eq!(s.team(Side::Home).active_pitcher_stats().unwrap().name, "Home Ace");
    }

    #[test]
    fn test_away_human_starts_batting() {
        let s = state(Side::Away);
        assert_eq!(s.player_role, PlayerRole::Batting);
        assert_eq!(s.batting_side(), Side::Away);
        assert_eq!(s.current_batter_name(), "Batter 1");
        assert_eq!(s.current_pitcher().name, "Home Ace");
    }

    #[test]
    fn test_short_lineup_rejected() {
        let mut away = setup("Away", 100);
        away.lineup.pop();
        let err = GameState::new(away, setup("Home", 200), Weather::Clear, Side::Home).unwrap_err();
        assert_eq!(err, GameError::InvalidLineup { team: "Away".to_string(), len: 8 });
    }

    #[test]
    fn test_log_appends_and_mirrors() {
        let mut s = state(Side::Home);
        s.log("first");
        s.log("second");
        assert_eq!(s.play_log().len(), 2);
        assert_eq!(s.play_log()[0], "first");
        assert_eq!(s.last_play, "second");
    }

    #[test]
    fn test_batter_cursor_wraps() {
        let mut team = state(Side::Home).team(Side::Away).clone();
        for _ in 0..LINEUP_SIZE {
            team.advance_batter();
        }
        assert_eq!(team.batter_index, 0);
    }

    #[test]
    fn test_line_score_sized_for_regulation() {
        let short = GameState::with_innings(setup("Away", 100), setup("Home", 200), Weather::Clear, Side::Away, 3).unwrap();
        assert_eq!(short.team(Side::Away).line_score, vec![0; 3]);
        assert_eq!(short.team(Side::Home).line_score, vec![0; 3]);

        let mut extras = short.team(Side::Home).clone();
        extras.add_runs(4, 1);
        assert_eq!(extras.line_score, vec![0, 0, 0, 1]);

        let degenerate = GameState::with_innings(setup("Away", 100), setup("Home", 200), Weather::Clear, Side::Away, 0).unwrap();
        assert_eq!(degenerate.team(Side::Home).line_score.len(), 1);
    }

    #[test]
    fn test_add_runs_extends_line_score() {
        let mut team = state(Side::Home).team(Side::Home).clone();
        team.add_runs(2, 3);
        team.add_runs(11, 1);
        assert_eq!(team.line_score.len(), 11);
        assert_eq!(team.line_score[1], 3);
        assert_eq!(team.line_score[10], 1);
        assert_eq!(team.total, 4);
    }

    #[test]
    fn test_advance_all_single() {
        let mut bases = Bases::default();
        bases.set(0, Some(1));
        bases.set(2, Some(2));

        let scored = bases.advance_all(1, 3);
        assert_eq!(scored, vec![2]);
        assert_eq!(bases.runner(0), Some(3));
        assert_eq!(bases.runner(1), Some(1));
        assert_eq!(bases.runner(2), None);
    }

    #[test]
    fn test_advance_all_homer_clears_bases() {
        let mut bases = Bases::default();
        bases.set(0, Some(1));
        bases.set(1, Some(2));
        bases.set(2, Some(3));

        let scored = bases.advance_all(4, 4);
        assert_eq!(scored, vec![3, 2, 1, 4]);
        assert!(bases.is_empty());
    }

    #[test]
    fn test_force_advance_only_moves_forced_runners() {
        let mut bases = Bases::default();
        bases.set(2, Some(7));

        assert_eq!(bases.force_advance(1), None);
        assert_eq!(bases.occupied(), [true, false, true]);

        assert_eq!(bases.force_advance(2), None);
        assert_eq!(bases.occupied(), [true, true, true]);

        assert_eq!(bases.force_advance(3), Some(7));
        assert_eq!(bases.runner(0), Some(3));
        assert_eq!(bases.runner(1), Some(2));
        assert_eq!(bases.runner(2), Some(1));
    }

    #[test]
    fn test_innings_pitched_notation() {
        let line = PitcherStatLine { ip_outs: 17, ..PitcherStatLine::default() };
        assert_eq!(line.innings_pitched(), "5.2");
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(9), "9th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22nd");
    }

    #[test]
    fn test_state_serde() {
        let mut s = state(Side::Home);
        s.log("Play ball");
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"2b\":0"));
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
