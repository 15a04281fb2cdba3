//! Game engine: the three human-facing operations.
//!
//! `GameEngine` owns the balance data, the random source and the CPU
//! policy. The `GameState` it drives is owned by the host and passed in
//! by `&mut` on every call, so the host can snapshot, render or
//! serialize it between calls.
//!
//! ## Operations
//!
//! - `process_pitch`: human pitches, CPU bats
//! - `process_at_bat`: human bats, CPU pitches
//! - `switch_pitcher`: substitution for either side
//!
//! An action for the wrong role is rejected: `last_play` carries a
//! message for the player and nothing else changes.

use super::report::{BatterAction, PitchReport};
use super::transitions;
use crate::core::config::EngineConfig;
use crate::core::error::{GameError, GameResult};
use crate::core::player::Pitcher;
use crate::core::rng::{GameRng, RandomSource};
use crate::core::side::Side;
use crate::core::state::{GameState, PlayerRole, TeamSetup};
use crate::cpu::{CpuPolicy, StandardCpu};
use crate::modifiers::Weather;
use crate::outcomes::PitchType;
use crate::resolver::{Outcome, OutcomeResolver, ResolutionContext};

const PITCH_WHILE_BATTING: &str = "You're batting right now. Choose to swing or take.";
const BAT_WHILE_PITCHING: &str = "You're pitching right now. Pick a pitch to throw.";

/// Drives one or more games with a fixed configuration.
///
/// # Example
///
/// ```
/// use rust_baseball::core::EngineConfig;
/// use rust_baseball::engine::GameEngine;
///
/// let engine = GameEngine::new(EngineConfig::default(), 42);
/// assert_eq!(engine.config().regulation_innings, 9);
/// ```
#[derive(Clone, Debug)]
pub struct GameEngine<R: RandomSource = GameRng, C: CpuPolicy = StandardCpu> {
    config: EngineConfig,
    rng: R,
    cpu: C,
}

impl GameEngine {
    /// Engine with the standard CPU and a seeded ChaCha stream.
    #[must_use]
    pub fn new(config: EngineConfig, seed: u64) -> Self {
        Self::with_parts(config, GameRng::new(seed), StandardCpu)
    }
}

impl<R: RandomSource, C: CpuPolicy> GameEngine<R, C> {
    /// Engine with a custom random source and CPU policy.
    pub fn with_parts(config: EngineConfig, rng: R, cpu: C) -> Self {
        tracing::debug!(
            regulation_innings = config.regulation_innings,
            cpu_hook = config.cpu_hook_pitch_count,
            "engine created"
        );
        Self { config, rng, cpu }
    }

    /// Start a game sized for this engine's regulation length.
    pub fn new_game(&self, away: TeamSetup, home: TeamSetup, weather: Weather, human_side: Side) -> GameResult<GameState> {
        GameState::with_innings(away, home, weather, human_side, self.config.regulation_innings)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    #[must_use]
    pub fn cpu(&self) -> &C {
        &self.cpu
    }

    /// Resolver over this engine's balance data.
    #[must_use]
    pub fn resolver(&self) -> OutcomeResolver<'_> {
        OutcomeResolver::new(&self.config)
    }

    /// The human throws `pitch`; the CPU batter decides whether to swing.
    ///
    /// Errors, all of which leave counts, outs, bases and the log alone:
    /// - `GameFinished` after the final out
    /// - `InvalidRoleAction` if the human is batting (sets `last_play`)
    /// - `UnknownPitchType` if the pitch has no outcome table
    pub fn process_pitch(&mut self, state: &mut GameState, pitch: PitchType) -> GameResult<PitchReport> {
        ensure_active(state)?;
        if state.player_role != PlayerRole::Pitching {
            return Err(reject(state, "throw a pitch", PITCH_WHILE_BATTING));
        }

        // Validate before the swing draw so a bad pitch consumes no randomness.
        self.config.tables.swing(pitch)?;
        self.config.tables.take(pitch)?;

        let swung = self.cpu.decide_swing(pitch, state.count, &state.current_batter().stats, &mut self.rng);
        let outcome = self.resolve(state, pitch, swung)?;
        Ok(transitions::apply_pitch(state, pitch, outcome, self.config.regulation_innings))
    }

    /// The human swings or takes; the CPU picks the pitch.
    ///
    /// At the start of each plate appearance the CPU may first go to its
    /// bullpen (see [`CpuPolicy::wants_pitching_change`]).
    pub fn process_at_bat(&mut self, state: &mut GameState, action: BatterAction) -> GameResult<PitchReport> {
        ensure_active(state)?;
        if state.player_role != PlayerRole::Batting {
            return Err(reject(state, action.into(), BAT_WHILE_PITCHING));
        }

        if state.count.is_fresh() {
            self.maybe_change_cpu_pitcher(state);
        }

        let pitch = self.cpu.pick_pitch(&self.config.tables, &mut self.rng)?;
        let outcome = self.resolve(state, pitch, action == BatterAction::Swing)?;
        Ok(transitions::apply_pitch(state, pitch, outcome, self.config.regulation_innings))
    }

    /// Replace `side`'s pitcher and reset its pitch count.
    ///
    /// `side` is a [`Side`] or its name (`"home"` / `"away"`, any case);
    /// other names fail with `InvalidSide`. Returns the pitcher taken out.
    pub fn switch_pitcher<S>(&self, state: &mut GameState, side: S, pitcher: Pitcher) -> GameResult<Pitcher>
    where
        S: TryInto<Side>,
        GameError: From<S::Error>,
    {
        let side = side.try_into()?;
        ensure_active(state)?;
        Ok(transitions::switch_pitcher(state, side, pitcher))
    }

    fn resolve(&mut self, state: &GameState, pitch: PitchType, swung: bool) -> GameResult<Outcome> {
        let ctx = ResolutionContext {
            pitch_count: state.pitch_count(state.fielding_side()),
            weather: state.weather,
            batter: &state.current_batter().stats,
            pitcher: &state.current_pitcher().stats,
        };
        OutcomeResolver::new(&self.config).determine_outcome(pitch, swung, &ctx, &mut self.rng)
    }

    fn maybe_change_cpu_pitcher(&self, state: &mut GameState) {
        let side = state.fielding_side();
        let team = state.team(side);
        if !self
            .cpu
            .wants_pitching_change(team.pitch_count, self.config.cpu_hook_pitch_count, team.bullpen.len())
        {
            return;
        }
        if let Some(reliever) = team.bullpen.first().cloned() {
            transitions::switch_pitcher(state, side, reliever);
        }
    }
}

fn ensure_active(state: &GameState) -> GameResult<()> {
    if state.is_finished() {
        Err(GameError::GameFinished)
    } else {
        Ok(())
    }
}

fn reject(state: &mut GameState, attempted: &'static str, message: &str) -> GameError {
    let role = state.player_role;
    tracing::warn!(role = %role, attempted, "action rejected for current role");
    state.last_play = message.to_string();
    GameError::InvalidRoleAction { role, attempted }
}
