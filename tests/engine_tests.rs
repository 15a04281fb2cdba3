//! Game engine integration tests.
//!
//! Scripted random sources pin exact outcomes; seeded `GameRng` streams
//! drive whole games to check invariants and reproducibility.

use rust_baseball::core::{
    Batter, BatterStats, Count, EngineConfig, GameError, GameRng, GameState, Pitcher, PitcherStats, PlayerId,
    PlayerRole, RandomSource, Side, TeamSetup, LINEUP_SIZE,
};
use rust_baseball::cpu::StandardCpu;
use rust_baseball::engine::{AtBatEvent, BatterAction, GameEngine};
use rust_baseball::modifiers::Weather;
use rust_baseball::outcomes::{PitchType, SwingOutcome, TakeOutcome};
use rust_baseball::resolver::Outcome;

// =============================================================================
// Helpers
// =============================================================================

/// Replays a fixed cycle of draws.
struct Script {
    draws: Vec<f64>,
    pos: usize,
}

impl Script {
    fn new(draws: &[f64]) -> Self {
        Self {
            draws: draws.to_vec(),
            pos: 0,
        }
    }
}

impl RandomSource for Script {
    fn next_f64(&mut self) -> f64 {
        let value = self.draws[self.pos % self.draws.len()];
        self.pos += 1;
        value
    }
}

fn team(name: &str, abbreviation: &str, base_id: u32) -> TeamSetup {
    TeamSetup {
        name: name.to_string(),
        abbreviation: abbreviation.to_string(),
        lineup: (0..9)
            .map(|i| Batter::new(PlayerId::new(base_id + i), format!("{name} Hitter {}", i + 1), BatterStats::default()))
            .collect(),
        pitcher: Pitcher::new(PlayerId::new(base_id + 20), format!("{name} Starter"), PitcherStats::default()),
        bullpen: vec![
            Pitcher::new(PlayerId::new(base_id + 21), format!("{name} Setup"), PitcherStats::default()),
            Pitcher::new(PlayerId::new(base_id + 22), format!("{name} Closer"), PitcherStats::default()),
        ],
    }
}

fn new_game(human: Side) -> GameState {
    GameState::new(team("Harbor Cats", "HBR", 100), team("River Dogs", "RVD", 200), Weather::Clear, human).unwrap()
}

fn scripted(draws: &[f64]) -> GameEngine<Script, StandardCpu> {
    GameEngine::with_parts(EngineConfig::default(), Script::new(draws), StandardCpu)
}

/// Play until the game ends, checking state invariants after every call.
fn play_out<R: RandomSource>(engine: &mut GameEngine<R, StandardCpu>, state: &mut GameState, seed: u64) -> usize {
    let mut chooser = GameRng::new(seed ^ 0x5eed);
    let pitches = [PitchType::Fastball, PitchType::Slider, PitchType::Curveball, PitchType::Changeup];
    let mut calls = 0;

    while !state.is_finished() {
        let log_before = state.play_log().clone();

        let report = match state.player_role {
            PlayerRole::Pitching => {
                let pitch = pitches[(chooser.next_f64() * 4.0) as usize % 4];
                engine.process_pitch(state, pitch)
            }
            PlayerRole::Batting => {
                let action = if chooser.gen_bool(0.5) { BatterAction::Swing } else { BatterAction::Take };
                engine.process_at_bat(state, action)
            }
        }
        .unwrap();

        assert!(state.outs <= 2, "outs at rest: {}", state.outs);
        assert!(state.count.balls <= 3 && state.count.strikes <= 2, "count {}", state.count);
        for side in Side::BOTH {
            assert!(state.team(side).batter_index < LINEUP_SIZE);
            assert_eq!(state.team(side).total, state.team(side).line_score.iter().sum::<u32>());
        }
        assert!(state.play_log().len() > log_before.len());
        assert!(state.play_log().iter().take(log_before.len()).eq(log_before.iter()));
        assert_eq!(state.play_log().last(), Some(&state.last_play));
        assert!(state.play_log().iter().any(|entry| *entry == report.description));

        calls += 1;
        assert!(calls < 50_000, "game did not terminate");
    }
    calls
}

// =============================================================================
// Operation Scenarios
// =============================================================================

#[test]
fn test_first_pitch_is_charged_to_home_pitcher() {
    let mut engine = GameEngine::new(EngineConfig::default(), 42);
    let mut state = new_game(Side::Home);
    assert_eq!(state.player_role, PlayerRole::Pitching);

    engine.process_pitch(&mut state, PitchType::Fastball).unwrap();

    assert_eq!(state.pitch_count(Side::Home), 1);
    assert_eq!(state.play_log().len(), 1);
}

#[test]
fn test_batting_action_while_pitching_changes_nothing() {
    let mut engine = GameEngine::new(EngineConfig::default(), 42);
    let mut state = new_game(Side::Home);

    let result = engine.process_at_bat(&mut state, BatterAction::Take);

    assert!(matches!(result, Err(GameError::InvalidRoleAction { role: PlayerRole::Pitching, .. })));
    assert!(state.last_play.contains("pitching right now"));
    assert_eq!(state.count, Count::default());
    assert_eq!(state.outs, 0);
    assert!(state.play_log().is_empty());
}

#[test]
fn test_switch_pitcher_resets_count_and_adds_stat_line() {
    let engine = GameEngine::new(EngineConfig::default(), 42);
    let mut state = new_game(Side::Home);
    state.team_mut(Side::Home).pitch_count = 95;
    let reliever = Pitcher::new(PlayerId::new(99), "Relief Arm", PitcherStats::default());

    engine.switch_pitcher(&mut state, "home", reliever.clone()).unwrap();

    let home = state.team(Side::Home);
    assert_eq!(home.pitcher, reliever);
    assert_eq!(home.pitch_count, 0);
    assert!(home.pitcher_stats.iter().any(|line| line.id == PlayerId::new(99)));
    assert!(state.play_log().last().unwrap().contains("Pitching change"));
}

#[test]
fn test_invalid_side_name() {
    let engine = GameEngine::new(EngineConfig::default(), 42);
    let mut state = new_game(Side::Home);
    let reliever = Pitcher::new(PlayerId::new(99), "Relief Arm", PitcherStats::default());

    let result = engine.switch_pitcher(&mut state, "visitors", reliever);

    assert_eq!(result, Err(GameError::InvalidSide("visitors".to_string())));
    assert!(state.play_log().is_empty());
}

// =============================================================================
// Scripted Outcomes
// =============================================================================

#[test]
fn test_scripted_single_puts_runner_on_first() {
    // Swing decision 0.0 < p, then the first swing category.
    let mut engine = scripted(&[0.0]);
    let mut state = new_game(Side::Home);

    let report = engine.process_pitch(&mut state, PitchType::Fastball).unwrap();

    assert_eq!(report.outcome, Outcome::Swing(SwingOutcome::Single));
    assert_eq!(report.at_bat, Some(AtBatEvent::Single));
    assert_eq!(state.bases.occupied(), [true, false, false]);
    assert_eq!(state.team(Side::Away).box_score[0].h, 1);
    assert_eq!(state.team(Side::Away).batter_index, 1);
}

#[test]
fn test_scripted_walk() {
    // 0.99 is above every swing probability, so the CPU takes; 0.0 is a ball.
    let mut engine = scripted(&[0.99, 0.0]);
    let mut state = new_game(Side::Home);

    for expected_balls in 1..=3 {
        engine.process_pitch(&mut state, PitchType::Curveball).unwrap();
        assert_eq!(state.count, Count::new(expected_balls, 0));
    }
    let report = engine.process_pitch(&mut state, PitchType::Curveball).unwrap();

    assert_eq!(report.outcome, Outcome::Take(TakeOutcome::Ball));
    assert_eq!(report.at_bat, Some(AtBatEvent::Walk));
    assert_eq!(state.count, Count::default());
    assert_eq!(state.team(Side::Away).box_score[0].bb, 1);
    assert_eq!(state.team(Side::Away).box_score[0].ab, 0);
    assert_eq!(state.pitch_count(Side::Home), 4);
}

#[test]
fn test_scripted_fouls_never_strike_out() {
    // Pitch pick, then the last swing category.
    let mut engine = scripted(&[0.0, 0.999_999]);
    let mut state = new_game(Side::Away);
    assert_eq!(state.player_role, PlayerRole::Batting);

    for _ in 0..10 {
        let report = engine.process_at_bat(&mut state, BatterAction::Swing).unwrap();
        assert_eq!(report.outcome, Outcome::Swing(SwingOutcome::Foul));
        assert_eq!(report.pitch, PitchType::Fastball);
    }

    assert_eq!(state.count, Count::new(0, 2));
    assert_eq!(state.outs, 0);
    assert_eq!(state.pitch_count(Side::Home), 10);
}

#[test]
fn test_scripted_called_strikeouts_end_the_half() {
    // Take: the middle of the take table is a called strike.
    let mut engine = scripted(&[0.0, 0.7]);
    let mut state = new_game(Side::Away);

    for _ in 0..9 {
        engine.process_at_bat(&mut state, BatterAction::Take).unwrap();
    }

    assert!(!state.is_top);
    assert_eq!(state.outs, 0);
    assert_eq!(state.player_role, PlayerRole::Pitching);
    assert_eq!(state.team(Side::Away).batter_index, 3);
    let starter = state.team(Side::Home).active_pitcher_stats().unwrap();
    assert_eq!(starter.so, 3);
    assert_eq!(starter.innings_pitched(), "1.0");
}

#[test]
fn test_unknown_pitch_type_consumes_no_draws() {
    use rust_baseball::outcomes::{OutcomeTables, WeightTable};
    use rustc_hash::FxHashMap;

    let standard = OutcomeTables::standard();
    let mut swing = FxHashMap::default();
    let mut take = FxHashMap::default();
    swing.insert(PitchType::Fastball, standard.swing(PitchType::Fastball).unwrap().clone());
    take.insert(PitchType::Fastball, standard.take(PitchType::Fastball).unwrap().clone());
    let cpu = WeightTable::new([(PitchType::Fastball, 1.0)]).unwrap();
    let config = EngineConfig::default().with_tables(OutcomeTables::new(swing, take, cpu).unwrap());

    let mut engine = GameEngine::with_parts(config, Script::new(&[0.0]), StandardCpu);
    let mut state = new_game(Side::Home);

    let result = engine.process_pitch(&mut state, PitchType::Slider);

    assert_eq!(result, Err(GameError::UnknownPitchType("slider".to_string())));
    assert_eq!(engine.rng().pos, 0);
    assert_eq!(state.pitch_count(Side::Home), 0);
    assert!(state.play_log().is_empty());
}

// =============================================================================
// Full Games
// =============================================================================

#[test]
fn test_full_game_reaches_final() {
    for seed in 0..5 {
        let mut engine = GameEngine::new(EngineConfig::default(), seed);
        let mut state = new_game(Side::Home);

        play_out(&mut engine, &mut state, seed);

        assert!(state.is_finished());
        assert!(state.inning >= 9);
        assert_ne!(state.score(Side::Home), state.score(Side::Away));
        assert!(state.winner().is_some());
        assert!(state.last_play.contains("Final"));
    }
}

#[test]
fn test_full_game_box_scores_balance() {
    let mut engine = GameEngine::new(EngineConfig::default(), 2024);
    let mut state = new_game(Side::Away);
    play_out(&mut engine, &mut state, 2024);

    for side in Side::BOTH {
        let batting = state.team(side);
        let fielding = state.team(side.opponent());

        let runs: u32 = batting.box_score.iter().map(|row| row.r).sum();
        let hits: u32 = batting.box_score.iter().map(|row| row.h).sum();
        let walks: u32 = batting.box_score.iter().map(|row| row.bb).sum();
        let strikeouts: u32 = batting.box_score.iter().map(|row| row.so).sum();

        assert_eq!(runs, batting.total);
        assert_eq!(hits, fielding.pitcher_stats.iter().map(|l| l.h).sum::<u32>());
        assert_eq!(walks, fielding.pitcher_stats.iter().map(|l| l.bb).sum::<u32>());
        assert_eq!(strikeouts, fielding.pitcher_stats.iter().map(|l| l.so).sum::<u32>());
        assert_eq!(runs, fielding.pitcher_stats.iter().map(|l| l.r).sum::<u32>());

        let at_bats = batting.scorecard.iter().filter(|e| e.event.charged_at_bat()).count();
        assert_eq!(at_bats as u32, batting.box_score.iter().map(|row| row.ab).sum::<u32>());
    }
}

#[test]
fn test_short_game_config() {
    let config = EngineConfig::default().with_regulation_innings(3);
    let mut engine = GameEngine::new(config, 9);
    let mut state = engine
        .new_game(team("Harbor Cats", "HBR", 100), team("River Dogs", "RVD", 200), Weather::Clear, Side::Home)
        .unwrap();
    assert_eq!(state.team(Side::Away).line_score, vec![0; 3]);
    assert_eq!(state.team(Side::Home).line_score, vec![0; 3]);

    play_out(&mut engine, &mut state, 9);

    assert!(state.is_finished());
    assert!(state.inning >= 3);
    for side in Side::BOTH {
        assert!((3..=state.inning as usize).contains(&state.team(side).line_score.len()));
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut first = new_game(Side::Home);
    let mut second = new_game(Side::Home);

    play_out(&mut GameEngine::new(EngineConfig::default(), 77), &mut first, 77);
    play_out(&mut GameEngine::new(EngineConfig::default(), 77), &mut second, 77);

    assert_eq!(first, second);
}

#[test]
fn test_cpu_uses_bullpen_in_long_game() {
    let config = EngineConfig::default().with_cpu_hook(30);
    let mut engine = GameEngine::new(config, 5);
    let mut state = new_game(Side::Away);

    play_out(&mut engine, &mut state, 5);

    let home = state.team(Side::Home);
    assert!(home.pitcher_stats.len() > 1);
    assert!(state.play_log().iter().any(|entry| entry.contains("Pitching change")));
}

#[test]
fn test_state_survives_json_round_trip() {
    let mut engine = GameEngine::new(EngineConfig::default(), 3);
    let mut state = new_game(Side::Home);
    for _ in 0..20 {
        if state.player_role == PlayerRole::Pitching {
            engine.process_pitch(&mut state, PitchType::Slider).unwrap();
        } else {
            engine.process_at_bat(&mut state, BatterAction::Swing).unwrap();
        }
    }

    let json = serde_json::to_string(&state).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, state);
}
