//! Named state transitions.
//!
//! Each function is one auditable step of the at-bat / inning state
//! machine and can be driven directly in tests with a chosen outcome:
//!
//! - `apply_pitch`: count progression, hands terminal results on
//! - `resolve_at_bat`: box score, pitcher line, runners, runs, outs,
//!   scorecard, next batter
//! - `end_half_inning`: three outs, flip halves, maybe end the game
//! - `switch_pitcher`: substitution and pitch-count reset
//!
//! None of these draw randomness.

use smallvec::SmallVec;

use super::report::{AtBatEvent, PitchReport};
use crate::core::player::{Pitcher, PlayerId};
use crate::core::side::Side;
use crate::core::state::{BoxScoreRow, Count, GameState, GameStatus, PitcherStatLine, ScorecardEntry};
use crate::outcomes::{PitchResult, PitchType};
use crate::resolver::Outcome;

/// What `resolve_at_bat` did.
#[derive(Clone, Debug, PartialEq)]
pub struct AtBatSummary {
    pub event: AtBatEvent,
    pub description: String,
    pub runs_scored: SmallVec<[PlayerId; 4]>,
    pub half_inning_over: bool,
    pub game_over: bool,
}

/// Apply a resolved pitch to the game.
///
/// Charges the pitch to the fielding side's pitcher, then either moves
/// the count or ends the plate appearance.
pub fn apply_pitch(state: &mut GameState, pitch: PitchType, outcome: Outcome, regulation_innings: u32) -> PitchReport {
    let fielding = state.fielding_side();
    state.teams[fielding].pitch_count += 1;

    let result = outcome.result();
    let event = match result {
        PitchResult::Ball => {
            state.count.balls += 1;
            (state.count.balls >= 4).then_some(AtBatEvent::Walk)
        }
        PitchResult::StrikeCalled | PitchResult::StrikeSwinging => {
            state.count.strikes += 1;
            (state.count.strikes >= 3).then_some(AtBatEvent::Strikeout)
        }
        PitchResult::Foul => {
            if state.count.strikes < 2 {
                state.count.strikes += 1;
            }
            None
        }
        other => AtBatEvent::from_result(other),
    };

    match event {
        Some(event) => {
            let summary = resolve_at_bat(state, event, result, regulation_innings);
            PitchReport {
                pitch,
                outcome,
                description: summary.description,
                at_bat: Some(event),
                runs_scored: summary.runs_scored,
                half_inning_over: summary.half_inning_over,
                game_over: summary.game_over,
            }
        }
        None => {
            let description = format!(
                "{} to {}: {} ({})",
                pitch,
                state.current_batter_name(),
                pitch_phrase(result),
                state.count
            );
            state.log(description.clone());
            PitchReport {
                pitch,
                outcome,
                description,
                at_bat: None,
                runs_scored: SmallVec::new(),
                half_inning_over: false,
                game_over: false,
            }
        }
    }
}

/// End the current plate appearance.
///
/// `last_pitch` is the pitch that ended it, used only to tell a called
/// third strike from a swinging one in the description.
pub fn resolve_at_bat(
    state: &mut GameState,
    event: AtBatEvent,
    last_pitch: PitchResult,
    regulation_innings: u32,
) -> AtBatSummary {
    let batting = state.batting_side();
    let fielding = batting.opponent();
    let inning = state.inning;
    let slot = state.teams[batting].batter_index;
    let batter_id = state.teams[batting].lineup[slot].id;
    let batter_name = state.teams[batting].lineup[slot].name.clone();
    let pitcher_name = state.teams[fielding].pitcher.name.clone();

    credit_batter(&mut state.teams[batting].box_score[slot], event);
    charge_pitcher(state.teams[fielding].active_pitcher_stats_mut(), event);

    let scored_slots = match (event, event.hit_bases()) {
        (_, Some(bases)) => state.bases.advance_all(bases, slot),
        (AtBatEvent::Walk | AtBatEvent::HitByPitch, None) => state.bases.force_advance(slot).into_iter().collect(),
        _ => Vec::new(),
    };

    let runs = scored_slots.len() as u32;
    let mut runs_scored = SmallVec::new();
    {
        let team = &mut state.teams[batting];
        for &runner in &scored_slots {
            team.box_score[runner].r += 1;
            runs_scored.push(team.lineup[runner].id);
        }
        if runs > 0 {
            team.add_runs(inning, runs);
            team.box_score[slot].rbi += runs;
        }
    }
    if runs > 0 {
        let line = state.teams[fielding].active_pitcher_stats_mut();
        line.r += runs;
        line.er += runs;
    }

    if event.is_out() {
        state.outs += 1;
    }

    state.teams[batting].scorecard.push(ScorecardEntry {
        inning,
        batter: batter_id,
        event,
    });
    state.count = Count::default();
    state.teams[batting].advance_batter();

    let description = at_bat_description(&batter_name, &pitcher_name, event, last_pitch, runs, state.outs);
    state.log(description.clone());

    let mut half_inning_over = false;
    let mut game_over = false;

    if runs > 0 && is_walk_off(state, regulation_innings) {
        finish_game(state, "Walk-off!");
        game_over = true;
    } else if state.outs >= 3 {
        half_inning_over = true;
        game_over = end_half_inning(state, regulation_innings);
    }

    AtBatSummary {
        event,
        description,
        runs_scored,
        half_inning_over,
        game_over,
    }
}

/// Close out a half-inning after the third out.
///
/// Clears bases, outs and count, flips halves (bumping the inning after
/// the bottom), and ends the game when regulation is over and the result
/// is decided. Returns `true` if the game ended.
pub fn end_half_inning(state: &mut GameState, regulation_innings: u32) -> bool {
    let label = state.half_label();
    state.bases.clear();
    state.outs = 0;
    state.count = Count::default();

    let away = state.score(Side::Away);
    let home = state.score(Side::Home);
    let entry = format!(
        "End of the {label}. {} {away}, {} {home}.",
        state.teams[Side::Away].abbreviation,
        state.teams[Side::Home].abbreviation,
    );
    state.log(entry);
    tracing::info!(inning = state.inning, top = state.is_top, away, home, "half-inning complete");

    let regulation_done = state.inning >= regulation_innings;
    if state.is_top {
        // Home already ahead: the bottom half is not played.
        if regulation_done && home > away {
            finish_game(state, "Game over.");
            return true;
        }
        state.is_top = false;
    } else {
        if regulation_done && home != away {
            finish_game(state, "Game over.");
            return true;
        }
        state.inning += 1;
        state.is_top = true;
    }

    state.sync_role();
    false
}

/// Put a new pitcher on the mound for `side`.
///
/// Resets the side's pitch count, removes the pitcher from the bullpen,
/// and starts (or reuses) the stat line keyed by the pitcher's identity.
/// Returns the pitcher who was replaced.
///
/// Naming the pitcher already on the mound is not a substitution: the
/// count, bullpen and log are left alone and `new_pitcher` comes back.
pub fn switch_pitcher(state: &mut GameState, side: Side, new_pitcher: Pitcher) -> Pitcher {
    let team = &mut state.teams[side];
    if team.pitcher.id == new_pitcher.id {
        tracing::debug!(side = %side, pitcher = %new_pitcher.name, "pitcher already on the mound");
        return new_pitcher;
    }
    team.bullpen.retain(|p| p.id != new_pitcher.id);
    if !team.pitcher_stats.iter().any(|line| line.id == new_pitcher.id) {
        team.pitcher_stats.push(PitcherStatLine::for_pitcher(&new_pitcher));
    }
    team.pitch_count = 0;
    let previous = std::mem::replace(&mut team.pitcher, new_pitcher);

    let entry = format!(
        "Pitching change: {} replaces {} for {}.",
        team.pitcher.name, previous.name, team.name
    );
    tracing::info!(side = %side, incoming = %team.pitcher.name, outgoing = %previous.name, "pitching change");
    state.log(entry);
    previous
}

fn is_walk_off(state: &GameState, regulation_innings: u32) -> bool {
    !state.is_top && state.inning >= regulation_innings && state.score(Side::Home) > state.score(Side::Away)
}

fn finish_game(state: &mut GameState, prefix: &str) {
    state.status = GameStatus::Finished;
    let away = &state.teams[Side::Away];
    let home = &state.teams[Side::Home];
    let entry = format!(
        "{prefix} Final: {} {}, {} {}.",
        away.abbreviation, away.total, home.abbreviation, home.total
    );
    tracing::info!(away = away.total, home = home.total, innings = state.inning, "game finished");
    state.log(entry);
}

fn credit_batter(row: &mut BoxScoreRow, event: AtBatEvent) {
    if event.charged_at_bat() {
        row.ab += 1;
    }
    if event.hit_bases().is_some() {
        row.h += 1;
    }
    match event {
        AtBatEvent::Double => row.doubles += 1,
        AtBatEvent::Triple => row.triples += 1,
        AtBatEvent::Homerun => row.hr += 1,
        AtBatEvent::Walk => row.bb += 1,
        AtBatEvent::Strikeout => row.so += 1,
        _ => {}
    }
}

fn charge_pitcher(line: &mut PitcherStatLine, event: AtBatEvent) {
    if event.hit_bases().is_some() {
        line.h += 1;
    }
    match event {
        AtBatEvent::Walk => line.bb += 1,
        AtBatEvent::Strikeout => line.so += 1,
        _ => {}
    }
    if event.is_out() {
        line.ip_outs += 1;
    }
}

fn pitch_phrase(result: PitchResult) -> &'static str {
    match result {
        PitchResult::Ball => "ball",
        PitchResult::StrikeCalled => "called strike",
        PitchResult::StrikeSwinging => "swinging strike",
        PitchResult::Foul => "foul ball",
        _ => "in play",
    }
}

fn at_bat_description(
    batter: &str,
    pitcher: &str,
    event: AtBatEvent,
    last_pitch: PitchResult,
    runs: u32,
    outs: u8,
) -> String {
    let action = match event {
        AtBatEvent::Single => format!("{batter} singles off {pitcher}"),
        AtBatEvent::Double => format!("{batter} doubles off {pitcher}"),
        AtBatEvent::Triple => format!("{batter} triples off {pitcher}"),
        AtBatEvent::Homerun => format!("{batter} homers off {pitcher}!"),
        AtBatEvent::Walk => format!("{batter} walks"),
        AtBatEvent::HitByPitch => format!("{batter} is hit by a pitch"),
        AtBatEvent::Strikeout if last_pitch == PitchResult::StrikeCalled => format!("{batter} strikes out looking"),
        AtBatEvent::Strikeout => format!("{batter} strikes out swinging"),
        AtBatEvent::Flyout => format!("{batter} flies out"),
        AtBatEvent::Groundout => format!("{batter} grounds out"),
        AtBatEvent::Lineout => format!("{batter} lines out"),
    };

    let mut text = action;
    match runs {
        0 => {}
        1 => text.push_str(". 1 run scores"),
        n => text.push_str(&format!(". {n} runs score")),
    }
    if event.is_out() {
        let noun = if outs == 1 { "out" } else { "outs" };
        text.push_str(&format!(" ({outs} {noun})"));
    }
    if !text.ends_with('!') {
        text.push('.');
    }
    text
}
