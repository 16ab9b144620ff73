//! The periodic tick: daily and weekly quest resets, streak accounting,
//! calendar events and shop restocks. Running the tick twice with the
//! same clock is a no-op.

use chrono::{DateTime, Datelike, Local, TimeZone};
use rand::Rng;
use tracing::debug;

use crate::constants::MISSED_DAILIES_STREAK_RESET;
use crate::game_state::GameState;
use crate::quests::engine::{event_quest_for, generate_daily_quests, generate_weekly_quests};
use crate::quests::types::QuestCategory;
use crate::shop::restock_if_due;

fn local_time(millis: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(millis).single()
}

/// Calendar-day comparison in the player's local timezone.
pub fn same_local_day(a_millis: i64, b_millis: i64) -> bool {
    match (local_time(a_millis), local_time(b_millis)) {
        (Some(a), Some(b)) => a.date_naive() == b.date_naive(),
        _ => false,
    }
}

pub fn same_iso_week(a_millis: i64, b_millis: i64) -> bool {
    match (local_time(a_millis), local_time(b_millis)) {
        (Some(a), Some(b)) => a.iso_week() == b.iso_week(),
        _ => false,
    }
}

fn run_daily_reset(state: &mut GameState, now: i64, rng: &mut impl Rng) {
    // Missed-quest accounting only applies once a first board existed.
    // Streak growth itself happens at completion time.
    if state.last_daily_reset > 0 {
        let missed = state
            .active_quests
            .iter()
            .filter(|q| q.category == QuestCategory::Daily && !q.completed)
            .count();
        if let Some(character) = state.character.as_mut() {
            if missed >= MISSED_DAILIES_STREAK_RESET {
                character.daily_streak = 0;
            }
            debug!(missed, streak = character.daily_streak, "daily reset");
        }
    }

    // Dailies are replaced wholesale; an unfinished event stays on the
    // board until completed.
    state.active_quests.retain(|q| match q.category {
        QuestCategory::Daily => false,
        QuestCategory::Event => !q.completed,
        _ => true,
    });
    if let Some(event) = event_quest_for(now) {
        let seen = state.active_quests.iter().any(|q| q.id == event.id)
            || state.completed_quest_ids.contains(&event.id);
        if !seen {
            state.active_quests.push(event);
        }
    }
    state.active_quests.extend(generate_daily_quests(rng));
    state.last_daily_reset = now;
}

fn run_weekly_reset(state: &mut GameState, now: i64, rng: &mut impl Rng) {
    let level = state.character.as_ref().map(|c| c.level).unwrap_or(1);
    state
        .active_quests
        .retain(|q| q.category != QuestCategory::Weekly);
    state.active_quests.extend(generate_weekly_quests(level, rng));
    state.last_weekly_reset = now;
}

fn has_daily_board(state: &GameState) -> bool {
    state
        .active_quests
        .iter()
        .any(|q| q.category == QuestCategory::Daily)
}

/// Advances the world clock. Safe to call as often as the caller likes;
/// each periodic effect fires at most once per period.
pub fn process_game_tick(state: &GameState, now: i64, rng: &mut impl Rng) -> GameState {
    if state.character.is_none() {
        return state.clone();
    }

    let mut updated = state.clone();
    if !same_local_day(updated.last_daily_reset, now) || !has_daily_board(&updated) {
        run_daily_reset(&mut updated, now, rng);
    }
    if !same_iso_week(updated.last_weekly_reset, now) {
        run_weekly_reset(&mut updated, now, rng);
    }
    restock_if_due(&updated, now, rng)
}
