//! Quest board generation and turn-in.

use chrono::{Datelike, Local, TimeZone};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;
use uuid::Uuid;

use crate::character::{JournalEntry, Mood, ReputationType};
use crate::constants::{
    COMPLETION_HONESTY_BONUS, DAILY_BASE_EXP, DAILY_BASE_GOLD, DAILY_QUEST_COUNT, EVENT_BASE_EXP,
    EVENT_BASE_GOLD, MOOD_BUFF_MAGNITUDE, ONETIME_ACTIVE_CAP, ONETIME_EXP_PER_DIFFICULTY,
    ONETIME_GOLD_PER_DIFFICULTY, ONETIME_REFRESH_BATCH, ONETIME_REFRESH_COOLDOWN_MS,
    REPUTATION_BASE_GAIN, REPUTATION_BASE_GAIN_DISCIPLINE, STREAK_HONESTY_BONUS,
    STREAK_HONESTY_INTERVAL, WEEKLY_BASE_EXP, WEEKLY_BASE_GOLD, WEEKLY_QUEST_COUNT,
};
use crate::dungeon::types::{Buff, BuffKind};
use crate::error::GameError;
use crate::game_state::GameState;
use crate::inventory;
use crate::items::catalog::item_by_base_id;
use crate::items::generation::generate_random_item;
use crate::items::types::Rarity;
use crate::progression::{grant_experience, honesty_multiplier, quest_scaling};
use crate::quests::pools::{
    QuestTemplate, DAILY_TEMPLATES, EVENT_QUESTS, ONETIME_TEMPLATES, WEEKLY_TEMPLATES,
};
use crate::quests::types::{Quest, QuestCategory};

fn from_template(
    template: &QuestTemplate,
    category: QuestCategory,
    difficulty: u32,
    base_gold: u64,
    base_exp: u64,
) -> Quest {
    Quest {
        id: Uuid::new_v4().to_string(),
        title: template.title.to_string(),
        description: template.description.to_string(),
        category,
        reputation_type: template.reputation_type,
        difficulty,
        reward_gold: base_gold,
        reward_exp: base_exp,
        reward_item: None,
        completed: false,
    }
}

pub fn generate_daily_quests(rng: &mut impl Rng) -> Vec<Quest> {
    DAILY_TEMPLATES
        .choose_multiple(rng, DAILY_QUEST_COUNT)
        .map(|t| from_template(t, QuestCategory::Daily, 1, DAILY_BASE_GOLD, DAILY_BASE_EXP))
        .collect()
}

/// Five weekly commitments, each sweetened with an uncommon piece of
/// gear rolled near the character's level.
pub fn generate_weekly_quests(level: u32, rng: &mut impl Rng) -> Vec<Quest> {
    let picked: Vec<&QuestTemplate> = WEEKLY_TEMPLATES
        .choose_multiple(rng, WEEKLY_QUEST_COUNT)
        .collect();
    picked
        .into_iter()
        .map(|t| {
            let mut quest = from_template(
                t,
                QuestCategory::Weekly,
                2,
                WEEKLY_BASE_GOLD,
                WEEKLY_BASE_EXP,
            );
            quest.reward_item = generate_random_item(level, Some(Rarity::Uncommon), rng);
            quest
        })
        .collect()
}

/// A batch of fresh one-time undertakings, skipping titles already on the
/// board. Difficulty is rolled per quest and scales the base rewards.
pub fn generate_onetime_batch(taken_titles: &[String], rng: &mut impl Rng) -> Vec<Quest> {
    let available: Vec<&QuestTemplate> = ONETIME_TEMPLATES
        .iter()
        .filter(|t| !taken_titles.iter().any(|taken| taken == t.title))
        .collect();
    available
        .choose_multiple(rng, ONETIME_REFRESH_BATCH)
        .map(|t| {
            let difficulty = rng.gen_range(1..=5u32);
            from_template(
                t,
                QuestCategory::OneTime,
                difficulty,
                ONETIME_GOLD_PER_DIFFICULTY * difficulty as u64,
                ONETIME_EXP_PER_DIFFICULTY * difficulty as u64,
            )
        })
        .collect()
}

/// The calendar event quest for the given day (local time), if one falls
/// on it. The id is the event's stable id, not a fresh uuid, so one
/// completion retires the event for good.
pub fn event_quest_for(now_millis: i64) -> Option<Quest> {
    let date = Local.timestamp_millis_opt(now_millis).single()?;
    let event = EVENT_QUESTS
        .iter()
        .find(|e| e.month == date.month() && e.day == date.day())?;
    let mut quest = from_template(
        &event.template,
        QuestCategory::Event,
        3,
        EVENT_BASE_GOLD,
        EVENT_BASE_EXP,
    );
    quest.id = event.id.to_string();
    quest.reward_item = item_by_base_id(event.reward_item_id).cloned();
    Some(quest)
}

/// Final gold and XP for turning in a quest: the frozen base values scaled
/// by category weight, mood, level, and (gold only) the honesty meter.
pub fn quest_rewards(quest: &Quest, level: u32, honesty: u32, mood: Mood) -> (u64, u64) {
    let rv = quest.category.rarity_value() as f64;
    let shared = mood.reward_multiplier() * quest_scaling(level);
    let gold = (quest.reward_gold as f64 * (1.0 + rv / 5.0) * shared
        * honesty_multiplier(honesty))
    .floor() as u64;
    let exp = (quest.reward_exp as f64 * (1.0 + rv / 10.0) * shared).floor() as u64;
    (gold, exp)
}

/// Reputation earned by one completion, weighted by the honesty meter and
/// the reported mood. Discipline is the everyday track and pays less.
pub fn reputation_gain(kind: ReputationType, honesty: u32, mood: Mood) -> u64 {
    let base = match kind {
        ReputationType::Discipline => REPUTATION_BASE_GAIN_DISCIPLINE,
        ReputationType::Heroism | ReputationType::Creativity => REPUTATION_BASE_GAIN,
    };
    (base * (1.0 + honesty as f64 / 100.0) * mood.reward_multiplier()).floor() as u64
}

/// Turns in a quest: pays out gold, XP, reputation and any attached item,
/// and records the reflection in the journal. Daily completions feed the
/// streak; one-time quests leave the board for good.
pub fn complete_quest(
    state: &GameState,
    quest_id: &str,
    mood: Mood,
    reflection: Option<&str>,
    now: i64,
) -> Result<GameState, GameError> {
    let character = state.character()?;
    let quest = state
        .active_quests
        .iter()
        .find(|q| q.id == quest_id)
        .ok_or_else(|| GameError::QuestNotFound(quest_id.to_string()))?;
    if quest.completed {
        return Err(GameError::QuestAlreadyCompleted);
    }
    if let Some(item) = &quest.reward_item {
        if !item.stackable && !inventory::can_accept(character, item) {
            return Err(GameError::InventoryFull);
        }
    }
    let quest = quest.clone();

    let mut updated = state.clone();
    if let Some(active) = updated.active_quests.iter_mut().find(|q| q.id == quest_id) {
        active.completed = true;
    }

    let character = updated.character_mut()?;
    let (gold, exp) = quest_rewards(&quest, character.level, character.honesty, mood);
    let rep = reputation_gain(quest.reputation_type, character.honesty, mood);
    character.gold += gold;
    let levels = grant_experience(character, exp);
    character.reputation.add(quest.reputation_type, rep);
    character.gain_honesty(COMPLETION_HONESTY_BONUS);
    if quest.category == QuestCategory::Daily {
        character.daily_streak += 1;
        if character.daily_streak % STREAK_HONESTY_INTERVAL == 0 {
            character.gain_honesty(STREAK_HONESTY_BONUS);
        }
    }
    if let Some(item) = &quest.reward_item {
        inventory::add_in_place(character, item, 1);
    }

    let text = match reflection {
        Some(text) if !text.trim().is_empty() => format!("{}: {}", quest.title, text.trim()),
        _ => format!("Completed \"{}\".", quest.title),
    };
    character.add_journal_entry(JournalEntry::new(text, mood, now));

    debug!(quest = %quest.title, gold, exp, levels, "quest completed");

    // A strong mood echoes into the next few combat rounds.
    match mood {
        Mood::Inspired => updated.dungeon_state.active_buffs.push(Buff {
            name: "Inspired".to_string(),
            kind: BuffKind::Damage,
            magnitude: MOOD_BUFF_MAGNITUDE,
            duration: 3,
        }),
        Mood::Neutral => updated.dungeon_state.active_buffs.push(Buff {
            name: "Composed".to_string(),
            kind: BuffKind::Defense,
            magnitude: MOOD_BUFF_MAGNITUDE,
            duration: 3,
        }),
        Mood::Regret => updated.dungeon_state.active_debuffs.push(Buff {
            name: "Regret".to_string(),
            kind: BuffKind::Damage,
            magnitude: MOOD_BUFF_MAGNITUDE,
            duration: 3,
        }),
        Mood::Tired => {}
    }

    updated.completed_quest_ids.push(quest.id.clone());
    if quest.category == QuestCategory::OneTime {
        updated.active_quests.retain(|q| q.id != quest_id);
        updated.last_onetime_completed_at = now;
    }
    Ok(updated)
}

/// Deals a fresh batch of one-time quests, up to the concurrent cap.
/// Gated by a cooldown counted from the most recent one-time completion.
pub fn refresh_onetime_quests(
    state: &GameState,
    now: i64,
    rng: &mut impl Rng,
) -> Result<GameState, GameError> {
    if state.last_onetime_completed_at > 0 {
        let elapsed = now - state.last_onetime_completed_at;
        if elapsed < ONETIME_REFRESH_COOLDOWN_MS {
            return Err(GameError::RefreshCooldown {
                remaining_secs: (ONETIME_REFRESH_COOLDOWN_MS - elapsed) / 1000,
            });
        }
    }
    let open: Vec<String> = state
        .active_quests
        .iter()
        .filter(|q| q.category == QuestCategory::OneTime && !q.completed)
        .map(|q| q.title.clone())
        .collect();
    if open.len() >= ONETIME_ACTIVE_CAP {
        return Err(GameError::TooManyOneTimeQuests);
    }

    let mut updated = state.clone();
    let mut batch = generate_onetime_batch(&open, rng);
    batch.truncate(ONETIME_ACTIVE_CAP - open.len());
    updated.active_quests.extend(batch);
    Ok(updated)
}
