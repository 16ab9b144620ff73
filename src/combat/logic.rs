//! Encounter resolvers. Every entry point takes the current state and
//! returns a new one alongside the combat log; expected failures leave
//! the input untouched.

use rand::Rng;
use tracing::debug;

use crate::combat::math::{mitigate, player_defense, roll_player_hit, variance};
use crate::combat::types::{CombatEvent, CombatTurn};
use crate::constants::{
    CRIT_MULTIPLIER, MOB_GOLD_PER_LEVEL, MOB_XP_PER_LEVEL, POTION_FLAT_HEAL, POTION_PCT_HEAL,
    REGEN_PCT_OF_MAX_HP, REVIVE_FLOOR_REGRESSION, REVIVE_GOLD_PENALTY_CAP,
    REVIVE_GOLD_PENALTY_PCT, REVIVE_HP_PCT, SPECIAL_ABILITY_CHANCE, VAMPIRISM_RATIO,
    VICTORY_HEAL_PCT,
};
use crate::character::StatKind;
use crate::dungeon::generation::generate_mob;
use crate::dungeon::types::{BuffKind, DungeonInfo, DungeonState, SpecialAbility};
use crate::error::GameError;
use crate::game_state::GameState;
use crate::inventory;
use crate::items::drops::generate_loot_for_source;
use crate::progression::grant_experience;

fn current_dungeon(state: &GameState) -> Result<&'static DungeonInfo, GameError> {
    let id = state
        .current_dungeon_id
        .as_deref()
        .ok_or(GameError::DungeonNotFound)?;
    crate::dungeon::types::dungeon_by_id(id).ok_or(GameError::DungeonNotFound)
}

/// Enters a dungeon. Returning to the dungeon already underway keeps the
/// floor; switching dungeons starts over at floor one.
pub fn enter_dungeon(state: &GameState, dungeon_id: &str) -> Result<GameState, GameError> {
    let dungeon =
        crate::dungeon::types::dungeon_by_id(dungeon_id).ok_or(GameError::DungeonNotFound)?;
    let character = state.character()?;
    if character.level < dungeon.min_level {
        return Err(GameError::LevelTooLow {
            required: dungeon.min_level,
        });
    }

    let mut updated = state.clone();
    if updated.current_dungeon_id.as_deref() != Some(dungeon_id) {
        updated.current_dungeon_id = Some(dungeon_id.to_string());
        updated.dungeon_floor = 1;
    }
    updated.dungeon_state.current_mob = None;
    updated.dungeon_state.turn = CombatTurn::PlayerTurn;
    Ok(updated)
}

/// Leaves the dungeon, abandoning any fight in progress along with any
/// lingering buffs. Floor progress is kept for the next visit.
pub fn flee_dungeon(state: &GameState) -> Result<GameState, GameError> {
    state.character()?;
    let mut updated = state.clone();
    updated.current_dungeon_id = None;
    updated.dungeon_state.current_mob = None;
    updated.dungeon_state.active_buffs.clear();
    updated.dungeon_state.active_debuffs.clear();
    updated.dungeon_state.turn = CombatTurn::PlayerTurn;
    Ok(updated)
}

/// Spawns the mob for the current floor.
pub fn start_encounter(state: &GameState, rng: &mut impl Rng) -> Result<GameState, GameError> {
    state.character()?;
    let dungeon = current_dungeon(state)?;
    if state.dungeon_state.current_mob.is_some() {
        return Err(GameError::EncounterInProgress);
    }

    let mut updated = state.clone();
    let mob = generate_mob(dungeon, updated.dungeon_floor, rng);
    debug!(mob = %mob.name, floor = updated.dungeon_floor, "encounter started");
    updated.dungeon_state.current_mob = Some(mob);
    updated.dungeon_state.turn = CombatTurn::PlayerTurn;
    Ok(updated)
}

fn buff_total(state: &DungeonState, kind: BuffKind) -> f64 {
    let bonus: f64 = state
        .active_buffs
        .iter()
        .filter(|b| b.kind == kind)
        .map(|b| b.magnitude)
        .sum();
    let malus: f64 = state
        .active_debuffs
        .iter()
        .filter(|b| b.kind == kind)
        .map(|b| b.magnitude)
        .sum();
    bonus - malus
}

fn expire_buffs(state: &mut DungeonState) {
    for list in [&mut state.active_buffs, &mut state.active_debuffs] {
        for buff in list.iter_mut() {
            buff.duration = buff.duration.saturating_sub(1);
        }
        list.retain(|b| b.duration > 0);
    }
}

/// Resolves the player's attack. The environment gets a say first: the
/// biome may skip the turn, burn the attacker, or make the swing miss.
/// A surviving mob is handed the turn; a dead one pays out immediately.
pub fn player_attack(
    state: &GameState,
    rng: &mut impl Rng,
) -> Result<(GameState, Vec<CombatEvent>), GameError> {
    state.character()?;
    let dungeon = current_dungeon(state)?;
    if state.dungeon_state.current_mob.is_none() {
        return Err(GameError::NoActiveMob);
    }
    if state.dungeon_state.turn != CombatTurn::PlayerTurn {
        return Err(GameError::OutOfTurn);
    }

    let mut updated = state.clone();
    let mut events = Vec::new();
    let biome = dungeon.biome.modifier();

    if biome.skip_chance > 0.0 && rng.gen_bool(biome.skip_chance) {
        events.push(CombatEvent::TurnSkipped);
        updated.dungeon_state.turn = CombatTurn::EnemyTurn;
        return Ok((updated, events));
    }

    if biome.action_burn > 0 {
        let character = updated.character_mut()?;
        character.take_damage(biome.action_burn);
        events.push(CombatEvent::BiomeBurn {
            amount: biome.action_burn,
        });
        if character.is_defeated() {
            updated.dungeon_state.turn = CombatTurn::Lose;
            events.push(CombatEvent::PlayerDefeated);
            return Ok((updated, events));
        }
    }

    if biome.miss_chance > 0.0 && rng.gen_bool(biome.miss_chance) {
        events.push(CombatEvent::PlayerMiss);
        updated.dungeon_state.turn = CombatTurn::EnemyTurn;
        return Ok((updated, events));
    }

    let hit = {
        let character = updated.character()?;
        roll_player_hit(character, rng)
    };
    let damage_mult =
        biome.player_damage_mult * (1.0 + buff_total(&updated.dungeon_state, BuffKind::Damage));
    let mob = updated
        .dungeon_state
        .current_mob
        .as_mut()
        .ok_or(GameError::NoActiveMob)?;
    let dealt = mitigate(hit.damage * damage_mult, mob.def);
    mob.hp = mob.hp.saturating_sub(dealt);
    events.push(CombatEvent::PlayerAttack {
        damage: dealt,
        crit: hit.crit,
    });

    if mob.hp == 0 {
        resolve_victory(&mut updated, dungeon, rng, &mut events)?;
    } else {
        updated.dungeon_state.turn = CombatTurn::EnemyTurn;
    }
    Ok((updated, events))
}

/// Drinks a potion mid-fight without surrendering the turn. Also usable
/// outside combat.
pub fn use_potion(state: &GameState) -> Result<(GameState, Vec<CombatEvent>), GameError> {
    let mut updated = state.clone();
    let character = updated.character_mut()?;
    let idx = inventory::find_potion(character).ok_or(GameError::NoPotion)?;
    let potion_id = character.inventory[idx].id.clone();
    inventory::remove_one(character, &potion_id);

    let heal = POTION_FLAT_HEAL + (character.max_hp as f64 * POTION_PCT_HEAL).floor() as u32;
    let before = character.hp;
    character.heal(heal);
    let healed = character.hp - before;
    Ok((updated, vec![CombatEvent::PotionUsed { healed }]))
}

/// Resolves the mob's response: a possible boss passive, the attack
/// itself with biome bonuses, and the environment's afterburn. Buff
/// durations tick down once the round closes.
pub fn enemy_attack(
    state: &GameState,
    rng: &mut impl Rng,
) -> Result<(GameState, Vec<CombatEvent>), GameError> {
    state.character()?;
    let dungeon = current_dungeon(state)?;
    if state.dungeon_state.current_mob.is_none() {
        return Err(GameError::NoActiveMob);
    }
    if state.dungeon_state.turn != CombatTurn::EnemyTurn {
        return Err(GameError::OutOfTurn);
    }

    let mut updated = state.clone();
    let mut events = Vec::new();
    let biome = dungeon.biome.modifier();

    let ability = {
        let mob = updated
            .dungeon_state
            .current_mob
            .as_ref()
            .ok_or(GameError::NoActiveMob)?;
        mob.special_ability
            .filter(|_| rng.gen_bool(SPECIAL_ABILITY_CHANCE))
    };

    if ability == Some(SpecialAbility::Regeneration) {
        let mob = updated
            .dungeon_state
            .current_mob
            .as_mut()
            .ok_or(GameError::NoActiveMob)?;
        let amount = (mob.max_hp as f64 * REGEN_PCT_OF_MAX_HP).floor() as u32;
        mob.hp = (mob.hp + amount).min(mob.max_hp);
        events.push(CombatEvent::EnemyRegenerated { amount });
    }

    let atk = updated
        .dungeon_state
        .current_mob
        .as_ref()
        .ok_or(GameError::NoActiveMob)?
        .atk;

    let mut raw = atk as f64 * variance(rng) + biome.enemy_flat_bonus as f64;
    if ability == Some(SpecialAbility::CriticalStrike) {
        raw *= CRIT_MULTIPLIER;
    }
    let defense_cut = buff_total(&updated.dungeon_state, BuffKind::Defense).clamp(0.0, 0.9);
    raw *= 1.0 - defense_cut;

    let character = updated.character_mut()?;
    let dealt = mitigate(raw, player_defense(character));
    character.take_damage(dealt);
    events.push(CombatEvent::EnemyAttack {
        damage: dealt,
        special: ability,
    });

    if ability == Some(SpecialAbility::Vampirism) {
        let amount = (dealt as f64 * VAMPIRISM_RATIO).floor() as u32;
        let mob = updated
            .dungeon_state
            .current_mob
            .as_mut()
            .ok_or(GameError::NoActiveMob)?;
        mob.hp = (mob.hp + amount).min(mob.max_hp);
        events.push(CombatEvent::EnemyDrained { amount });
    }

    if biome.post_attack_burn_pct > 0.0 {
        let character = updated.character_mut()?;
        if !character.is_defeated() {
            let burn = (character.max_hp as f64 * biome.post_attack_burn_pct).floor() as u32;
            character.take_damage(burn);
            events.push(CombatEvent::BiomeBurn { amount: burn });
        }
    }

    if updated.character()?.is_defeated() {
        updated.dungeon_state.turn = CombatTurn::Lose;
        events.push(CombatEvent::PlayerDefeated);
    } else {
        let character = updated.character_mut()?;
        if character.hp_regen > 0 {
            character.heal(character.hp_regen);
        }
        updated.dungeon_state.turn = CombatTurn::PlayerTurn;
    }
    expire_buffs(&mut updated.dungeon_state);
    Ok((updated, events))
}

fn resolve_victory(
    state: &mut GameState,
    dungeon: &DungeonInfo,
    rng: &mut impl Rng,
    events: &mut Vec<CombatEvent>,
) -> Result<(), GameError> {
    let mob = state
        .dungeon_state
        .current_mob
        .take()
        .ok_or(GameError::NoActiveMob)?;
    let xp_mult = mob.rarity.mob_config().xp_mult;
    let gold = (mob.level as f64 * MOB_GOLD_PER_LEVEL * xp_mult).floor() as u64;
    let xp = (mob.level as f64 * MOB_XP_PER_LEVEL * xp_mult).floor() as u64;

    let floor = state.dungeon_floor;
    if mob.is_major_boss {
        state
            .dungeon_state
            .boss_defeated
            .insert(DungeonState::boss_key(dungeon.id, floor), true);
    }

    let (dex, level, class_type) = {
        let c = state.character()?;
        (
            c.effective_stat(StatKind::Dex),
            c.level,
            c.class_type,
        )
    };
    let drops = generate_loot_for_source(
        level,
        mob.rarity,
        Some(dungeon.biome),
        dex,
        class_type,
        rng,
    );

    let character = state.character_mut()?;
    character.gold += gold;
    let levels_gained = grant_experience(character, xp);
    let heal = (character.max_hp as f64 * VICTORY_HEAL_PCT).floor() as u32
        + character.effective_stat(StatKind::Vit);
    character.heal(heal);
    for item in &drops {
        inventory::add_in_place(character, item, 1);
        events.push(CombatEvent::LootDropped {
            item_name: item.name.clone(),
        });
    }

    debug!(mob = %mob.name, gold, xp, "mob defeated");
    events.push(CombatEvent::MobDefeated {
        gold,
        xp,
        levels_gained,
    });

    state.dungeon_floor += 1;
    state.dungeon_state.active_buffs.clear();
    state.dungeon_state.active_debuffs.clear();
    state.dungeon_state.turn = CombatTurn::PlayerTurn;
    Ok(())
}

/// Brings a fallen character back outside the dungeon: a gold tithe,
/// half health, and a five floor setback.
pub fn revive(state: &GameState) -> Result<GameState, GameError> {
    let character = state.character()?;
    if !character.is_defeated() {
        return Err(GameError::NotDefeated);
    }

    let mut updated = state.clone();
    let character = updated.character_mut()?;
    let penalty = ((character.gold as f64 * REVIVE_GOLD_PENALTY_PCT).floor() as u64)
        .min(REVIVE_GOLD_PENALTY_CAP);
    character.gold -= penalty;
    character.hp = (character.max_hp as f64 * REVIVE_HP_PCT).floor() as u32;

    updated.dungeon_floor = updated
        .dungeon_floor
        .saturating_sub(REVIVE_FLOOR_REGRESSION)
        .max(1);
    updated.current_dungeon_id = None;
    updated.dungeon_state.current_mob = None;
    updated.dungeon_state.active_buffs.clear();
    updated.dungeon_state.active_debuffs.clear();
    updated.dungeon_state.turn = CombatTurn::PlayerTurn;
    debug!(penalty, floor = updated.dungeon_floor, "character revived");
    Ok(updated)
}
