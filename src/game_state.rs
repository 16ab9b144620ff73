//! The whole-save game state and operations on the character sheet.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::character::{Character, ClassType, StatKind, Stats};
use crate::constants::{CREATION_BONUS_POINTS, MAX_HP_PER_VIT, STARTING_POTIONS};
use crate::dungeon::types::DungeonState;
use crate::error::GameError;
use crate::inventory;
use crate::items::catalog::health_potion;
use crate::quests::types::Quest;
use crate::shop::ShopState;

pub const CURRENT_SAVE_VERSION: &str = "1.1";

fn default_floor() -> u32 {
    1
}

/// Everything the save document holds. Serialized field names match the
/// historical save layout, so older files load unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character: Option<Character>,
    #[serde(default)]
    pub last_daily_reset: i64,
    #[serde(default)]
    pub last_weekly_reset: i64,
    #[serde(default)]
    pub last_onetime_completed_at: i64,
    #[serde(default)]
    pub shop_state: ShopState,
    #[serde(default)]
    pub active_quests: Vec<Quest>,
    #[serde(default)]
    pub completed_quest_ids: Vec<String>,
    #[serde(default = "default_floor")]
    pub dungeon_floor: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_dungeon_id: Option<String>,
    #[serde(default)]
    pub dungeon_state: DungeonState,
}

impl GameState {
    /// A fresh save with no character. Reset timestamps start at zero so
    /// the first tick generates the initial quest boards.
    pub fn new_game() -> Self {
        GameState {
            version: CURRENT_SAVE_VERSION.to_string(),
            character: None,
            last_daily_reset: 0,
            last_weekly_reset: 0,
            last_onetime_completed_at: 0,
            shop_state: ShopState::default(),
            active_quests: Vec::new(),
            completed_quest_ids: Vec::new(),
            dungeon_floor: 1,
            current_dungeon_id: None,
            dungeon_state: DungeonState::default(),
        }
    }

    pub fn character(&self) -> Result<&Character, GameError> {
        self.character.as_ref().ok_or(GameError::NoCharacter)
    }

    pub fn character_mut(&mut self) -> Result<&mut Character, GameError> {
        self.character.as_mut().ok_or(GameError::NoCharacter)
    }
}

/// Creates the character and hands out the starting kit. The bonus
/// allocation must spend exactly the creation budget. Replaces any
/// existing character, so callers gate re-creation behind a confirmation.
pub fn create_character(
    state: &GameState,
    name: &str,
    class_type: ClassType,
    bonus: Stats,
    now: i64,
) -> Result<GameState, GameError> {
    if bonus.total() != CREATION_BONUS_POINTS {
        return Err(GameError::InvalidStatAllocation {
            allocated: bonus.total(),
        });
    }
    let mut updated = state.clone();
    let mut character = Character::new(name, class_type, bonus, now);
    inventory::add_in_place(&mut character, health_potion(), STARTING_POTIONS);
    updated.character = Some(character);
    updated.dungeon_floor = 1;
    updated.current_dungeon_id = None;
    updated.dungeon_state = DungeonState::default();
    Ok(updated)
}

/// Spends one banked stat point. Vitality also raises current and max HP.
pub fn allocate_stat_point(state: &GameState, kind: StatKind) -> Result<GameState, GameError> {
    let mut updated = state.clone();
    let character = updated.character_mut()?;
    if character.stat_points == 0 {
        return Err(GameError::NoStatPoints);
    }
    character.stat_points -= 1;
    character.stats.bump(kind);
    if kind == StatKind::Vit {
        character.max_hp += MAX_HP_PER_VIT;
        character.hp += MAX_HP_PER_VIT;
    }
    Ok(updated)
}

/// Equips an inventory item, returning any displaced piece to the bag.
pub fn equip_item(state: &GameState, item_id: &str) -> Result<GameState, GameError> {
    let mut updated = state.clone();
    let character = updated.character_mut()?;

    let item = character
        .inventory
        .iter()
        .find(|i| i.id == item_id)
        .ok_or(GameError::ItemNotFound)?
        .clone();
    let slot = item
        .item_type
        .equipment_slot()
        .ok_or(GameError::NotEquippable(item.item_type))?;
    if item.level_req > character.level {
        return Err(GameError::LevelTooLow {
            required: item.level_req,
        });
    }
    if let Some(required) = item.class_req {
        if required != character.class_type {
            return Err(GameError::WrongClass);
        }
    }

    inventory::remove_one(character, item_id);
    if let Some(displaced) = character.equipment.set(slot, item) {
        inventory::add_in_place(character, &displaced, 1);
    }
    Ok(updated)
}

/// Moves an equipped item back to the inventory.
pub fn unequip_item(
    state: &GameState,
    slot: crate::items::types::EquipmentSlot,
) -> Result<GameState, GameError> {
    let mut updated = state.clone();
    let character = updated.character_mut()?;
    let item = character
        .equipment
        .get(slot)
        .cloned()
        .ok_or(GameError::ItemNotFound)?;
    if !inventory::can_accept(character, &item) {
        return Err(GameError::InventoryFull);
    }
    character.equipment.clear(slot);
    inventory::add_in_place(character, &item, 1);
    Ok(updated)
}

/// Structural check run on loaded documents after migration. A save is
/// only ever written once a character exists, so a missing character is
/// as disqualifying as a mangled one.
pub fn is_valid_game_state(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };
    match obj.get("version").and_then(Value::as_str) {
        Some("1.0") | Some(CURRENT_SAVE_VERSION) => {}
        _ => return false,
    }
    let Some(Value::Object(character)) = obj.get("character") else {
        return false;
    };
    let has =
        |key: &str, pred: fn(&Value) -> bool| character.get(key).map(pred).unwrap_or(false);
    if !has("name", Value::is_string)
        || !has("level", Value::is_u64)
        || !has("hp", Value::is_u64)
        || !has("maxHp", Value::is_u64)
        || !has("gold", Value::is_u64)
        || !has("stats", Value::is_object)
        || !has("inventory", Value::is_array)
        || !has("reputation", Value::is_object)
    {
        return false;
    }
    for (key, check) in [
        ("activeQuests", Value::is_array as fn(&Value) -> bool),
        ("completedQuestIds", Value::is_array),
        ("dungeonFloor", Value::is_u64),
    ] {
        if let Some(v) = obj.get(key) {
            if !check(v) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::catalog::item_by_base_id;
    use crate::items::types::EquipmentSlot;
    use serde_json::json;

    fn state_with_character() -> GameState {
        create_character(
            &GameState::new_game(),
            "Ilya",
            ClassType::Warrior,
            Stats::new(4, 2, 0, 4),
            0,
        )
        .unwrap()
    }

    #[test]
    fn test_create_character_hands_out_starting_kit() {
        let state = state_with_character();
        let c = state.character().unwrap();
        assert_eq!(c.gold, 100);
        assert_eq!(crate::inventory::potion_count(c), 3);
        assert_eq!(c.stats.str, 15 + 4);
    }

    #[test]
    fn test_create_character_rejects_wrong_budget() {
        let err = create_character(
            &GameState::new_game(),
            "Ilya",
            ClassType::Mage,
            Stats::new(1, 1, 1, 1),
            0,
        )
        .unwrap_err();
        assert_eq!(err, GameError::InvalidStatAllocation { allocated: 4 });
    }

    #[test]
    fn test_allocate_vit_raises_hp() {
        let mut state = state_with_character();
        state.character.as_mut().unwrap().stat_points = 1;
        let before = state.character().unwrap().max_hp;
        let updated = allocate_stat_point(&state, StatKind::Vit).unwrap();
        let c = updated.character().unwrap();
        assert_eq!(c.max_hp, before + 5);
        assert_eq!(c.stat_points, 0);
        assert!(allocate_stat_point(&updated, StatKind::Str).is_err());
    }

    #[test]
    fn test_equip_swaps_displaced_item() {
        let mut state = state_with_character();
        let sword = item_by_base_id("w_war_1").unwrap();
        {
            let c = state.character.as_mut().unwrap();
            crate::inventory::add_in_place(c, sword, 2);
        }
        let first_id = state.character().unwrap().inventory[1].id.clone();
        let state = equip_item(&state, &first_id).unwrap();
        assert!(state.character().unwrap().equipment.weapon.is_some());

        let second_id = state
            .character()
            .unwrap()
            .inventory
            .iter()
            .find(|i| i.name == sword.name)
            .unwrap()
            .id
            .clone();
        let state = equip_item(&state, &second_id).unwrap();
        // The displaced first sword is back in the bag
        assert_eq!(
            state
                .character()
                .unwrap()
                .inventory
                .iter()
                .filter(|i| i.name == sword.name)
                .count(),
            1
        );
    }

    #[test]
    fn test_equip_enforces_class_and_level() {
        let mut state = state_with_character();
        let staff = item_by_base_id("w_mag_1").unwrap();
        let big_sword = item_by_base_id("w_war_5").unwrap();
        {
            let c = state.character.as_mut().unwrap();
            crate::inventory::add_in_place(c, staff, 1);
            crate::inventory::add_in_place(c, big_sword, 1);
        }
        let staff_id = state
            .character()
            .unwrap()
            .inventory
            .iter()
            .find(|i| i.name == staff.name)
            .unwrap()
            .id
            .clone();
        assert_eq!(equip_item(&state, &staff_id).unwrap_err(), GameError::WrongClass);

        let sword_id = state
            .character()
            .unwrap()
            .inventory
            .iter()
            .find(|i| i.name == big_sword.name)
            .unwrap()
            .id
            .clone();
        assert!(matches!(
            equip_item(&state, &sword_id).unwrap_err(),
            GameError::LevelTooLow { .. }
        ));
    }

    #[test]
    fn test_unequip_requires_space() {
        let mut state = state_with_character();
        let sword = item_by_base_id("w_war_1").unwrap();
        {
            let c = state.character.as_mut().unwrap();
            crate::inventory::add_in_place(c, sword, 1);
        }
        let id = state
            .character()
            .unwrap()
            .inventory
            .iter()
            .find(|i| i.name == sword.name)
            .unwrap()
            .id
            .clone();
        let mut state = equip_item(&state, &id).unwrap();
        state.character.as_mut().unwrap().inventory_slots =
            state.character().unwrap().inventory.len();
        assert_eq!(
            unequip_item(&state, EquipmentSlot::Weapon).unwrap_err(),
            GameError::InventoryFull
        );

        state.character.as_mut().unwrap().inventory_slots += 1;
        let state = unequip_item(&state, EquipmentSlot::Weapon).unwrap();
        assert!(state.character().unwrap().equipment.weapon.is_none());
    }

    #[test]
    fn test_validation_accepts_played_save() {
        let state = state_with_character();
        let value = serde_json::to_value(&state).unwrap();
        assert!(is_valid_game_state(&value));
        // No character yet means nothing worth loading
        assert!(!is_valid_game_state(
            &serde_json::to_value(GameState::new_game()).unwrap()
        ));
    }

    #[test]
    fn test_validation_rejects_broken_shapes() {
        assert!(!is_valid_game_state(&json!([])));
        assert!(!is_valid_game_state(&json!({})));
        assert!(!is_valid_game_state(&json!({ "version": 7 })));
        assert!(!is_valid_game_state(&json!({
            "version": "1.1",
            "character": { "name": "Ilya" }
        })));
        let mut value = serde_json::to_value(state_with_character()).unwrap();
        value["character"]["stats"] = json!("strong");
        assert!(!is_valid_game_state(&value));

        // Versions from the future are not ours to load
        let mut value = serde_json::to_value(state_with_character()).unwrap();
        value["version"] = json!("7.3");
        assert!(!is_valid_game_state(&value));
    }
}
