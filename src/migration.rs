//! Save-document migration. Runs on the loose JSON value before the typed
//! load, so any historical save shape can be brought forward. Total:
//! unknown or hopeless inputs pass through unchanged and are left for
//! validation to reject.

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::game_state::CURRENT_SAVE_VERSION;

fn ensure(obj: &mut Map<String, Value>, key: &str, default: Value) {
    if !obj.contains_key(key) || obj.get(key) == Some(&Value::Null) {
        obj.insert(key.to_string(), default);
    }
}

fn stackable_type(type_name: &str) -> bool {
    matches!(type_name, "Potion" | "Scroll" | "Food" | "Material")
}

/// 1.0 inventories predate stacking: items carried no amount or stackable
/// flag, and every copy of a consumable held its own slot. Normalize the
/// fields, then merge duplicate stacks by name and type.
fn migrate_inventory(items: &mut Vec<Value>) {
    for item in items.iter_mut() {
        if let Value::Object(obj) = item {
            let ty = obj
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            ensure(obj, "amount", json!(1));
            ensure(obj, "stackable", json!(stackable_type(&ty)));
        }
    }

    let mut merged: Vec<Value> = Vec::with_capacity(items.len());
    for item in items.drain(..) {
        let key = match &item {
            Value::Object(obj) if obj.get("stackable") == Some(&Value::Bool(true)) => {
                Some((obj.get("name").cloned(), obj.get("type").cloned()))
            }
            _ => None,
        };
        let target = key.as_ref().and_then(|key| {
            merged.iter_mut().find_map(|candidate| match candidate {
                Value::Object(obj)
                    if obj.get("stackable") == Some(&Value::Bool(true))
                        && (obj.get("name").cloned(), obj.get("type").cloned()) == *key =>
                {
                    Some(obj)
                }
                _ => None,
            })
        });
        match target {
            Some(existing) => {
                let incoming = item.get("amount").and_then(Value::as_u64).unwrap_or(1);
                let held = existing.get("amount").and_then(Value::as_u64).unwrap_or(1);
                existing.insert("amount".to_string(), json!(held + incoming));
            }
            None => merged.push(item),
        }
    }
    *items = merged;
}

/// Pre-1.1 saves lacked several character fields; fill them in.
fn migrate_character(character: &mut Map<String, Value>) {
    ensure(character, "statPoints", json!(0));
    ensure(character, "honesty", json!(100));
    ensure(character, "dailyStreak", json!(0));
    ensure(character, "inventorySlots", json!(20));
    ensure(character, "inventory", json!([]));
    if let Some(Value::Array(items)) = character.get_mut("inventory") {
        migrate_inventory(items);
    }
    ensure(character, "journal", json!([]));
    ensure(character, "unlockedRecipes", json!([]));
    ensure(character, "hpRegen", json!(0));
    ensure(
        character,
        "reputation",
        json!({ "heroism": 0, "discipline": 0, "creativity": 0 }),
    );
    ensure(character, "settings", json!({}));
    ensure(
        character,
        "equipment",
        json!({
            "weapon": null, "head": null, "body": null, "hands": null,
            "legs": null, "ring": null, "amulet": null, "belt": null
        }),
    );
}

fn migrate_1_0_to_1_1(obj: &mut Map<String, Value>) {
    ensure(obj, "lastDailyReset", json!(0));
    ensure(obj, "lastWeeklyReset", json!(0));
    ensure(obj, "lastOnetimeCompletedAt", json!(0));
    ensure(obj, "activeQuests", json!([]));
    ensure(obj, "completedQuestIds", json!([]));
    ensure(obj, "dungeonFloor", json!(1));
    ensure(obj, "dungeonState", json!({}));
    ensure(
        obj,
        "shopState",
        json!({ "items": [], "discounts": {}, "lastUpdate": 0, "visitStreak": 0 }),
    );
    if let Some(Value::Object(character)) = obj.get_mut("character") {
        migrate_character(character);
    }
    obj.insert("version".to_string(), json!("1.1"));
}

/// Brings a loaded save document up to the current version. Never panics;
/// a non-object input is returned untouched.
pub fn migrate_value(mut value: Value) -> Value {
    let Some(obj) = value.as_object_mut() else {
        return value;
    };

    let version = obj
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or("1.0")
        .to_string();

    if version == "1.0" {
        debug!(from = %version, to = CURRENT_SAVE_VERSION, "migrating save");
        migrate_1_0_to_1_1(obj);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::{is_valid_game_state, GameState};

    #[test]
    fn test_missing_version_is_treated_as_oldest() {
        let migrated = migrate_value(json!({}));
        assert_eq!(migrated["version"], "1.1");
        assert_eq!(migrated["dungeonFloor"], 1);
        // Migration cannot conjure a character; validation still rejects it
        assert!(!is_valid_game_state(&migrated));
    }

    #[test]
    fn test_old_character_gains_new_fields() {
        let old = json!({
            "version": "1.0",
            "character": {
                "name": "Ilya",
                "classType": "Warrior",
                "level": 3,
                "currentExp": 120,
                "stats": { "str": 16, "dex": 8, "int": 3, "vit": 13 },
                "hp": 80,
                "maxHp": 135,
                "gold": 420,
                "inventory": []
            }
        });
        let migrated = migrate_value(old);
        assert!(is_valid_game_state(&migrated));
        let character = &migrated["character"];
        assert_eq!(character["honesty"], 100);
        assert_eq!(character["dailyStreak"], 0);
        assert_eq!(character["inventorySlots"], 20);
        // Existing values survive
        assert_eq!(character["level"], 3);
        assert_eq!(character["gold"], 420);

        let state: GameState = serde_json::from_value(migrated).unwrap();
        assert_eq!(state.character.unwrap().level, 3);
    }

    #[test]
    fn test_flat_inventory_gains_stacks() {
        let old = json!({
            "version": "1.0",
            "character": {
                "name": "Ilya",
                "classType": "Warrior",
                "level": 2,
                "currentExp": 10,
                "stats": { "str": 15, "dex": 8, "int": 3, "vit": 12 },
                "hp": 100,
                "maxHp": 110,
                "gold": 50,
                "inventory": [
                    { "id": "a", "name": "Small Health Potion", "type": "Potion",
                      "rarity": "Common", "price": 25, "levelReq": 1 },
                    { "id": "b", "name": "Small Health Potion", "type": "Potion",
                      "rarity": "Common", "price": 25, "levelReq": 1 },
                    { "id": "c", "name": "Rusty Sword", "type": "Weapon",
                      "rarity": "Common", "price": 10, "levelReq": 1 }
                ]
            }
        });
        let migrated = migrate_value(old);
        let inventory = migrated["character"]["inventory"].as_array().unwrap();
        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory[0]["amount"], 2);
        assert_eq!(inventory[0]["stackable"], true);
        assert_eq!(inventory[1]["name"], "Rusty Sword");
        assert_eq!(inventory[1]["stackable"], false);
        assert_eq!(inventory[1]["amount"], 1);

        let state: GameState = serde_json::from_value(migrated).unwrap();
        let character = state.character.unwrap();
        assert_eq!(crate::inventory::count_by_name(&character, "Small Health Potion"), 2);
    }

    #[test]
    fn test_current_version_passes_through() {
        let state = GameState::new_game();
        let value = serde_json::to_value(&state).unwrap();
        let migrated = migrate_value(value.clone());
        assert_eq!(migrated, value);
    }

    #[test]
    fn test_totality_on_garbage() {
        for garbage in [
            json!(null),
            json!(42),
            json!("not a save"),
            json!([1, 2, 3]),
            json!({ "version": 3.5 }),
        ] {
            // Must not panic, whatever comes back
            let _ = migrate_value(garbage);
        }
    }

    #[test]
    fn test_null_fields_are_refilled() {
        let migrated = migrate_value(json!({
            "version": "1.0",
            "activeQuests": null,
            "dungeonFloor": null
        }));
        assert_eq!(migrated["activeQuests"], json!([]));
        assert_eq!(migrated["dungeonFloor"], 1);
    }
}
