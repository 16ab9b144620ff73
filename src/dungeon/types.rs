use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::combat::types::CombatTurn;
use crate::items::types::Rarity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Forest,
    Cave,
    Swamp,
    Desert,
    Ice,
    Necropolis,
    Sky,
    Hell,
    Chaos,
    Aether,
}

/// Environmental effects a biome applies during combat. All fields default
/// to "no effect"; each biome overrides the ones it uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeModifier {
    /// Chance the player's attack misses outright.
    pub miss_chance: f64,
    /// Chance the player's turn is skipped before acting.
    pub skip_chance: f64,
    /// Flat damage the player takes on each of their own actions.
    pub action_burn: u32,
    /// Flat bonus added to every enemy hit.
    pub enemy_flat_bonus: u32,
    /// Fraction of the player's max HP burned after each enemy attack.
    pub post_attack_burn_pct: f64,
    /// Multiplier on the player's outgoing damage.
    pub player_damage_mult: f64,
}

impl Default for BiomeModifier {
    fn default() -> Self {
        BiomeModifier {
            miss_chance: 0.0,
            skip_chance: 0.0,
            action_burn: 0,
            enemy_flat_bonus: 0,
            post_attack_burn_pct: 0.0,
            player_damage_mult: 1.0,
        }
    }
}

impl Biome {
    pub fn modifier(self) -> BiomeModifier {
        match self {
            Biome::Swamp => BiomeModifier {
                miss_chance: 0.20,
                ..Default::default()
            },
            Biome::Desert => BiomeModifier {
                action_burn: 2,
                ..Default::default()
            },
            Biome::Ice => BiomeModifier {
                skip_chance: 0.15,
                ..Default::default()
            },
            Biome::Sky => BiomeModifier {
                player_damage_mult: 1.10,
                ..Default::default()
            },
            Biome::Hell => BiomeModifier {
                enemy_flat_bonus: 5,
                post_attack_burn_pct: crate::constants::HELL_BURN_PCT,
                player_damage_mult: 0.95,
                ..Default::default()
            },
            Biome::Aether => BiomeModifier {
                miss_chance: 0.30,
                ..Default::default()
            },
            Biome::Forest | Biome::Cave | Biome::Necropolis | Biome::Chaos => {
                BiomeModifier::default()
            }
        }
    }
}

/// Static description of a dungeon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DungeonInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub biome: Biome,
    /// Character level required to enter.
    pub min_level: u32,
    /// Scales mob HP and attack on top of the floor formulas.
    pub difficulty: f64,
}

static DUNGEONS: [DungeonInfo; 10] = [
    DungeonInfo {
        id: "forest",
        name: "Whispering Forest",
        biome: Biome::Forest,
        min_level: 1,
        difficulty: 1.0,
    },
    DungeonInfo {
        id: "caves",
        name: "Echoing Caves",
        biome: Biome::Cave,
        min_level: 5,
        difficulty: 1.15,
    },
    DungeonInfo {
        id: "swamp",
        name: "Black Mire",
        biome: Biome::Swamp,
        min_level: 10,
        difficulty: 1.3,
    },
    DungeonInfo {
        id: "desert",
        name: "Scorched Sands",
        biome: Biome::Desert,
        min_level: 15,
        difficulty: 1.45,
    },
    DungeonInfo {
        id: "ice",
        name: "Frozen Reach",
        biome: Biome::Ice,
        min_level: 20,
        difficulty: 1.6,
    },
    DungeonInfo {
        id: "necropolis",
        name: "Sunken Necropolis",
        biome: Biome::Necropolis,
        min_level: 25,
        difficulty: 1.75,
    },
    DungeonInfo {
        id: "sky",
        name: "Sky Bastion",
        biome: Biome::Sky,
        min_level: 30,
        difficulty: 1.9,
    },
    DungeonInfo {
        id: "hell",
        name: "Burning Depths",
        biome: Biome::Hell,
        min_level: 35,
        difficulty: 2.05,
    },
    DungeonInfo {
        id: "chaos",
        name: "Rift of Chaos",
        biome: Biome::Chaos,
        min_level: 40,
        difficulty: 2.2,
    },
    DungeonInfo {
        id: "aether",
        name: "Aether Spire",
        biome: Biome::Aether,
        min_level: 45,
        difficulty: 2.35,
    },
];

pub fn all_dungeons() -> &'static [DungeonInfo] {
    &DUNGEONS
}

pub fn dungeon_by_id(id: &str) -> Option<&'static DungeonInfo> {
    DUNGEONS.iter().find(|d| d.id == id)
}

/// Boss passives that fire on a 30% roll each enemy turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialAbility {
    Regeneration,
    CriticalStrike,
    Vampirism,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mob {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub atk: u32,
    pub def: u32,
    pub rarity: Rarity,
    #[serde(default)]
    pub is_boss: bool,
    #[serde(default)]
    pub is_major_boss: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_ability: Option<SpecialAbility>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuffKind {
    Damage,
    Defense,
}

/// Timed combat modifier. `magnitude` is a fractional bonus; duration is
/// counted in the holder's turns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buff {
    pub name: String,
    pub kind: BuffKind,
    pub magnitude: f64,
    pub duration: u32,
}

/// Per-run dungeon progress carried in the save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DungeonState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_mob: Option<Mob>,
    /// Keys are "dungeonId_floor".
    #[serde(default)]
    pub boss_defeated: BTreeMap<String, bool>,
    #[serde(default)]
    pub active_buffs: Vec<Buff>,
    #[serde(default)]
    pub active_debuffs: Vec<Buff>,
    #[serde(default)]
    pub turn: CombatTurn,
}

impl DungeonState {
    pub fn boss_key(dungeon_id: &str, floor: u32) -> String {
        format!("{dungeon_id}_{floor}")
    }

    pub fn is_boss_defeated(&self, dungeon_id: &str, floor: u32) -> bool {
        self.boss_defeated
            .get(&Self::boss_key(dungeon_id, floor))
            .copied()
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dungeon_ids_are_unique() {
        let mut ids: Vec<&str> = all_dungeons().iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), all_dungeons().len());
    }

    #[test]
    fn test_unlock_levels_increase() {
        for pair in all_dungeons().windows(2) {
            assert!(pair[0].min_level < pair[1].min_level);
            assert!(pair[0].difficulty < pair[1].difficulty);
        }
    }

    #[test]
    fn test_neutral_biomes_have_no_modifier() {
        assert_eq!(Biome::Forest.modifier(), BiomeModifier::default());
        assert_eq!(Biome::Cave.modifier(), BiomeModifier::default());
    }

    #[test]
    fn test_hell_modifier_values() {
        let m = Biome::Hell.modifier();
        assert_eq!(m.enemy_flat_bonus, 5);
        assert!((m.post_attack_burn_pct - 0.02).abs() < 1e-9);
        assert!((m.player_damage_mult - 0.95).abs() < 1e-9);
    }

    #[test]
    fn test_boss_key_format() {
        assert_eq!(DungeonState::boss_key("forest", 5), "forest_5");
        let mut state = DungeonState::default();
        assert!(!state.is_boss_defeated("forest", 5));
        state.boss_defeated.insert("forest_5".to_string(), true);
        assert!(state.is_boss_defeated("forest", 5));
    }
}
