use serde::{Deserialize, Serialize};

use crate::dungeon::types::SpecialAbility;

/// Whose move it is, or how the encounter ended. Persisted with the
/// dungeon state so a reload resumes mid-fight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CombatTurn {
    #[default]
    PlayerTurn,
    EnemyTurn,
    Win,
    Lose,
}

/// One line of the combat log. Resolvers return these alongside the new
/// state so callers can render the fight without re-deriving it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CombatEvent {
    PlayerAttack { damage: u32, crit: bool },
    PlayerMiss,
    TurnSkipped,
    BiomeBurn { amount: u32 },
    EnemyAttack { damage: u32, special: Option<SpecialAbility> },
    EnemyRegenerated { amount: u32 },
    EnemyDrained { amount: u32 },
    PotionUsed { healed: u32 },
    MobDefeated { gold: u64, xp: u64, levels_gained: u32 },
    LootDropped { item_name: String },
    PlayerDefeated,
}
