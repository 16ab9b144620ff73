//! Balance constants for progression, combat, loot and the quest economy.

// Progression
pub const XP_LINEAR_FACTOR: f64 = 150.0;
pub const XP_POWER_FACTOR: f64 = 50.0;
pub const XP_POWER_EXPONENT: f64 = 1.3;
pub const MAX_HP_PER_LEVEL: u32 = 10;
pub const QUEST_GOLD_SCALING: f64 = 1.15;
pub const SELL_PRICE_RATIO: f64 = 0.3;

// Character creation
pub const CREATION_BONUS_POINTS: u32 = 10;
pub const STARTING_GOLD: u64 = 100;
pub const STARTING_POTIONS: u32 = 3;
pub const STARTING_INVENTORY_SLOTS: usize = 20;
pub const BASE_MAX_HP: u32 = 50;
pub const MAX_HP_PER_VIT: u32 = 5;

// Combat
pub const MIN_WEAPON_DAMAGE: f64 = 5.0;
pub const PRIMARY_STAT_DAMAGE_FACTOR: f64 = 0.05;
pub const DAMAGE_VARIANCE_MIN: f64 = 0.9;
pub const DAMAGE_VARIANCE_MAX: f64 = 1.1;
pub const BASE_CRIT_CHANCE: f64 = 5.0;
pub const CRIT_DEX_DIVISOR: f64 = 3.0;
pub const CRIT_MULTIPLIER: f64 = 2.0;
pub const VIT_MITIGATION_FACTOR: f64 = 2.0;
pub const SPECIAL_ABILITY_CHANCE: f64 = 0.3;
pub const REGEN_PCT_OF_MAX_HP: f64 = 0.10;
pub const VAMPIRISM_RATIO: f64 = 0.5;
pub const HELL_BURN_PCT: f64 = 0.02;
pub const VICTORY_HEAL_PCT: f64 = 0.10;
pub const MOOD_BUFF_MAGNITUDE: f64 = 0.2;

// Potions
pub const POTION_FLAT_HEAL: u32 = 60;
pub const POTION_PCT_HEAL: f64 = 0.15;

// Auto-combat
pub const AUTO_POTION_HP_THRESHOLD: f64 = 0.4;

// Defeat and revival
pub const REVIVE_GOLD_PENALTY_CAP: u64 = 500;
pub const REVIVE_GOLD_PENALTY_PCT: f64 = 0.2;
pub const REVIVE_HP_PCT: f64 = 0.5;
pub const REVIVE_FLOOR_REGRESSION: u32 = 5;

// Dungeon structure
pub const BOSS_FLOOR_INTERVAL: u32 = 5;
pub const MAJOR_BOSS_FLOOR_INTERVAL: u32 = 10;
pub const ELITE_CHANCE: f64 = 0.2;
pub const MOB_BASE_HP: f64 = 30.0;
pub const MOB_HP_PER_FLOOR: f64 = 10.0;
pub const MOB_BASE_ATK: f64 = 3.0;
pub const MOB_ATK_PER_FLOOR: f64 = 1.5;
pub const MAJOR_BOSS_HP_MULT: f64 = 2.0;

// Loot
pub const MATERIAL_DROP_CHANCE: f64 = 0.5;
pub const LUCK_DEX_DIVISOR: f64 = 50.0;
/// Percentile bounds for the loot rarity roll: below each bound in order
/// means Common / Uncommon / Rare / Epic, above the last means Legendary.
pub const LOOT_RARITY_THRESHOLDS: [f64; 4] = [30.0, 60.0, 85.0, 95.0];
pub const LOOT_LEVEL_WINDOW: u32 = 5;
pub const CLASS_LOOT_PREFERENCE: f64 = 0.6;

// Victory rewards
pub const MOB_GOLD_PER_LEVEL: f64 = 15.0;
pub const MOB_XP_PER_LEVEL: f64 = 20.0;

// Quests
pub const DAILY_QUEST_COUNT: usize = 10;
pub const WEEKLY_QUEST_COUNT: usize = 5;
pub const DAILY_BASE_GOLD: u64 = 50;
pub const DAILY_BASE_EXP: u64 = 20;
pub const WEEKLY_BASE_GOLD: u64 = 200;
pub const WEEKLY_BASE_EXP: u64 = 100;
pub const EVENT_BASE_GOLD: u64 = 1000;
pub const EVENT_BASE_EXP: u64 = 500;
pub const ONETIME_GOLD_PER_DIFFICULTY: u64 = 100;
pub const ONETIME_EXP_PER_DIFFICULTY: u64 = 50;
pub const REPUTATION_BASE_GAIN: f64 = 5.0;
pub const REPUTATION_BASE_GAIN_DISCIPLINE: f64 = 3.0;
pub const COMPLETION_HONESTY_BONUS: u32 = 1;
pub const MISSED_DAILIES_STREAK_RESET: usize = 5;
pub const STREAK_HONESTY_INTERVAL: u32 = 7;
pub const STREAK_HONESTY_BONUS: u32 = 10;
pub const MAX_HONESTY: u32 = 100;
pub const ONETIME_ACTIVE_CAP: usize = 5;
pub const ONETIME_REFRESH_BATCH: usize = 3;
pub const ONETIME_REFRESH_COOLDOWN_MS: i64 = 2 * 60 * 60 * 1000;

// Shop
pub const SHOP_RESTOCK_INTERVAL_MS: i64 = 10 * 60 * 1000;
pub const SHOP_RANDOM_STOCK: usize = 5;
pub const SHOP_FORCED_RARE_CHANCE: f64 = 0.2;
pub const SHOP_DISCOUNT_BASE_CHANCE: f64 = 15.0;
pub const SHOP_DISCOUNT_MIN: u32 = 10;
pub const SHOP_DISCOUNT_VARIANCE: u32 = 20;
pub const SHOP_DISCOUNT_CAP: u32 = 50;
pub const CHARISMA_REP_DIVISOR: u64 = 200;
pub const INVENTORY_SLOT_PACK: usize = 5;
pub const INVENTORY_SLOT_PRICE: u64 = 1000;

// Persistence
pub const JOURNAL_TRUNCATE_LEN: usize = 50;
pub const BACKUP_INTERVAL_MS: i64 = 5 * 60 * 1000;
pub const SAVE_DEBOUNCE_MS: i64 = 1000;
