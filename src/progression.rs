//! Pure progression formulas: the XP curve, level-ups and reward scaling.

use crate::character::Character;
use crate::constants::*;

/// Experience required to advance from `level` to `level + 1`:
/// `floor(150·level + 50·level^1.3)`. Levels below 1 are clamped.
pub fn xp_to_level(level: u32) -> u64 {
    let l = level.max(1) as f64;
    (XP_LINEAR_FACTOR * l + XP_POWER_FACTOR * l.powf(XP_POWER_EXPONENT)).floor() as u64
}

/// Stat points granted on reaching `level`.
pub fn stat_points_for_level(level: u32) -> u32 {
    5 + level / 3
}

/// Exponential reward scaling applied to quest gold and XP.
pub fn quest_scaling(level: u32) -> f64 {
    QUEST_GOLD_SCALING.powi(level as i32)
}

/// Gold rewards are modulated by the honesty meter: 0.8 at zero honesty,
/// 1.0 at full.
pub fn honesty_multiplier(honesty: u32) -> f64 {
    0.8 + honesty.min(MAX_HONESTY) as f64 / 500.0
}

pub fn sell_price(price: u64) -> u64 {
    (price as f64 * SELL_PRICE_RATIO).floor() as u64
}

/// Grants experience and resolves level-ups. Loops so one oversized reward
/// can grant several levels at once; each level adds max HP, fully heals,
/// and accrues stat points.
///
/// Returns the number of levels gained.
pub fn grant_experience(character: &mut Character, xp: u64) -> u32 {
    character.current_exp += xp;
    let mut gained = 0;
    while character.current_exp >= xp_to_level(character.level) {
        character.current_exp -= xp_to_level(character.level);
        character.level += 1;
        character.max_hp += MAX_HP_PER_LEVEL;
        character.hp = character.max_hp;
        character.stat_points += stat_points_for_level(character.level);
        gained += 1;
    }
    gained
}
