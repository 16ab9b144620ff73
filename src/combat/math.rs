//! Damage math shared by the encounter resolvers.

use rand::Rng;

use crate::character::{Character, StatKind};
use crate::constants::{
    BASE_CRIT_CHANCE, CRIT_DEX_DIVISOR, CRIT_MULTIPLIER, DAMAGE_VARIANCE_MAX,
    DAMAGE_VARIANCE_MIN, MIN_WEAPON_DAMAGE, PRIMARY_STAT_DAMAGE_FACTOR, VIT_MITIGATION_FACTOR,
};

/// A raw hit before the target's mitigation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub damage: f64,
    pub crit: bool,
}

pub fn variance(rng: &mut impl Rng) -> f64 {
    rng.gen_range(DAMAGE_VARIANCE_MIN..=DAMAGE_VARIANCE_MAX)
}

/// Crit chance in percent, driven by effective dexterity.
pub fn crit_chance(dex: u32) -> f64 {
    BASE_CRIT_CHANCE + dex as f64 / CRIT_DEX_DIVISOR
}

/// Rolls the player's raw hit: weapon damage (with an unarmed floor)
/// scaled by the class primary stat, variance, and a possible crit.
pub fn roll_player_hit(character: &Character, rng: &mut impl Rng) -> Hit {
    let weapon = (character.equipment.weapon_damage() as f64).max(MIN_WEAPON_DAMAGE);
    let primary = character.primary_stat_value() as f64;
    let base = weapon * (1.0 + primary * PRIMARY_STAT_DAMAGE_FACTOR);

    let dex = character.effective_stat(StatKind::Dex);
    let crit = rng.gen_range(0.0..100.0) < crit_chance(dex);
    let mut damage = base * variance(rng);
    if crit {
        damage *= CRIT_MULTIPLIER;
    }
    Hit { damage, crit }
}

/// Applies flat-defense mitigation: `raw * 100 / (100 + def)`, floored,
/// never below one point.
pub fn mitigate(raw: f64, def: u32) -> u32 {
    ((raw * 100.0 / (100.0 + def as f64)).floor() as u32).max(1)
}

/// Defense a character opposes enemy hits with, derived from vitality.
pub fn player_defense(character: &Character) -> u32 {
    character.effective_stat(StatKind::Vit) * VIT_MITIGATION_FACTOR as u32
}
