//! Post-combat drop resolution: materials and equipment loot.

use rand::Rng;

use crate::character::ClassType;
use crate::constants::{LOOT_RARITY_THRESHOLDS, LUCK_DEX_DIVISOR, MATERIAL_DROP_CHANCE};
use crate::dungeon::types::Biome;
use crate::items::catalog::material;
use crate::items::generation::generate_loot_item;
use crate::items::types::{Item, Rarity};

/// Materials dropped in each biome, keyed into the catalog.
fn biome_materials(biome: Biome) -> [&'static str; 2] {
    match biome {
        Biome::Forest => ["HIDE", "ROOT"],
        Biome::Cave => ["ORE", "CRYSTAL"],
        Biome::Swamp => ["VENOM", "ROOT"],
        Biome::Desert => ["DUST", "ORE"],
        Biome::Ice => ["CRYSTAL", "ESSENCE"],
        Biome::Necropolis => ["SOUL", "DUST"],
        Biome::Sky => ["FEATHER", "ESSENCE"],
        Biome::Hell => ["SHARD", "CORE"],
        Biome::Chaos => ["SHARD", "SOUL"],
        Biome::Aether => ["CORE", "ESSENCE"],
    }
}

/// Rarity of a dropped piece of equipment. Rolled independently of the
/// slain mob's rarity on fixed percentile bands.
pub fn roll_loot_rarity(rng: &mut impl Rng) -> Rarity {
    let roll = rng.gen_range(1..=100u32) as f64;
    let [c, u, r, e] = LOOT_RARITY_THRESHOLDS;
    if roll <= c {
        Rarity::Common
    } else if roll <= u {
        Rarity::Uncommon
    } else if roll <= r {
        Rarity::Rare
    } else if roll <= e {
        Rarity::Epic
    } else {
        Rarity::Legendary
    }
}

/// Chance that a defeated mob drops equipment: the mob rarity's base
/// chance plus a dexterity luck bonus, capped at certainty.
pub fn equipment_drop_chance(mob_rarity: Rarity, dex: u32) -> f64 {
    (mob_rarity.base_drop_chance() + dex as f64 / LUCK_DEX_DIVISOR).min(1.0)
}

/// Rolls the full drop table for a defeated mob.
///
/// When the kill happened inside a dungeon, one biome material drops with
/// flat 50% odds. Equipment drops on [`equipment_drop_chance`]; its rarity
/// comes from [`roll_loot_rarity`] and the item itself from the loot
/// generator, biased towards the victor's class and level.
pub fn generate_loot_for_source(
    level: u32,
    mob_rarity: Rarity,
    biome: Option<Biome>,
    dex: u32,
    class_type: ClassType,
    rng: &mut impl Rng,
) -> Vec<Item> {
    let mut drops = Vec::new();

    if let Some(biome) = biome {
        if rng.gen_bool(MATERIAL_DROP_CHANCE) {
            let pool = biome_materials(biome);
            let key = pool[rng.gen_range(0..pool.len())];
            if let Some(mat) = material(key) {
                drops.push(mat.instantiate());
            }
        }
    }

    let chance = equipment_drop_chance(mob_rarity, dex);
    if rng.gen_bool(chance) {
        let rarity = roll_loot_rarity(rng);
        if let Some(item) = generate_loot_item(level, rarity, class_type, rng) {
            drops.push(item);
        }
    }

    drops
}
