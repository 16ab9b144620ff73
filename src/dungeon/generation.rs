//! Mob generation: name pools, elite rolls and the floor scaling formulas.

use rand::Rng;
use uuid::Uuid;

use crate::constants::{
    BOSS_FLOOR_INTERVAL, ELITE_CHANCE, MAJOR_BOSS_FLOOR_INTERVAL, MAJOR_BOSS_HP_MULT,
    MOB_ATK_PER_FLOOR, MOB_BASE_ATK, MOB_BASE_HP, MOB_HP_PER_FLOOR,
};
use crate::dungeon::types::{Biome, DungeonInfo, Mob, SpecialAbility};
use crate::items::types::Rarity;

fn mob_names(biome: Biome) -> [&'static str; 3] {
    match biome {
        Biome::Forest => ["Forest Rat", "Bandit", "Wild Boar"],
        Biome::Cave => ["Stone Golem", "Troll", "Cave Bat"],
        Biome::Swamp => ["Drowner", "Giant Toad", "Sludge Crawler"],
        Biome::Desert => ["Scorpion", "Mummy", "Djinn"],
        Biome::Ice => ["Ice Wolf", "Yeti", "Frost Spirit"],
        Biome::Necropolis => ["Skeleton", "Lich", "Ghost"],
        Biome::Sky => ["Griffin", "Storm Elemental", "Harpy"],
        Biome::Hell => ["Imp", "Demon", "Hellhound"],
        Biome::Chaos => ["Chaos Mutant", "Unblinking Eye", "Flesh Amalgam"],
        Biome::Aether => ["Aether Warden", "Star Devourer", "Void Wisp"],
    }
}

fn boss(biome: Biome) -> (&'static str, SpecialAbility) {
    match biome {
        Biome::Forest => ("Ancient Treant", SpecialAbility::Regeneration),
        Biome::Cave => ("Stone Colossus", SpecialAbility::CriticalStrike),
        Biome::Swamp => ("Marsh Leviathan", SpecialAbility::Regeneration),
        Biome::Desert => ("Pharaoh of Sands", SpecialAbility::Vampirism),
        Biome::Ice => ("Frost Matriarch", SpecialAbility::CriticalStrike),
        Biome::Necropolis => ("Crypt Lord", SpecialAbility::Vampirism),
        Biome::Sky => ("Storm Roc", SpecialAbility::CriticalStrike),
        Biome::Hell => ("Infernal Overlord", SpecialAbility::Vampirism),
        Biome::Chaos => ("Herald of Chaos", SpecialAbility::CriticalStrike),
        Biome::Aether => ("Voidheart", SpecialAbility::Regeneration),
    }
}

pub fn is_boss_floor(floor: u32) -> bool {
    floor > 0 && floor % BOSS_FLOOR_INTERVAL == 0
}

pub fn is_major_boss_floor(floor: u32) -> bool {
    floor > 0 && floor % MAJOR_BOSS_FLOOR_INTERVAL == 0
}

/// Rarity of a regular (non-boss) mob: Common, with a one-in-five elite
/// roll that upgrades the spawn to Uncommon.
fn roll_mob_rarity(rng: &mut impl Rng) -> Rarity {
    if rng.gen_bool(ELITE_CHANCE) {
        Rarity::Uncommon
    } else {
        Rarity::Common
    }
}

/// Spawns the mob for a dungeon floor.
///
/// Every fifth floor spawns the biome boss, every tenth its major form
/// with doubled HP. HP and attack scale linearly with the floor, then by
/// the rarity multipliers and the dungeon's difficulty. The floor number
/// doubles as the mob's defense.
pub fn generate_mob(dungeon: &DungeonInfo, floor: u32, rng: &mut impl Rng) -> Mob {
    let major = is_major_boss_floor(floor);
    let boss_floor = is_boss_floor(floor);

    let (name, rarity, special_ability) = if boss_floor {
        let (boss_name, ability) = boss(dungeon.biome);
        let rarity = if major { Rarity::Legendary } else { Rarity::Rare };
        (boss_name.to_string(), rarity, Some(ability))
    } else {
        let pool = mob_names(dungeon.biome);
        let name = pool[rng.gen_range(0..pool.len())].to_string();
        (name, roll_mob_rarity(rng), None)
    };

    let cfg = rarity.mob_config();
    let major_mult = if major { MAJOR_BOSS_HP_MULT } else { 1.0 };
    let hp = ((MOB_BASE_HP + floor as f64 * MOB_HP_PER_FLOOR)
        * cfg.hp_mult
        * major_mult
        * dungeon.difficulty)
        .floor() as u32;
    let atk = ((MOB_BASE_ATK + floor as f64 * MOB_ATK_PER_FLOOR)
        * cfg.atk_mult
        * dungeon.difficulty)
        .floor() as u32;

    let level = (floor as i64 + rng.gen_range(-1i64..=1)).max(1) as u32;

    Mob {
        id: Uuid::new_v4().to_string(),
        name,
        level,
        hp,
        max_hp: hp,
        atk,
        def: floor,
        rarity,
        is_boss: boss_floor,
        is_major_boss: major,
        special_ability,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::types::dungeon_by_id;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_boss_floor_cadence() {
        assert!(!is_boss_floor(4));
        assert!(is_boss_floor(5));
        assert!(!is_major_boss_floor(5));
        assert!(is_major_boss_floor(10));
        assert!(is_boss_floor(10));
    }

    #[test]
    fn test_regular_mob_scaling() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let forest = dungeon_by_id("forest").unwrap();
        let mob = generate_mob(forest, 3, &mut rng);
        assert!(!mob.is_boss);
        assert_eq!(mob.def, 3);
        assert!(mob.level >= 1 && mob.level <= 4);
        if mob.rarity == Rarity::Common {
            // floor((30 + 3*10) * 1.0 * 1.0 * 1.0)
            assert_eq!(mob.hp, 60);
            // floor((3 + 3*1.5) * 1.0 * 1.0)
            assert_eq!(mob.atk, 7);
        }
    }

    #[test]
    fn test_major_boss_doubles_hp() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let forest = dungeon_by_id("forest").unwrap();
        let mob = generate_mob(forest, 10, &mut rng);
        assert!(mob.is_boss && mob.is_major_boss);
        assert_eq!(mob.rarity, Rarity::Legendary);
        assert_eq!(mob.name, "Ancient Treant");
        assert!(mob.special_ability.is_some());
        // floor((30 + 100) * 2.5 * 2.0 * 1.0)
        assert_eq!(mob.hp, 650);
    }

    #[test]
    fn test_floor_five_boss_is_rare() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let caves = dungeon_by_id("caves").unwrap();
        let mob = generate_mob(caves, 5, &mut rng);
        assert!(mob.is_boss && !mob.is_major_boss);
        assert_eq!(mob.rarity, Rarity::Rare);
        assert_eq!(mob.name, "Stone Colossus");
        assert_eq!(mob.special_ability, Some(SpecialAbility::CriticalStrike));
    }

    #[test]
    fn test_difficulty_scales_stats() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let aether = dungeon_by_id("aether").unwrap();
        let forest = dungeon_by_id("forest").unwrap();
        let high = generate_mob(aether, 10, &mut rng);
        let low = generate_mob(forest, 10, &mut rng);
        assert!(high.hp > low.hp);
        assert!(high.atk > low.atk);
    }

    #[test]
    fn test_mob_level_never_below_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let forest = dungeon_by_id("forest").unwrap();
        for _ in 0..30 {
            let mob = generate_mob(forest, 1, &mut rng);
            assert!(mob.level >= 1);
        }
    }
}
