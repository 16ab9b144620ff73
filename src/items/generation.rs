//! Random item selection from the catalog.

use rand::Rng;

use crate::character::ClassType;
use crate::constants::{CLASS_LOOT_PREFERENCE, LOOT_LEVEL_WINDOW};
use crate::items::catalog::catalog;
use crate::items::types::{Item, Rarity};

/// Picks a loot item of the given rarity suited to the character.
///
/// Candidates are catalog entries of that rarity within `LOOT_LEVEL_WINDOW`
/// levels of the character. If the window is empty it relaxes to anything
/// at or below the character's level, then to the whole rarity tier. With
/// probability `CLASS_LOOT_PREFERENCE` the pick is restricted to items for
/// the character's own class when any exist.
///
/// Returns `None` only if the catalog holds no item of the rarity at all.
pub fn generate_loot_item(
    level: u32,
    rarity: Rarity,
    class_type: ClassType,
    rng: &mut impl Rng,
) -> Option<Item> {
    let tier: Vec<&Item> = catalog()
        .items
        .iter()
        .filter(|i| i.rarity == rarity)
        .collect();
    if tier.is_empty() {
        return None;
    }

    let low = level.saturating_sub(LOOT_LEVEL_WINDOW);
    let high = level + LOOT_LEVEL_WINDOW;
    let mut candidates: Vec<&Item> = tier
        .iter()
        .copied()
        .filter(|i| i.level_req >= low && i.level_req <= high)
        .collect();
    if candidates.is_empty() {
        candidates = tier
            .iter()
            .copied()
            .filter(|i| i.level_req <= level)
            .collect();
    }
    if candidates.is_empty() {
        candidates = tier;
    }

    if rng.gen_bool(CLASS_LOOT_PREFERENCE) {
        let own_class: Vec<&Item> = candidates
            .iter()
            .copied()
            .filter(|i| i.class_req == Some(class_type))
            .collect();
        if !own_class.is_empty() {
            candidates = own_class;
        }
    }

    let pick = candidates[rng.gen_range(0..candidates.len())];
    Some(pick.instantiate())
}

/// Rolls a rarity on the unforced distribution used by the shop:
/// 40% Common, 30% Uncommon, 20% Rare, 8% Epic, 2% Legendary.
pub fn roll_stock_rarity(rng: &mut impl Rng) -> Rarity {
    match rng.gen_range(1..=100u32) {
        1..=40 => Rarity::Common,
        41..=70 => Rarity::Uncommon,
        71..=90 => Rarity::Rare,
        91..=98 => Rarity::Epic,
        _ => Rarity::Legendary,
    }
}

/// Picks a random catalog item near the character's level. The rarity is
/// rolled via [`roll_stock_rarity`] unless forced.
pub fn generate_random_item(
    level: u32,
    forced_rarity: Option<Rarity>,
    rng: &mut impl Rng,
) -> Option<Item> {
    let rarity = forced_rarity.unwrap_or_else(|| roll_stock_rarity(rng));
    let tier: Vec<&Item> = catalog()
        .items
        .iter()
        .filter(|i| i.rarity == rarity)
        .collect();
    if tier.is_empty() {
        return None;
    }

    let low = level.saturating_sub(LOOT_LEVEL_WINDOW);
    let high = level + LOOT_LEVEL_WINDOW;
    let mut candidates: Vec<&Item> = tier
        .iter()
        .copied()
        .filter(|i| i.level_req >= low && i.level_req <= high)
        .collect();
    if candidates.is_empty() {
        candidates = tier;
    }

    let pick = candidates[rng.gen_range(0..candidates.len())];
    Some(pick.instantiate())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_loot_respects_rarity() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            let item =
                generate_loot_item(10, Rarity::Rare, ClassType::Warrior, &mut rng).unwrap();
            assert_eq!(item.rarity, Rarity::Rare);
        }
    }

    #[test]
    fn test_loot_prefers_level_window() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            let item =
                generate_loot_item(10, Rarity::Common, ClassType::Scout, &mut rng).unwrap();
            assert!(item.level_req <= 15, "got level {}", item.level_req);
        }
    }

    #[test]
    fn test_low_level_window_relaxes_upward() {
        // No Legendary entry sits within 5 levels of a fresh character, so
        // the tier-wide fallback must kick in rather than returning None.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let item =
            generate_loot_item(1, Rarity::Legendary, ClassType::Mage, &mut rng).unwrap();
        assert_eq!(item.rarity, Rarity::Legendary);
    }

    #[test]
    fn test_class_preference_biases_weapon_picks() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut own = 0u32;
        let total = 400;
        for _ in 0..total {
            let item =
                generate_loot_item(10, Rarity::Common, ClassType::Mage, &mut rng).unwrap();
            if item.class_req == Some(ClassType::Mage) {
                own += 1;
            }
        }
        // With a 60% preference roll, class gear must dominate a uniform
        // draw over the tier.
        assert!(own > total / 2, "only {own}/{total} class picks");
    }

    #[test]
    fn test_stock_rarity_distribution_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut counts = [0u32; 5];
        for _ in 0..2000 {
            counts[roll_stock_rarity(&mut rng) as usize] += 1;
        }
        assert!(counts[0] > counts[2]);
        assert!(counts[1] > counts[3]);
        assert!(counts[4] < counts[3]);
    }

    #[test]
    fn test_forced_rarity_is_honored() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let item = generate_random_item(3, Some(Rarity::Epic), &mut rng).unwrap();
        assert_eq!(item.rarity, Rarity::Epic);
    }
}
