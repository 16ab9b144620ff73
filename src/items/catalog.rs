//! Static item, material and recipe catalog.
//!
//! Built once on first access and read-only afterwards. Catalog entries are
//! templates; copies entering a container get a fresh id via
//! [`Item::instantiate`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::character::{ClassType, Stats};
use crate::items::types::{Item, ItemType, MaterialCost, MaterialType, Rarity, Recipe};

pub struct Catalog {
    /// General pool: equipment and consumables eligible for loot and shop rolls.
    pub items: Vec<Item>,
    /// Event quest rewards; never rolled as loot.
    pub event_items: Vec<Item>,
    /// Crafting materials keyed by the drop keys mob templates reference.
    pub materials: BTreeMap<&'static str, Item>,
    pub recipes: Vec<Recipe>,
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();

pub fn catalog() -> &'static Catalog {
    CATALOG.get_or_init(|| Catalog {
        items: build_items(),
        event_items: build_event_items(),
        materials: build_materials(),
        recipes: build_recipes(),
    })
}

/// Looks up a general-pool or event item template by its catalog id.
pub fn item_by_base_id(base_id: &str) -> Option<&'static Item> {
    let cat = catalog();
    cat.items
        .iter()
        .chain(cat.event_items.iter())
        .find(|i| i.id == base_id)
}

/// The starter consumable every new character carries.
pub fn health_potion() -> &'static Item {
    item_by_base_id("pot_hp_s").expect("catalog always contains the minor potion")
}

pub fn material(key: &str) -> Option<&'static Item> {
    catalog().materials.get(key)
}

pub fn recipe_by_id(id: &str) -> Option<&'static Recipe> {
    catalog().recipes.iter().find(|r| r.id == id)
}

#[allow(clippy::too_many_arguments)]
fn entry(
    base_id: &str,
    name: &str,
    item_type: ItemType,
    rarity: Rarity,
    level: u32,
    stats: Stats,
    effect: &str,
    class_req: Option<ClassType>,
    heal: Option<u32>,
) -> Item {
    // Price formula: level * 10 * rarity multiplier.
    let price = level as u64 * 10 * rarity.price_multiplier();
    Item {
        id: base_id.to_string(),
        name: name.to_string(),
        item_type,
        rarity,
        price,
        level_req: level,
        class_req,
        stats,
        effect: if effect.is_empty() {
            None
        } else {
            Some(effect.to_string())
        },
        heal_amount: heal,
        material_type: None,
        stackable: item_type.is_stackable(),
        amount: 1,
    }
}

fn build_items() -> Vec<Item> {
    use ClassType::*;
    use ItemType::*;
    use Rarity::*;

    let s = Stats::new;
    vec![
        // Warrior weapons
        entry("w_war_1", "Rusty Sword", Weapon, Common, 1, s(5, 0, 0, 0), "", Some(Warrior), None),
        entry("w_war_2", "Warden's Blade", Weapon, Uncommon, 5, s(10, 0, 0, 0), "+5% crit", Some(Warrior), None),
        entry("w_war_3", "Axe of Wrath", Weapon, Rare, 10, s(18, 0, 0, 0), "Crits deal +15 damage", Some(Warrior), None),
        entry("w_war_4", "Sword of the Unbowed", Weapon, Epic, 15, s(25, 0, 0, 0), "+10% attack speed on kill", Some(Warrior), None),
        entry("w_war_5", "Legionnaire's Glaive", Weapon, Legendary, 20, s(35, 0, 0, 0), "Executes foes below 20% HP", Some(Warrior), None),
        // Mage weapons
        entry("w_mag_1", "Novice Staff", Weapon, Common, 1, s(0, 0, 3, 0), "", Some(Mage), None),
        entry("w_mag_2", "Rod of Flame", Weapon, Uncommon, 5, s(0, 0, 8, 0), "+5% fire damage", Some(Mage), None),
        entry("w_mag_3", "Orb of Chaos", Weapon, Rare, 10, s(0, 0, 15, 0), "10% chance to ignite", Some(Mage), None),
        entry("w_mag_4", "Staff of Eternal Winter", Weapon, Epic, 15, s(0, 0, 22, 0), "Freeze once per battle", Some(Mage), None),
        entry("w_mag_5", "Archmage's Key", Weapon, Legendary, 20, s(0, 0, 30, 0), "+50% damage", Some(Mage), None),
        // Scout weapons
        entry("w_sct_1", "Thief's Dagger", Weapon, Common, 1, s(0, 4, 0, 0), "", Some(Scout), None),
        entry("w_sct_2", "Shadow Blades", Weapon, Uncommon, 5, s(0, 7, 0, 0), "+8% crit", Some(Scout), None),
        entry("w_sct_3", "Poisoned Needles", Weapon, Rare, 10, s(0, 12, 0, 0), "15% chance to poison", Some(Scout), None),
        entry("w_sct_4", "Phantom Blade", Weapon, Epic, 15, s(0, 18, 0, 0), "First strike always crits", Some(Scout), None),
        entry("w_sct_5", "Blades of Fate", Weapon, Legendary, 20, s(0, 25, 0, 0), "50% dodge below 30% HP", Some(Scout), None),
        // Healer weapons
        entry("w_hlr_1", "Apprentice Staff", Weapon, Common, 1, s(0, 0, 3, 0), "", Some(Healer), None),
        entry("w_hlr_2", "Rod of Mercy", Weapon, Uncommon, 5, s(0, 0, 6, 0), "+5% healing", Some(Healer), None),
        entry("w_hlr_3", "Scepter of Restoration", Weapon, Rare, 10, s(0, 0, 10, 0), "+5 HP regen per turn", Some(Healer), None),
        entry("w_hlr_4", "Staff of Light", Weapon, Epic, 15, s(0, 0, 16, 0), "Healing removes a debuff", Some(Healer), None),
        entry("w_hlr_5", "Healer's Heart", Weapon, Legendary, 20, s(0, 0, 22, 0), "+20% party HP", Some(Healer), None),
        // Head armor
        entry("a_head_1", "Leather Hood", Head, Common, 1, s(0, 2, 0, 0), "", None, None),
        entry("a_head_2", "Warden Helm", Head, Uncommon, 5, s(0, 0, 0, 5), "", None, None),
        entry("a_head_3", "Sage's Mask", Head, Rare, 10, s(0, 0, 7, 0), "+3% mana", None, None),
        entry("a_head_4", "Warlord's Crown", Head, Epic, 15, s(5, 0, 0, 5), "+10% defense below 50% HP", None, None),
        entry("a_head_5", "Crown of Eternity", Head, Legendary, 20, s(5, 5, 5, 5), "All stats +5", None, None),
        // Body armor
        entry("a_body_1", "Tattered Shirt", Body, Common, 1, s(0, 0, 0, 1), "", None, None),
        entry("a_body_2", "Leather Armor", Body, Uncommon, 5, s(0, 0, 0, 4), "", None, None),
        entry("a_body_3", "Mantle of Elements", Body, Rare, 10, s(0, 0, 3, 6), "+10% resistance", None, None),
        entry("a_body_4", "Titan's Plate", Body, Epic, 15, s(0, 0, 0, 15), "Blocks one attack", None, None),
        entry("a_body_5", "Cloak of Reality", Body, Legendary, 20, s(0, 10, 0, 10), "Revive at 1 HP once per day", None, None),
        // Rings
        entry("acc_ring_1", "Copper Ring", Ring, Common, 1, s(0, 0, 0, 1), "", None, None),
        entry("acc_ring_2", "Ring of Luck", Ring, Uncommon, 5, s(0, 0, 0, 0), "+5% drop chance", None, None),
        entry("acc_ring_3", "Ring of Time", Ring, Rare, 10, s(0, 3, 0, 0), "Shop restocks slower", None, None),
        entry("acc_ring_4", "Hero's Seal", Ring, Epic, 15, s(5, 0, 0, 0), "+10% quest XP", None, None),
        entry("acc_ring_5", "Ring of Fate", Ring, Legendary, 20, s(0, 0, 5, 0), "Guaranteed rare per quest", None, None),
        // Amulets
        entry("acc_amu_1", "Stone Amulet", Amulet, Common, 1, s(0, 0, 0, 2), "", None, None),
        entry("acc_amu_2", "Beast Amulet", Amulet, Uncommon, 5, s(3, 3, 0, 0), "", None, None),
        entry("acc_amu_3", "Amulet of Knowledge", Amulet, Rare, 10, s(0, 0, 5, 0), "+2% skills", None, None),
        entry("acc_amu_4", "Amulet of Balance", Amulet, Epic, 15, s(3, 3, 3, 3), "Balance", None, None),
        entry("acc_amu_5", "Heart of the World", Amulet, Legendary, 20, s(0, 0, 0, 20), "Regen out of combat", None, None),
        // Consumables
        entry("pot_hp_s", "Minor Potion", Potion, Common, 1, Stats::default(), "Restores 20 HP", None, Some(20)),
        entry("pot_sta", "Stamina Draught", Potion, Uncommon, 5, Stats::default(), "+10 VIT for 5 turns", None, None),
        entry("pot_mana", "Elixir of Clarity", Potion, Rare, 10, Stats::default(), "Restores mana", None, None),
        entry("pot_hero", "Hero's Potion", Potion, Epic, 15, Stats::default(), "+10 all stats for 3 turns", None, None),
        entry("pot_full", "Phoenix Tear", Potion, Legendary, 20, Stats::default(), "Full heal", None, Some(9999)),
        // Scrolls
        entry("scr_esc", "Scroll of Escape", Scroll, Common, 1, Stats::default(), "Flee without penalty", None, None),
    ]
}

fn build_event_items() -> Vec<Item> {
    let mut items = vec![
        entry(
            "evt_santa",
            "Winter Cap",
            ItemType::Head,
            Rarity::Epic,
            1,
            Stats::default(),
            "+10% XP in winter",
            None,
            None,
        ),
        entry(
            "evt_nature",
            "Ring of Nature",
            ItemType::Ring,
            Rarity::Epic,
            1,
            Stats::default(),
            "+15% resistance",
            None,
            None,
        ),
        entry(
            "evt_ghost",
            "Ghost Mask",
            ItemType::Head,
            Rarity::Epic,
            1,
            Stats::default(),
            "+20% damage in the Necropolis",
            None,
            None,
        ),
    ];
    // Event rewards are not for sale.
    for item in &mut items {
        item.price = 0;
    }
    items
}

fn mat(
    base_id: &str,
    name: &str,
    rarity: Rarity,
    price: u64,
    level: u32,
    material_type: MaterialType,
) -> Item {
    Item {
        id: base_id.to_string(),
        name: name.to_string(),
        item_type: ItemType::Material,
        rarity,
        price,
        level_req: level,
        class_req: None,
        stats: Stats::default(),
        effect: None,
        heal_amount: None,
        material_type: Some(material_type),
        stackable: true,
        amount: 1,
    }
}

fn build_materials() -> BTreeMap<&'static str, Item> {
    use MaterialType::*;
    use Rarity::*;
    BTreeMap::from([
        ("HIDE", mat("m_hide", "Hide", Common, 5, 1, Bio)),
        ("VENOM", mat("m_venom", "Venom", Uncommon, 15, 3, Bio)),
        ("FEATHER", mat("m_feather", "Feather", Common, 5, 1, Bio)),
        ("ROOT", mat("m_root", "Root", Common, 5, 1, Bio)),
        ("ORE", mat("m_ore", "Ore", Common, 8, 2, Mineral)),
        ("CRYSTAL", mat("m_crystal", "Crystal", Rare, 50, 5, Mineral)),
        ("SHARD", mat("m_shard", "Shard", Uncommon, 20, 3, Mineral)),
        ("ESSENCE", mat("m_essence", "Essence", Rare, 60, 8, Magic)),
        ("DUST", mat("m_dust", "Astral Dust", Epic, 150, 12, Magic)),
        ("SOUL", mat("m_soul", "Soul", Epic, 200, 15, Magic)),
        ("CORE", mat("m_core", "Core Fragment", Legendary, 1000, 20, Artifact)),
    ])
}

fn cost(name: &str, count: u32) -> MaterialCost {
    MaterialCost {
        name: name.to_string(),
        count,
    }
}

fn build_recipes() -> Vec<Recipe> {
    use ItemType::*;
    use Rarity::*;
    vec![
        Recipe {
            id: "r_regen_pot".to_string(),
            result_item: entry(
                "regen_pot",
                "Regeneration Potion",
                Potion,
                Uncommon,
                3,
                Stats::default(),
                "Regen +5 HP per turn",
                None,
                Some(30),
            ),
            materials: vec![cost("Hide", 3), cost("Root", 1)],
            gold_cost: 50,
        },
        Recipe {
            id: "r_dagger_shadow".to_string(),
            result_item: entry(
                "dag_shadow",
                "Shadow Dagger",
                Weapon,
                Rare,
                5,
                Stats::new(0, 8, 0, 0),
                "10% chance to poison",
                None,
                None,
            ),
            materials: vec![cost("Venom", 2), cost("Ore", 4)],
            gold_cost: 200,
        },
        Recipe {
            id: "r_amulet_ele".to_string(),
            result_item: entry(
                "amu_ele",
                "Amulet of Elements",
                Amulet,
                Rare,
                8,
                Stats::default(),
                "+10% resistance",
                None,
                None,
            ),
            materials: vec![cost("Crystal", 1), cost("Essence", 1)],
            gold_cost: 300,
        },
        Recipe {
            id: "r_armor_legion".to_string(),
            result_item: entry(
                "arm_legion",
                "Legion Armor",
                Body,
                Epic,
                15,
                Stats::new(0, 0, 0, 15),
                "Blocks one attack",
                None,
                None,
            ),
            materials: vec![cost("Ore", 5), cost("Soul", 2)],
            gold_cost: 1000,
        },
        Recipe {
            id: "r_tear_phoenix".to_string(),
            result_item: entry(
                "tear_phoenix",
                "Phoenix Tear",
                Potion,
                Legendary,
                20,
                Stats::default(),
                "Full heal",
                None,
                Some(9999),
            ),
            materials: vec![cost("Essence", 3), cost("Core", 1)],
            gold_cost: 2000,
        },
    ]
}
