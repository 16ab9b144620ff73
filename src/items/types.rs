use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::character::{ClassType, Stats};

/// Slot an equippable item occupies on the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Head,
    Body,
    Hands,
    Legs,
    Ring,
    Amulet,
    Belt,
}

impl EquipmentSlot {
    pub fn all() -> [EquipmentSlot; 8] {
        [
            EquipmentSlot::Weapon,
            EquipmentSlot::Head,
            EquipmentSlot::Body,
            EquipmentSlot::Hands,
            EquipmentSlot::Legs,
            EquipmentSlot::Ring,
            EquipmentSlot::Amulet,
            EquipmentSlot::Belt,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Weapon,
    Head,
    Body,
    Hands,
    Legs,
    Ring,
    Amulet,
    Belt,
    Potion,
    Scroll,
    Food,
    Material,
}

impl ItemType {
    /// Equipment slot for this item type. Consumables and materials do not
    /// map to a slot; the match is exhaustive so a new type cannot be added
    /// without deciding where it goes.
    pub fn equipment_slot(self) -> Option<EquipmentSlot> {
        match self {
            ItemType::Weapon => Some(EquipmentSlot::Weapon),
            ItemType::Head => Some(EquipmentSlot::Head),
            ItemType::Body => Some(EquipmentSlot::Body),
            ItemType::Hands => Some(EquipmentSlot::Hands),
            ItemType::Legs => Some(EquipmentSlot::Legs),
            ItemType::Ring => Some(EquipmentSlot::Ring),
            ItemType::Amulet => Some(EquipmentSlot::Amulet),
            ItemType::Belt => Some(EquipmentSlot::Belt),
            ItemType::Potion | ItemType::Scroll | ItemType::Food | ItemType::Material => None,
        }
    }

    /// Multiple units of consumables and materials share one inventory slot.
    pub fn is_stackable(self) -> bool {
        matches!(
            self,
            ItemType::Potion | ItemType::Scroll | ItemType::Food | ItemType::Material
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common = 0,
    Uncommon = 1,
    Rare = 2,
    Epic = 3,
    Legendary = 4,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Catalog price multiplier: price = level_req * 10 * multiplier.
    pub fn price_multiplier(&self) -> u64 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 3,
            Rarity::Rare => 10,
            Rarity::Epic => 30,
            Rarity::Legendary => 100,
        }
    }

    /// Base item drop chance for a defeated mob of this rarity.
    pub fn base_drop_chance(&self) -> f64 {
        match self {
            Rarity::Common => 0.05,
            Rarity::Uncommon => 0.20,
            Rarity::Rare => 0.50,
            Rarity::Epic => 0.80,
            Rarity::Legendary => 1.0,
        }
    }
}

/// Combat multipliers keyed by mob rarity.
#[derive(Debug, Clone, Copy)]
pub struct RarityConfig {
    pub xp_mult: f64,
    pub hp_mult: f64,
    pub atk_mult: f64,
}

impl Rarity {
    pub fn mob_config(&self) -> RarityConfig {
        match self {
            Rarity::Common => RarityConfig {
                xp_mult: 1.0,
                hp_mult: 1.0,
                atk_mult: 1.0,
            },
            Rarity::Uncommon => RarityConfig {
                xp_mult: 1.3,
                hp_mult: 1.2,
                atk_mult: 1.1,
            },
            Rarity::Rare => RarityConfig {
                xp_mult: 1.6,
                hp_mult: 1.5,
                atk_mult: 1.25,
            },
            Rarity::Epic => RarityConfig {
                xp_mult: 2.0,
                hp_mult: 1.8,
                atk_mult: 1.4,
            },
            Rarity::Legendary => RarityConfig {
                xp_mult: 3.0,
                hp_mult: 2.5,
                atk_mult: 1.6,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaterialType {
    Bio,
    Mineral,
    Magic,
    Artifact,
}

fn default_amount() -> u32 {
    1
}

/// An item instance. Catalog entries are templates; [`Item::instantiate`]
/// stamps a fresh per-copy id before an item enters a container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub rarity: Rarity,
    pub price: u64,
    pub level_req: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_req: Option<ClassType>,
    #[serde(default)]
    pub stats: Stats,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heal_amount: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<MaterialType>,
    #[serde(default)]
    pub stackable: bool,
    #[serde(default = "default_amount")]
    pub amount: u32,
}

impl Item {
    /// Copy of this template with a unique id and a single-unit stack.
    pub fn instantiate(&self) -> Item {
        Item {
            id: Uuid::new_v4().to_string(),
            amount: 1,
            ..self.clone()
        }
    }

    /// True when this item would merge into an existing stack of `other`.
    pub fn stacks_with(&self, other: &Item) -> bool {
        self.stackable && other.stackable && self.name == other.name && self.item_type == other.item_type
    }
}

/// Crafting recipe: materials are consumed by name, stack-aware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub result_item: Item,
    pub materials: Vec<MaterialCost>,
    pub gold_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialCost {
    pub name: String,
    pub count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(Rarity::Common < Rarity::Uncommon);
        assert!(Rarity::Uncommon < Rarity::Rare);
        assert!(Rarity::Rare < Rarity::Epic);
        assert!(Rarity::Epic < Rarity::Legendary);
    }

    #[test]
    fn test_every_equippable_type_has_a_slot() {
        for ty in [
            ItemType::Weapon,
            ItemType::Head,
            ItemType::Body,
            ItemType::Hands,
            ItemType::Legs,
            ItemType::Ring,
            ItemType::Amulet,
            ItemType::Belt,
        ] {
            assert!(ty.equipment_slot().is_some(), "{ty:?} must map to a slot");
        }
        assert!(ItemType::Potion.equipment_slot().is_none());
        assert!(ItemType::Material.equipment_slot().is_none());
    }

    #[test]
    fn test_consumables_stack() {
        assert!(ItemType::Potion.is_stackable());
        assert!(ItemType::Material.is_stackable());
        assert!(!ItemType::Weapon.is_stackable());
        assert!(!ItemType::Ring.is_stackable());
    }

    #[test]
    fn test_instantiate_gets_fresh_id() {
        let template = Item {
            id: "pot_hp_s".to_string(),
            name: "Minor Potion".to_string(),
            item_type: ItemType::Potion,
            rarity: Rarity::Common,
            price: 10,
            level_req: 1,
            class_req: None,
            stats: Stats::default(),
            effect: None,
            heal_amount: Some(20),
            material_type: None,
            stackable: true,
            amount: 1,
        };
        let a = template.instantiate();
        let b = template.instantiate();
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, template.name);
        assert!(a.stacks_with(&b));
    }

    #[test]
    fn test_base_drop_chance_increases_with_rarity() {
        let chances: Vec<f64> = [
            Rarity::Common,
            Rarity::Uncommon,
            Rarity::Rare,
            Rarity::Epic,
            Rarity::Legendary,
        ]
        .iter()
        .map(|r| r.base_drop_chance())
        .collect();
        for pair in chances.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!((Rarity::Legendary.base_drop_chance() - 1.0).abs() < f64::EPSILON);
    }
}
