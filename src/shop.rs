//! The wandering merchant: rotating stock, discounts and trade.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{
    CHARISMA_REP_DIVISOR, INVENTORY_SLOT_PACK, INVENTORY_SLOT_PRICE, SHOP_DISCOUNT_BASE_CHANCE,
    SHOP_DISCOUNT_CAP, SHOP_DISCOUNT_MIN, SHOP_DISCOUNT_VARIANCE, SHOP_FORCED_RARE_CHANCE,
    SHOP_RANDOM_STOCK, SHOP_RESTOCK_INTERVAL_MS,
};
use crate::error::GameError;
use crate::game_state::GameState;
use crate::inventory;
use crate::items::catalog::health_potion;
use crate::items::generation::generate_random_item;
use crate::items::types::{Item, Rarity};
use crate::progression::sell_price;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopState {
    #[serde(default)]
    pub items: Vec<Item>,
    /// Percent off, keyed by stocked item id.
    #[serde(default)]
    pub discounts: BTreeMap<String, u32>,
    #[serde(default)]
    pub last_update: i64,
    #[serde(default)]
    pub visit_streak: u32,
}

impl ShopState {
    pub fn price_of(&self, item: &Item) -> u64 {
        let discount = self.discounts.get(&item.id).copied().unwrap_or(0) as u64;
        item.price - item.price * discount / 100
    }
}

/// Rebuilds the stock if the restock interval has elapsed. A potion, one
/// common and one uncommon piece are always carried; the rest of the
/// shelf is rolled near the character's level, occasionally with one
/// guaranteed Rare slot. Each entry may go on sale, with odds and depth
/// that favor leveled, reputable regulars.
pub fn restock_if_due(state: &GameState, now: i64, rng: &mut impl Rng) -> GameState {
    let Ok(character) = state.character() else {
        return state.clone();
    };
    if now - state.shop_state.last_update < SHOP_RESTOCK_INTERVAL_MS {
        return state.clone();
    }

    let mut items = vec![health_potion().instantiate()];
    items.extend(generate_random_item(character.level, Some(Rarity::Common), rng));
    items.extend(generate_random_item(character.level, Some(Rarity::Uncommon), rng));
    let forced_slot = if rng.gen_bool(SHOP_FORCED_RARE_CHANCE) {
        Some(rng.gen_range(0..SHOP_RANDOM_STOCK))
    } else {
        None
    };
    for slot in 0..SHOP_RANDOM_STOCK {
        let forced = (forced_slot == Some(slot)).then_some(Rarity::Rare);
        if let Some(item) = generate_random_item(character.level, forced, rng) {
            items.push(item);
        }
    }

    let visit_streak = state.shop_state.visit_streak + 1;
    let charisma = (character.reputation.total() / CHARISMA_REP_DIVISOR) as u32;
    let discount_chance = SHOP_DISCOUNT_BASE_CHANCE
        + character.level as f64 / 5.0
        + visit_streak as f64 / 10.0;
    let mut discounts = BTreeMap::new();
    for item in &items {
        if rng.gen_range(0.0..100.0) < discount_chance {
            let percent = (SHOP_DISCOUNT_MIN + rng.gen_range(0..SHOP_DISCOUNT_VARIANCE)
                + charisma / 10)
                .min(SHOP_DISCOUNT_CAP);
            discounts.insert(item.id.clone(), percent);
        }
    }

    debug!(stock = items.len(), on_sale = discounts.len(), "shop restocked");

    let mut updated = state.clone();
    updated.shop_state = ShopState {
        items,
        discounts,
        last_update: now,
        visit_streak,
    };
    updated
}

/// Buys one unit of a stocked item at its discounted price.
pub fn buy_item(state: &GameState, item_id: &str) -> Result<GameState, GameError> {
    let mut updated = state.clone();
    let item = updated
        .shop_state
        .items
        .iter()
        .find(|i| i.id == item_id)
        .ok_or(GameError::ItemNotFound)?
        .clone();
    let price = updated.shop_state.price_of(&item);

    let character = updated.character_mut()?;
    if !inventory::can_accept(character, &item) {
        return Err(GameError::InventoryFull);
    }
    character.spend_gold(price)?;
    inventory::add_in_place(character, &item, 1);

    // Consumables restock themselves; gear is gone once bought.
    if !item.stackable {
        updated.shop_state.items.retain(|i| i.id != item_id);
        updated.shop_state.discounts.remove(item_id);
    }
    // Spending money starts the loyalty clock over
    updated.shop_state.visit_streak = 0;
    Ok(updated)
}

/// Sells one unit from the inventory for a fraction of list price.
/// Legendary pieces and worthless items cannot be sold.
pub fn sell_item(state: &GameState, item_id: &str) -> Result<GameState, GameError> {
    let mut updated = state.clone();
    let character = updated.character_mut()?;
    let item = character
        .inventory
        .iter()
        .find(|i| i.id == item_id)
        .ok_or(GameError::ItemNotFound)?
        .clone();
    if item.rarity == Rarity::Legendary || item.price == 0 {
        return Err(GameError::NotSellable);
    }
    inventory::remove_one(character, item_id);
    character.gold += sell_price(item.price);
    Ok(updated)
}

/// Trades gold for a pack of extra inventory slots.
pub fn buy_inventory_slots(state: &GameState) -> Result<GameState, GameError> {
    let mut updated = state.clone();
    let character = updated.character_mut()?;
    character.spend_gold(INVENTORY_SLOT_PRICE)?;
    character.inventory_slots += INVENTORY_SLOT_PACK;
    Ok(updated)
}
