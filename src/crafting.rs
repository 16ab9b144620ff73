//! Crafting: recipes consume materials and gold, stack-aware.

use tracing::debug;

use crate::error::GameError;
use crate::game_state::GameState;
use crate::inventory;
use crate::items::catalog::recipe_by_id;

/// Adds a recipe to the character's known list. Idempotent.
pub fn unlock_recipe(state: &GameState, recipe_id: &str) -> Result<GameState, GameError> {
    recipe_by_id(recipe_id).ok_or(GameError::RecipeNotFound)?;
    let mut updated = state.clone();
    let character = updated.character_mut()?;
    if !character.unlocked_recipes.iter().any(|r| r == recipe_id) {
        character.unlocked_recipes.push(recipe_id.to_string());
    }
    Ok(updated)
}

/// Crafts a known recipe. Everything is checked before anything is
/// consumed, so a failed craft never costs materials.
pub fn craft(state: &GameState, recipe_id: &str) -> Result<GameState, GameError> {
    let recipe = recipe_by_id(recipe_id).ok_or(GameError::RecipeNotFound)?;
    let character = state.character()?;
    if !character.unlocked_recipes.iter().any(|r| r == recipe_id) {
        return Err(GameError::RecipeLocked);
    }
    for cost in &recipe.materials {
        if inventory::count_by_name(character, &cost.name) < cost.count {
            return Err(GameError::MissingMaterial {
                name: cost.name.clone(),
            });
        }
    }
    if character.gold < recipe.gold_cost {
        return Err(GameError::InsufficientGold {
            needed: recipe.gold_cost,
        });
    }

    let mut updated = state.clone();
    let character = updated.character_mut()?;
    for cost in &recipe.materials {
        inventory::consume_by_name(character, &cost.name, cost.count);
    }
    character.spend_gold(recipe.gold_cost)?;
    if !inventory::can_accept(character, &recipe.result_item) {
        return Err(GameError::InventoryFull);
    }
    inventory::add_in_place(character, &recipe.result_item, 1);
    debug!(recipe = recipe_id, item = %recipe.result_item.name, "crafted");
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{ClassType, Stats};
    use crate::game_state::create_character;
    use crate::items::catalog::catalog;

    fn state_with_recipe(recipe_id: &str) -> GameState {
        let state = create_character(
            &GameState::new_game(),
            "Ilya",
            ClassType::Scout,
            Stats::new(0, 6, 2, 2),
            0,
        )
        .unwrap();
        unlock_recipe(&state, recipe_id).unwrap()
    }

    fn stock_materials(state: &mut GameState, recipe_id: &str) {
        let recipe = recipe_by_id(recipe_id).unwrap();
        let character = state.character.as_mut().unwrap();
        for cost in &recipe.materials {
            let template = catalog()
                .materials
                .values()
                .find(|m| m.name == cost.name)
                .unwrap();
            inventory::add_in_place(character, template, cost.count);
        }
        character.gold = recipe.gold_cost + 10;
    }

    #[test]
    fn test_craft_requires_unlock() {
        let state = create_character(
            &GameState::new_game(),
            "Ilya",
            ClassType::Scout,
            Stats::new(0, 6, 2, 2),
            0,
        )
        .unwrap();
        assert_eq!(
            craft(&state, "r_regen_pot").unwrap_err(),
            GameError::RecipeLocked
        );
        assert_eq!(
            craft(&state, "r_unknown").unwrap_err(),
            GameError::RecipeNotFound
        );
    }

    #[test]
    fn test_craft_consumes_materials_and_gold() {
        let mut state = state_with_recipe("r_regen_pot");
        stock_materials(&mut state, "r_regen_pot");
        let recipe = recipe_by_id("r_regen_pot").unwrap();
        let gold_before = state.character().unwrap().gold;

        let crafted = craft(&state, "r_regen_pot").unwrap();
        let c = crafted.character().unwrap();
        assert_eq!(c.gold, gold_before - recipe.gold_cost);
        for cost in &recipe.materials {
            assert_eq!(inventory::count_by_name(c, &cost.name), 0);
        }
        assert!(c
            .inventory
            .iter()
            .any(|i| i.name == recipe.result_item.name));
    }

    #[test]
    fn test_failed_craft_costs_nothing() {
        let mut state = state_with_recipe("r_regen_pot");
        // Only one of the required materials on hand
        let recipe = recipe_by_id("r_regen_pot").unwrap();
        let first = &recipe.materials[0];
        {
            let character = state.character.as_mut().unwrap();
            let template = catalog()
                .materials
                .values()
                .find(|m| m.name == first.name)
                .unwrap();
            inventory::add_in_place(character, template, first.count);
            character.gold = 100_000;
        }

        let err = craft(&state, "r_regen_pot").unwrap_err();
        assert!(matches!(err, GameError::MissingMaterial { .. }));
        // Nothing was consumed
        assert_eq!(
            inventory::count_by_name(state.character().unwrap(), &first.name),
            first.count
        );
    }

    #[test]
    fn test_craft_requires_gold() {
        let mut state = state_with_recipe("r_regen_pot");
        stock_materials(&mut state, "r_regen_pot");
        state.character.as_mut().unwrap().gold = 0;
        assert!(matches!(
            craft(&state, "r_regen_pot").unwrap_err(),
            GameError::InsufficientGold { .. }
        ));
    }

    #[test]
    fn test_unlock_is_idempotent() {
        let state = state_with_recipe("r_regen_pot");
        let again = unlock_recipe(&state, "r_regen_pot").unwrap();
        assert_eq!(again.character().unwrap().unlocked_recipes.len(), 1);
    }
}
