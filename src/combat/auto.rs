//! Auto-battle controller. Decisions are scheduled against a generation
//! counter so actions queued before the battler was toggled (or before
//! the mob changed) are discarded instead of replayed.

use rand::Rng;

use crate::combat::logic::{enemy_attack, player_attack, use_potion};
use crate::combat::types::{CombatEvent, CombatTurn};
use crate::constants::AUTO_POTION_HP_THRESHOLD;
use crate::error::GameError;
use crate::game_state::GameState;
use crate::inventory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoAction {
    Attack,
    UsePotion,
    EnemyMove,
}

/// An action the battler has decided on but not yet executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledAction {
    pub generation: u64,
    pub mob_id: String,
    pub action: AutoAction,
}

#[derive(Debug, Clone, Default)]
pub struct AutoBattler {
    enabled: bool,
    generation: u64,
}

impl AutoBattler {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggling in either direction invalidates everything scheduled.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.generation += 1;
        }
    }

    /// Decides the next move for the current encounter, if any.
    pub fn schedule(&self, state: &GameState) -> Option<ScheduledAction> {
        if !self.enabled {
            return None;
        }
        let mob = state.dungeon_state.current_mob.as_ref()?;
        let action = match state.dungeon_state.turn {
            CombatTurn::PlayerTurn => {
                let character = state.character.as_ref()?;
                let low_hp = (character.hp as f64)
                    < character.max_hp as f64 * AUTO_POTION_HP_THRESHOLD;
                if low_hp && inventory::find_potion(character).is_some() {
                    AutoAction::UsePotion
                } else {
                    AutoAction::Attack
                }
            }
            CombatTurn::EnemyTurn => AutoAction::EnemyMove,
            CombatTurn::Win | CombatTurn::Lose => return None,
        };
        Some(ScheduledAction {
            generation: self.generation,
            mob_id: mob.id.clone(),
            action,
        })
    }

    /// Executes a scheduled action. Stale actions (battler toggled, mob
    /// replaced) resolve to a no-op rather than an error. A defeat shuts
    /// the battler off.
    pub fn apply(
        &mut self,
        state: &GameState,
        scheduled: &ScheduledAction,
        rng: &mut impl Rng,
    ) -> Result<(GameState, Vec<CombatEvent>), GameError> {
        if !self.enabled || scheduled.generation != self.generation {
            return Ok((state.clone(), Vec::new()));
        }
        match &state.dungeon_state.current_mob {
            Some(mob) if mob.id == scheduled.mob_id => {}
            _ => return Ok((state.clone(), Vec::new())),
        }
        let (after, events) = match scheduled.action {
            AutoAction::Attack => player_attack(state, rng)?,
            AutoAction::UsePotion => use_potion(state)?,
            AutoAction::EnemyMove => enemy_attack(state, rng)?,
        };
        if after.dungeon_state.turn == CombatTurn::Lose {
            self.set_enabled(false);
        }
        Ok((after, events))
    }
}
