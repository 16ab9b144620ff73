use thiserror::Error;

use crate::items::types::ItemType;

/// Expected failure of a game operation. Resolvers return these instead of
/// mutating state; the caller decides how to surface them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GameError {
    #[error("no character has been created")]
    NoCharacter,
    #[error("inventory is full")]
    InventoryFull,
    #[error("not enough gold, {needed} needed")]
    InsufficientGold { needed: u64 },
    #[error("missing material {name}")]
    MissingMaterial { name: String },
    #[error("requires level {required}")]
    LevelTooLow { required: u32 },
    #[error("item is reserved for another class")]
    WrongClass,
    #[error("item cannot be sold")]
    NotSellable,
    #[error("{0:?} cannot be equipped")]
    NotEquippable(ItemType),
    #[error("item not found")]
    ItemNotFound,
    #[error("quest {0} not found")]
    QuestNotFound(String),
    #[error("quest is already completed")]
    QuestAlreadyCompleted,
    #[error("refresh available in {remaining_secs}s")]
    RefreshCooldown { remaining_secs: i64 },
    #[error("too many active one-time quests")]
    TooManyOneTimeQuests,
    #[error("invalid stat allocation of {allocated} points")]
    InvalidStatAllocation { allocated: u32 },
    #[error("no stat points available")]
    NoStatPoints,
    #[error("recipe not found")]
    RecipeNotFound,
    #[error("recipe is not unlocked")]
    RecipeLocked,
    #[error("dungeon not found")]
    DungeonNotFound,
    #[error("no active mob")]
    NoActiveMob,
    #[error("an encounter is already in progress")]
    EncounterInProgress,
    #[error("action attempted out of turn")]
    OutOfTurn,
    #[error("the character is not defeated")]
    NotDefeated,
    #[error("no potion in inventory")]
    NoPotion,
}
