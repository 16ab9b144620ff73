//! LifeCraft simulation core.
//!
//! A single-player life-RPG engine: real-world tasks become quests, quests
//! pay out gold and experience, and the character spends both on gear,
//! crafting and dungeon runs. The crate is the pure rules layer; every
//! operation takes the current [`GameState`] and returns a new one, with
//! expected failures reported as [`GameError`] and the input untouched.
//!
//! Persistence lives in [`save_manager`]: a versioned JSON document that
//! is migrated forward on load.

pub mod character;
pub mod combat;
pub mod constants;
pub mod crafting;
pub mod dungeon;
pub mod error;
pub mod game_state;
pub mod inventory;
pub mod items;
pub mod migration;
pub mod progression;
pub mod quests;
pub mod save_manager;
pub mod shop;
pub mod tick;

pub use error::GameError;
pub use game_state::GameState;
