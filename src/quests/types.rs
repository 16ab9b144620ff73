use serde::{Deserialize, Serialize};

use crate::character::ReputationType;
use crate::items::types::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestCategory {
    Daily,
    Weekly,
    Event,
    OneTime,
}

impl QuestCategory {
    /// Weight applied to rewards: each step adds 20% gold and 10% XP on
    /// top of the base.
    pub fn rarity_value(self) -> u32 {
        match self {
            QuestCategory::Daily => 0,
            QuestCategory::Weekly => 1,
            QuestCategory::OneTime => 2,
            QuestCategory::Event => 3,
        }
    }
}

/// A real-life task the player has committed to. `reward_gold` and
/// `reward_exp` hold the category base values; level, mood and honesty
/// multipliers are applied when the quest is turned in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: QuestCategory,
    pub reputation_type: ReputationType,
    /// 1 for dailies, up to 5 for one-time undertakings.
    pub difficulty: u32,
    pub reward_gold: u64,
    pub reward_exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward_item: Option<Item>,
    #[serde(default)]
    pub completed: bool,
}
