//! Character model: archetypes, stats, equipment, reputation and journal.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::*;
use crate::error::GameError;
use crate::items::types::{EquipmentSlot, Item};

/// The four fixed archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassType {
    Warrior,
    Mage,
    Scout,
    Healer,
}

impl ClassType {
    pub fn all() -> [ClassType; 4] {
        [
            ClassType::Warrior,
            ClassType::Mage,
            ClassType::Scout,
            ClassType::Healer,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClassType::Warrior => "Warrior",
            ClassType::Mage => "Mage",
            ClassType::Scout => "Scout",
            ClassType::Healer => "Healer",
        }
    }

    /// Stat that drives this class's attack damage.
    pub fn primary_stat(&self) -> StatKind {
        match self {
            ClassType::Warrior => StatKind::Str,
            ClassType::Scout => StatKind::Dex,
            ClassType::Mage | ClassType::Healer => StatKind::Int,
        }
    }

    pub fn base_stats(&self) -> Stats {
        match self {
            ClassType::Warrior => Stats::new(15, 8, 3, 12),
            ClassType::Mage => Stats::new(5, 6, 16, 8),
            ClassType::Scout => Stats::new(7, 14, 10, 9),
            ClassType::Healer => Stats::new(6, 7, 12, 10),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Str,
    Dex,
    Int,
    Vit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub str: u32,
    #[serde(default)]
    pub dex: u32,
    #[serde(default)]
    pub int: u32,
    #[serde(default)]
    pub vit: u32,
}

impl Stats {
    pub fn new(str: u32, dex: u32, int: u32, vit: u32) -> Self {
        Self { str, dex, int, vit }
    }

    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Str => self.str,
            StatKind::Dex => self.dex,
            StatKind::Int => self.int,
            StatKind::Vit => self.vit,
        }
    }

    pub fn total(&self) -> u32 {
        self.str + self.dex + self.int + self.vit
    }

    pub fn bump(&mut self, kind: StatKind) {
        match kind {
            StatKind::Str => self.str += 1,
            StatKind::Dex => self.dex += 1,
            StatKind::Int => self.int += 1,
            StatKind::Vit => self.vit += 1,
        }
    }

    pub fn add(&self, other: &Stats) -> Stats {
        Stats {
            str: self.str + other.str,
            dex: self.dex + other.dex,
            int: self.int + other.int,
            vit: self.vit + other.vit,
        }
    }
}

/// The three reputation tracks accumulated from quest completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReputationType {
    Heroism,
    Discipline,
    Creativity,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reputation {
    #[serde(default)]
    pub heroism: u64,
    #[serde(default)]
    pub discipline: u64,
    #[serde(default)]
    pub creativity: u64,
}

impl Reputation {
    pub fn get(&self, kind: ReputationType) -> u64 {
        match kind {
            ReputationType::Heroism => self.heroism,
            ReputationType::Discipline => self.discipline,
            ReputationType::Creativity => self.creativity,
        }
    }

    pub fn add(&mut self, kind: ReputationType, amount: u64) {
        match kind {
            ReputationType::Heroism => self.heroism += amount,
            ReputationType::Discipline => self.discipline += amount,
            ReputationType::Creativity => self.creativity += amount,
        }
    }

    pub fn total(&self) -> u64 {
        self.heroism + self.discipline + self.creativity
    }
}

/// Self-reported mood attached to a quest reflection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Inspired,
    Tired,
    Neutral,
    Regret,
}

impl Mood {
    pub fn reward_multiplier(&self) -> f64 {
        match self {
            Mood::Inspired => 1.2,
            Mood::Regret => 0.8,
            Mood::Tired | Mood::Neutral => 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub date: i64,
    pub text: String,
    pub mood: Mood,
}

impl JournalEntry {
    pub fn new(text: impl Into<String>, mood: Mood, now_millis: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            date: now_millis,
            text: text.into(),
            mood,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Normal,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub font_size: FontSize,
    pub high_contrast: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: FontSize::Normal,
            high_contrast: false,
        }
    }
}

/// The eight fixed equipment slots, each holding at most one item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub head: Option<Item>,
    pub body: Option<Item>,
    pub hands: Option<Item>,
    pub legs: Option<Item>,
    pub ring: Option<Item>,
    pub amulet: Option<Item>,
    pub belt: Option<Item>,
}

impl Equipment {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Head => self.head.as_ref(),
            EquipmentSlot::Body => self.body.as_ref(),
            EquipmentSlot::Hands => self.hands.as_ref(),
            EquipmentSlot::Legs => self.legs.as_ref(),
            EquipmentSlot::Ring => self.ring.as_ref(),
            EquipmentSlot::Amulet => self.amulet.as_ref(),
            EquipmentSlot::Belt => self.belt.as_ref(),
        }
    }

    /// Places `item` in `slot`, returning whatever it displaced.
    pub fn set(&mut self, slot: EquipmentSlot, item: Item) -> Option<Item> {
        let target = match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Head => &mut self.head,
            EquipmentSlot::Body => &mut self.body,
            EquipmentSlot::Hands => &mut self.hands,
            EquipmentSlot::Legs => &mut self.legs,
            EquipmentSlot::Ring => &mut self.ring,
            EquipmentSlot::Amulet => &mut self.amulet,
            EquipmentSlot::Belt => &mut self.belt,
        };
        target.replace(item)
    }

    /// Empties `slot`, returning the removed item.
    pub fn clear(&mut self, slot: EquipmentSlot) -> Option<Item> {
        let target = match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Head => &mut self.head,
            EquipmentSlot::Body => &mut self.body,
            EquipmentSlot::Hands => &mut self.hands,
            EquipmentSlot::Legs => &mut self.legs,
            EquipmentSlot::Ring => &mut self.ring,
            EquipmentSlot::Amulet => &mut self.amulet,
            EquipmentSlot::Belt => &mut self.belt,
        };
        target.take()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        EquipmentSlot::all().into_iter().filter_map(|s| self.get(s))
    }

    /// Sum of one stat across every equipped item.
    pub fn stat_bonus(&self, kind: StatKind) -> u32 {
        self.iter().map(|i| i.stats.get(kind)).sum()
    }

    /// Raw weapon damage contribution: the equipped weapon's stat total.
    pub fn weapon_damage(&self) -> u32 {
        self.weapon.as_ref().map(|w| w.stats.total()).unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    pub class_type: ClassType,
    pub level: u32,
    pub current_exp: u64,
    pub stats: Stats,
    #[serde(default)]
    pub stat_points: u32,
    pub hp: u32,
    pub max_hp: u32,
    pub gold: u64,
    pub inventory: Vec<Item>,
    pub inventory_slots: usize,
    pub equipment: Equipment,
    pub reputation: Reputation,
    pub honesty: u32,
    pub daily_streak: u32,
    pub journal: Vec<JournalEntry>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default)]
    pub unlocked_recipes: Vec<String>,
    #[serde(default)]
    pub hp_regen: u32,
}

impl Character {
    /// Creates a level-1 character from an archetype plus allocated bonus
    /// points. Max HP derives from vitality; the starting potions are
    /// added by [`crate::game_state::create_character`].
    pub fn new(name: impl Into<String>, class_type: ClassType, bonus: Stats, now_millis: i64) -> Self {
        let stats = class_type.base_stats().add(&bonus);
        let max_hp = BASE_MAX_HP + stats.vit * MAX_HP_PER_VIT;
        Self {
            name: name.into(),
            class_type,
            level: 1,
            current_exp: 0,
            stats,
            stat_points: 0,
            hp: max_hp,
            max_hp,
            gold: STARTING_GOLD,
            inventory: Vec::new(),
            inventory_slots: STARTING_INVENTORY_SLOTS,
            equipment: Equipment::default(),
            reputation: Reputation::default(),
            honesty: MAX_HONESTY,
            daily_streak: 0,
            journal: vec![JournalEntry::new(
                "The adventure begins. I came to this world to become a legend.",
                Mood::Inspired,
                now_millis,
            )],
            settings: Settings::default(),
            unlocked_recipes: Vec::new(),
            hp_regen: 0,
        }
    }

    /// Base stat plus every equipment bonus for that stat.
    pub fn effective_stat(&self, kind: StatKind) -> u32 {
        self.stats.get(kind) + self.equipment.stat_bonus(kind)
    }

    pub fn primary_stat_value(&self) -> u32 {
        self.effective_stat(self.class_type.primary_stat())
    }

    /// Heals without exceeding max HP.
    pub fn heal(&mut self, amount: u32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
    }

    pub fn is_defeated(&self) -> bool {
        self.hp == 0
    }

    /// Deducts gold, refusing to go negative.
    pub fn spend_gold(&mut self, amount: u64) -> Result<(), GameError> {
        if self.gold < amount {
            return Err(GameError::InsufficientGold { needed: amount });
        }
        self.gold -= amount;
        Ok(())
    }

    /// Raises honesty, clamped to the 0-100 meter.
    pub fn gain_honesty(&mut self, amount: u32) {
        self.honesty = (self.honesty + amount).min(MAX_HONESTY);
    }

    pub fn lose_honesty(&mut self, amount: u32) {
        self.honesty = self.honesty.saturating_sub(amount);
    }

    /// Appends a journal entry, keeping only the most recent ones.
    pub fn add_journal_entry(&mut self, entry: JournalEntry) {
        self.journal.push(entry);
        if self.journal.len() > JOURNAL_TRUNCATE_LEN {
            let excess = self.journal.len() - JOURNAL_TRUNCATE_LEN;
            self.journal.drain(..excess);
        }
    }
}
