//! Static quest template pools. Dailies are small habits, weeklies are
//! larger commitments, one-time quests are open-ended undertakings.

use crate::character::ReputationType;

#[derive(Debug, Clone, Copy)]
pub struct QuestTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub reputation_type: ReputationType,
}

const fn t(
    title: &'static str,
    description: &'static str,
    reputation_type: ReputationType,
) -> QuestTemplate {
    QuestTemplate {
        title,
        description,
        reputation_type,
    }
}

use ReputationType::{Creativity, Discipline, Heroism};

pub static DAILY_TEMPLATES: [QuestTemplate; 20] = [
    t("Make the bed", "Start the day with one small victory.", Discipline),
    t("Morning stretch", "Ten minutes of stretching before breakfast.", Discipline),
    t("Drink water", "Eight glasses across the day.", Discipline),
    t("Take a walk", "At least twenty minutes outside.", Heroism),
    t("Read twenty pages", "Any book counts.", Creativity),
    t("Tidy the desk", "Clear the workspace before starting.", Discipline),
    t("Write three sentences", "A journal line, a note, anything.", Creativity),
    t("No snooze", "Get up on the first alarm.", Discipline),
    t("Cook a real meal", "No takeout, no microwave dinner.", Creativity),
    t("Call someone", "Check in on a friend or relative.", Heroism),
    t("Practice a skill", "Twenty minutes of deliberate practice.", Creativity),
    t("Screen sunset", "No screens for the last hour before bed.", Discipline),
    t("Do the dishes", "Leave the sink empty tonight.", Discipline),
    t("Compliment someone", "Mean it.", Heroism),
    t("Plan tomorrow", "Three priorities, written down.", Discipline),
    t("Take the stairs", "Every time today.", Heroism),
    t("Learn one new word", "And use it in a sentence.", Creativity),
    t("Stretch break", "Stand up every hour of desk work.", Discipline),
    t("Sketch something", "Five minutes, no judgment.", Creativity),
    t("Help a stranger", "Hold a door, give directions, carry a bag.", Heroism),
];

pub static WEEKLY_TEMPLATES: [QuestTemplate; 20] = [
    t("Deep clean one room", "Top to bottom, including the corners.", Discipline),
    t("Three workouts", "Any kind, thirty minutes each.", Heroism),
    t("Finish a book", "Start to finish, this week.", Creativity),
    t("Meal prep Sunday", "Cook ahead for at least three days.", Discipline),
    t("Visit somewhere new", "A street, a park, a museum you have never seen.", Heroism),
    t("Write a letter", "Paper, envelope, stamp.", Creativity),
    t("Budget review", "Reconcile the week's spending.", Discipline),
    t("Volunteer an hour", "Give time to someone who needs it.", Heroism),
    t("Digital declutter", "Clear the desktop, inbox below twenty.", Discipline),
    t("Make something", "Build, bake, draw, compose. Ship it.", Creativity),
    t("Host or attend", "One real social gathering.", Heroism),
    t("Fix what is broken", "That thing you have been ignoring.", Discipline),
    t("Learn a recipe", "Cook it twice until it needs no instructions.", Creativity),
    t("Long walk", "Two hours, phone in pocket.", Heroism),
    t("Inbox zero", "Answer or archive everything.", Discipline),
    t("Teach someone", "Share a skill you have with someone who wants it.", Heroism),
    t("Rearrange a space", "Make one room work better.", Creativity),
    t("Week of early nights", "In bed before midnight, five nights.", Discipline),
    t("Photo walk", "Shoot thirty frames of ordinary things.", Creativity),
    t("Reach out", "Reconnect with someone you lost touch with.", Heroism),
];

pub static ONETIME_TEMPLATES: [QuestTemplate; 20] = [
    t("Run a 10k", "Train for it, then run it.", Heroism),
    t("Finish the course", "That online course you started.", Discipline),
    t("Build a portfolio", "Three finished pieces, presented properly.", Creativity),
    t("Declutter the closet", "Everything unworn in a year goes.", Discipline),
    t("Plan a trip", "Route, budget, bookings.", Creativity),
    t("Donate blood", "Book the appointment and show up.", Heroism),
    t("Learn to juggle", "Three balls, one minute.", Creativity),
    t("Emergency fund", "One month of expenses set aside.", Discipline),
    t("Climb a mountain", "A real summit, whatever its size.", Heroism),
    t("Write a short story", "Beginning, middle, end. Edited.", Creativity),
    t("Thirty days no sugar", "The whole month.", Discipline),
    t("Fix the paperwork", "Taxes, insurance, the drawer of dread.", Discipline),
    t("Perform in public", "Open mic, recital, reading. Once.", Heroism),
    t("Build furniture", "From parts or from lumber.", Creativity),
    t("Master a dish", "Cook it for guests without a recipe.", Creativity),
    t("Swim a kilometer", "Without stopping.", Heroism),
    t("Digital archive", "Back up and organize every photo you own.", Discipline),
    t("Mentor someone", "Three months of regular sessions.", Heroism),
    t("Plant a garden", "From seed to harvest.", Creativity),
    t("Quit one bad habit", "Ninety days clean.", Discipline),
];

/// Calendar events: a stable quest id, the (month, day) it falls on, the
/// template, and the catalog id of the unique item awarded on completion.
/// The id is stable so a completed event stays completed across years.
pub struct EventQuest {
    pub id: &'static str,
    pub month: u32,
    pub day: u32,
    pub template: QuestTemplate,
    pub reward_item_id: &'static str,
}

pub static EVENT_QUESTS: [EventQuest; 3] = [
    EventQuest {
        id: "evt_0",
        month: 12,
        day: 31,
        template: t(
            "Close the year",
            "Write down what this year gave you and what you give back.",
            Creativity,
        ),
        reward_item_id: "evt_santa",
    },
    EventQuest {
        id: "evt_1",
        month: 4,
        day: 22,
        template: t(
            "Day of the Earth",
            "Spend the day outdoors and leave the place better than you found it.",
            Heroism,
        ),
        reward_item_id: "evt_nature",
    },
    EventQuest {
        id: "evt_2",
        month: 10,
        day: 31,
        template: t(
            "Night of masks",
            "Do one thing that scares you.",
            Heroism,
        ),
        reward_item_id: "evt_ghost",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::catalog::item_by_base_id;
    use std::collections::BTreeSet;

    #[test]
    fn test_pools_have_unique_titles() {
        for pool in [&DAILY_TEMPLATES, &WEEKLY_TEMPLATES, &ONETIME_TEMPLATES] {
            let titles: BTreeSet<&str> = pool.iter().map(|t| t.title).collect();
            assert_eq!(titles.len(), pool.len());
        }
    }

    #[test]
    fn test_event_rewards_exist_in_catalog() {
        for event in &EVENT_QUESTS {
            assert!(
                item_by_base_id(event.reward_item_id).is_some(),
                "missing event item {}",
                event.reward_item_id
            );
        }
    }

    #[test]
    fn test_event_ids_are_distinct() {
        let ids: BTreeSet<&str> = EVENT_QUESTS.iter().map(|e| e.id).collect();
        assert_eq!(ids.len(), EVENT_QUESTS.len());
    }

    #[test]
    fn test_every_pool_covers_all_reputations() {
        for pool in [&DAILY_TEMPLATES, &WEEKLY_TEMPLATES, &ONETIME_TEMPLATES] {
            let kinds: BTreeSet<u8> = pool.iter().map(|t| t.reputation_type as u8).collect();
            assert_eq!(kinds.len(), 3);
        }
    }
}
