//! Room events, choices, and outcomes

use serde::{Deserialize, Serialize};
use strum::Display;

use crate::character::StatKind;
use crate::enemy::Enemy;
use crate::item::Item;

/// What kind of room an event takes place in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomKind {
    Combat,
    Treasure,
    Rest,
    Puzzle,
    Merchant,
    Boss,
    Story,
    MoralChoice,
    Portal,
    Training,
    Forge,
    Library,
    Prison,
    Laboratory,
}

/// How special a room variant (or a door leading to one) is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoomRarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// Minimum stat value gating a choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRequirement {
    pub stat: StatKind,
    pub min_value: i32,
}

/// Everything a resolved choice can do to the player and the dungeon state
///
/// All numeric fields are deltas; negative values cost the player. An
/// `enemy` turns the choice into a combat trigger handled by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub experience: i32,
    pub health: i32,
    pub mana: i32,
    /// Restore health and mana to max, overriding the flat deltas
    pub full_restore: bool,
    pub item: Option<Item>,
    pub keys: i32,
    pub reputation: i32,
    pub story_flag: Option<String>,
    /// Permanent additions to base stats
    pub stat_bonuses: Vec<(StatKind, i32)>,
    pub curse: Option<String>,
    pub blessing: Option<String>,
    /// Present when the choice starts a fight instead of paying out
    pub enemy: Option<Enemy>,
    pub description: String,
}

/// One selectable option inside a room event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventChoice {
    pub text: String,
    pub outcome: EventOutcome,
    pub stat_requirement: Option<StatRequirement>,
    /// Minimum keys held; keys are not spent by the gate itself
    pub key_requirement: Option<u32>,
}

impl EventChoice {
    pub fn new(text: impl Into<String>, outcome: EventOutcome) -> Self {
        Self {
            text: text.into(),
            outcome,
            stat_requirement: None,
            key_requirement: None,
        }
    }

    pub fn with_stat(mut self, stat: StatKind, min_value: i32) -> Self {
        self.stat_requirement = Some(StatRequirement { stat, min_value });
        self
    }

    pub fn with_keys(mut self, keys: u32) -> Self {
        self.key_requirement = Some(keys);
        self
    }
}

/// A fully generated room event, ready for the player to pick a choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomEvent {
    pub kind: RoomKind,
    pub title: String,
    pub description: String,
    pub choices: Vec<EventChoice>,
    /// Variant id used for per-level room deduplication
    pub unique_id: String,
    pub rarity: RoomRarity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rarity_ordering() {
        assert!(RoomRarity::Common < RoomRarity::Uncommon);
        assert!(RoomRarity::Rare < RoomRarity::Legendary);
    }

    #[test]
    fn test_choice_builders_attach_gates() {
        let c = EventChoice::new("try it", EventOutcome::default())
            .with_stat(StatKind::Luck, 12)
            .with_keys(2);
        assert_eq!(
            c.stat_requirement,
            Some(StatRequirement {
                stat: StatKind::Luck,
                min_value: 12
            })
        );
        assert_eq!(c.key_requirement, Some(2));
    }
}
