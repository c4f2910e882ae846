//! Dungeon-wide state and choice resolution
//!
//! `DungeonState` holds everything that outlives a single room: keys,
//! reputation, story flags, curses and blessings, and the per-level room
//! history. Resolving a choice validates its gates first and mutates
//! nothing on rejection.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::generator::{RoomContext, RoomHistory};
use super::room::{EventChoice, RoomEvent};
use crate::character::{Character, StatKind};
use crate::enemy::Enemy;

/// Errors from choice resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceError {
    #[error("no choice at index {0}")]
    InvalidChoice(usize),
    #[error("requires {stat} {required}, you have {actual}")]
    StatTooLow {
        stat: StatKind,
        required: i32,
        actual: i32,
    },
    #[error("requires {required} keys, you hold {held}")]
    NotEnoughKeys { required: u32, held: u32 },
}

/// What applying a choice did, for the caller to narrate and act on
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChoiceResolution {
    pub experience_gained: u32,
    pub experience_lost: u32,
    pub health_change: i32,
    pub mana_change: i32,
    pub keys_change: i32,
    pub item_found: Option<String>,
    /// Set when the choice starts combat; the caller owns the fight
    pub enemy: Option<Enemy>,
    pub description: String,
}

/// State spanning the whole dungeon run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DungeonState {
    pub dungeon_level: u32,
    pub keys: u32,
    pub reputation: i32,
    pub story_flags: Vec<String>,
    pub curses: Vec<String>,
    pub blessings: Vec<String>,
    /// Rooms resolved on the current dungeon level
    pub rooms_explored: u32,
    /// Set once any boss has fallen on the current level
    pub boss_defeated: bool,
    pub history: RoomHistory,
}

impl Default for DungeonState {
    fn default() -> Self {
        Self::new()
    }
}

impl DungeonState {
    pub fn new() -> Self {
        Self {
            dungeon_level: 1,
            keys: 0,
            reputation: 0,
            story_flags: Vec::new(),
            curses: Vec::new(),
            blessings: Vec::new(),
            rooms_explored: 0,
            boss_defeated: false,
            history: RoomHistory::new(),
        }
    }

    /// Borrow the read-only slice of state the generator consumes
    pub fn room_context(&self) -> RoomContext<'_> {
        RoomContext {
            dungeon_level: self.dungeon_level,
            reputation: self.reputation,
            story_flags: &self.story_flags,
        }
    }

    /// Advance to the next dungeon level, resetting per-level memory
    pub fn descend(&mut self) {
        self.dungeon_level += 1;
        self.rooms_explored = 0;
        self.boss_defeated = false;
        self.history.reset();
    }

    /// Validate a choice's gates without mutating anything
    pub fn validate_choice<'a>(
        &self,
        character: &Character,
        event: &'a RoomEvent,
        index: usize,
    ) -> Result<&'a EventChoice, ChoiceError> {
        let choice = event
            .choices
            .get(index)
            .ok_or(ChoiceError::InvalidChoice(index))?;

        if let Some(req) = choice.stat_requirement {
            let actual = character.stats.get(req.stat);
            if actual < req.min_value {
                return Err(ChoiceError::StatTooLow {
                    stat: req.stat,
                    required: req.min_value,
                    actual,
                });
            }
        }
        if let Some(required) = choice.key_requirement {
            if self.keys < required {
                return Err(ChoiceError::NotEnoughKeys {
                    required,
                    held: self.keys,
                });
            }
        }
        Ok(choice)
    }

    /// Apply a choice's outcome to the character and dungeon state
    ///
    /// Passing a stat gate sweetens the rewards; reputation bends them
    /// further in either direction. Gated choices that fail validation
    /// leave both the character and the dungeon untouched.
    pub fn apply_choice(
        &mut self,
        character: &mut Character,
        event: &RoomEvent,
        index: usize,
    ) -> Result<ChoiceResolution, ChoiceError> {
        let choice = self.validate_choice(character, event, index)?.clone();
        let outcome = &choice.outcome;

        let mut experience = outcome.experience as f64;
        let mut health = outcome.health as f64;
        if choice.stat_requirement.is_some() {
            experience *= 1.5;
            health *= 1.2;
        }
        if self.reputation > 10 {
            experience *= 1.2;
        }
        if self.reputation < -10 {
            health *= 0.8;
        }
        let experience = experience.floor() as i32;
        let health = health.floor() as i32;

        let mut resolution = ChoiceResolution {
            description: outcome.description.clone(),
            ..Default::default()
        };

        if experience >= 0 {
            character.experience += experience as u32;
            resolution.experience_gained = experience as u32;
        } else {
            let loss = character.experience.min((-experience) as u32);
            character.experience -= loss;
            resolution.experience_lost = loss;
        }

        if outcome.full_restore {
            resolution.health_change = (character.max_health - character.health) as i32;
            resolution.mana_change = (character.max_mana - character.mana) as i32;
            character.health = character.max_health;
            character.mana = character.max_mana;
        } else {
            if health >= 0 {
                let before = character.health;
                character.heal(health as u32);
                resolution.health_change = (character.health - before) as i32;
            } else {
                let before = character.health;
                character.take_damage((-health) as u32);
                resolution.health_change = -((before - character.health) as i32);
            }
            if outcome.mana >= 0 {
                let before = character.mana;
                character.restore_mana(outcome.mana as u32);
                resolution.mana_change = (character.mana - before) as i32;
            } else {
                let before = character.mana;
                character.spend_mana((-outcome.mana) as u32);
                resolution.mana_change = -((before - character.mana) as i32);
            }
        }

        if let Some(item) = &outcome.item {
            resolution.item_found = Some(item.name.clone());
            character.inventory.push(item.clone());
        }

        // Keys never go negative, no matter how steep the price
        let keys = self.keys as i32 + outcome.keys;
        resolution.keys_change = keys.max(0) - self.keys as i32;
        self.keys = keys.max(0) as u32;

        self.reputation += outcome.reputation;

        for (kind, value) in &outcome.stat_bonuses {
            character.apply_permanent_bonus(*kind, *value);
        }

        if let Some(flag) = &outcome.story_flag {
            if !self.story_flags.contains(flag) {
                self.story_flags.push(flag.clone());
            }
        }
        if let Some(curse) = &outcome.curse {
            if !self.curses.contains(curse) {
                self.curses.push(curse.clone());
            }
        }
        if let Some(blessing) = &outcome.blessing {
            if !self.blessings.contains(blessing) {
                self.blessings.push(blessing.clone());
            }
        }

        resolution.enemy = outcome.enemy.clone();
        Ok(resolution)
    }
}
