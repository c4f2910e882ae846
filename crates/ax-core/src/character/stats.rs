//! Base attributes shared by characters and enemies

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// Attribute selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatKind {
    /// Drives damage
    Strength,
    /// Drives dodge and crit
    Dexterity,
    /// Drives health and mana pools
    Endurance,
    /// Drives crit, dodge, and random-event variance
    Luck,
}

impl StatKind {
    /// All stats in display order
    pub const ALL: [StatKind; 4] = [
        StatKind::Strength,
        StatKind::Dexterity,
        StatKind::Endurance,
        StatKind::Luck,
    ];
}

/// Attribute block
///
/// Values are signed so the same type can describe item bonuses (which may
/// be negative); character base stats are kept at 1 or above by the
/// mutation helpers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub strength: i32,
    pub dexterity: i32,
    pub endurance: i32,
    pub luck: i32,
}

impl Stats {
    pub const fn new(strength: i32, dexterity: i32, endurance: i32, luck: i32) -> Self {
        Self {
            strength,
            dexterity,
            endurance,
            luck,
        }
    }

    pub fn get(&self, kind: StatKind) -> i32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Dexterity => self.dexterity,
            StatKind::Endurance => self.endurance,
            StatKind::Luck => self.luck,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut i32 {
        match kind {
            StatKind::Strength => &mut self.strength,
            StatKind::Dexterity => &mut self.dexterity,
            StatKind::Endurance => &mut self.endurance,
            StatKind::Luck => &mut self.luck,
        }
    }

    /// Add another stat block field-wise
    pub fn add(&mut self, other: &Stats) {
        self.strength += other.strength;
        self.dexterity += other.dexterity;
        self.endurance += other.endurance;
        self.luck += other.luck;
    }

    /// Subtract another stat block field-wise
    pub fn sub(&mut self, other: &Stats) {
        self.strength -= other.strength;
        self.dexterity -= other.dexterity;
        self.endurance -= other.endurance;
        self.luck -= other.luck;
    }

    /// Scale every stat by a multiplier, flooring each product
    pub fn scaled(&self, factor: f64) -> Stats {
        Stats {
            strength: (self.strength as f64 * factor).floor() as i32,
            dexterity: (self.dexterity as f64 * factor).floor() as i32,
            endurance: (self.endurance as f64 * factor).floor() as i32,
            luck: (self.luck as f64 * factor).floor() as i32,
        }
    }

    /// Clamp every stat to at least 1 (gameplay floor for living creatures)
    pub fn floored(mut self) -> Stats {
        for kind in StatKind::ALL {
            let v = self.get_mut(kind);
            *v = (*v).max(1);
        }
        self
    }
}
