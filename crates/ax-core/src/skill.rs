//! Skills and skill effects

use serde::{Deserialize, Serialize};
use strum::Display;

/// Broad behavior class of a skill; drives how the combat engine resolves it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SkillKind {
    Offensive,
    Defensive,
    Support,
}

/// Effect descriptor for a skill; fields combine per skill
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillEffect {
    /// Fixed damage, bypassing the damage formula
    pub damage: Option<u32>,
    /// Multiplier fed into the damage formula (default 1.0)
    pub damage_multiplier: Option<f64>,
    /// Flat mana restored
    pub restore_mana: Option<u32>,
    /// Fraction of max health restored
    pub heal_percent: Option<f64>,
    /// Shield points absorbing incoming damage
    pub shield: Option<u32>,
    /// Percent added to dodge chance while active
    pub dodge_bonus: Option<u32>,
    /// Percent added to crit chance while active
    pub crit_bonus: Option<u32>,
    /// Turns the applied combat effect lasts (default 1)
    pub duration: Option<u32>,
}

/// A skill owned by the player or an enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: SkillKind,
    pub mana_cost: u32,
    /// Cooldown set when the skill fires
    pub cooldown: u32,
    /// Turns until the skill is usable again; ticks down once per round
    pub current_cooldown: u32,
    /// Locked skills are known but not yet usable
    pub unlocked: bool,
    pub required_level: u32,
    pub effect: SkillEffect,
}

impl Skill {
    /// Whether the owner can fire this skill right now, given their mana
    pub fn is_ready(&self, mana: u32) -> bool {
        self.unlocked && self.current_cooldown == 0 && mana >= self.mana_cost
    }

    /// Tick the cooldown at end of round, flooring at 0
    pub fn tick_cooldown(&mut self) {
        self.current_cooldown = self.current_cooldown.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill() -> Skill {
        Skill {
            id: "test".into(),
            name: "Test".into(),
            description: String::new(),
            kind: SkillKind::Offensive,
            mana_cost: 15,
            cooldown: 2,
            current_cooldown: 0,
            unlocked: true,
            required_level: 1,
            effect: SkillEffect::default(),
        }
    }

    #[test]
    fn test_is_ready_checks_mana_cooldown_and_unlock() {
        let mut s = skill();
        assert!(s.is_ready(15));
        assert!(!s.is_ready(14));
        s.current_cooldown = 1;
        assert!(!s.is_ready(100));
        s.current_cooldown = 0;
        s.unlocked = false;
        assert!(!s.is_ready(100));
    }

    #[test]
    fn test_tick_cooldown_floors_at_zero() {
        let mut s = skill();
        s.current_cooldown = 1;
        s.tick_cooldown();
        assert_eq!(s.current_cooldown, 0);
        s.tick_cooldown();
        assert_eq!(s.current_cooldown, 0);
    }
}
