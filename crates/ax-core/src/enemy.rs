//! Enemies and encounter scaling
//!
//! The enemy catalog holds base templates; every encounter clones a template
//! and scales it by the room's difficulty modifier and the current dungeon
//! level, so the same Goblin Warrior hits harder ten floors down.

use serde::{Deserialize, Serialize};

use crate::character::Stats;
use crate::item::Item;
use crate::skill::Skill;

/// An enemy combatant, either a catalog template or a scaled encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: String,
    pub name: String,
    pub level: u32,
    pub health: u32,
    pub max_health: u32,
    pub stats: Stats,
    pub skills: Vec<Skill>,
    pub experience_reward: u32,
    /// Guaranteed drops on top of the random post-victory find
    pub item_drops: Vec<Item>,
    pub description: String,
}

impl Enemy {
    /// Scale a template for an encounter
    ///
    /// `modifier` comes from the room variant (an ambush is easier, a duel
    /// harder) and multiplies the level, health, stat block, and reward;
    /// `dungeon_level` adds flat growth on top so difficulty keeps climbing
    /// even within one variant. Cooldowns reset so an encounter never
    /// starts mid-recovery.
    pub fn scaled(template: &Enemy, modifier: f64, dungeon_level: u32) -> Enemy {
        let mut enemy = template.clone();
        let dl = dungeon_level;

        enemy.level =
            ((template.level as f64 * modifier).floor() as u32 + dl / 3).max(1);
        enemy.max_health = (template.max_health as f64 * modifier).floor() as u32 + dl * 15;
        enemy.health = enemy.max_health;

        enemy.stats = template.stats.scaled(modifier);
        enemy.stats.strength += (dl / 2) as i32;
        enemy.stats.dexterity += (dl / 3) as i32;
        enemy.stats.endurance += (dl / 2) as i32;
        enemy.stats.luck += (dl / 4) as i32;

        enemy.experience_reward =
            (template.experience_reward as f64 * modifier * 1.5).floor() as u32 + dl * 20;

        for skill in &mut enemy.skills {
            skill.current_cooldown = 0;
        }
        enemy
    }

    /// Lose health, clamped at 0
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Gain health, clamped at max
    pub fn heal(&mut self, amount: u32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f64 / self.max_health as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;

    #[test]
    fn test_scaling_applies_modifier_and_depth() {
        let pool = data::enemy_pool();
        let goblin = pool.iter().find(|e| e.id == "goblin_warrior").unwrap();
        assert_eq!(goblin.level, 1);
        assert_eq!(goblin.max_health, 60);

        let scaled = Enemy::scaled(goblin, 1.2, 6);
        // floor(1 * 1.2) + 6/3
        assert_eq!(scaled.level, 3);
        // floor(60 * 1.2) + 6*15
        assert_eq!(scaled.max_health, 72 + 90);
        assert_eq!(scaled.health, scaled.max_health);
        // floor(base * 1.2) + depth increment
        assert_eq!(scaled.stats.strength, 9 + 3);
        assert_eq!(scaled.stats.dexterity, 7 + 2);
        assert_eq!(scaled.stats.endurance, 6 + 3);
        assert_eq!(scaled.stats.luck, 3 + 1);
        // floor(reward * 1.2 * 1.5) + 6*20
        assert_eq!(
            scaled.experience_reward,
            (goblin.experience_reward as f64 * 1.8).floor() as u32 + 120
        );
    }

    #[test]
    fn test_modifier_scales_the_stat_block() {
        // A duel champion must hit and dodge harder than an ambush victim
        // cut from the same template, not just carry more health.
        let pool = data::enemy_pool();
        let goblin = pool.iter().find(|e| e.id == "goblin_warrior").unwrap();
        let champion = Enemy::scaled(goblin, 1.5, 1);
        let victim = Enemy::scaled(goblin, 0.8, 1);
        // Depth 1 adds no flat increments, so this is the modifier alone
        assert_eq!(champion.stats, Stats::new(12, 9, 7, 4));
        assert_eq!(victim.stats, Stats::new(6, 4, 4, 2));
        assert!(champion.stats.strength > victim.stats.strength);
        assert!(champion.stats.dexterity > victim.stats.dexterity);
    }

    #[test]
    fn test_scaling_floors_level_at_one() {
        let pool = data::enemy_pool();
        let goblin = pool.iter().find(|e| e.id == "goblin_warrior").unwrap();
        let scaled = Enemy::scaled(goblin, 0.8, 1);
        assert_eq!(scaled.level, 1);
    }

    #[test]
    fn test_scaling_resets_cooldowns() {
        let pool = data::enemy_pool();
        let mage = pool.iter().find(|e| !e.skills.is_empty()).unwrap();
        let mut template = mage.clone();
        for s in &mut template.skills {
            s.current_cooldown = 3;
        }
        let scaled = Enemy::scaled(&template, 1.0, 2);
        assert!(scaled.skills.iter().all(|s| s.current_cooldown == 0));
    }
}
