//! Enemy templates
//!
//! Templates carry base numbers for a level-1 dungeon; encounters scale
//! them via `Enemy::scaled`.

use crate::character::Stats;
use crate::enemy::Enemy;
use crate::skill::{Skill, SkillEffect, SkillKind};

// Enemy skills ignore mana; only cooldowns gate them.

fn enemy_skill(
    id: &str,
    name: &str,
    description: &str,
    kind: SkillKind,
    mana_cost: u32,
    cooldown: u32,
    effect: SkillEffect,
) -> Skill {
    Skill {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        kind,
        mana_cost,
        cooldown,
        current_cooldown: 0,
        unlocked: true,
        required_level: 1,
        effect,
    }
}

fn template(
    id: &str,
    name: &str,
    level: u32,
    health: u32,
    stats: Stats,
    skills: Vec<Skill>,
    experience_reward: u32,
    description: &str,
) -> Enemy {
    Enemy {
        id: id.into(),
        name: name.into(),
        level,
        health,
        max_health: health,
        stats,
        skills,
        experience_reward,
        item_drops: Vec::new(),
        description: description.into(),
    }
}

/// All enemy templates, ordered by base level
pub fn enemy_pool() -> Vec<Enemy> {
    vec![
        template(
            "goblin_warrior",
            "Goblin Warrior",
            1,
            60,
            Stats::new(8, 6, 5, 3),
            vec![enemy_skill(
                "goblin_slash",
                "Goblin Slash",
                "A quick strike",
                SkillKind::Offensive,
                10,
                2,
                SkillEffect {
                    damage_multiplier: Some(1.2),
                    ..Default::default()
                },
            )],
            25,
            "A scrawny but vicious fighter",
        ),
        template(
            "orc_berserker",
            "Orc Berserker",
            3,
            100,
            Stats::new(12, 4, 10, 2),
            vec![enemy_skill(
                "orc_rage",
                "Orcish Rage",
                "A furious heavy blow",
                SkillKind::Offensive,
                15,
                3,
                SkillEffect {
                    damage_multiplier: Some(1.5),
                    duration: Some(2),
                    ..Default::default()
                },
            )],
            50,
            "Muscle and fury with no sense of self-preservation",
        ),
        template(
            "skeletal_knight",
            "Skeletal Knight",
            5,
            120,
            Stats::new(10, 8, 12, 5),
            vec![enemy_skill(
                "bone_shield",
                "Bone Shield",
                "Raises a protective shield",
                SkillKind::Defensive,
                20,
                4,
                SkillEffect {
                    shield: Some(30),
                    duration: Some(2),
                    ..Default::default()
                },
            )],
            75,
            "An undead warrior that never tires",
        ),
        template(
            "dark_mage",
            "Dark Mage",
            7,
            90,
            Stats::new(6, 12, 8, 8),
            vec![enemy_skill(
                "dark_bolt",
                "Dark Bolt",
                "A bolt of raw shadow",
                SkillKind::Offensive,
                25,
                2,
                SkillEffect {
                    damage: Some(35),
                    ..Default::default()
                },
            )],
            100,
            "A spellcaster trading defense for firepower",
        ),
        template(
            "young_dragon",
            "Young Dragon",
            10,
            200,
            Stats::new(18, 10, 16, 12),
            vec![enemy_skill(
                "dragon_breath",
                "Dragon Breath",
                "A cone of fire",
                SkillKind::Offensive,
                30,
                3,
                SkillEffect {
                    damage: Some(50),
                    damage_multiplier: Some(1.3),
                    ..Default::default()
                },
            )],
            150,
            "Young by dragon standards only",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_is_ordered_by_level() {
        let pool = enemy_pool();
        assert_eq!(pool.len(), 5);
        assert!(pool.windows(2).all(|w| w[0].level <= w[1].level));
    }

    #[test]
    fn test_templates_are_full_health_with_cold_skills() {
        for e in enemy_pool() {
            assert_eq!(e.health, e.max_health);
            assert!(e.skills.iter().all(|s| s.current_cooldown == 0 && s.unlocked));
            assert!(e.experience_reward > 0);
        }
    }
}
