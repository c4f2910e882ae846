//! The player skill catalog

use crate::skill::{Skill, SkillEffect, SkillKind};

fn skill(
    id: &str,
    name: &str,
    description: &str,
    kind: SkillKind,
    mana_cost: u32,
    cooldown: u32,
    unlocked: bool,
    required_level: u32,
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
        unlocked,
        required_level,
        effect,
    }
}

/// Every skill a player can learn, in unlock order within each class
pub fn skill_catalog() -> Vec<Skill> {
    vec![
        skill(
            "power_strike",
            "Power Strike",
            "Deals 150% normal damage",
            SkillKind::Offensive,
            15,
            2,
            true,
            1,
            SkillEffect {
                damage_multiplier: Some(1.5),
                ..Default::default()
            },
        ),
        skill(
            "critical_strike",
            "Critical Strike",
            "Raises critical hit chance by 50% for this attack",
            SkillKind::Offensive,
            20,
            3,
            false,
            3,
            SkillEffect {
                crit_bonus: Some(50),
                damage_multiplier: Some(1.2),
                ..Default::default()
            },
        ),
        skill(
            "berserker_rage",
            "Berserker Rage",
            "A furious blow at 175% damage",
            SkillKind::Offensive,
            30,
            5,
            false,
            7,
            SkillEffect {
                damage_multiplier: Some(1.75),
                duration: Some(3),
                ..Default::default()
            },
        ),
        skill(
            "evasion",
            "Evasion",
            "Raises dodge chance by 40% for the next turn",
            SkillKind::Defensive,
            10,
            2,
            true,
            1,
            SkillEffect {
                dodge_bonus: Some(40),
                duration: Some(1),
                ..Default::default()
            },
        ),
        skill(
            "energy_shield",
            "Energy Shield",
            "Conjures a shield absorbing the next 50 damage",
            SkillKind::Defensive,
            25,
            4,
            false,
            4,
            SkillEffect {
                shield: Some(50),
                duration: Some(3),
                ..Default::default()
            },
        ),
        skill(
            "iron_skin",
            "Iron Skin",
            "Hardened skin absorbs up to 75 damage for 4 turns",
            SkillKind::Defensive,
            35,
            6,
            false,
            8,
            SkillEffect {
                shield: Some(75),
                duration: Some(4),
                ..Default::default()
            },
        ),
        skill(
            "heal",
            "Heal",
            "Restores 40% of maximum health",
            SkillKind::Support,
            20,
            3,
            true,
            1,
            SkillEffect {
                heal_percent: Some(0.4),
                ..Default::default()
            },
        ),
        skill(
            "mana_surge",
            "Mana Surge",
            "Restores 50 mana",
            SkillKind::Support,
            0,
            4,
            false,
            2,
            SkillEffect {
                restore_mana: Some(50),
                ..Default::default()
            },
        ),
        skill(
            "meditation",
            "Meditation",
            "Restores health over 3 turns",
            SkillKind::Support,
            15,
            5,
            false,
            6,
            SkillEffect {
                heal_percent: Some(0.15),
                duration: Some(3),
                ..Default::default()
            },
        ),
    ]
}

/// The skills a fresh character begins with, already unlocked
pub fn starting_skills() -> Vec<Skill> {
    skill_catalog()
        .into_iter()
        .filter(|s| s.required_level == 1)
        .collect()
}
