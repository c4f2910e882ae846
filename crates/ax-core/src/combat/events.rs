//! Typed combat events
//!
//! Every resolved action yields a list of events. The session also renders
//! them into its running text log via `Display`, so callers can either
//! pattern-match or just print.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One observable thing that happened during combat resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    Started {
        player: String,
        player_level: u32,
        enemy: String,
        enemy_level: u32,
    },
    /// Damage landed on the target's health
    Hit {
        attacker: String,
        target: String,
        damage: u32,
        crit: bool,
    },
    /// The defender avoided the action entirely
    Dodged { defender: String, attacker: String },
    /// A shield soaked part or all of the damage
    ShieldBlocked {
        target: String,
        blocked: u32,
        through: u32,
    },
    /// A skill was cast (details follow in subsequent events)
    SkillCast { caster: String, skill: String },
    Healed { target: String, amount: u32 },
    ManaRestored { target: String, amount: u32 },
    /// A timed effect was applied to a side
    EffectApplied { target: String, description: String },
    /// The basic defend stance was taken
    Defended { actor: String },
    /// The enemy wanted a skill but all were on cooldown
    Preparing { enemy: String },
    ExperienceGained { name: String, amount: u32 },
    Victory { enemy: String },
    Defeat { player: String },
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::Started {
                player,
                player_level,
                enemy,
                enemy_level,
            } => write!(
                f,
                "{player} (level {player_level}) faces {enemy} (level {enemy_level})!"
            ),
            CombatEvent::Hit {
                attacker,
                target,
                damage,
                crit,
            } => {
                if *crit {
                    write!(f, "Critical hit! {attacker} strikes {target} for {damage} damage!")
                } else {
                    write!(f, "{attacker} strikes {target} for {damage} damage!")
                }
            }
            CombatEvent::Dodged { defender, attacker } => {
                write!(f, "{defender} dodges {attacker}'s attack!")
            }
            CombatEvent::ShieldBlocked {
                target,
                blocked,
                through,
            } => write!(
                f,
                "{target}'s shield blocks {blocked} damage, {through} breaks through!"
            ),
            CombatEvent::SkillCast { caster, skill } => write!(f, "{caster} uses {skill}!"),
            CombatEvent::Healed { target, amount } => {
                write!(f, "{target} recovers {amount} health!")
            }
            CombatEvent::ManaRestored { target, amount } => {
                write!(f, "{target} recovers {amount} mana!")
            }
            CombatEvent::EffectApplied {
                target,
                description,
            } => write!(f, "{target} gains {description}"),
            CombatEvent::Defended { actor } => {
                write!(f, "{actor} takes a defensive stance!")
            }
            CombatEvent::Preparing { enemy } => {
                write!(f, "{enemy} is preparing an attack!")
            }
            CombatEvent::ExperienceGained { name, amount } => {
                write!(f, "{name} gains {amount} experience!")
            }
            CombatEvent::Victory { enemy } => write!(f, "{enemy} is defeated!"),
            CombatEvent::Defeat { player } => write!(f, "{player} has fallen..."),
        }
    }
}
