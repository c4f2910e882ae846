//! Damage, crit, and dodge formulas
//!
//! Pure functions over flattened attacker/defender profiles. The session
//! builds a profile from whichever side is acting, folding in equipment and
//! active-effect bonuses, so the formulas stay symmetric between player and
//! enemy.

use crate::consts::{CRIT_DENOMINATOR, CRIT_NUMERATOR, DODGE_CAP};
use crate::rng::GameRng;

/// Attacker-side numbers feeding the damage formula
#[derive(Debug, Clone, Copy)]
pub struct AttackProfile {
    pub strength: i32,
    pub dexterity: i32,
    pub luck: i32,
    /// Flat damage from equipment and damage-boost effects
    pub damage_bonus: i32,
    /// Percent crit chance from equipment and skill bonuses
    pub crit_bonus: i32,
}

/// Defender-side numbers feeding the dodge formula
#[derive(Debug, Clone, Copy)]
pub struct DefenseProfile {
    pub dexterity: i32,
    pub luck: i32,
    /// Percent dodge from equipment and dodge-boost effects
    pub dodge_bonus: i32,
}

/// Result of one damage roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRoll {
    pub damage: u32,
    pub crit: bool,
}

/// Roll damage for one attack or offensive skill
///
/// `multiplier` comes from the skill (1.0 for a basic attack). Base damage
/// floors at 1 so even a hopeless attacker chips away; variance then scales
/// by 0.8 to 1.2 and a crit multiplies the result by 3/2.
pub fn roll_attack(attacker: &AttackProfile, multiplier: f64, rng: &mut GameRng) -> AttackRoll {
    let base_attack = attacker.strength + attacker.damage_bonus;
    let base_damage =
        (base_attack as f64 * multiplier + (attacker.luck / 4) as f64).max(1.0);
    let mut damage = (base_damage * rng.variance()).floor() as u32;

    let crit_chance = (attacker.dexterity / 3 + attacker.luck / 4 + attacker.crit_bonus).max(0);
    let crit = rng.percent(crit_chance as u32);
    if crit {
        damage = damage * CRIT_NUMERATOR / CRIT_DENOMINATOR;
    }
    AttackRoll { damage, crit }
}

/// Percent chance the defender avoids an incoming action entirely
pub fn dodge_chance(defender: &DefenseProfile) -> u32 {
    let chance = defender.dexterity / 2 + defender.luck / 6 + defender.dodge_bonus;
    chance.clamp(0, DODGE_CAP as i32) as u32
}

/// Roll the dodge; a success negates the whole action
pub fn roll_dodge(defender: &DefenseProfile, rng: &mut GameRng) -> bool {
    rng.percent(dodge_chance(defender))
}
