//! Enemy action selection
//!
//! The AI builds a small candidate set each round and picks uniformly from
//! it, so a wounded enemy merely becomes likely to defend rather than
//! certain to.

use crate::consts::{AI_DEFEND_CHANCE, AI_DEFEND_THRESHOLD, AI_SKILL_CHANCE};
use crate::enemy::Enemy;
use crate::rng::GameRng;

/// What the enemy decided to do this round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAction {
    Attack,
    /// Use a random off-cooldown skill; resolution falls back to a
    /// "preparing" no-op when every skill is cooling down
    Skill,
    Defend,
}

/// Choose the enemy's action for this round
pub fn choose_action(enemy: &Enemy, rng: &mut GameRng) -> EnemyAction {
    let mut candidates = vec![EnemyAction::Attack];
    if !enemy.skills.is_empty() && rng.chance(AI_SKILL_CHANCE) {
        candidates.push(EnemyAction::Skill);
    }
    if enemy.health_fraction() < AI_DEFEND_THRESHOLD && rng.chance(AI_DEFEND_CHANCE) {
        candidates.push(EnemyAction::Defend);
    }
    rng.choose(&candidates).copied().unwrap_or(EnemyAction::Attack)
}
