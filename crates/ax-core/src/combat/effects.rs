//! Temporary combat effects
//!
//! Effects live on one combatant's side for a fixed number of rounds.
//! Applying an effect replaces any existing effect of the same kind rather
//! than stacking with it.

use serde::{Deserialize, Serialize};
use strum::Display;

/// What an active effect modifies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EffectKind {
    /// Absorbs incoming damage; `value` is the remaining pool
    Shield,
    /// Percent added to dodge chance
    DodgeBoost,
    /// Percent added to crit chance
    CritBoost,
    /// Flat damage added to attacks
    DamageBoost,
}

/// A single timed effect on one combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEffect {
    pub kind: EffectKind,
    pub value: u32,
    /// Rounds left; ticked down at end of each full round
    pub duration: u32,
    pub description: String,
}

/// The set of effects active on one side
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffects {
    effects: Vec<CombatEffect>,
}

impl ActiveEffects {
    /// Apply an effect, replacing any existing one of the same kind
    pub fn apply(&mut self, effect: CombatEffect) {
        self.effects.retain(|e| e.kind != effect.kind);
        self.effects.push(effect);
    }

    /// Current value of an effect kind, 0 when absent
    pub fn value_of(&self, kind: EffectKind) -> u32 {
        self.effects
            .iter()
            .find(|e| e.kind == kind)
            .map_or(0, |e| e.value)
    }

    /// Absorb incoming damage into an active shield
    ///
    /// Returns `(blocked, passed_through)`. Without a shield all damage
    /// passes through untouched.
    pub fn absorb(&mut self, damage: u32) -> (u32, u32) {
        match self
            .effects
            .iter_mut()
            .find(|e| e.kind == EffectKind::Shield && e.value > 0)
        {
            Some(shield) => {
                let blocked = damage.min(shield.value);
                shield.value -= blocked;
                (blocked, damage - blocked)
            }
            None => (0, damage),
        }
    }

    /// End-of-round tick: decrement durations, drop expired effects
    pub fn tick(&mut self) {
        for e in &mut self.effects {
            e.duration = e.duration.saturating_sub(1);
        }
        self.effects.retain(|e| e.duration > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatEffect> {
        self.effects.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effect(kind: EffectKind, value: u32, duration: u32) -> CombatEffect {
        CombatEffect {
            kind,
            value,
            duration,
            description: String::new(),
        }
    }

    #[test]
    fn test_apply_replaces_same_kind() {
        let mut fx = ActiveEffects::default();
        fx.apply(effect(EffectKind::DodgeBoost, 25, 1));
        fx.apply(effect(EffectKind::DodgeBoost, 40, 2));
        assert_eq!(fx.value_of(EffectKind::DodgeBoost), 40);
        assert_eq!(fx.iter().count(), 1);
    }

    #[test]
    fn test_shield_absorbs_partially() {
        let mut fx = ActiveEffects::default();
        fx.apply(effect(EffectKind::Shield, 30, 3));

        assert_eq!(fx.absorb(10), (10, 0));
        assert_eq!(fx.value_of(EffectKind::Shield), 20);
        assert_eq!(fx.absorb(50), (20, 30));
        assert_eq!(fx.value_of(EffectKind::Shield), 0);
        // Depleted shield no longer blocks
        assert_eq!(fx.absorb(5), (0, 5));
    }

    #[test]
    fn test_tick_expires_effects() {
        let mut fx = ActiveEffects::default();
        fx.apply(effect(EffectKind::DodgeBoost, 25, 1));
        fx.apply(effect(EffectKind::Shield, 50, 2));
        fx.tick();
        assert_eq!(fx.value_of(EffectKind::DodgeBoost), 0);
        assert_eq!(fx.value_of(EffectKind::Shield), 50);
        fx.tick();
        assert!(fx.is_empty());
    }
}
