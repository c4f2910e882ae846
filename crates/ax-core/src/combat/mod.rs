//! Turn-based combat engine
//!
//! A `CombatSession` owns the player and the enemy for the duration of one
//! encounter and walks a four-state machine: `PlayerTurn` and `EnemyTurn`
//! alternate until `Victory` or `Defeat`. Player actions are submitted by
//! the caller; the enemy turn resolves in a single synchronous step. Every
//! resolved action returns the typed events it produced, and the session
//! keeps a rendered text log of the whole fight.

mod ai;
mod damage;
mod effects;
mod events;

pub use ai::EnemyAction;
pub use damage::{dodge_chance, AttackProfile, DefenseProfile};
pub use effects::{ActiveEffects, CombatEffect, EffectKind};
pub use events::CombatEvent;

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

use crate::character::Character;
use crate::consts::{DEFEND_DODGE_BONUS, MANA_REGEN_DIVISOR};
use crate::enemy::Enemy;
use crate::item::ItemEffectKind;
use crate::rng::GameRng;
use crate::skill::{Skill, SkillKind};

/// Combat state machine phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CombatPhase {
    PlayerTurn,
    EnemyTurn,
    Victory,
    Defeat,
}

/// Terminal result of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

/// An action the player may submit during their turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    Attack,
    /// Cast a skill by id
    Skill(String),
    Defend,
}

/// Rejected player inputs; the session state is untouched when these occur
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("it is not the player's turn")]
    NotPlayerTurn,
    #[error("the enemy turn is not pending")]
    NotEnemyTurn,
    #[error("combat is already over")]
    Over,
    #[error("unknown skill '{0}'")]
    UnknownSkill(String),
    #[error("skill '{0}' is not unlocked")]
    SkillLocked(String),
    #[error("skill '{0}' is on cooldown for {1} more turns")]
    OnCooldown(String, u32),
    #[error("not enough mana for '{skill}': need {needed}, have {available}")]
    InsufficientMana {
        skill: String,
        needed: u32,
        available: u32,
    },
}

/// One combat encounter from first strike to a terminal state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatSession {
    player: Character,
    enemy: Enemy,
    phase: CombatPhase,
    turn: u32,
    player_effects: ActiveEffects,
    enemy_effects: ActiveEffects,
    log: Vec<String>,
}

impl CombatSession {
    pub fn new(player: Character, enemy: Enemy) -> Self {
        let opening = CombatEvent::Started {
            player: player.name.clone(),
            player_level: player.level,
            enemy: enemy.name.clone(),
            enemy_level: enemy.level,
        };
        Self {
            log: vec![opening.to_string()],
            player,
            enemy,
            phase: CombatPhase::PlayerTurn,
            turn: 1,
            player_effects: ActiveEffects::default(),
            enemy_effects: ActiveEffects::default(),
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn player_effects(&self) -> &ActiveEffects {
        &self.player_effects
    }

    pub fn enemy_effects(&self) -> &ActiveEffects {
        &self.enemy_effects
    }

    /// Rendered log of everything that has happened so far
    pub fn log(&self) -> &[String] {
        &self.log
    }

    /// `Some` once a terminal state has been reached
    pub fn outcome(&self) -> Option<CombatOutcome> {
        match self.phase {
            CombatPhase::Victory => Some(CombatOutcome::Victory),
            CombatPhase::Defeat => Some(CombatOutcome::Defeat),
            _ => None,
        }
    }

    /// Recover the (updated) character once the fight is over
    pub fn into_player(self) -> Character {
        self.player
    }

    /// Submit the player's action for this round
    ///
    /// Only valid in `PlayerTurn`. Invalid submissions are rejected without
    /// mutating any state and without consuming the turn.
    pub fn player_action(
        &mut self,
        action: &PlayerAction,
        rng: &mut GameRng,
    ) -> Result<Vec<CombatEvent>, CombatError> {
        match self.phase {
            CombatPhase::PlayerTurn => {}
            CombatPhase::EnemyTurn => return Err(CombatError::NotPlayerTurn),
            _ => return Err(CombatError::Over),
        }

        let mut events = Vec::new();
        match action {
            PlayerAction::Attack => {
                self.player_strike(None, 1.0, 0, &mut events, rng);
            }
            PlayerAction::Skill(id) => {
                let skill = self.validate_player_skill(id)?;
                self.player.spend_mana(skill.mana_cost);
                if let Some(s) = self.player.skills.iter_mut().find(|s| s.id == *id) {
                    s.current_cooldown = s.cooldown;
                }
                events.push(CombatEvent::SkillCast {
                    caster: self.player.name.clone(),
                    skill: skill.name.clone(),
                });
                self.resolve_player_skill(&skill, &mut events, rng);
            }
            PlayerAction::Defend => {
                self.player_effects.apply(defend_boost());
                events.push(CombatEvent::Defended {
                    actor: self.player.name.clone(),
                });
            }
        }

        if self.enemy.is_dead() {
            self.award_victory(&mut events, rng);
        } else {
            self.phase = CombatPhase::EnemyTurn;
        }
        self.append_log(&events);
        Ok(events)
    }

    /// Resolve the enemy's turn and the end-of-round bookkeeping
    ///
    /// Only valid in `EnemyTurn`. Returns the events of the enemy action
    /// and, when the player survives, control passes back to `PlayerTurn`
    /// with cooldowns and effect durations ticked and player mana
    /// regenerated.
    pub fn enemy_turn(&mut self, rng: &mut GameRng) -> Result<Vec<CombatEvent>, CombatError> {
        match self.phase {
            CombatPhase::EnemyTurn => {}
            CombatPhase::PlayerTurn => return Err(CombatError::NotEnemyTurn),
            _ => return Err(CombatError::Over),
        }

        let mut events = Vec::new();
        match ai::choose_action(&self.enemy, rng) {
            EnemyAction::Attack => {
                self.enemy_strike(None, 1.0, 0, &mut events, rng);
            }
            EnemyAction::Skill => {
                let ready: Vec<usize> = self
                    .enemy
                    .skills
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.current_cooldown == 0)
                    .map(|(i, _)| i)
                    .collect();
                match rng.choose(&ready).copied() {
                    Some(i) => {
                        let skill = self.enemy.skills[i].clone();
                        self.enemy.skills[i].current_cooldown = skill.cooldown;
                        events.push(CombatEvent::SkillCast {
                            caster: self.enemy.name.clone(),
                            skill: skill.name.clone(),
                        });
                        self.resolve_enemy_skill(&skill, &mut events, rng);
                    }
                    None => events.push(CombatEvent::Preparing {
                        enemy: self.enemy.name.clone(),
                    }),
                }
            }
            EnemyAction::Defend => {
                self.enemy_effects.apply(defend_boost());
                events.push(CombatEvent::Defended {
                    actor: self.enemy.name.clone(),
                });
            }
        }

        if self.player.is_dead() {
            events.push(CombatEvent::Defeat {
                player: self.player.name.clone(),
            });
            self.phase = CombatPhase::Defeat;
        } else {
            self.end_round();
        }
        self.append_log(&events);
        Ok(events)
    }

    fn validate_player_skill(&self, id: &str) -> Result<Skill, CombatError> {
        let skill = self
            .player
            .skills
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| CombatError::UnknownSkill(id.to_string()))?;
        if !skill.unlocked {
            return Err(CombatError::SkillLocked(id.to_string()));
        }
        if skill.current_cooldown > 0 {
            return Err(CombatError::OnCooldown(
                id.to_string(),
                skill.current_cooldown,
            ));
        }
        if self.player.mana < skill.mana_cost {
            return Err(CombatError::InsufficientMana {
                skill: id.to_string(),
                needed: skill.mana_cost,
                available: self.player.mana,
            });
        }
        Ok(skill.clone())
    }

    fn resolve_player_skill(
        &mut self,
        skill: &Skill,
        events: &mut Vec<CombatEvent>,
        rng: &mut GameRng,
    ) {
        match skill.kind {
            SkillKind::Offensive => {
                let multiplier = skill.effect.damage_multiplier.unwrap_or(1.0);
                let extra_crit = skill.effect.crit_bonus.unwrap_or(0) as i32;
                self.player_strike(skill.effect.damage, multiplier, extra_crit, events, rng);
            }
            SkillKind::Defensive => {
                let duration = skill.effect.duration.unwrap_or(1);
                if let Some(shield) = skill.effect.shield {
                    let effect = shield_effect(shield, duration);
                    events.push(CombatEvent::EffectApplied {
                        target: self.player.name.clone(),
                        description: effect.description.clone(),
                    });
                    self.player_effects.apply(effect);
                }
                if let Some(bonus) = skill.effect.dodge_bonus {
                    let effect = dodge_effect(bonus, duration);
                    events.push(CombatEvent::EffectApplied {
                        target: self.player.name.clone(),
                        description: effect.description.clone(),
                    });
                    self.player_effects.apply(effect);
                }
            }
            SkillKind::Support => {
                if let Some(percent) = skill.effect.heal_percent {
                    let mut amount = (self.player.max_health as f64 * percent).floor() as u32;
                    let bonus = self.player.equipment_bonus(ItemEffectKind::HealBonus);
                    if bonus > 0 {
                        amount += amount * bonus as u32 / 100;
                    }
                    self.player.heal(amount);
                    events.push(CombatEvent::Healed {
                        target: self.player.name.clone(),
                        amount,
                    });
                }
                if let Some(amount) = skill.effect.restore_mana {
                    self.player.restore_mana(amount);
                    events.push(CombatEvent::ManaRestored {
                        target: self.player.name.clone(),
                        amount,
                    });
                }
            }
        }
    }

    fn resolve_enemy_skill(
        &mut self,
        skill: &Skill,
        events: &mut Vec<CombatEvent>,
        rng: &mut GameRng,
    ) {
        match skill.kind {
            SkillKind::Offensive => {
                let multiplier = skill.effect.damage_multiplier.unwrap_or(1.0);
                let extra_crit = skill.effect.crit_bonus.unwrap_or(0) as i32;
                self.enemy_strike(skill.effect.damage, multiplier, extra_crit, events, rng);
            }
            SkillKind::Defensive => {
                let duration = skill.effect.duration.unwrap_or(1);
                if let Some(shield) = skill.effect.shield {
                    let effect = shield_effect(shield, duration);
                    events.push(CombatEvent::EffectApplied {
                        target: self.enemy.name.clone(),
                        description: effect.description.clone(),
                    });
                    self.enemy_effects.apply(effect);
                }
                if let Some(bonus) = skill.effect.dodge_bonus {
                    let effect = dodge_effect(bonus, duration);
                    events.push(CombatEvent::EffectApplied {
                        target: self.enemy.name.clone(),
                        description: effect.description.clone(),
                    });
                    self.enemy_effects.apply(effect);
                }
            }
            SkillKind::Support => {
                if let Some(percent) = skill.effect.heal_percent {
                    let amount = (self.enemy.max_health as f64 * percent).floor() as u32;
                    self.enemy.heal(amount);
                    events.push(CombatEvent::Healed {
                        target: self.enemy.name.clone(),
                        amount,
                    });
                }
            }
        }
    }

    /// Player attacks the enemy: dodge roll, then damage, then shield
    fn player_strike(
        &mut self,
        fixed_damage: Option<u32>,
        multiplier: f64,
        extra_crit: i32,
        events: &mut Vec<CombatEvent>,
        rng: &mut GameRng,
    ) {
        let defense = DefenseProfile {
            dexterity: self.enemy.stats.dexterity,
            luck: self.enemy.stats.luck,
            dodge_bonus: self.enemy_effects.value_of(EffectKind::DodgeBoost) as i32,
        };
        if damage::roll_dodge(&defense, rng) {
            events.push(CombatEvent::Dodged {
                defender: self.enemy.name.clone(),
                attacker: self.player.name.clone(),
            });
            return;
        }

        let (amount, crit) = match fixed_damage {
            Some(d) => (d, false),
            None => {
                let profile = AttackProfile {
                    strength: self.player.stats.strength,
                    dexterity: self.player.stats.dexterity,
                    luck: self.player.stats.luck,
                    damage_bonus: self.player.equipment_bonus(ItemEffectKind::DamageBonus)
                        + self.player_effects.value_of(EffectKind::DamageBoost) as i32,
                    crit_bonus: self.player.equipment_bonus(ItemEffectKind::CritChance)
                        + self.player_effects.value_of(EffectKind::CritBoost) as i32
                        + extra_crit,
                };
                let roll = damage::roll_attack(&profile, multiplier, rng);
                (roll.damage, roll.crit)
            }
        };

        let (blocked, through) = self.enemy_effects.absorb(amount);
        self.enemy.take_damage(through);
        if blocked > 0 {
            events.push(CombatEvent::ShieldBlocked {
                target: self.enemy.name.clone(),
                blocked,
                through,
            });
        } else {
            events.push(CombatEvent::Hit {
                attacker: self.player.name.clone(),
                target: self.enemy.name.clone(),
                damage: through,
                crit,
            });
        }
    }

    /// Enemy attacks the player: same sequence, player-side bonuses apply
    fn enemy_strike(
        &mut self,
        fixed_damage: Option<u32>,
        multiplier: f64,
        extra_crit: i32,
        events: &mut Vec<CombatEvent>,
        rng: &mut GameRng,
    ) {
        let defense = DefenseProfile {
            dexterity: self.player.stats.dexterity,
            luck: self.player.stats.luck,
            dodge_bonus: self.player.equipment_bonus(ItemEffectKind::DodgeChance)
                + self.player_effects.value_of(EffectKind::DodgeBoost) as i32,
        };
        if damage::roll_dodge(&defense, rng) {
            events.push(CombatEvent::Dodged {
                defender: self.player.name.clone(),
                attacker: self.enemy.name.clone(),
            });
            return;
        }

        let (amount, crit) = match fixed_damage {
            Some(d) => (d, false),
            None => {
                let profile = AttackProfile {
                    strength: self.enemy.stats.strength,
                    dexterity: self.enemy.stats.dexterity,
                    luck: self.enemy.stats.luck,
                    damage_bonus: self.enemy_effects.value_of(EffectKind::DamageBoost) as i32,
                    crit_bonus: self.enemy_effects.value_of(EffectKind::CritBoost) as i32
                        + extra_crit,
                };
                let roll = damage::roll_attack(&profile, multiplier, rng);
                (roll.damage, roll.crit)
            }
        };

        let (blocked, through) = self.player_effects.absorb(amount);
        self.player.take_damage(through);
        if blocked > 0 {
            events.push(CombatEvent::ShieldBlocked {
                target: self.player.name.clone(),
                blocked,
                through,
            });
        } else {
            events.push(CombatEvent::Hit {
                attacker: self.enemy.name.clone(),
                target: self.player.name.clone(),
                damage: through,
                crit,
            });
        }
    }

    fn award_victory(&mut self, events: &mut Vec<CombatEvent>, rng: &mut GameRng) {
        let base = self.enemy.experience_reward;
        let level_bonus = (base as f64 * 0.1 * self.player.level as f64).floor() as u32;
        let luck_bonus = rng.rn2(self.player.stats.luck.max(0) as u32);
        let gained = base + level_bonus + luck_bonus;
        self.player.experience += gained;

        for item in self.enemy.item_drops.clone() {
            self.player.inventory.push(item);
        }

        events.push(CombatEvent::Victory {
            enemy: self.enemy.name.clone(),
        });
        events.push(CombatEvent::ExperienceGained {
            name: self.player.name.clone(),
            amount: gained,
        });
        self.phase = CombatPhase::Victory;
    }

    /// End-of-round bookkeeping after the enemy acts
    ///
    /// Only the player regenerates mana; enemies have no mana economy.
    fn end_round(&mut self) {
        self.player.restore_mana(self.player.max_mana / MANA_REGEN_DIVISOR);
        for s in &mut self.player.skills {
            s.tick_cooldown();
        }
        for s in &mut self.enemy.skills {
            s.tick_cooldown();
        }
        self.player_effects.tick();
        self.enemy_effects.tick();
        self.turn += 1;
        self.phase = CombatPhase::PlayerTurn;
    }

    fn append_log(&mut self, events: &[CombatEvent]) {
        self.log.extend(events.iter().map(|e| e.to_string()));
    }
}

fn defend_boost() -> CombatEffect {
    dodge_effect(DEFEND_DODGE_BONUS, 1)
}

fn shield_effect(value: u32, duration: u32) -> CombatEffect {
    CombatEffect {
        kind: EffectKind::Shield,
        value,
        duration,
        description: format!("a shield ({value} HP)"),
    }
}

fn dodge_effect(value: u32, duration: u32) -> CombatEffect {
    CombatEffect {
        kind: EffectKind::DodgeBoost,
        value,
        duration,
        description: format!("increased evasion (+{value}%)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Stats;
    use crate::data;

    fn player() -> Character {
        let mut rng = GameRng::new(100);
        let mut c = Character::create("Hero", Stats::new(10, 10, 10, 10), &mut rng);
        for kind in [
            crate::item::ItemKind::Weapon,
            crate::item::ItemKind::Armor,
            crate::item::ItemKind::Accessory,
        ] {
            let _ = c.unequip(kind);
        }
        c
    }

    fn goblin() -> Enemy {
        data::enemy_pool()[0].clone()
    }

    fn inert_enemy() -> Enemy {
        // Cannot dodge, cannot crit, no skills
        let mut e = goblin();
        e.stats = Stats::new(1, 0, 0, 0);
        e.skills.clear();
        e
    }

    #[test]
    fn test_rejections_do_not_mutate_state() {
        let mut rng = GameRng::new(1);
        let mut session = CombatSession::new(player(), goblin());
        let snapshot_hp = session.player().health;
        let snapshot_mana = session.player().mana;

        assert_eq!(
            session.player_action(&PlayerAction::Skill("no_such".into()), &mut rng),
            Err(CombatError::UnknownSkill("no_such".into()))
        );
        assert_eq!(session.enemy_turn(&mut rng), Err(CombatError::NotEnemyTurn));
        assert_eq!(session.player().health, snapshot_hp);
        assert_eq!(session.player().mana, snapshot_mana);
        assert_eq!(session.phase(), CombatPhase::PlayerTurn);
        assert_eq!(session.turn(), 1);
    }

    #[test]
    fn test_skill_rejected_when_out_of_mana() {
        let mut rng = GameRng::new(1);
        let mut p = player();
        p.mana = 0;
        let mut session = CombatSession::new(p, goblin());
        let err = session
            .player_action(&PlayerAction::Skill("power_strike".into()), &mut rng)
            .unwrap_err();
        assert!(matches!(err, CombatError::InsufficientMana { .. }));
    }

    #[test]
    fn test_skill_rejected_while_on_cooldown() {
        let mut rng = GameRng::new(2);
        let mut session = CombatSession::new(player(), inert_enemy());
        session
            .player_action(&PlayerAction::Skill("power_strike".into()), &mut rng)
            .unwrap();
        if session.phase() == CombatPhase::EnemyTurn {
            session.enemy_turn(&mut rng).unwrap();
        }
        if session.outcome().is_none() {
            // Cooldown 2 ticked once, still 1
            let err = session
                .player_action(&PlayerAction::Skill("power_strike".into()), &mut rng)
                .unwrap_err();
            assert!(matches!(err, CombatError::OnCooldown(_, 1)));
        }
    }

    #[test]
    fn test_locked_skill_is_rejected() {
        let mut rng = GameRng::new(1);
        let mut p = player();
        let mut locked = data::skill_catalog()
            .into_iter()
            .find(|s| s.id == "energy_shield")
            .unwrap();
        locked.unlocked = false;
        p.skills.push(locked);
        let mut session = CombatSession::new(p, goblin());
        assert_eq!(
            session.player_action(&PlayerAction::Skill("energy_shield".into()), &mut rng),
            Err(CombatError::SkillLocked("energy_shield".into()))
        );
    }

    #[test]
    fn test_attack_alternates_phases() {
        let mut rng = GameRng::new(5);
        let mut session = CombatSession::new(player(), goblin());
        session.player_action(&PlayerAction::Attack, &mut rng).unwrap();
        if session.outcome().is_none() {
            assert_eq!(session.phase(), CombatPhase::EnemyTurn);
            session.enemy_turn(&mut rng).unwrap();
            if session.outcome().is_none() {
                assert_eq!(session.phase(), CombatPhase::PlayerTurn);
                assert_eq!(session.turn(), 2);
            }
        }
    }

    #[test]
    fn test_fight_terminates_within_bounded_rounds() {
        for seed in 0..20 {
            let mut rng = GameRng::new(seed);
            let mut session = CombatSession::new(player(), goblin());
            for _ in 0..300 {
                if session.outcome().is_some() {
                    break;
                }
                match session.phase() {
                    CombatPhase::PlayerTurn => {
                        session.player_action(&PlayerAction::Attack, &mut rng).unwrap();
                    }
                    CombatPhase::EnemyTurn => {
                        session.enemy_turn(&mut rng).unwrap();
                    }
                    _ => unreachable!(),
                }
            }
            assert!(session.outcome().is_some(), "seed {seed} never terminated");
            // Pools stay in bounds at rest
            assert!(session.player().health <= session.player().max_health);
            assert!(session.player().mana <= session.player().max_mana);
        }
    }

    #[test]
    fn test_victory_awards_at_least_base_experience() {
        let mut rng = GameRng::new(8);
        let mut enemy = inert_enemy();
        enemy.health = 1;
        enemy.max_health = 1;
        let reward = enemy.experience_reward;
        let p = player();
        let exp_before = p.experience;

        let mut session = CombatSession::new(p, enemy);
        let events = session.player_action(&PlayerAction::Attack, &mut rng).unwrap();
        assert_eq!(session.outcome(), Some(CombatOutcome::Victory));
        assert!(events.iter().any(|e| matches!(e, CombatEvent::Victory { .. })));
        let gained = session.player().experience - exp_before;
        assert!(gained >= reward);
    }

    #[test]
    fn test_dodged_action_leaves_health_untouched() {
        // Max out player dodge; every enemy attack must be negated
        let mut rng = GameRng::new(21);
        let mut p = player();
        p.stats.dexterity = 200;
        let mut session = CombatSession::new(p, inert_enemy());
        for _ in 0..40 {
            if session.outcome().is_some() {
                break;
            }
            session.player_action(&PlayerAction::Defend, &mut rng).unwrap();
            if session.outcome().is_none() {
                let hp = session.player().health;
                let events = session.enemy_turn(&mut rng).unwrap();
                for e in &events {
                    if matches!(e, CombatEvent::Dodged { .. }) {
                        assert_eq!(session.player().health, hp);
                    }
                }
            }
        }
    }

    #[test]
    fn test_shield_absorbs_before_health() {
        let mut rng = GameRng::new(3);
        let mut p = player();
        p.skills = data::skill_catalog()
            .into_iter()
            .filter(|s| s.id == "energy_shield")
            .map(|mut s| {
                s.unlocked = true;
                s
            })
            .collect();
        // Make the player undodgeable-by-proxy: enemy always hits hard
        let mut enemy = inert_enemy();
        enemy.stats.strength = 20;
        p.stats.dexterity = 0;
        p.stats.luck = 0;

        let mut session = CombatSession::new(p, enemy);
        session
            .player_action(&PlayerAction::Skill("energy_shield".into()), &mut rng)
            .unwrap();
        assert_eq!(session.player_effects().value_of(EffectKind::Shield), 50);

        let hp = session.player().health;
        let events = session.enemy_turn(&mut rng).unwrap();
        let blocked: u32 = events
            .iter()
            .filter_map(|e| match e {
                CombatEvent::ShieldBlocked { blocked, .. } => Some(*blocked),
                _ => None,
            })
            .sum();
        if blocked > 0 {
            // Shield took the hit in full (enemy damage < 50)
            assert_eq!(session.player().health, hp);
        }
    }

    #[test]
    fn test_defend_applies_one_turn_dodge_boost() {
        let mut rng = GameRng::new(4);
        let mut session = CombatSession::new(player(), inert_enemy());
        session.player_action(&PlayerAction::Defend, &mut rng).unwrap();
        assert_eq!(
            session.player_effects().value_of(EffectKind::DodgeBoost),
            DEFEND_DODGE_BONUS
        );
        session.enemy_turn(&mut rng).unwrap();
        // Expired at end of round
        assert_eq!(session.player_effects().value_of(EffectKind::DodgeBoost), 0);
    }

    #[test]
    fn test_player_mana_regenerates_each_round() {
        let mut rng = GameRng::new(6);
        let mut p = player();
        p.mana = 0;
        let regen = p.max_mana / 10;
        let mut session = CombatSession::new(p, inert_enemy());
        session.player_action(&PlayerAction::Attack, &mut rng).unwrap();
        if session.outcome().is_none() {
            session.enemy_turn(&mut rng).unwrap();
            if session.outcome().is_none() {
                assert_eq!(session.player().mana, regen);
            }
        }
    }

    #[test]
    fn test_heal_skill_restores_fraction_of_max() {
        let mut rng = GameRng::new(7);
        let mut p = player();
        p.health = 1;
        let expected = p.health + (p.max_health as f64 * 0.4).floor() as u32;
        let mut session = CombatSession::new(p, inert_enemy());
        let events = session
            .player_action(&PlayerAction::Skill("heal".into()), &mut rng)
            .unwrap();
        assert!(events.iter().any(|e| matches!(e, CombatEvent::Healed { .. })));
        assert_eq!(session.player().health, expected.min(session.player().max_health));
    }

    #[test]
    fn test_log_accumulates_rendered_events() {
        let mut rng = GameRng::new(9);
        let mut session = CombatSession::new(player(), goblin());
        assert_eq!(session.log().len(), 1);
        let events = session.player_action(&PlayerAction::Attack, &mut rng).unwrap();
        assert_eq!(session.log().len(), 1 + events.len());
    }
}
