//! Level-up processing and point spending
//!
//! Experience thresholds follow a geometric curve; a single large award can
//! cross several thresholds, so level-up processing loops until the
//! remaining experience is below the next threshold.

use thiserror::Error;

use super::{Character, StatKind, Stats};
use crate::consts::{
    BASE_EXPERIENCE_TO_NEXT, EXPERIENCE_CURVE, HEALTH_PER_ENDURANCE, MANA_PER_ENDURANCE,
    SKILL_POINTS_PER_LEVEL, STAT_POINTS_PER_LEVEL,
};
use crate::data;

/// Errors from point-spending operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProgressionError {
    #[error("no stat points available")]
    NoStatPoints,
    #[error("no skill points available")]
    NoSkillPoints,
    #[error("stat cannot go below its pre-allocation value")]
    BelowFloor,
    #[error("unknown skill '{0}'")]
    UnknownSkill(String),
    #[error("skill '{0}' requires level {1}")]
    LevelTooLow(String, u32),
    #[error("skill '{0}' is already unlocked")]
    AlreadyUnlocked(String),
}

/// Experience needed to go from `level` to `level + 1`
pub fn experience_to_next(level: u32) -> u32 {
    (BASE_EXPERIENCE_TO_NEXT as f64 * EXPERIENCE_CURVE.powi(level as i32 - 1)).floor() as u32
}

/// Summary of what a round of level-up processing granted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelUpSummary {
    pub levels_gained: u32,
    pub stat_points_granted: u32,
    pub skill_points_granted: u32,
}

impl Character {
    /// Consume banked experience, applying every level the character earned
    ///
    /// Per level: +1 to every base stat, +3 allocatable stat points, +1
    /// skill point, pool growth from the new endurance, and a full restore.
    /// Afterwards, newly reachable catalog skills are added locked, ready
    /// for point spending. Calling this again with experience below the
    /// threshold is a no-op.
    pub fn apply_level_ups(&mut self) -> LevelUpSummary {
        let mut summary = LevelUpSummary::default();

        while self.experience >= self.experience_to_next {
            self.experience -= self.experience_to_next;
            self.level += 1;
            summary.levels_gained += 1;

            self.experience_to_next = experience_to_next(self.level);

            self.available_stat_points += STAT_POINTS_PER_LEVEL;
            self.available_skill_points += SKILL_POINTS_PER_LEVEL;
            summary.stat_points_granted += STAT_POINTS_PER_LEVEL;
            summary.skill_points_granted += SKILL_POINTS_PER_LEVEL;

            for kind in StatKind::ALL {
                *self.stats.get_mut(kind) += 1;
            }

            let health_increase = 15 + self.stats.endurance.max(0) as u32;
            let mana_increase = 10 + (self.stats.endurance.max(0) as u32) / 2;
            self.max_health += health_increase;
            self.max_mana += mana_increase;
            self.health = self.max_health;
            self.mana = self.max_mana;
        }

        if summary.levels_gained > 0 {
            self.learn_reachable_skills();
        }
        summary
    }

    /// Add catalog skills whose level gate the character now meets
    ///
    /// New skills arrive locked; unlocking costs a skill point.
    fn learn_reachable_skills(&mut self) {
        for skill in data::skill_catalog() {
            if skill.required_level <= self.level && !self.skills.iter().any(|s| s.id == skill.id)
            {
                let mut skill = skill;
                skill.unlocked = false;
                self.skills.push(skill);
            }
        }
    }

    /// Spend one stat point on a stat
    pub fn allocate_stat_point(&mut self, kind: StatKind) -> Result<(), ProgressionError> {
        if self.available_stat_points == 0 {
            return Err(ProgressionError::NoStatPoints);
        }
        self.available_stat_points -= 1;
        *self.stats.get_mut(kind) += 1;
        if kind == StatKind::Endurance {
            self.max_health += HEALTH_PER_ENDURANCE;
            self.max_mana += MANA_PER_ENDURANCE;
            self.health += HEALTH_PER_ENDURANCE;
            self.mana += MANA_PER_ENDURANCE;
        }
        Ok(())
    }

    /// Take back a stat point, refusing to cross the given floor
    ///
    /// The floor is the stat block as it stood before the current
    /// allocation round (automatic level gains are not refundable).
    pub fn refund_stat_point(
        &mut self,
        kind: StatKind,
        floor: &Stats,
    ) -> Result<(), ProgressionError> {
        if self.stats.get(kind) <= floor.get(kind) {
            return Err(ProgressionError::BelowFloor);
        }
        *self.stats.get_mut(kind) -= 1;
        self.available_stat_points += 1;
        if kind == StatKind::Endurance {
            self.max_health = self.max_health.saturating_sub(HEALTH_PER_ENDURANCE).max(1);
            self.max_mana = self.max_mana.saturating_sub(MANA_PER_ENDURANCE);
            self.health = self.health.min(self.max_health);
            self.mana = self.mana.min(self.max_mana);
        }
        Ok(())
    }

    /// Spend one skill point unlocking a known skill
    pub fn unlock_skill(&mut self, skill_id: &str) -> Result<(), ProgressionError> {
        if self.available_skill_points == 0 {
            return Err(ProgressionError::NoSkillPoints);
        }
        let level = self.level;
        let skill = self
            .skills
            .iter_mut()
            .find(|s| s.id == skill_id)
            .ok_or_else(|| ProgressionError::UnknownSkill(skill_id.to_string()))?;
        if skill.unlocked {
            return Err(ProgressionError::AlreadyUnlocked(skill_id.to_string()));
        }
        if skill.required_level > level {
            return Err(ProgressionError::LevelTooLow(
                skill_id.to_string(),
                skill.required_level,
            ));
        }
        skill.unlocked = true;
        self.available_skill_points -= 1;
        Ok(())
    }
}
