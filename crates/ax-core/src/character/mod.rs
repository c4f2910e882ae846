//! The player character: stats, pools, equipment, inventory
//!
//! A `Character` is a plain value owned by the session controller and passed
//! into the combat and room engines, which return it updated. Health and
//! mana are clamped into `[0, max]` by every mutation helper, so the rest of
//! the engine never has to re-check the bounds.

mod equipment;
pub mod progression;
mod stats;

pub use equipment::Equipment;
pub use stats::{StatKind, Stats};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{
    BASE_EXPERIENCE_TO_NEXT, BASE_HEALTH, BASE_MANA, HEALTH_PER_ENDURANCE, MANA_PER_ENDURANCE,
};
use crate::data;
use crate::item::{Item, ItemEffectKind};
use crate::rng::GameRng;

/// Errors from equipment operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EquipError {
    #[error("item '{0}' is not in the inventory")]
    NotInInventory(String),
    #[error("item '{0}' cannot be equipped")]
    NotEquippable(String),
    #[error("no item equipped in that slot")]
    SlotEmpty,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub health: u32,
    pub max_health: u32,
    pub mana: u32,
    pub max_mana: u32,
    /// Base stats plus permanent bonuses plus equipped item stats
    pub stats: Stats,
    pub available_stat_points: u32,
    pub available_skill_points: u32,
    pub skills: Vec<crate::skill::Skill>,
    pub equipment: Equipment,
    /// Every owned item, including equipped ones
    pub inventory: Vec<Item>,
}

impl Character {
    /// Create a level-1 character with the given allocated stats
    ///
    /// Pools derive from endurance; the starter table contributes one random
    /// item which is equipped immediately. Level-1 catalog skills start
    /// unlocked.
    pub fn create(name: impl Into<String>, stats: Stats, rng: &mut GameRng) -> Self {
        let stats = stats.floored();
        let max_health = BASE_HEALTH + HEALTH_PER_ENDURANCE * stats.endurance as u32;
        let max_mana = BASE_MANA + MANA_PER_ENDURANCE * stats.endurance as u32;

        let mut character = Self {
            name: name.into(),
            level: 1,
            experience: 0,
            experience_to_next: BASE_EXPERIENCE_TO_NEXT,
            health: max_health,
            max_health,
            mana: max_mana,
            max_mana,
            stats,
            available_stat_points: 0,
            available_skill_points: 0,
            skills: data::starting_skills(),
            equipment: Equipment::default(),
            inventory: Vec::new(),
        };

        if let Some(starter) = rng.choose(&data::starting_items()).cloned() {
            let id = starter.id.clone();
            character.inventory.push(starter);
            // Slot is empty at creation, so this cannot fail
            let _ = character.equip(&id);
        }

        character
    }

    /// Lose health, clamped at 0
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Gain health, clamped at max
    pub fn heal(&mut self, amount: u32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Gain mana, clamped at max
    pub fn restore_mana(&mut self, amount: u32) {
        self.mana = (self.mana + amount).min(self.max_mana);
    }

    /// Spend mana; caller must have checked the cost
    pub fn spend_mana(&mut self, amount: u32) {
        self.mana = self.mana.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Health as a fraction of max
    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            0.0
        } else {
            self.health as f64 / self.max_health as f64
        }
    }

    /// Sum of equipment passive bonuses of one kind
    pub fn equipment_bonus(&self, kind: ItemEffectKind) -> i32 {
        self.equipment.effect_bonus(kind)
    }

    /// Permanently raise a base stat (room event bonuses, training)
    pub fn apply_permanent_bonus(&mut self, kind: StatKind, value: i32) {
        let stat = self.stats.get_mut(kind);
        *stat = (*stat + value).max(1);
        if kind == StatKind::Endurance {
            self.adjust_pools_for_endurance(value);
        }
    }

    /// Equip an inventory item by id, swapping out the current slot holder
    ///
    /// Stat bonuses apply to the character's stats; endurance bonuses grow
    /// the health and mana pools (and shrink them again on unequip).
    pub fn equip(&mut self, item_id: &str) -> Result<(), EquipError> {
        let item = self
            .inventory
            .iter()
            .find(|i| i.id == item_id)
            .cloned()
            .ok_or_else(|| EquipError::NotInInventory(item_id.to_string()))?;
        if !item.is_equippable() {
            return Err(EquipError::NotEquippable(item_id.to_string()));
        }

        // Swap out whatever is in the slot first
        if self
            .equipment
            .slot(item.kind)
            .is_some_and(|slot| slot.is_some())
        {
            self.unequip(item.kind)?;
        }

        self.stats.add(&item.stats);
        if item.stats.endurance != 0 {
            self.adjust_pools_for_endurance(item.stats.endurance);
        }

        // Slot presence was checked via is_equippable
        if let Some(slot) = self.equipment.slot_mut(item.kind) {
            *slot = Some(item);
        }
        Ok(())
    }

    /// Remove the item in a slot, reversing its bonuses exactly
    pub fn unequip(&mut self, kind: crate::item::ItemKind) -> Result<Item, EquipError> {
        let slot = self
            .equipment
            .slot_mut(kind)
            .ok_or_else(|| EquipError::NotEquippable(kind.to_string()))?;
        let item = slot.take().ok_or(EquipError::SlotEmpty)?;

        self.stats.sub(&item.stats);
        if item.stats.endurance != 0 {
            self.adjust_pools_for_endurance(-item.stats.endurance);
        }
        Ok(item)
    }

    /// Grow or shrink the health/mana pools when endurance changes
    ///
    /// Growth raises current values alongside max; shrink clamps current
    /// values back into range.
    fn adjust_pools_for_endurance(&mut self, delta: i32) {
        let health_delta = delta * HEALTH_PER_ENDURANCE as i32;
        let mana_delta = delta * MANA_PER_ENDURANCE as i32;

        self.max_health = (self.max_health as i32 + health_delta).max(1) as u32;
        self.max_mana = (self.max_mana as i32 + mana_delta).max(0) as u32;
        if delta > 0 {
            self.health = (self.health as i32 + health_delta) as u32;
            self.mana = (self.mana as i32 + mana_delta) as u32;
        }
        self.health = self.health.min(self.max_health);
        self.mana = self.mana.min(self.max_mana);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemKind, ItemRarity};

    fn test_character() -> Character {
        let mut rng = GameRng::new(1);
        Character::create("Hero", Stats::new(10, 10, 10, 10), &mut rng)
    }

    fn bare_character() -> Character {
        let mut c = test_character();
        // Strip the random starter so bonus math starts from a known base
        let slots = [ItemKind::Weapon, ItemKind::Armor, ItemKind::Accessory];
        for kind in slots {
            let _ = c.unequip(kind);
        }
        c.inventory.clear();
        c
    }

    fn endurance_armor() -> Item {
        Item {
            id: "girdle".into(),
            name: "Girdle of Vigor".into(),
            kind: ItemKind::Armor,
            rarity: ItemRarity::Rare,
            stats: Stats::new(0, 0, 3, 0),
            effects: vec![],
            description: String::new(),
        }
    }

    #[test]
    fn test_create_derives_pools_from_endurance() {
        let c = bare_character();
        assert_eq!(c.max_health, 50 + 10 * 10);
        assert_eq!(c.max_mana, 30 + 5 * 10);
        assert_eq!(c.health, c.max_health);
        assert_eq!(c.mana, c.max_mana);
        assert_eq!(c.experience_to_next, 100);
    }

    #[test]
    fn test_create_equips_a_starter_item() {
        let c = test_character();
        assert_eq!(c.inventory.len(), 1);
        assert!(c.equipment.iter().count() == 1);
    }

    #[test]
    fn test_damage_and_heal_clamp() {
        let mut c = bare_character();
        c.take_damage(10_000);
        assert_eq!(c.health, 0);
        assert!(c.is_dead());
        c.heal(10_000);
        assert_eq!(c.health, c.max_health);
    }

    #[test]
    fn test_equip_unequip_is_reversible() {
        let mut c = bare_character();
        let before = c.clone();

        c.inventory.push(endurance_armor());
        c.equip("girdle").unwrap();
        assert_eq!(c.stats.endurance, before.stats.endurance + 3);
        assert_eq!(c.max_health, before.max_health + 30);
        assert_eq!(c.max_mana, before.max_mana + 15);
        assert_eq!(c.health, before.health + 30);

        c.unequip(ItemKind::Armor).unwrap();
        assert_eq!(c.stats, before.stats);
        assert_eq!(c.max_health, before.max_health);
        assert_eq!(c.max_mana, before.max_mana);
        assert!(c.health <= c.max_health);
    }

    #[test]
    fn test_equip_swaps_existing_slot_holder(){
        let mut c = bare_character();
        c.inventory.push(endurance_armor());
        let mut other = endurance_armor();
        other.id = "plate".into();
        other.stats = Stats::new(2, 0, 0, 0);
        c.inventory.push(other);

        c.equip("girdle").unwrap();
        c.equip("plate").unwrap();
        assert_eq!(c.equipment.armor.as_ref().unwrap().id, "plate");
        // Girdle bonuses fully reversed by the swap
        assert_eq!(c.stats.endurance, 10);
        assert_eq!(c.stats.strength, 12);
    }

    #[test]
    fn test_equip_rejects_unknown_item() {
        let mut c = bare_character();
        assert_eq!(
            c.equip("nonexistent"),
            Err(EquipError::NotInInventory("nonexistent".into()))
        );
    }

    #[test]
    fn test_permanent_endurance_bonus_grows_pools() {
        let mut c = bare_character();
        let hp = c.max_health;
        c.apply_permanent_bonus(StatKind::Endurance, 1);
        assert_eq!(c.max_health, hp + 10);
        assert_eq!(c.stats.endurance, 11);
    }
}
