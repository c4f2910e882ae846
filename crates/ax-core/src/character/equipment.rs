//! Equipment slots

use serde::{Deserialize, Serialize};

use crate::item::{Item, ItemEffectKind, ItemKind};

/// Named equipment slots; each holds at most one item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub accessory: Option<Item>,
}

impl Equipment {
    /// Slot for an item kind; consumables have no slot
    pub fn slot(&self, kind: ItemKind) -> Option<&Option<Item>> {
        match kind {
            ItemKind::Weapon => Some(&self.weapon),
            ItemKind::Armor => Some(&self.armor),
            ItemKind::Accessory => Some(&self.accessory),
            ItemKind::Consumable => None,
        }
    }

    pub fn slot_mut(&mut self, kind: ItemKind) -> Option<&mut Option<Item>> {
        match kind {
            ItemKind::Weapon => Some(&mut self.weapon),
            ItemKind::Armor => Some(&mut self.armor),
            ItemKind::Accessory => Some(&mut self.accessory),
            ItemKind::Consumable => None,
        }
    }

    /// Iterate over currently equipped items
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        [&self.weapon, &self.armor, &self.accessory]
            .into_iter()
            .filter_map(|slot| slot.as_ref())
    }

    /// Sum of passive effect bonuses of the given kind across all slots
    pub fn effect_bonus(&self, kind: ItemEffectKind) -> i32 {
        self.iter().map(|item| item.effect_bonus(kind)).sum()
    }

    /// Whether an item with this id is currently worn
    pub fn is_equipped(&self, item_id: &str) -> bool {
        self.iter().any(|item| item.id == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Stats;
    use crate::item::{ItemEffect, ItemRarity};

    fn item(id: &str, kind: ItemKind, dodge: i32) -> Item {
        Item {
            id: id.into(),
            name: id.into(),
            kind,
            rarity: ItemRarity::Common,
            stats: Stats::default(),
            effects: vec![ItemEffect {
                kind: ItemEffectKind::DodgeChance,
                value: dodge,
                description: String::new(),
            }],
            description: String::new(),
        }
    }

    #[test]
    fn test_effect_bonus_sums_across_slots() {
        let mut eq = Equipment::default();
        eq.weapon = Some(item("w", ItemKind::Weapon, 5));
        eq.armor = Some(item("a", ItemKind::Armor, -5));
        eq.accessory = Some(item("c", ItemKind::Accessory, 12));
        assert_eq!(eq.effect_bonus(ItemEffectKind::DodgeChance), 12);
        assert_eq!(eq.effect_bonus(ItemEffectKind::CritChance), 0);
    }

    #[test]
    fn test_consumables_have_no_slot() {
        let mut eq = Equipment::default();
        assert!(eq.slot(ItemKind::Consumable).is_none());
        assert!(eq.slot_mut(ItemKind::Consumable).is_none());
        assert!(eq.slot(ItemKind::Weapon).is_some());
    }
}
