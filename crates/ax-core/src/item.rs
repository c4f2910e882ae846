//! Items, rarities, and item effects
//!
//! Items carry a partial stat bonus map plus a list of combat effects
//! (dodge, crit, flat damage, heal potency). Equipping applies the stat
//! bonuses to the character; the combat effects are read live by the
//! combat engine.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::character::Stats;

/// Equipment slot / item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemKind {
    Weapon,
    Armor,
    Accessory,
    Consumable,
}

/// Item rarity tiers
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemRarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Passive effect categories granted by equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemEffectKind {
    /// Percent added to dodge chance (can be negative for heavy gear)
    DodgeChance,
    /// Percent added to critical hit chance
    CritChance,
    /// Flat bonus added to attack strength
    DamageBonus,
    /// Percent added to healing received
    HealBonus,
}

/// A single passive effect on an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEffect {
    pub kind: ItemEffectKind,
    pub value: i32,
    pub description: String,
}

/// An item definition
///
/// The same type covers pool templates and owned copies; items are plain
/// values and cloning one out of a pool is how rewards are minted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub kind: ItemKind,
    pub rarity: ItemRarity,
    /// Partial stat bonus map; zero fields mean no bonus
    pub stats: Stats,
    pub effects: Vec<ItemEffect>,
    pub description: String,
}

impl Item {
    /// Sum of this item's passive effect values of the given kind
    pub fn effect_bonus(&self, kind: ItemEffectKind) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.value)
            .sum()
    }

    /// Whether this item occupies an equipment slot
    pub fn is_equippable(&self) -> bool {
        !matches!(self.kind, ItemKind::Consumable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Item {
        Item {
            id: "test_sword".into(),
            name: "Test Sword".into(),
            kind: ItemKind::Weapon,
            rarity: ItemRarity::Rare,
            stats: Stats::new(5, 0, 0, 0),
            effects: vec![
                ItemEffect {
                    kind: ItemEffectKind::CritChance,
                    value: 10,
                    description: "+10% crit chance".into(),
                },
                ItemEffect {
                    kind: ItemEffectKind::DamageBonus,
                    value: 5,
                    description: "+5 damage".into(),
                },
            ],
            description: "A sword for tests".into(),
        }
    }

    #[test]
    fn test_effect_bonus_sums_matching_kind() {
        let item = sword();
        assert_eq!(item.effect_bonus(ItemEffectKind::CritChance), 10);
        assert_eq!(item.effect_bonus(ItemEffectKind::DamageBonus), 5);
        assert_eq!(item.effect_bonus(ItemEffectKind::DodgeChance), 0);
    }

    #[test]
    fn test_rarity_ordering() {
        assert!(ItemRarity::Common < ItemRarity::Rare);
        assert!(ItemRarity::Epic < ItemRarity::Legendary);
    }

    #[test]
    fn test_consumables_are_not_equippable() {
        let mut item = sword();
        assert!(item.is_equippable());
        item.kind = ItemKind::Consumable;
        assert!(!item.is_equippable());
    }
}
