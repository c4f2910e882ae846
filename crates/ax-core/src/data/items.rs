//! Item catalogs: starter gear, the loot pool, and consumables

use crate::character::Stats;
use crate::item::{Item, ItemEffect, ItemEffectKind, ItemKind, ItemRarity};

fn item(
    id: &str,
    name: &str,
    kind: ItemKind,
    rarity: ItemRarity,
    stats: Stats,
    effects: Vec<ItemEffect>,
    description: &str,
) -> Item {
    Item {
        id: id.into(),
        name: name.into(),
        kind,
        rarity,
        stats,
        effects,
        description: description.into(),
    }
}

fn effect(kind: ItemEffectKind, value: i32, description: &str) -> ItemEffect {
    ItemEffect {
        kind,
        value,
        description: description.into(),
    }
}

/// Gear a new character may start with; one is picked at random
pub fn starting_items() -> Vec<Item> {
    vec![
        item(
            "rusty_sword",
            "Rusty Sword",
            ItemKind::Weapon,
            ItemRarity::Common,
            Stats::new(3, 0, 0, 0),
            vec![],
            "An old blade, but still sharp",
        ),
        item(
            "leather_armor",
            "Leather Armor",
            ItemKind::Armor,
            ItemRarity::Common,
            Stats::new(0, 0, 2, 0),
            vec![effect(ItemEffectKind::DodgeChance, 5, "+5% dodge chance")],
            "Basic protection for a beginning fighter",
        ),
        item(
            "lucky_charm",
            "Lucky Charm",
            ItemKind::Accessory,
            ItemRarity::Common,
            Stats::new(0, 0, 0, 4),
            vec![],
            "Fortune favors its bearer",
        ),
    ]
}

/// The loot pool drawn from after victories and in treasure rooms
pub fn item_pool() -> Vec<Item> {
    vec![
        item(
            "iron_sword",
            "Iron Sword",
            ItemKind::Weapon,
            ItemRarity::Common,
            Stats::new(5, 0, 0, 0),
            vec![],
            "A solid blade of good steel",
        ),
        item(
            "silver_blade",
            "Silver Blade",
            ItemKind::Weapon,
            ItemRarity::Rare,
            Stats::new(8, 2, 0, 0),
            vec![effect(ItemEffectKind::CritChance, 10, "+10% crit chance")],
            "An elegant weapon with a faint enchantment",
        ),
        item(
            "flame_sword",
            "Flame Sword",
            ItemKind::Weapon,
            ItemRarity::Epic,
            Stats::new(12, 0, 0, 0),
            vec![effect(ItemEffectKind::DamageBonus, 15, "+15 fire damage")],
            "A sword wreathed in everlasting flame",
        ),
        item(
            "dragon_slayer",
            "Dragon Slayer",
            ItemKind::Weapon,
            ItemRarity::Legendary,
            Stats::new(18, 5, 0, 0),
            vec![
                effect(ItemEffectKind::CritChance, 20, "+20% crit chance"),
                effect(ItemEffectKind::DamageBonus, 25, "+25 damage"),
            ],
            "A legendary weapon forged from dragon bone",
        ),
        item(
            "chain_mail",
            "Chain Mail",
            ItemKind::Armor,
            ItemRarity::Common,
            Stats::new(0, 0, 4, 0),
            vec![],
            "Sturdy protection of linked rings",
        ),
        item(
            "plate_armor",
            "Plate Armor",
            ItemKind::Armor,
            ItemRarity::Rare,
            Stats::new(2, 0, 7, 0),
            vec![effect(ItemEffectKind::DodgeChance, -5, "-5% dodge chance (heavy)")],
            "Heavy armor offering excellent protection",
        ),
        item(
            "mithril_armor",
            "Mithril Armor",
            ItemKind::Armor,
            ItemRarity::Epic,
            Stats::new(0, 3, 10, 0),
            vec![effect(ItemEffectKind::DodgeChance, 10, "+10% dodge chance")],
            "Light and resilient armor of mithril",
        ),
        item(
            "dragon_scale_armor",
            "Dragon Scale Armor",
            ItemKind::Armor,
            ItemRarity::Legendary,
            Stats::new(3, 3, 15, 0),
            vec![
                effect(ItemEffectKind::DodgeChance, 15, "+15% dodge chance"),
                effect(ItemEffectKind::DamageBonus, 10, "+10 damage"),
            ],
            "Armor forged from the scales of an ancient dragon",
        ),
        item(
            "power_ring",
            "Power Ring",
            ItemKind::Accessory,
            ItemRarity::Rare,
            Stats::new(6, 0, 0, 0),
            vec![],
            "A ring that swells physical strength",
        ),
        item(
            "agility_amulet",
            "Agility Amulet",
            ItemKind::Accessory,
            ItemRarity::Rare,
            Stats::new(0, 6, 0, 0),
            vec![effect(ItemEffectKind::DodgeChance, 12, "+12% dodge chance")],
            "An amulet sharpening reflexes",
        ),
        item(
            "vitality_pendant",
            "Vitality Pendant",
            ItemKind::Accessory,
            ItemRarity::Epic,
            Stats::new(0, 0, 8, 0),
            vec![effect(ItemEffectKind::HealBonus, 20, "+20% healing received")],
            "A pendant that bolsters the life force",
        ),
        item(
            "fortune_talisman",
            "Fortune Talisman",
            ItemKind::Accessory,
            ItemRarity::Legendary,
            Stats::new(0, 4, 0, 12),
            vec![
                effect(ItemEffectKind::CritChance, 15, "+15% crit chance"),
                effect(ItemEffectKind::DodgeChance, 10, "+10% dodge chance"),
            ],
            "An ancient talisman that bends luck",
        ),
    ]
}

/// One-shot potions handed out by merchants and some room events
pub fn consumable_items() -> Vec<Item> {
    vec![
        item(
            "health_potion",
            "Health Potion",
            ItemKind::Consumable,
            ItemRarity::Common,
            Stats::default(),
            vec![effect(ItemEffectKind::HealBonus, 50, "Restores 50 health")],
            "Restores health when drunk",
        ),
        item(
            "mana_potion",
            "Mana Potion",
            ItemKind::Consumable,
            ItemRarity::Common,
            Stats::default(),
            vec![effect(ItemEffectKind::HealBonus, 30, "Restores 30 mana")],
            "Restores mana when drunk",
        ),
    ]
}
