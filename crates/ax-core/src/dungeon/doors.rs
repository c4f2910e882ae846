//! Door generation
//!
//! Between rooms the player faces three doors. Each door advertises a room
//! kind, a rarity, and sometimes a lock, a carved symbol, or a sensory
//! hint. Rarer destinations roll less often and lock more often.

use serde::{Deserialize, Serialize};
use strum::Display;

use super::room::RoomRarity;
use crate::rng::GameRng;

/// Room kind a door leads to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DoorKind {
    Combat,
    Treasure,
    Rest,
    Merchant,
    Puzzle,
    Story,
    Training,
    MoralChoice,
    Portal,
    Boss,
}

/// One of the three doors offered between rooms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub kind: DoorKind,
    pub rarity: RoomRarity,
    pub locked: bool,
    /// Keys needed to pass a locked door (held, not spent)
    pub keys_required: u32,
    pub symbol: Option<String>,
    pub inscription: Option<String>,
    pub hint: Option<String>,
}

struct DoorTemplate {
    kind: DoorKind,
    rarity: RoomRarity,
    symbols: &'static [&'static str],
    hints: &'static [&'static str],
}

const DOOR_TABLE: &[DoorTemplate] = &[
    DoorTemplate {
        kind: DoorKind::Combat,
        rarity: RoomRarity::Common,
        symbols: &["sword"],
        hints: &["You hear the clang of metal", "You smell blood"],
    },
    DoorTemplate {
        kind: DoorKind::Treasure,
        rarity: RoomRarity::Uncommon,
        symbols: &["chest"],
        hints: &["A glint of gold", "The scent of ancient coins"],
    },
    DoorTemplate {
        kind: DoorKind::Rest,
        rarity: RoomRarity::Rare,
        symbols: &["star"],
        hints: &["Warm light", "A peaceful aura"],
    },
    DoorTemplate {
        kind: DoorKind::Merchant,
        rarity: RoomRarity::Uncommon,
        symbols: &["crown"],
        hints: &["The chime of coins", "Exotic spices on the air"],
    },
    DoorTemplate {
        kind: DoorKind::Puzzle,
        rarity: RoomRarity::Rare,
        symbols: &["bolt"],
        hints: &["Magical vibrations", "Ancient runes glow"],
    },
    DoorTemplate {
        kind: DoorKind::Story,
        rarity: RoomRarity::Uncommon,
        symbols: &[],
        hints: &["Whispers of the past", "Echoes of old times"],
    },
    DoorTemplate {
        kind: DoorKind::Training,
        rarity: RoomRarity::Rare,
        symbols: &["sword"],
        hints: &["Raw power hums", "An aura of mastery"],
    },
    DoorTemplate {
        kind: DoorKind::MoralChoice,
        rarity: RoomRarity::Uncommon,
        symbols: &[],
        hints: &["The weight of a decision", "A moral quandary"],
    },
];

const PORTAL_TEMPLATE: DoorTemplate = DoorTemplate {
    kind: DoorKind::Portal,
    rarity: RoomRarity::Legendary,
    symbols: &["bolt"],
    hints: &["Space warps here", "Dimensions bleed together"],
};

/// Portal doors only appear from this dungeon level onward
const PORTAL_MIN_LEVEL: u32 = 5;
/// Doors only lock from this dungeon level onward
const LOCKS_MIN_LEVEL: u32 = 2;

const INSCRIPTIONS: &[&str] = &[
    "Audentes Fortuna Iuvat",
    "Memento Mori",
    "Veni Vidi Vici",
    "Per Aspera Ad Astra",
    "Carpe Diem",
    "Alea Iacta Est",
    "Fortuna Caeca Est",
    "Vita Brevis Ars Longa",
];

fn availability(rarity: RoomRarity) -> f64 {
    match rarity {
        RoomRarity::Legendary => 0.1,
        RoomRarity::Rare => 0.3,
        _ => 0.6,
    }
}

fn lock_chance(rarity: RoomRarity) -> f64 {
    match rarity {
        RoomRarity::Legendary => 0.5,
        RoomRarity::Rare => 0.3,
        _ => 0.1,
    }
}

fn keys_for(rarity: RoomRarity) -> u32 {
    match rarity {
        RoomRarity::Legendary => 3,
        RoomRarity::Rare => 2,
        _ => 1,
    }
}

/// Generate the three doors offered after a room
///
/// At least one door is always unlocked, so a keyless player can never be
/// walled in.
pub fn generate_doors(dungeon_level: u32, rng: &mut GameRng) -> Vec<Door> {
    let mut table: Vec<&DoorTemplate> = DOOR_TABLE.iter().collect();
    if dungeon_level >= PORTAL_MIN_LEVEL {
        table.push(&PORTAL_TEMPLATE);
    }

    let mut doors: Vec<Door> = (0..3).map(|_| roll_door(&table, dungeon_level, rng)).collect();
    if doors.iter().all(|d| d.locked) {
        let pick = rng.rn2(doors.len() as u32) as usize;
        doors[pick].locked = false;
        doors[pick].keys_required = 0;
    }
    doors
}

fn roll_door(table: &[&DoorTemplate], dungeon_level: u32, rng: &mut GameRng) -> Door {
    // Rarity gates availability per roll; an empty draw falls back to the
    // whole table so three doors always appear.
    let available: Vec<&&DoorTemplate> = table
        .iter()
        .filter(|t| rng.chance(availability(t.rarity)))
        .collect();
    let template = match rng.choose(&available) {
        Some(t) => **t,
        None => table[rng.rn2(table.len() as u32) as usize],
    };

    let mut door = Door {
        kind: template.kind,
        rarity: template.rarity,
        locked: false,
        keys_required: 0,
        symbol: None,
        inscription: None,
        hint: None,
    };

    if rng.chance(0.5) && !template.symbols.is_empty() {
        door.symbol = rng.choose(template.symbols).map(|s| s.to_string());
    } else if rng.chance(0.3) {
        door.inscription = rng.choose(INSCRIPTIONS).map(|s| s.to_string());
    }

    if dungeon_level >= LOCKS_MIN_LEVEL && rng.chance(lock_chance(door.rarity)) {
        door.locked = true;
        door.keys_required = keys_for(door.rarity);
    }

    if rng.chance(0.4) && !template.hints.is_empty() {
        door.hint = rng.choose(template.hints).map(|s| s.to_string());
    }

    door
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_three_doors() {
        let mut rng = GameRng::new(12);
        for level in 1..=10 {
            assert_eq!(generate_doors(level, &mut rng).len(), 3);
        }
    }

    #[test]
    fn test_no_locks_on_level_one() {
        let mut rng = GameRng::new(13);
        for _ in 0..50 {
            for door in generate_doors(1, &mut rng) {
                assert!(!door.locked);
                assert_eq!(door.keys_required, 0);
            }
        }
    }

    #[test]
    fn test_locked_doors_require_keys_by_rarity() {
        let mut rng = GameRng::new(14);
        for _ in 0..200 {
            for door in generate_doors(6, &mut rng) {
                if door.locked {
                    assert_eq!(door.keys_required, keys_for(door.rarity));
                    assert!(door.keys_required >= 1);
                }
            }
        }
    }

    #[test]
    fn test_at_least_one_door_is_always_open() {
        let mut rng = GameRng::new(19);
        for level in 1..=12 {
            for _ in 0..300 {
                let doors = generate_doors(level, &mut rng);
                assert!(doors.iter().any(|d| !d.locked));
            }
        }
    }

    #[test]
    fn test_portals_only_at_depth() {
        let mut rng = GameRng::new(15);
        for _ in 0..200 {
            for door in generate_doors(4, &mut rng) {
                assert_ne!(door.kind, DoorKind::Portal);
            }
        }
        let mut seen_portal = false;
        for _ in 0..500 {
            for door in generate_doors(5, &mut rng) {
                if door.kind == DoorKind::Portal {
                    seen_portal = true;
                }
            }
        }
        assert!(seen_portal);
    }
}
