//! Room event generation
//!
//! Each door kind has a catalog of thematic variants tagged with a rarity
//! and a unique id. Within one dungeon level a variant is never produced
//! twice until its catalog is exhausted, at which point repeats become the
//! defined fallback. The used-id set lives in a `RoomHistory` owned by the
//! dungeon session, reset on every level transition.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::doors::DoorKind;
use super::room::{EventChoice, EventOutcome, RoomEvent, RoomKind, RoomRarity};
use crate::character::StatKind;
use crate::data;
use crate::enemy::Enemy;
use crate::item::{Item, ItemRarity};
use crate::rng::GameRng;

/// Inputs the generator reads but never mutates
#[derive(Debug, Clone, Copy)]
pub struct RoomContext<'a> {
    pub dungeon_level: u32,
    pub reputation: i32,
    pub story_flags: &'a [String],
}

/// Per-level memory of which variant ids have already been produced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomHistory {
    used: HashSet<String>,
}

impl RoomHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything; called on dungeon-level transitions
    pub fn reset(&mut self) {
        self.used.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.used.contains(id)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    pub(crate) fn mark(&mut self, id: &str) {
        self.used.insert(id.to_string());
    }
}

/// Generate the event behind a chosen door
///
/// The produced event's id is recorded in `history` before returning.
pub fn generate_room_event(
    history: &mut RoomHistory,
    door: DoorKind,
    ctx: &RoomContext<'_>,
    rng: &mut GameRng,
) -> RoomEvent {
    let event = match door {
        DoorKind::Combat => combat_event(history, ctx, rng),
        DoorKind::Treasure => treasure_event(history, ctx, rng),
        DoorKind::Rest => rest_event(history, ctx, rng),
        DoorKind::Merchant => merchant_event(history, ctx, rng),
        DoorKind::Puzzle => puzzle_event(history, ctx, rng),
        DoorKind::Story => story_event(history, ctx, rng),
        DoorKind::MoralChoice => moral_event(history, ctx, rng),
        DoorKind::Training => training_event(history, ctx, rng),
        DoorKind::Portal => special_event(history, ctx, rng),
        DoorKind::Boss => boss_event(ctx),
    };
    history.mark(&event.unique_id);
    event
}

/// Pick a variant not yet used this level, falling back to the full
/// catalog once everything has been seen
fn select_variant<'a, T>(
    variants: &'a [T],
    id_of: impl Fn(&T) -> &str,
    history: &RoomHistory,
    rng: &mut GameRng,
) -> &'a T {
    let fresh: Vec<&T> = variants
        .iter()
        .filter(|v| !history.contains(id_of(v)))
        .collect();
    match rng.choose(&fresh) {
        Some(v) => *v,
        None => &variants[rng.rn2(variants.len() as u32) as usize],
    }
}

// ---------------------------------------------------------------- combat

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CombatMechanic {
    Ambush,
    Arena,
    Cursed,
    Duel,
    Beast,
    Ritual,
}

impl CombatMechanic {
    fn enemy_modifier(self) -> f64 {
        match self {
            CombatMechanic::Ambush => 0.8,
            CombatMechanic::Arena => 1.2,
            CombatMechanic::Cursed => 1.1,
            CombatMechanic::Duel => 1.5,
            CombatMechanic::Beast => 0.9,
            CombatMechanic::Ritual => 1.3,
        }
    }

    fn flavor(self) -> &'static str {
        match self {
            CombatMechanic::Ambush => "An ambush: the enemy strikes from hiding",
            CombatMechanic::Arena => "The crowd cheers: greater rewards for victory",
            CombatMechanic::Cursed => "Necromantic energies cling to this battlefield",
            CombatMechanic::Duel => "An honorable duel: great glory awaits",
            CombatMechanic::Beast => "A wild beast: unpredictable and savage",
            CombatMechanic::Ritual => "Dark magic crackles around the cultists",
        }
    }
}

struct CombatVariant {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    rarity: RoomRarity,
    mechanic: CombatMechanic,
}

const COMBAT_VARIANTS: &[CombatVariant] = &[
    CombatVariant {
        id: "ambush_chamber",
        title: "Ambush Chamber",
        description: "The hall looks empty until enemies burst from hiding!",
        rarity: RoomRarity::Common,
        mechanic: CombatMechanic::Ambush,
    },
    CombatVariant {
        id: "gladiator_pit",
        title: "Gladiator Pit",
        description: "An ancient arena. Your opponent waits in the center while a crowd of ghosts cheers.",
        rarity: RoomRarity::Uncommon,
        mechanic: CombatMechanic::Arena,
    },
    CombatVariant {
        id: "cursed_battlefield",
        title: "Cursed Battlefield",
        description: "Bones and armor litter the hall. Necromantic energies stir the fallen.",
        rarity: RoomRarity::Rare,
        mechanic: CombatMechanic::Cursed,
    },
    CombatVariant {
        id: "champions_duel",
        title: "Champion's Duel",
        description: "A legendary warrior challenges you to an honorable duel.",
        rarity: RoomRarity::Legendary,
        mechanic: CombatMechanic::Duel,
    },
    CombatVariant {
        id: "beast_den",
        title: "Beast Den",
        description: "A cave strewn with bones. Red eyes gleam in the dark.",
        rarity: RoomRarity::Common,
        mechanic: CombatMechanic::Beast,
    },
    CombatVariant {
        id: "ritual_chamber",
        title: "Ritual Chamber",
        description: "Cultists break off their dark ritual and turn on you.",
        rarity: RoomRarity::Uncommon,
        mechanic: CombatMechanic::Ritual,
    },
];

/// Pick a base template near the dungeon level, widening to the whole
/// pool when the level filter matches nothing
fn pick_base_enemy(dungeon_level: u32, rng: &mut GameRng) -> Enemy {
    let pool = data::enemy_pool();
    let low = dungeon_level.saturating_sub(1).max(1);
    let high = dungeon_level + 2;
    let eligible: Vec<&Enemy> = pool
        .iter()
        .filter(|e| e.level >= low && e.level <= high)
        .collect();
    match rng.choose(&eligible) {
        Some(e) => (*e).clone(),
        None => pool[rng.rn2(pool.len() as u32) as usize].clone(),
    }
}

fn combat_event(history: &RoomHistory, ctx: &RoomContext<'_>, rng: &mut GameRng) -> RoomEvent {
    let variant = select_variant(COMBAT_VARIANTS, |v| v.id, history, rng);
    let dl = ctx.dungeon_level;

    let base = pick_base_enemy(dl, rng);
    let mut enemy = Enemy::scaled(&base, variant.mechanic.enemy_modifier(), dl);
    if variant.mechanic == CombatMechanic::Duel {
        enemy.name = format!("Champion {}", enemy.name);
    }

    let mut choices = vec![EventChoice::new(
        "Attack head-on",
        EventOutcome {
            enemy: Some(enemy.clone()),
            ..Default::default()
        },
    )];

    match variant.mechanic {
        CombatMechanic::Ambush => {
            let mut weakened = enemy.clone();
            weakened.stats.strength = (weakened.stats.strength - 2).max(1);
            choices.push(
                EventChoice::new(
                    "Fall back and set a defense",
                    EventOutcome {
                        enemy: Some(weakened),
                        description: "You avoid the ambush and seize the advantage!".into(),
                        ..Default::default()
                    },
                )
                .with_stat(StatKind::Dexterity, 8 + dl as i32),
            );
        }
        CombatMechanic::Arena => {
            choices.push(
                EventChoice::new(
                    "Salute the crowd before the fight",
                    EventOutcome {
                        enemy: Some(enemy.clone()),
                        experience: 50,
                        description: "The crowd adores you! Bonus experience!".into(),
                        ..Default::default()
                    },
                )
                .with_stat(StatKind::Luck, 6 + dl as i32),
            );
        }
        CombatMechanic::Duel => {
            choices.push(
                EventChoice::new(
                    "Propose honorable terms",
                    EventOutcome {
                        enemy: Some(enemy.clone()),
                        experience: 100,
                        reputation: 2,
                        description: "An honorable duel brings great glory!".into(),
                        ..Default::default()
                    },
                )
                .with_stat(StatKind::Strength, 10 + dl as i32),
            );
        }
        _ => {}
    }

    choices.push(
        EventChoice::new(
            "Try to slip past the fight",
            EventOutcome {
                experience: 10,
                description: "You pass through unseen.".into(),
                ..Default::default()
            },
        )
        .with_stat(StatKind::Dexterity, 12 + dl as i32),
    );

    RoomEvent {
        kind: RoomKind::Combat,
        title: variant.title.into(),
        description: format!("{} {}", variant.description, variant.mechanic.flavor()),
        choices,
        unique_id: variant.id.into(),
        rarity: variant.rarity,
    }
}

// -------------------------------------------------------------- treasure

struct TreasureVariant {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    rarity: RoomRarity,
    quality: ItemRarity,
    cursed: bool,
}

const TREASURE_VARIANTS: &[TreasureVariant] = &[
    TreasureVariant {
        id: "dragon_hoard",
        title: "Dragon's Hoard",
        description: "A legendary dragon's treasure, guarded by magical traps.",
        rarity: RoomRarity::Legendary,
        quality: ItemRarity::Legendary,
        cursed: false,
    },
    TreasureVariant {
        id: "thieves_cache",
        title: "Thieves' Cache",
        description: "A secret stash of stolen valuables.",
        rarity: RoomRarity::Uncommon,
        quality: ItemRarity::Rare,
        cursed: false,
    },
    TreasureVariant {
        id: "ancient_vault",
        title: "Ancient Vault",
        description: "Massive vault doors stand open, revealing the wealth of a lost civilization.",
        rarity: RoomRarity::Rare,
        quality: ItemRarity::Epic,
        cursed: false,
    },
    TreasureVariant {
        id: "cursed_treasure",
        title: "Cursed Treasure",
        description: "Gold and jewels glitter invitingly, but you sense a malevolent aura.",
        rarity: RoomRarity::Uncommon,
        quality: ItemRarity::Rare,
        cursed: true,
    },
    TreasureVariant {
        id: "pirates_chest",
        title: "Pirate's Chest",
        description: "An old pirate chest with a treasure map and gold.",
        rarity: RoomRarity::Common,
        quality: ItemRarity::Common,
        cursed: false,
    },
    TreasureVariant {
        id: "royal_treasury",
        title: "Royal Treasury",
        description: "A private royal treasury, crown and scepter included.",
        rarity: RoomRarity::Legendary,
        quality: ItemRarity::Legendary,
        cursed: false,
    },
];

/// Loot matching a treasure room's quality band
fn treasure_pool(quality: ItemRarity) -> Vec<Item> {
    data::item_pool()
        .into_iter()
        .filter(|item| match quality {
            ItemRarity::Legendary => {
                item.rarity == ItemRarity::Legendary || item.rarity == ItemRarity::Epic
            }
            ItemRarity::Epic => {
                item.rarity == ItemRarity::Epic || item.rarity == ItemRarity::Rare
            }
            ItemRarity::Rare => {
                item.rarity == ItemRarity::Rare || item.rarity == ItemRarity::Common
            }
            ItemRarity::Common => item.rarity == ItemRarity::Common,
        })
        .collect()
}

fn treasure_event(history: &RoomHistory, ctx: &RoomContext<'_>, rng: &mut GameRng) -> RoomEvent {
    let variant = select_variant(TREASURE_VARIANTS, |v| v.id, history, rng);
    let dl = ctx.dungeon_level as i32;

    let pool = treasure_pool(variant.quality);
    let main_item = rng.choose(&pool).cloned();
    let bonus_item = rng.choose(&pool).cloned();

    let mut choices = vec![EventChoice::new(
        "Search the vault carefully",
        EventOutcome {
            item: main_item.clone(),
            experience: 30 + dl * 5,
            keys: if variant.rarity == RoomRarity::Legendary { 3 } else { 1 },
            description: "Your caution is rewarded!".into(),
            ..Default::default()
        },
    )
    .with_stat(StatKind::Dexterity, 6 + dl)];

    if variant.rarity == RoomRarity::Legendary {
        choices.push(
            EventChoice::new(
                "Take everything you can carry",
                EventOutcome {
                    item: main_item.clone(),
                    experience: 50 + dl * 8,
                    keys: 5,
                    stat_bonuses: vec![(StatKind::Luck, 1)],
                    description: "Incredible riches, and lasting fortune!".into(),
                    ..Default::default()
                },
            )
            .with_stat(StatKind::Strength, 12 + dl),
        );
    }

    if variant.cursed {
        choices.push(EventChoice::new(
            "Take the treasure, curse be damned",
            EventOutcome {
                item: bonus_item,
                experience: 40,
                curse: Some("cursed_gold".into()),
                description: "The treasure is yours, but the curse touches you...".into(),
                ..Default::default()
            },
        ));
        choices.push(
            EventChoice::new(
                "Try to lift the curse first",
                EventOutcome {
                    item: main_item,
                    experience: 60,
                    blessing: Some("purified_treasure".into()),
                    description: "You cleanse the treasure of its curse!".into(),
                    ..Default::default()
                },
            )
            .with_stat(StatKind::Luck, 15 + dl),
        );
    } else {
        choices.push(
            EventChoice::new(
                "Pry everything loose by force",
                EventOutcome {
                    item: main_item,
                    health: -15,
                    keys: 2,
                    description: "The traps fire, but the treasure is yours!".into(),
                    ..Default::default()
                },
            )
            .with_stat(StatKind::Strength, 8 + dl),
        );
    }

    choices.push(EventChoice::new(
        "Take only what you need",
        EventOutcome {
            keys: 2 + dl / 2,
            experience: 20,
            reputation: 1,
            description: "Your restraint will be remembered.".into(),
            ..Default::default()
        },
    ));

    RoomEvent {
        kind: RoomKind::Treasure,
        title: variant.title.into(),
        description: variant.description.into(),
        choices,
        unique_id: variant.id.into(),
        rarity: variant.rarity,
    }
}

// ------------------------------------------------------------------ rest

struct RestVariant {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    rarity: RoomRarity,
    healing_power: f64,
    mana_bonus: bool,
    wisdom: bool,
    resurrection: bool,
}

const REST_VARIANTS: &[RestVariant] = &[
    RestVariant {
        id: "sacred_shrine",
        title: "Sacred Shrine",
        description: "An ancient shrine whose altar radiates holy energy.",
        rarity: RoomRarity::Rare,
        healing_power: 1.5,
        mana_bonus: false,
        wisdom: false,
        resurrection: false,
    },
    RestVariant {
        id: "natural_spring",
        title: "Natural Spring",
        description: "Crystal-clear water wells up from an underground spring.",
        rarity: RoomRarity::Common,
        healing_power: 1.2,
        mana_bonus: false,
        wisdom: false,
        resurrection: false,
    },
    RestVariant {
        id: "meditation_garden",
        title: "Meditation Garden",
        description: "An underground garden of glowing plants and quiet energy.",
        rarity: RoomRarity::Uncommon,
        healing_power: 1.3,
        mana_bonus: true,
        wisdom: false,
        resurrection: false,
    },
    RestVariant {
        id: "phoenix_nest",
        title: "Phoenix Nest",
        description: "An abandoned phoenix nest still radiating regenerative power.",
        rarity: RoomRarity::Legendary,
        healing_power: 2.0,
        mana_bonus: false,
        wisdom: false,
        resurrection: true,
    },
    RestVariant {
        id: "hermit_hut",
        title: "Hermit's Hut",
        description: "A hermit's small cottage with a warm fire and drying herbs.",
        rarity: RoomRarity::Common,
        healing_power: 1.1,
        mana_bonus: false,
        wisdom: true,
        resurrection: false,
    },
    RestVariant {
        id: "crystal_cave",
        title: "Crystal Cave",
        description: "A cave of glowing crystals that restore spent energy.",
        rarity: RoomRarity::Rare,
        healing_power: 1.4,
        mana_bonus: true,
        wisdom: false,
        resurrection: false,
    },
];

fn rest_event(history: &RoomHistory, ctx: &RoomContext<'_>, rng: &mut GameRng) -> RoomEvent {
    let variant = select_variant(REST_VARIANTS, |v| v.id, history, rng);
    let dl = ctx.dungeon_level as i32;

    let healing = ((30 + dl * 5) as f64 * variant.healing_power).floor() as i32;
    let mana = ((20 + dl * 3) as f64 * if variant.mana_bonus { 1.5 } else { 1.0 }).floor() as i32;

    let mut choices = vec![EventChoice::new(
        "Rest and recover",
        EventOutcome {
            health: healing,
            mana,
            experience: 15 + dl * 2,
            description: "You feel completely refreshed!".into(),
            ..Default::default()
        },
    )];

    if variant.wisdom {
        choices.push(EventChoice::new(
            "Talk with the hermit",
            EventOutcome {
                experience: 40 + dl * 3,
                story_flag: Some("hermit_wisdom".into()),
                health: (healing as f64 * 0.7).floor() as i32,
                description: "The hermit shares hard-won wisdom.".into(),
                ..Default::default()
            },
        ));
    }

    if variant.resurrection {
        choices.push(
            EventChoice::new(
                "Draw on the phoenix's power",
                EventOutcome {
                    full_restore: true,
                    stat_bonuses: vec![(StatKind::Endurance, 1)],
                    experience: 100,
                    description: "The phoenix's power renews and strengthens you!".into(),
                    ..Default::default()
                },
            )
            .with_stat(StatKind::Luck, 15 + dl),
        );
    }

    if variant.mana_bonus {
        choices.push(
            EventChoice::new(
                "Meditate among the crystals",
                EventOutcome {
                    mana: (mana as f64 * 1.5).floor() as i32,
                    experience: 25,
                    stat_bonuses: vec![(StatKind::Luck, 1)],
                    description: "Your mind grows clearer and luckier.".into(),
                    ..Default::default()
                },
            )
            .with_stat(StatKind::Luck, 8 + dl),
        );
    }

    choices.push(
        EventChoice::new(
            "Search the surroundings",
            EventOutcome {
                keys: 1 + dl / 3,
                experience: 10,
                health: (healing as f64 * 0.5).floor() as i32,
                description: "You find hidden caches.".into(),
                ..Default::default()
            },
        )
        .with_stat(StatKind::Dexterity, 6 + dl),
    );

    RoomEvent {
        kind: RoomKind::Rest,
        title: variant.title.into(),
        description: variant.description.into(),
        choices,
        unique_id: variant.id.into(),
        rarity: variant.rarity,
    }
}

// -------------------------------------------------------------- merchant

struct NamedVariant {
    id: &'static str,
    title: &'static str,
    rarity: RoomRarity,
}

const MERCHANT_VARIANTS: &[NamedVariant] = &[
    NamedVariant {
        id: "shadow_dealer",
        title: "Shadow Dealer",
        rarity: RoomRarity::Rare,
    },
    NamedVariant {
        id: "fairy_merchant",
        title: "Fairy Merchant",
        rarity: RoomRarity::Uncommon,
    },
    NamedVariant {
        id: "demon_trader",
        title: "Demon Trader",
        rarity: RoomRarity::Legendary,
    },
    NamedVariant {
        id: "ghost_vendor",
        title: "Ghost Vendor",
        rarity: RoomRarity::Uncommon,
    },
];

fn merchant_event(history: &RoomHistory, _ctx: &RoomContext<'_>, rng: &mut GameRng) -> RoomEvent {
    let variant = select_variant(MERCHANT_VARIANTS, |v| v.id, history, rng);
    let potion = rng.choose(&data::consumable_items()).cloned();

    RoomEvent {
        kind: RoomKind::Merchant,
        title: variant.title.into(),
        description: format!("You meet the {}, offering rare wares...", variant.title),
        choices: vec![
            EventChoice::new(
                "Trade",
                EventOutcome {
                    keys: -2,
                    experience: 30,
                    item: potion,
                    description: "A successful trade!".into(),
                    ..Default::default()
                },
            )
            .with_keys(2),
            EventChoice::new(
                "Browse and move on",
                EventOutcome {
                    experience: 5,
                    description: "Nothing catches your eye.".into(),
                    ..Default::default()
                },
            ),
        ],
        unique_id: variant.id.into(),
        rarity: variant.rarity,
    }
}

// ---------------------------------------------------------------- puzzle

const PUZZLE_VARIANTS: &[NamedVariant] = &[
    NamedVariant {
        id: "riddle_sphinx",
        title: "Sphinx's Riddle",
        rarity: RoomRarity::Legendary,
    },
    NamedVariant {
        id: "crystal_puzzle",
        title: "Crystal Puzzle",
        rarity: RoomRarity::Rare,
    },
    NamedVariant {
        id: "ancient_mechanism",
        title: "Ancient Mechanism",
        rarity: RoomRarity::Uncommon,
    },
];

fn puzzle_event(history: &RoomHistory, ctx: &RoomContext<'_>, rng: &mut GameRng) -> RoomEvent {
    let variant = select_variant(PUZZLE_VARIANTS, |v| v.id, history, rng);
    let dl = ctx.dungeon_level as i32;

    RoomEvent {
        kind: RoomKind::Puzzle,
        title: variant.title.into(),
        description: format!("You stand before the {}...", variant.title),
        choices: vec![
            EventChoice::new(
                "Solve the riddle",
                EventOutcome {
                    experience: 100,
                    keys: 3,
                    description: "Your wits are rewarded!".into(),
                    ..Default::default()
                },
            )
            .with_stat(StatKind::Luck, 10 + dl),
            EventChoice::new(
                "Leave the riddle unanswered",
                EventOutcome {
                    experience: 5,
                    description: "Some mysteries keep.".into(),
                    ..Default::default()
                },
            ),
        ],
        unique_id: variant.id.into(),
        rarity: variant.rarity,
    }
}

// ----------------------------------------------------------------- story

const STORY_VARIANTS: &[NamedVariant] = &[
    NamedVariant {
        id: "ancient_mural",
        title: "Ancient Mural",
        rarity: RoomRarity::Uncommon,
    },
    NamedVariant {
        id: "prophetic_vision",
        title: "Prophetic Vision",
        rarity: RoomRarity::Rare,
    },
    NamedVariant {
        id: "time_echo",
        title: "Echo of the Past",
        rarity: RoomRarity::Legendary,
    },
];

fn story_event(history: &RoomHistory, _ctx: &RoomContext<'_>, rng: &mut GameRng) -> RoomEvent {
    let variant = select_variant(STORY_VARIANTS, |v| v.id, history, rng);

    RoomEvent {
        kind: RoomKind::Story,
        title: variant.title.into(),
        description: format!("You discover the {}...", variant.title),
        choices: vec![EventChoice::new(
            "Take in the story",
            EventOutcome {
                experience: 50,
                story_flag: Some(variant.id.into()),
                description: "You gain precious knowledge!".into(),
                ..Default::default()
            },
        )],
        unique_id: variant.id.into(),
        rarity: variant.rarity,
    }
}

// ----------------------------------------------------------------- moral

const MORAL_VARIANTS: &[NamedVariant] = &[
    NamedVariant {
        id: "dying_knight",
        title: "Dying Knight",
        rarity: RoomRarity::Uncommon,
    },
    NamedVariant {
        id: "cursed_child",
        title: "Cursed Child",
        rarity: RoomRarity::Rare,
    },
    NamedVariant {
        id: "fallen_angel",
        title: "Fallen Angel",
        rarity: RoomRarity::Legendary,
    },
];

fn moral_event(history: &RoomHistory, _ctx: &RoomContext<'_>, rng: &mut GameRng) -> RoomEvent {
    let variant = select_variant(MORAL_VARIANTS, |v| v.id, history, rng);

    RoomEvent {
        kind: RoomKind::MoralChoice,
        title: variant.title.into(),
        description: format!("You come across the {}...", variant.title),
        choices: vec![
            EventChoice::new(
                "Help",
                EventOutcome {
                    reputation: 3,
                    experience: 40,
                    description: "Your kindness will be remembered.".into(),
                    ..Default::default()
                },
            ),
            EventChoice::new(
                "Walk away",
                EventOutcome {
                    experience: 10,
                    description: "You move on.".into(),
                    ..Default::default()
                },
            ),
        ],
        unique_id: variant.id.into(),
        rarity: variant.rarity,
    }
}

// -------------------------------------------------------------- training

const TRAINING_VARIANTS: &[NamedVariant] = &[
    NamedVariant {
        id: "masters_dojo",
        title: "Master's Dojo",
        rarity: RoomRarity::Rare,
    },
    NamedVariant {
        id: "elemental_chamber",
        title: "Elemental Chamber",
        rarity: RoomRarity::Legendary,
    },
];

fn training_event(history: &RoomHistory, _ctx: &RoomContext<'_>, rng: &mut GameRng) -> RoomEvent {
    let variant = select_variant(TRAINING_VARIANTS, |v| v.id, history, rng);

    RoomEvent {
        kind: RoomKind::Training,
        title: variant.title.into(),
        description: format!("You find the {}...", variant.title),
        choices: vec![
            EventChoice::new(
                "Train",
                EventOutcome {
                    stat_bonuses: vec![(StatKind::Strength, 1)],
                    experience: 30,
                    description: "You grow stronger!".into(),
                    ..Default::default()
                },
            ),
            EventChoice::new(
                "Leave this place",
                EventOutcome {
                    experience: 10,
                    description: "Sometimes wisdom is restraint.".into(),
                    ..Default::default()
                },
            ),
        ],
        unique_id: variant.id.into(),
        rarity: variant.rarity,
    }
}

// --------------------------------------------------------------- special

struct SpecialVariant {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    rarity: RoomRarity,
    kind: RoomKind,
}

const SPECIAL_VARIANTS: &[SpecialVariant] = &[
    SpecialVariant {
        id: "time_chamber",
        title: "Chamber of Time",
        description: "Time flows differently here. You could hasten your growth.",
        rarity: RoomRarity::Legendary,
        kind: RoomKind::Training,
    },
    SpecialVariant {
        id: "soul_forge",
        title: "Soul Forge",
        description: "An ancient forge that can hammer experience into raw power.",
        rarity: RoomRarity::Rare,
        kind: RoomKind::Forge,
    },
    SpecialVariant {
        id: "memory_library",
        title: "Library of Memories",
        description: "These books hold the memories of heroes long gone.",
        rarity: RoomRarity::Uncommon,
        kind: RoomKind::Library,
    },
    SpecialVariant {
        id: "nightmare_prison",
        title: "Prison of Nightmares",
        description: "Captive nightmares offer power in exchange for freedom.",
        rarity: RoomRarity::Rare,
        kind: RoomKind::Prison,
    },
    SpecialVariant {
        id: "alchemist_lab",
        title: "Alchemist's Laboratory",
        description: "An abandoned laboratory full of volatile concoctions.",
        rarity: RoomRarity::Uncommon,
        kind: RoomKind::Laboratory,
    },
];

/// Portal doors carry the player into one of the special chambers
fn special_event(history: &RoomHistory, ctx: &RoomContext<'_>, rng: &mut GameRng) -> RoomEvent {
    let variant = select_variant(SPECIAL_VARIANTS, |v| v.id, history, rng);
    let dl = ctx.dungeon_level as i32;

    let mut choices = match variant.kind {
        RoomKind::Training => vec![
            EventChoice::new(
                "Train in accelerated time",
                EventOutcome {
                    stat_bonuses: vec![(StatKind::Strength, 1), (StatKind::Dexterity, 1)],
                    experience: 100,
                    description: "Time itself teaches you mastery!".into(),
                    ..Default::default()
                },
            )
            .with_stat(StatKind::Endurance, 12 + dl),
            EventChoice::new(
                "Meditate on the nature of time",
                EventOutcome {
                    stat_bonuses: vec![(StatKind::Luck, 2)],
                    experience: 80,
                    description: "You grasp deeper truths about time.".into(),
                    ..Default::default()
                },
            )
            .with_stat(StatKind::Luck, 10 + dl),
        ],
        RoomKind::Forge => vec![
            EventChoice::new(
                "Reforge your experience",
                EventOutcome {
                    experience: -50,
                    stat_bonuses: vec![(StatKind::Strength, 2)],
                    description: "You trade experience for lasting strength!".into(),
                    ..Default::default()
                },
            ),
            EventChoice::new(
                "Improve your equipment",
                EventOutcome {
                    experience: 50,
                    keys: 3,
                    description: "Your gear comes out stronger!".into(),
                    ..Default::default()
                },
            )
            .with_keys(2),
        ],
        RoomKind::Library => vec![
            EventChoice::new(
                "Study the ancient lore",
                EventOutcome {
                    experience: 150,
                    story_flag: Some("ancient_knowledge".into()),
                    description: "Priceless knowledge is yours!".into(),
                    ..Default::default()
                },
            )
            .with_stat(StatKind::Luck, 8 + dl),
            EventChoice::new(
                "Search for maps and secrets",
                EventOutcome {
                    keys: 4,
                    experience: 60,
                    description: "You find maps leading to treasure!".into(),
                    ..Default::default()
                },
            )
            .with_stat(StatKind::Dexterity, 10 + dl),
        ],
        RoomKind::Prison => vec![
            EventChoice::new(
                "Free the nightmares for power",
                EventOutcome {
                    stat_bonuses: vec![(StatKind::Strength, 3)],
                    curse: Some("nightmare_whispers".into()),
                    description: "Power is yours, but the nightmares follow...".into(),
                    ..Default::default()
                },
            ),
            EventChoice::new(
                "Try to master the nightmares",
                EventOutcome {
                    stat_bonuses: vec![(StatKind::Luck, 2), (StatKind::Dexterity, 1)],
                    experience: 120,
                    description: "You bend the nightmares to your will!".into(),
                    ..Default::default()
                },
            )
            .with_stat(StatKind::Luck, 15 + dl),
        ],
        _ => vec![
            EventChoice::new(
                "Drink the mysterious concoction",
                EventOutcome {
                    health: if rng.chance(0.5) { 50 } else { -20 },
                    mana: if rng.chance(0.5) { 30 } else { -10 },
                    experience: 40,
                    description: "The effects are unpredictable!".into(),
                    ..Default::default()
                },
            ),
            EventChoice::new(
                "Analyze the ingredients",
                EventOutcome {
                    experience: 80,
                    keys: 2,
                    story_flag: Some("alchemy_knowledge".into()),
                    description: "You learn the secrets of alchemy!".into(),
                    ..Default::default()
                },
            )
            .with_stat(StatKind::Luck, 12 + dl),
        ],
    };

    choices.push(EventChoice::new(
        "Leave this place",
        EventOutcome {
            experience: 10,
            description: "Sometimes wisdom is restraint.".into(),
            ..Default::default()
        },
    ));

    RoomEvent {
        kind: variant.kind,
        title: variant.title.into(),
        description: variant.description.into(),
        choices,
        unique_id: variant.id.into(),
        rarity: variant.rarity,
    }
}

// ------------------------------------------------------------------ boss

/// Boss rooms scale the strongest eligible template up hard and offer no
/// way around the fight
fn boss_event(ctx: &RoomContext<'_>) -> RoomEvent {
    let dl = ctx.dungeon_level;
    let pool = data::enemy_pool();
    let template = pool
        .iter()
        .filter(|e| e.level <= dl + 2)
        .max_by_key(|e| e.level)
        .unwrap_or(&pool[0]);

    let mut boss = Enemy::scaled(template, 1.5, dl);
    boss.name = format!("Guardian {}", boss.name);

    RoomEvent {
        kind: RoomKind::Boss,
        title: "Guardian of the Level".into(),
        description: "A mighty guardian bars the way down...".into(),
        choices: vec![EventChoice::new(
            "Fight",
            EventOutcome {
                enemy: Some(boss),
                description: "An epic duel begins!".into(),
                ..Default::default()
            },
        )],
        unique_id: format!("boss_{dl}"),
        rarity: RoomRarity::Legendary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn ctx(dl: u32) -> RoomContext<'static> {
        RoomContext {
            dungeon_level: dl,
            reputation: 0,
            story_flags: &[],
        }
    }

    #[test]
    fn test_no_repeats_until_exhaustion() {
        let mut rng = GameRng::new(31);
        let mut history = RoomHistory::new();
        let mut seen = Vec::new();
        // Six combat variants exist; the first six draws must be distinct
        for _ in 0..COMBAT_VARIANTS.len() {
            let event =
                generate_room_event(&mut history, DoorKind::Combat, &ctx(1), &mut rng);
            assert!(!seen.contains(&event.unique_id), "{} repeated", event.unique_id);
            seen.push(event.unique_id);
        }
        // Exhausted: the next draw repeats without error
        let event = generate_room_event(&mut history, DoorKind::Combat, &ctx(1), &mut rng);
        assert!(seen.contains(&event.unique_id));
    }

    #[test]
    fn test_reset_allows_immediate_reuse() {
        let mut rng = GameRng::new(32);
        let mut history = RoomHistory::new();
        for _ in 0..MERCHANT_VARIANTS.len() {
            generate_room_event(&mut history, DoorKind::Merchant, &ctx(1), &mut rng);
        }
        assert_eq!(history.len(), MERCHANT_VARIANTS.len());
        history.reset();
        assert!(history.is_empty());
    }

    #[test]
    fn test_every_event_has_a_baseline_choice() {
        let mut rng = GameRng::new(33);
        for door in [
            DoorKind::Combat,
            DoorKind::Treasure,
            DoorKind::Rest,
            DoorKind::Merchant,
            DoorKind::Puzzle,
            DoorKind::Story,
            DoorKind::MoralChoice,
            DoorKind::Training,
            DoorKind::Portal,
            DoorKind::Boss,
        ] {
            for _ in 0..20 {
                let mut history = RoomHistory::new();
                let event = generate_room_event(&mut history, door, &ctx(3), &mut rng);
                assert!(
                    event.choices.iter().any(|c| c.stat_requirement.is_none()
                        && c.key_requirement.is_none()),
                    "{door} event '{}' has no ungated choice",
                    event.unique_id
                );
                assert!(!event.choices.is_empty());
            }
        }
    }

    #[test]
    fn test_combat_enemy_scales_with_level() {
        let mut rng = GameRng::new(34);
        let mut history = RoomHistory::new();
        let event = generate_room_event(&mut history, DoorKind::Combat, &ctx(6), &mut rng);
        let enemy = event.choices[0].outcome.enemy.as_ref().unwrap();
        // Depth adds flat health on top of any variant modifier
        assert!(enemy.max_health >= 6 * 15);
        assert!(enemy.experience_reward > 6 * 20);
    }

    #[test]
    fn test_boss_event_is_mandatory_combat() {
        let mut rng = GameRng::new(35);
        let mut history = RoomHistory::new();
        let event = generate_room_event(&mut history, DoorKind::Boss, &ctx(4), &mut rng);
        assert_eq!(event.kind, RoomKind::Boss);
        assert_eq!(event.choices.len(), 1);
        let boss = event.choices[0].outcome.enemy.as_ref().unwrap();
        assert!(boss.name.starts_with("Guardian"));
        assert!(boss.max_health > 0);
    }

    #[test]
    fn test_enemy_filter_widens_when_empty() {
        // Level 100 matches no template band; the full pool is the fallback
        let mut rng = GameRng::new(36);
        let enemy = pick_base_enemy(100, &mut rng);
        assert!(data::enemy_pool().iter().any(|e| e.id == enemy.id));
    }

    #[test]
    fn test_treasure_pool_matches_quality_band() {
        for quality in ItemRarity::iter() {
            let pool = treasure_pool(quality);
            assert!(!pool.is_empty());
            match quality {
                ItemRarity::Legendary => assert!(pool
                    .iter()
                    .all(|i| i.rarity >= ItemRarity::Epic)),
                ItemRarity::Common => {
                    assert!(pool.iter().all(|i| i.rarity == ItemRarity::Common))
                }
                _ => {}
            }
        }
    }
}
