//! Arena Nexus core engine
//!
//! Deterministic combat resolution and room/event generation for a
//! turn-based dungeon crawler. The engine is headless: callers create a
//! [`GameSession`], submit door picks, room choices, and combat actions,
//! and read back typed events and narration. All randomness flows through
//! a seeded [`GameRng`], so a run is fully reproducible from its seed.
//!
//! Layering, bottom to top:
//! - [`rng`], [`consts`]: dice and tuning constants
//! - [`item`], [`skill`], [`character`], [`enemy`]: the actors and their gear
//! - [`data`]: the static catalogs (skills, items, enemy templates)
//! - [`combat`]: the turn-based encounter state machine
//! - [`dungeon`]: doors, room events, and run-wide state
//! - [`gameloop`]: the session controller tying it all together

pub mod character;
pub mod combat;
pub mod consts;
pub mod data;
pub mod dungeon;
pub mod enemy;
pub mod gameloop;
pub mod item;
pub mod rng;
pub mod skill;

pub use character::{Character, EquipError, StatKind, Stats};
pub use combat::{
    CombatError, CombatEvent, CombatOutcome, CombatPhase, CombatSession, PlayerAction,
};
pub use dungeon::{ChoiceError, Door, DoorKind, DungeonState, RoomEvent, RoomKind};
pub use enemy::Enemy;
pub use gameloop::{CreationError, GameError, GamePhase, GameSession};
pub use item::{Item, ItemKind, ItemRarity};
pub use rng::GameRng;
pub use skill::{Skill, SkillKind};
