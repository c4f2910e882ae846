//! Dungeon exploration: doors, room events, and run-wide state

pub mod doors;
pub mod generator;
pub mod room;
pub mod session;

pub use doors::{generate_doors, Door, DoorKind};
pub use generator::{generate_room_event, RoomContext, RoomHistory};
pub use room::{
    EventChoice, EventOutcome, RoomEvent, RoomKind, RoomRarity, StatRequirement,
};
pub use session::{ChoiceError, ChoiceResolution, DungeonState};
