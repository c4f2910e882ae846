//! The session controller driving a whole dungeon run
//!
//! A `GameSession` owns the character, the dungeon state, and the RNG, and
//! walks the outer loop: pick a door, resolve the room behind it, fight
//! when a choice starts combat, and level up between rooms. Every fifth
//! room is a boss; the dungeon level ends at the first boss felled after
//! enough rooms have been explored, and the run descends.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::character::{Character, StatKind, Stats};
use crate::combat::{
    CombatError, CombatEvent, CombatOutcome, CombatPhase, CombatSession, PlayerAction,
};
use crate::consts::{
    BOSS_ROOM_INTERVAL, CREATION_BASE_STAT, CREATION_STAT_CAP, CREATION_STAT_POINTS,
    ITEM_FIND_CHANCE, ITEM_FIND_CHANCE_LEVEL_UP, LEVEL_CLEAR_EXPERIENCE, ROOMS_PER_LEVEL_BASE,
    ROOMS_PER_LEVEL_SCALE,
};
use crate::data;
use crate::dungeon::{
    generate_doors, generate_room_event, ChoiceError, Door, DoorKind, DungeonState, RoomEvent,
};
use crate::rng::GameRng;

/// Errors from character creation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreationError {
    #[error("{stat} must be between {min} and {max}, got {value}")]
    StatOutOfRange {
        stat: StatKind,
        min: i32,
        max: i32,
        value: i32,
    },
    #[error("allocated stats must total {expected}, got {actual}")]
    WrongTotal { expected: i32, actual: i32 },
}

/// Errors from driving a session; rejected inputs mutate nothing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("no door at index {0}")]
    InvalidDoor(usize),
    #[error("that door needs {required} keys, you hold {held}")]
    DoorLocked { required: u32, held: u32 },
    #[error("the session is not choosing doors")]
    NotChoosingDoors,
    #[error("the session is not in a room")]
    NotInRoom,
    #[error("the session is not in combat")]
    NotInCombat,
    #[error("the run is over")]
    RunOver,
    #[error(transparent)]
    Choice(#[from] ChoiceError),
    #[error(transparent)]
    Combat(#[from] CombatError),
}

/// Where the outer loop currently stands
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum GamePhase {
    /// Three doors await a pick
    Doors(Vec<Door>),
    /// A room event awaits a choice
    Room(RoomEvent),
    /// A fight is in progress; the session's character lives inside it
    Combat(CombatSession),
    /// The character died
    GameOver,
}

/// One full dungeon run from character creation to death
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    character: Character,
    dungeon: DungeonState,
    rng: GameRng,
    phase: GamePhase,
    in_boss_room: bool,
    messages: Vec<String>,
}

impl GameSession {
    /// Start a run with a freshly created character
    ///
    /// The allocated stats must each sit in the creation range and sum to
    /// exactly the base-plus-points total.
    pub fn new(name: impl Into<String>, stats: Stats, seed: u64) -> Result<Self, CreationError> {
        let min = CREATION_BASE_STAT as i32;
        let max = CREATION_STAT_CAP as i32;
        for kind in StatKind::ALL {
            let value = stats.get(kind);
            if value < min || value > max {
                return Err(CreationError::StatOutOfRange {
                    stat: kind,
                    min,
                    max,
                    value,
                });
            }
        }
        let expected = (4 * CREATION_BASE_STAT + CREATION_STAT_POINTS) as i32;
        let actual = StatKind::ALL.iter().map(|k| stats.get(*k)).sum::<i32>();
        if actual != expected {
            return Err(CreationError::WrongTotal { expected, actual });
        }

        let mut rng = GameRng::new(seed);
        let character = Character::create(name, stats, &mut rng);
        let dungeon = DungeonState::new();
        let doors = generate_doors(dungeon.dungeon_level, &mut rng);
        Ok(Self {
            character,
            dungeon,
            rng,
            phase: GamePhase::Doors(doors),
            in_boss_room: false,
            messages: Vec::new(),
        })
    }

    pub fn phase(&self) -> &GamePhase {
        &self.phase
    }

    /// The authoritative character, wherever it currently lives
    pub fn character(&self) -> &Character {
        match &self.phase {
            GamePhase::Combat(session) => session.player(),
            _ => &self.character,
        }
    }

    pub fn dungeon(&self) -> &DungeonState {
        &self.dungeon
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Narration accumulated over the whole run
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_over(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver)
    }

    /// Step through a chosen door, producing the room behind it
    ///
    /// Locked doors require the keys to be held but do not spend them.
    pub fn choose_door(&mut self, index: usize) -> Result<(), GameError> {
        let doors = match &self.phase {
            GamePhase::Doors(doors) => doors,
            GamePhase::GameOver => return Err(GameError::RunOver),
            _ => return Err(GameError::NotChoosingDoors),
        };
        let door = doors.get(index).ok_or(GameError::InvalidDoor(index))?;
        if door.locked && self.dungeon.keys < door.keys_required {
            return Err(GameError::DoorLocked {
                required: door.keys_required,
                held: self.dungeon.keys,
            });
        }

        let kind = door.kind;
        let event = self.generate_event(kind);
        self.messages.push(format!("You enter: {}", event.title));
        self.phase = GamePhase::Room(event);
        Ok(())
    }

    /// Resolve a choice in the current room
    ///
    /// A choice carrying an enemy starts combat; anything else pays out
    /// immediately and moves on to the next set of doors.
    pub fn choose_option(&mut self, index: usize) -> Result<(), GameError> {
        let event = match &self.phase {
            GamePhase::Room(event) => event.clone(),
            GamePhase::GameOver => return Err(GameError::RunOver),
            _ => return Err(GameError::NotInRoom),
        };

        let resolution = self
            .dungeon
            .apply_choice(&mut self.character, &event, index)?;
        if !resolution.description.is_empty() {
            self.messages.push(resolution.description.clone());
        }
        if let Some(name) = &resolution.item_found {
            self.messages.push(format!("You obtain {name}."));
        }

        match resolution.enemy {
            Some(enemy) => {
                let player = self.character.clone();
                let session = CombatSession::new(player, enemy);
                self.phase = GamePhase::Combat(session);
            }
            None => {
                self.announce_level_ups();
                self.finish_room();
            }
        }
        Ok(())
    }

    /// Submit the player's combat action and auto-resolve the enemy reply
    ///
    /// Returns every event the round produced. Terminal outcomes fold back
    /// into the outer loop: victory pays out and moves on, defeat ends the
    /// run.
    pub fn combat_action(&mut self, action: &PlayerAction) -> Result<Vec<CombatEvent>, GameError> {
        let session = match &mut self.phase {
            GamePhase::Combat(session) => session,
            GamePhase::GameOver => return Err(GameError::RunOver),
            _ => return Err(GameError::NotInCombat),
        };

        let mut events = session.player_action(action, &mut self.rng)?;
        if session.phase() == CombatPhase::EnemyTurn {
            events.extend(session.enemy_turn(&mut self.rng)?);
        }

        match session.outcome() {
            Some(CombatOutcome::Victory) => self.resolve_victory(),
            Some(CombatOutcome::Defeat) => {
                self.messages.push("You have fallen...".into());
                self.phase = GamePhase::GameOver;
            }
            None => {}
        }
        Ok(events)
    }

    fn generate_event(&mut self, kind: DoorKind) -> RoomEvent {
        let ctx = crate::dungeon::RoomContext {
            dungeon_level: self.dungeon.dungeon_level,
            reputation: self.dungeon.reputation,
            story_flags: &self.dungeon.story_flags,
        };
        generate_room_event(&mut self.dungeon.history, kind, &ctx, &mut self.rng)
    }

    fn resolve_victory(&mut self) {
        let phase = std::mem::replace(&mut self.phase, GamePhase::GameOver);
        let GamePhase::Combat(session) = phase else {
            // resolve_victory is only reached from combat
            return;
        };
        self.messages.extend(session.log().iter().cloned());
        self.character = session.into_player();

        let leveled = self.announce_level_ups();
        let find_chance = if leveled {
            ITEM_FIND_CHANCE_LEVEL_UP
        } else {
            ITEM_FIND_CHANCE
        };
        if self.rng.chance(find_chance) {
            let pool = data::item_pool();
            if let Some(item) = self.rng.choose(&pool).cloned() {
                self.messages.push(format!("You find {}!", item.name));
                self.character.inventory.push(item);
            }
        }

        self.finish_room();
    }

    /// Process banked experience; true when at least one level was gained
    fn announce_level_ups(&mut self) -> bool {
        let summary = self.character.apply_level_ups();
        if summary.levels_gained > 0 {
            self.messages
                .push(format!("You reach level {}!", self.character.level));
        }
        summary.levels_gained > 0
    }

    /// Book the finished room and decide what comes next
    fn finish_room(&mut self) {
        self.dungeon.rooms_explored += 1;
        if self.in_boss_room {
            self.in_boss_room = false;
            self.dungeon.boss_defeated = true;
            self.messages.push("The guardian falls!".into());

            // The level can only end on a fallen boss, never a plain room
            let needed =
                ROOMS_PER_LEVEL_BASE + ROOMS_PER_LEVEL_SCALE * self.dungeon.dungeon_level;
            if self.dungeon.rooms_explored >= needed {
                let award = LEVEL_CLEAR_EXPERIENCE * self.dungeon.dungeon_level;
                self.character.experience += award;
                self.messages.push(format!(
                    "Dungeon level {} cleared! +{award} experience",
                    self.dungeon.dungeon_level
                ));
                self.dungeon.descend();
                self.announce_level_ups();
            }
        }

        // Every fifth room the way forward is barred by a boss
        if self.dungeon.rooms_explored > 0
            && self.dungeon.rooms_explored % BOSS_ROOM_INTERVAL == 0
        {
            let event = self.generate_event(DoorKind::Boss);
            self.messages.push(format!("You enter: {}", event.title));
            self.in_boss_room = true;
            self.phase = GamePhase::Room(event);
        } else {
            let doors = generate_doors(self.dungeon.dungeon_level, &mut self.rng);
            self.phase = GamePhase::Doors(doors);
        }
    }
}
