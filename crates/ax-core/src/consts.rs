//! Engine-wide tuning constants

/// Stat points a new character may allocate on top of the base values
pub const CREATION_STAT_POINTS: u32 = 10;
/// Base value every stat starts from at character creation
pub const CREATION_BASE_STAT: u32 = 5;
/// Per-stat cap during character creation
pub const CREATION_STAT_CAP: u32 = 20;

/// Health granted per point of endurance
pub const HEALTH_PER_ENDURANCE: u32 = 10;
/// Mana granted per point of endurance
pub const MANA_PER_ENDURANCE: u32 = 5;
/// Flat health pool before endurance scaling
pub const BASE_HEALTH: u32 = 50;
/// Flat mana pool before endurance scaling
pub const BASE_MANA: u32 = 30;

/// Experience required to reach level 2
pub const BASE_EXPERIENCE_TO_NEXT: u32 = 100;
/// Geometric growth of the experience curve
pub const EXPERIENCE_CURVE: f64 = 1.2;
/// Stat points granted per level
pub const STAT_POINTS_PER_LEVEL: u32 = 3;
/// Skill points granted per level
pub const SKILL_POINTS_PER_LEVEL: u32 = 1;

/// Dodge chance is capped here no matter how many bonuses stack
pub const DODGE_CAP: u32 = 75;
/// Critical hits multiply damage by 3/2
pub const CRIT_NUMERATOR: u32 = 3;
pub const CRIT_DENOMINATOR: u32 = 2;
/// Dodge bonus from the basic defend action, percent
pub const DEFEND_DODGE_BONUS: u32 = 25;
/// Fraction of max mana the player regenerates after each full round
pub const MANA_REGEN_DIVISOR: u32 = 10;

/// Probability the enemy AI considers using a skill
pub const AI_SKILL_CHANCE: f64 = 0.4;
/// Probability the enemy AI considers defending when wounded
pub const AI_DEFEND_CHANCE: f64 = 0.6;
/// Health fraction below which the enemy AI considers defending
pub const AI_DEFEND_THRESHOLD: f64 = 0.3;

/// Every this many explored rooms, the next encounter is a boss
pub const BOSS_ROOM_INTERVAL: u32 = 5;
/// Rooms required to finish a dungeon level: BASE + PER_LEVEL * level
pub const ROOMS_PER_LEVEL_BASE: u32 = 10;
pub const ROOMS_PER_LEVEL_SCALE: u32 = 2;
/// Experience award for clearing a dungeon level, per level
pub const LEVEL_CLEAR_EXPERIENCE: u32 = 100;

/// Chance of an item find after a combat victory
pub const ITEM_FIND_CHANCE: f64 = 0.3;
/// Chance of an item find after a level-up
pub const ITEM_FIND_CHANCE_LEVEL_UP: f64 = 0.4;
