//! Static content tables
//!
//! Skills, items, and enemy templates are built fresh on each call; callers
//! own and mutate their copies (cooldowns, scaling) without touching the
//! catalog.

mod enemies;
mod items;
mod skills;

pub use enemies::enemy_pool;
pub use items::{consumable_items, item_pool, starting_items};
pub use skills::{skill_catalog, starting_skills};
