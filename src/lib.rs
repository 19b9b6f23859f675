//! Spirit Arena game core: hero selection, turn-based fights with boss escalation,
//! coin rewards and the persistent skill shop.

pub mod dice;
pub mod model;
pub mod skills;
pub mod state;
pub mod store;
mod util;

pub use dice::{Dice, SeededDice};
pub use model::{AttackProfile, AttackTable, CharacterInstance, CharacterTemplate, Role};
pub use state::{Arena, ArenaAction, BattleEvent, BattleSession, Profile, Shop, ShopError};
pub use store::{KeyValueStore, MemoryStore};
