pub mod arena;
pub mod battle;
pub mod events;
pub mod profile;
pub mod shop;
pub mod spawner;
pub mod upgrades;


pub use arena::{Arena, ArenaAction};
pub use battle::{BattleSession, SessionStatus, Turn, TurnError};
pub use events::{BattleEvent, FightEnd, FightResult, TurnOutcome};
pub use profile::{Profile, UpgradeAssignment, Wallet};
pub use shop::{Shop, ShopError};
