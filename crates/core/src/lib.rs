pub mod config;
pub mod content;
pub mod controller;
pub mod creature;
pub mod lighting;
pub mod progression;
pub mod room;
pub mod roomgen;
pub mod types;

pub use config::{CaveConfig, ConfigError};
pub use content::{ChestTier, CreatureKind, keys};
pub use controller::DungeonController;
pub use creature::{AiState, BossState, Creature};
pub use lighting::LightingModel;
pub use progression::ProgressionTracker;
pub use room::{DungeonRoom, LockedDoor, MineralNode, RoomType, TreasureChest};
pub use roomgen::RoomGenerator;
pub use types::*;
