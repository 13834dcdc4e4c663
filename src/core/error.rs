use crate::items::{EquipmentSlot, ItemId};
use crate::skills::Skill;
use thiserror::Error;

/// Host-boundary failures: save files and balance configuration.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Save encoding error: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("Invalid balance config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid save version: expected 0x{expected:016X}, got 0x{found:016X}")]
    SaveVersion { expected: u64, found: u64 },

    #[error("Save file checksum mismatch")]
    Checksum,

    #[error("Could not determine save directory")]
    NoSaveDirectory,

    #[error(transparent)]
    Action(#[from] ActionError),
}

/// A refused player action. Refusals never change state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Unknown combat map: {0}")]
    UnknownMap(u32),

    #[error("{resource} is not trained with {skill}")]
    WrongSkill { resource: String, skill: Skill },

    #[error("Requires level {required} (current {current})")]
    LevelTooLow { required: u32, current: u32 },

    #[error("Map {map_id} is locked (highest cleared: {max_completed})")]
    MapLocked { map_id: u32, max_completed: u32 },

    #[error("Missing boss key: {0}")]
    MissingKey(String),

    #[error("Not in inventory: {0}")]
    MissingItem(ItemId),

    #[error("Nothing equipped in {0:?} slot")]
    EmptySlot(EquipmentSlot),

    #[error("Unknown equipment slot: {0}")]
    UnknownSlot(String),

    #[error("{0} cannot be equipped")]
    NotEquippable(String),

    #[error("{0} is not food")]
    NotFood(String),

    #[error("Unknown combat style: {0}")]
    UnknownStyle(String),

    #[error("Unknown upgrade: {0}")]
    UnknownUpgrade(String),

    #[error("Already own {0}")]
    AlreadyOwned(String),

    #[error("{0} cannot be opened")]
    NotAContainer(String),

    #[error("{0} cannot be enchanted")]
    NotEnchantable(String),

    #[error("{0} is not an enchanting scroll")]
    NotAScroll(String),

    #[error("Already at maximum enchant tier {0}")]
    MaxTierReached(u8),

    #[error("Not enough coins: need {needed}, have {available}")]
    InsufficientCoins { needed: u64, available: u64 },
}
