//! SkillQuest - deterministic idle-game simulation core.
//!
//! Every tick takes a [`core::StateSnapshot`] by reference and returns a
//! partial update; only [`core::StateSnapshot::apply`] mutates state.

pub mod combat;
pub mod core;
pub mod enhancement;
pub mod items;
pub mod maps;
pub mod skills;
pub mod utils;
