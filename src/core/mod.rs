//! Simulation core: state, progression, tick dispatch and offline replay.

pub mod balance;
pub mod constants;
pub mod error;
pub mod game_state;
pub mod offline;
pub mod progression;
pub mod tick;

pub use balance::Balance;
pub use error::{ActionError, GameError};
pub use game_state::*;
pub use offline::{replay, OfflineReport};
pub use progression::*;
pub use tick::*;
