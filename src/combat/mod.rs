//! Combat: hit resolution, run state and the combat tick.

pub mod logic;
pub mod math;
pub mod types;

pub use logic::*;
pub use math::*;
pub use types::*;
