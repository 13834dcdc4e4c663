//! Skills, their progress, and production ticks.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
