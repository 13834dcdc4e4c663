//! Item system: ids, catalog, equipment, and loot rolling.

pub mod catalog;
pub mod data;
pub mod drops;
pub mod equipment;
pub mod types;

pub use catalog::*;
pub use drops::*;
pub use equipment::*;
pub use types::*;
