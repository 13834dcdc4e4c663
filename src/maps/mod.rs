//! Combat maps and their unlock order.

mod data;
mod progression;

pub use data::*;
pub use progression::*;
