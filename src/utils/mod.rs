//! Host-side helpers.

pub mod persistence;

pub use persistence::*;
