//! Combat components

pub mod aim;
pub mod state;
pub mod trigger;

pub use aim::*;
pub use state::*;
pub use trigger::*;
