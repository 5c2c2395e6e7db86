//! Combat systems

pub mod aiming;
pub mod damage;
pub mod fire;
pub mod reload;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod aiming_tests;
#[cfg(test)]
mod damage_tests;

pub use aiming::*;
pub use damage::*;
pub use fire::*;
pub use reload::*;
