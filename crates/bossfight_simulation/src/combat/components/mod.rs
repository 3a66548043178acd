//! Combat components

pub mod combatant;
pub mod weapon;


pub use combatant::*;
pub use weapon::*;
