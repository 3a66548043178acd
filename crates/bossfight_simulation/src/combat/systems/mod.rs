//! Combat systems

pub mod cues;
pub mod damage;
pub mod hits;


pub use cues::*;
pub use damage::*;
pub use hits::*;
