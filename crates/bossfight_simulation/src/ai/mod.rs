//! AI decision-making: enemy and boss behavior policies.
//!
//! Both run as `Behavior` variants inside the shared behavior step
//! (`behavior::tick_behaviors`); there is no separate AI schedule.

pub mod boss;
pub mod components;
pub mod enemy;

#[cfg(test)]
mod boss_tests;
#[cfg(test)]
mod enemy_tests;

pub use boss::BossPolicy;
pub use components::*;
pub use enemy::EnemyPolicy;
