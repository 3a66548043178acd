//! Targeting: which enemies the player can lock on to, and how the lock moves.
//!
//! The detection volume collaborator reports enter/exit transitions as
//! [`DetectionEvent`]s; `update_nearby_enemies` folds them into each observer's
//! [`NearbyEnemies`] set. Lock-on cycling is pure geometry in [`cycle`] and is
//! driven by the player policy.

use bevy::prelude::*;

pub mod components;
pub mod cycle;
pub mod events;
pub mod sensing;
pub mod systems;


pub use components::*;
pub use cycle::{cycle_target, nearest_enemy, Candidate, CycleDirection};
pub use events::*;
pub use systems::*;

/// Targeting Plugin
///
/// `update_nearby_enemies` runs in `CombatSet::Sense`, before any policy reads the set.
pub struct TargetingPlugin;

impl Plugin for TargetingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DetectionEvent>()
            .add_systems(FixedUpdate, update_nearby_enemies.in_set(crate::CombatSet::Sense));
    }
}
