//! Movement components: navigation commands, collaborator state, speed cap
//!
//! The combat core never integrates motion itself. It writes high-level intent
//! (`MovementCommand`, `MovementInput`, `MovementSpeed`) and reads back what the
//! movement collaborator reports (`NavigationState`, `LineOfSight`).

use bevy::prelude::*;

/// Navigation command for an actor (executed by the path-following collaborator)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum MovementCommand {
    /// No active order
    #[default]
    Idle,
    /// Follow an entity along a path (target position refreshed every tick)
    FollowEntity { target: Entity },
    /// Stop immediately and drop the current path
    Stop,
}

/// Collaborator-reported movement state
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct NavigationState {
    /// A path-follow request is in progress
    pub following_path: bool,
    /// Actor is falling/jumping (no ground contact)
    pub airborne: bool,
}

/// Accumulated displacement input for this tick
///
/// Directives add world-space vectors (`direction × scale`); the collaborator
/// consumes and clears it after integration.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct MovementInput {
    pub pending: Vec3,
}

impl MovementInput {
    pub fn add(&mut self, direction: Vec3, scale: f32) {
        self.pending += direction * scale;
    }

    pub fn take(&mut self) -> Vec3 {
        std::mem::take(&mut self.pending)
    }
}

/// Character movement settings: walk speed cap and facing mode
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    /// Units/s, used by path following and input integration
    pub max_walk_speed: f32,
    /// Turn the actor to face its movement input
    pub orient_to_movement: bool,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self {
            max_walk_speed: 450.0,
            orient_to_movement: false,
        }
    }
}

/// Line of sight to the current target, reported by the engine
///
/// Actors without this component are treated as having clear sight.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct LineOfSight(pub bool);

impl Default for LineOfSight {
    fn default() -> Self {
        Self(true)
    }
}
