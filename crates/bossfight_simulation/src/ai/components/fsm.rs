//! Enemy FSM state.

use bevy::prelude::*;

/// Enemy state machine states
///
/// Initial: `Idle`. Terminal: `Dead`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum EnemyState {
    /// Waiting for a target to come within engagement range
    #[default]
    Idle,
    /// Closing in and attacking
    ChaseClose,
    /// Engaged but holding distance (returns to ChaseClose when the target comes near)
    ChaseFar,
    /// Swing in progress
    Attack,
    /// Hit reaction
    Stumble,
    /// Scripted idle behavior (no decisions)
    Taunt,
    Dead,
}

impl EnemyState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EnemyState::Dead)
    }
}
