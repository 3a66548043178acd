//! Player controller: input actions, combo/roll/lock-on logic, camera assist.

use bevy::prelude::*;

pub mod camera_assist;
pub mod input;
pub mod policy;


pub use camera_assist::{assist_lock_on_camera, follow_camera_rig};
pub use input::{apply_player_input, PlayerAction, PlayerInput};
pub use policy::PlayerPolicy;

/// Player Plugin
///
/// - `CombatSet::Input`: input actions, in arrival order
/// - `CombatSet::Actuate`: camera assist, after the outboxes are flushed
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerInput>()
            .add_systems(FixedUpdate, apply_player_input.in_set(crate::CombatSet::Input))
            .add_systems(
                FixedUpdate,
                assist_lock_on_camera
                    .after(crate::behavior::flush_outboxes)
                    .in_set(crate::CombatSet::Actuate),
            );
    }
}
