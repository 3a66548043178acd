//! Lock-on camera assist.
//!
//! A soft assist, not a hard lock: while a target is locked and not right on
//! top of the player, the camera yaw is nudged towards it in proportion to how
//! far off it is, once the deviation passes a threshold.

use bevy::prelude::*;

use crate::behavior::facing::{bearing, flatten, normalize_angle};
use crate::behavior::Positions;
use crate::clock::CombatClock;
use crate::combat::Combatant;
use crate::components::{CameraRig, Dead, Player};
use crate::tuning::{CameraTuning, CombatTuning};

/// Yaw nudge for one tick (0 when the assist stays idle)
pub fn assist_yaw_step(camera_yaw: f32, player_position: Vec3, target_position: Vec3, dt: f32, tuning: &CameraTuning) -> f32 {
    let offset = flatten(target_position - player_position);
    if offset.length() <= tuning.assist_dead_zone {
        return 0.0;
    }

    let deviation = normalize_angle(camera_yaw - bearing(player_position, target_position));
    if deviation.abs() <= tuning.assist_yaw_threshold_deg.to_radians() {
        return 0.0;
    }
    dt * -deviation * tuning.assist_gain
}

/// System: nudge locked players' camera rigs towards their targets
pub fn assist_lock_on_camera(
    clock: Res<CombatClock>,
    tuning: Res<CombatTuning>,
    mut params: ParamSet<(
        Query<(Entity, &Transform), Without<Dead>>,
        Query<(&Combatant, &Transform, &mut CameraRig), (With<Player>, Without<Dead>)>,
    )>,
) {
    let positions = Positions::snapshot(&params.p0());
    let dt = clock.delta_secs();

    for (combatant, transform, mut rig) in params.p1().iter_mut() {
        if !combatant.target_locked {
            continue;
        }
        let Some(target_position) = positions.get(combatant.target) else {
            continue;
        };

        let step = assist_yaw_step(rig.yaw, transform.translation, target_position, dt, &tuning.camera);
        if step != 0.0 {
            rig.yaw = normalize_angle(rig.yaw + step);
        }
    }
}

/// System (headless stand-in): keep the rig behind the player at arm length
pub fn follow_camera_rig(tuning: Res<CombatTuning>, mut rigs: Query<(&Transform, &mut CameraRig)>) {
    for (transform, mut rig) in rigs.iter_mut() {
        let location = transform.translation - rig.forward() * tuning.camera.arm_length;
        if rig.location != location {
            rig.location = location;
        }
    }
}
