//! Ground-plane yaw helpers
//!
//! Yaw is measured around +Y; yaw 0 faces -Z and positive yaw turns
//! counter-clockwise seen from above (`Quat::from_rotation_y`).

use bevy::prelude::*;
use std::f32::consts::{PI, TAU};

/// Drops the vertical component
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Yaw of a (ground-plane) direction
pub fn yaw_of(direction: Vec3) -> f32 {
    f32::atan2(-direction.x, -direction.z)
}

/// Current yaw of a transform (from its forward vector)
pub fn current_yaw(transform: &Transform) -> f32 {
    yaw_of(flatten(*transform.forward()))
}

/// Wraps an angle into (-π, π]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Signed shortest-arc yaw difference `to - from`
pub fn yaw_delta(from: f32, to: f32) -> f32 {
    normalize_angle(to - from)
}

/// Ground-plane bearing from `origin` to `point`
pub fn bearing(origin: Vec3, point: Vec3) -> f32 {
    yaw_of(flatten(point - origin))
}

/// Snap-rotates the transform to face `point` on the ground plane.
///
/// Returns false (and leaves the transform untouched) when `point` is straight above/below.
pub fn face_towards(transform: &mut Transform, point: Vec3) -> bool {
    let direction = flatten(point - transform.translation);
    if direction.length_squared() <= f32::EPSILON {
        return false;
    }
    transform.rotation = Quat::from_rotation_y(yaw_of(direction));
    true
}
