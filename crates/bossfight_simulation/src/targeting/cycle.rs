//! Lock-on target selection.
//!
//! Bearings are measured from the camera, not the player: "next target to the
//! right" means next on screen. Positive yaw turns counter-clockwise seen from
//! above (see `behavior::facing`), so a clockwise step looks for the smallest
//! negative delta.

use bevy::prelude::*;

use crate::behavior::facing::{bearing, yaw_delta};

/// An enemy the player could lock on to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub entity: Entity,
    pub position: Vec3,
}

impl Candidate {
    pub fn new(entity: Entity, position: Vec3) -> Self {
        Self { entity, position }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CycleDirection {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl CycleDirection {
    pub fn from_clockwise(clockwise: bool) -> Self {
        if clockwise {
            Self::Clockwise
        } else {
            Self::CounterClockwise
        }
    }

    /// Whether a bearing delta (candidate − current) lies on this side.
    /// Zero lies on neither side.
    pub fn accepts(self, delta: f32) -> bool {
        match self {
            Self::Clockwise => delta < 0.0,
            Self::CounterClockwise => delta > 0.0,
        }
    }
}

/// Closest candidate to `origin` (strictly closer wins, so ties keep the earlier one)
pub fn nearest_enemy(candidates: &[Candidate], origin: Vec3) -> Option<Entity> {
    let mut best: Option<(Entity, f32)> = None;
    for candidate in candidates {
        let distance = origin.distance(candidate.position);
        if best.is_none_or(|(_, best_distance)| distance < best_distance) {
            best = Some((candidate.entity, distance));
        }
    }
    best.map(|(entity, _)| entity)
}

/// Picks the next lock-on target.
///
/// Without a current target: the nearest candidate to `origin`.
/// With one: among the other candidates on the requested side of the current
/// target (as seen from `camera_location`), the one with the smallest yaw
/// delta. Returns None when nothing qualifies; the caller keeps its lock.
pub fn cycle_target(
    current: Option<Candidate>,
    candidates: &[Candidate],
    origin: Vec3,
    camera_location: Vec3,
    direction: CycleDirection,
) -> Option<Entity> {
    let Some(current) = current else {
        return nearest_enemy(candidates, origin);
    };

    let reference = bearing(camera_location, current.position);
    let mut best: Option<(Entity, f32)> = None;

    for candidate in candidates.iter().filter(|c| c.entity != current.entity) {
        let delta = yaw_delta(reference, bearing(camera_location, candidate.position));
        if !direction.accepts(delta) {
            continue;
        }
        let difference = delta.abs();
        if best.is_none_or(|(_, best_difference)| difference < best_difference) {
            best = Some((candidate.entity, difference));
        }
    }

    best.map(|(entity, _)| entity)
}
