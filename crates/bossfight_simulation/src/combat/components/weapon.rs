//! Weapon hit volume.

use bevy::prelude::*;

use crate::tuning::SensesTuning;

/// Melee weapon hit volume
///
/// `overlapping` is written by the overlap collaborator (actors currently inside
/// the volume). Hit registration only reads it while the owner's damage window
/// is open.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Weapon {
    /// Reach from the owner's origin (ground plane)
    pub reach: f32,
    /// Full swing arc in front of the owner
    pub arc_degrees: f32,
    pub overlapping: Vec<Entity>,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::from_tuning(&SensesTuning::default())
    }
}

impl Weapon {
    pub fn new(reach: f32, arc_degrees: f32) -> Self {
        Self {
            reach,
            arc_degrees,
            overlapping: Vec::new(),
        }
    }

    pub fn from_tuning(senses: &SensesTuning) -> Self {
        Self::new(senses.weapon_reach, senses.weapon_arc_deg)
    }

    /// Whether `point` is inside the volume of a weapon held at `origin` facing `forward`
    pub fn covers(&self, origin: Vec3, forward: Vec3, point: Vec3) -> bool {
        let offset = Vec3::new(point.x - origin.x, 0.0, point.z - origin.z);
        let distance = offset.length();
        if distance > self.reach {
            return false;
        }
        if distance <= f32::EPSILON {
            return true;
        }

        let half_arc_cos = (self.arc_degrees.to_radians() * 0.5).cos();
        let forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();
        forward.dot(offset / distance) >= half_arc_cos
    }
}
