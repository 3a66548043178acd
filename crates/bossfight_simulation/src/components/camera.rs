//! Lock-on camera rig
//!
//! The real camera belongs to the engine. The combat core only needs the rig yaw
//! (player movement and target cycling are camera-relative) and the camera
//! location (bearing deltas are measured from it), and it writes the yaw back
//! while camera assist is active.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct CameraRig {
    /// Radians around +Y, 0 looks down -Z
    pub yaw: f32,
    pub location: Vec3,
}

impl CameraRig {
    pub fn new(yaw: f32, location: Vec3) -> Self {
        Self { yaw, location }
    }

    /// Ground-plane forward of the camera
    pub fn forward(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::NEG_Z
    }

    /// Ground-plane right of the camera
    pub fn right(&self) -> Vec3 {
        Quat::from_rotation_y(self.yaw) * Vec3::X
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rig_basis_at_zero_yaw() {
        let rig = CameraRig::default();
        assert!(rig.forward().abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(rig.right().abs_diff_eq(Vec3::X, 1e-6));
    }

    #[test]
    fn test_rig_basis_quarter_turn() {
        // +90° (counter-clockwise from above) turns forward from -Z to -X
        let rig = CameraRig::new(std::f32::consts::FRAC_PI_2, Vec3::ZERO);
        assert!(rig.forward().abs_diff_eq(Vec3::NEG_X, 1e-5));
        assert!(rig.right().abs_diff_eq(Vec3::NEG_Z, 1e-5));
    }
}
