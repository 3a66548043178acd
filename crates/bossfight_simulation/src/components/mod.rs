//! ECS components shared across combat subsystems
//!
//! Organized by domain:
//! - actor: health, hostility marker, death marker
//! - movement: navigation commands and collaborator state (MovementCommand, NavigationState)
//! - player: player control marker (Player)
//! - camera: lock-on camera rig (CameraRig)

pub mod actor;
pub mod camera;
pub mod movement;
pub mod player;

pub use actor::*;
pub use camera::*;
pub use movement::*;
pub use player::*;
