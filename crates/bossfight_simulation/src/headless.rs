//! Headless collaborators: the engine-side services the combat core talks to.
//!
//! In a game build the engine's animation, navigation, physics overlap and
//! camera systems fill these roles. Headless runs (tests, the scripted duel
//! binary) install these stand-ins instead; they all run last in the tick, in
//! `CombatSet::Collaborators`, so whatever they report is consumed next tick.

use bevy::prelude::*;

use crate::combat::sensing::sense_weapon_overlaps;
use crate::combat::timeline::{advance_clip_playback, start_requested_clips};
use crate::combat::ClipLibrary;
use crate::movement::{detect_airborne, follow_paths, integrate_movement_input};
use crate::player::follow_camera_rig;
use crate::targeting::sensing::sense_detection_volumes;

/// Headless Collaborators Plugin
///
/// Order (chained):
/// 1. clip player: start requested clips, advance playback → `TimelineEvent`s
/// 2. movement: path following, movement input, airborne check
/// 3. sensing: weapon overlaps, detection volumes → `DetectionEvent`s
/// 4. camera rig follows the player
///
/// Uses `ClipLibrary::standard()` unless a library was inserted beforehand.
pub struct HeadlessCollaboratorsPlugin;

impl Plugin for HeadlessCollaboratorsPlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<ClipLibrary>() {
            app.insert_resource(ClipLibrary::standard());
        }

        app.add_systems(
            FixedUpdate,
            (
                start_requested_clips,
                advance_clip_playback,
                follow_paths,
                integrate_movement_input,
                detect_airborne,
                sense_weapon_overlaps,
                sense_detection_volumes,
                follow_camera_rig,
            )
                .chain()
                .in_set(crate::CombatSet::Collaborators),
        );
    }
}
