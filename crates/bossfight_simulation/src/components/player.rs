//! Player control marker component

use bevy::prelude::*;

/// Marker component for the player-controlled combatant
///
/// Input systems filter with `With<Player>`; targeting only tracks nearby
/// enemies for entities carrying this marker.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;
