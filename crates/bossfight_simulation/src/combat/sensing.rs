//! Headless weapon overlap sensing.
//!
//! Stands in for the engine's weapon hit volume: every tick each weapon lists
//! the living actors inside its reach and swing arc.

use bevy::prelude::*;

use crate::combat::Weapon;
use crate::components::{Dead, Health};

/// System: refresh `Weapon::overlapping` from actor positions
pub fn sense_weapon_overlaps(
    mut weapons: Query<(Entity, &Transform, &mut Weapon)>,
    bodies: Query<(Entity, &Transform), (With<Health>, Without<Dead>)>,
) {
    for (owner, transform, mut weapon) in weapons.iter_mut() {
        let origin = transform.translation;
        let forward = *transform.forward();

        let overlapping: Vec<Entity> = bodies
            .iter()
            .filter(|(entity, _)| *entity != owner)
            .filter(|(_, body)| weapon.covers(origin, forward, body.translation))
            .map(|(entity, _)| entity)
            .collect();

        if weapon.overlapping != overlapping {
            weapon.overlapping = overlapping;
        }
    }
}
