//! Headless movement collaborator.
//!
//! Executes the intent the combat core writes (`MovementCommand`,
//! `MovementInput`, `MovementSpeed`) and reports back `NavigationState`. In a
//! game build the engine's navigation and character movement do this; these
//! stand-ins keep scenario tests and the headless binary self-contained.
//!
//! Deliberately simple: straight-line path following, no collisions, no
//! acceleration.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::behavior::facing::{flatten, yaw_of};
use crate::clock::CombatClock;
use crate::combat::Combatant;
use crate::components::{Dead, MovementCommand, MovementInput, MovementSpeed, NavigationState};
use crate::tuning::CombatTuning;

/// System: walk path-following actors straight towards their goal
///
/// The goal position is refreshed every tick. Reaching the acceptance radius
/// (or losing the goal) finishes the path.
pub fn follow_paths(
    clock: Res<CombatClock>,
    tuning: Res<CombatTuning>,
    mut actors: Query<(Entity, &mut Transform, &mut MovementCommand, &mut NavigationState, &MovementSpeed), Without<Dead>>,
) {
    let positions: HashMap<Entity, Vec3> = actors
        .iter()
        .map(|(entity, transform, ..)| (entity, transform.translation))
        .collect();
    let dt = clock.delta_secs();
    let acceptance = tuning.senses.path_acceptance_radius;

    for (entity, mut transform, mut command, mut navigation, speed) in actors.iter_mut() {
        match *command {
            MovementCommand::Idle => {}
            MovementCommand::Stop => {
                *command = MovementCommand::Idle;
                navigation.following_path = false;
            }
            MovementCommand::FollowEntity { target } => {
                let Some(goal) = positions.get(&target).copied() else {
                    crate::logger::log(&format!("🧭 {:?}: path goal {:?} is gone", entity, target));
                    *command = MovementCommand::Idle;
                    navigation.following_path = false;
                    continue;
                };

                let offset = flatten(goal - transform.translation);
                let remaining = offset.length() - acceptance;
                if remaining <= 0.0 {
                    *command = MovementCommand::Idle;
                    navigation.following_path = false;
                    continue;
                }

                let step = (speed.max_walk_speed * dt).min(remaining);
                transform.translation += offset.normalize_or_zero() * step;
                navigation.following_path = true;
            }
        }
    }
}

/// System: consume accumulated movement input
///
/// The accumulated vector is clamped to unit length and scaled by the walk speed cap.
/// Actors that orient to movement snap to face the input, except while
/// stumbling (the back-step keeps the hit reaction facing).
pub fn integrate_movement_input(
    clock: Res<CombatClock>,
    mut actors: Query<(&mut Transform, &mut MovementInput, &MovementSpeed, Option<&Combatant>)>,
) {
    let dt = clock.delta_secs();

    for (mut transform, mut input, speed, combatant) in actors.iter_mut() {
        if input.pending == Vec3::ZERO {
            continue;
        }
        let pending = flatten(input.take()).clamp_length_max(1.0);
        transform.translation += pending * speed.max_walk_speed * dt;

        let stumbling = combatant.is_some_and(|c| c.stumbling);
        if speed.orient_to_movement && !stumbling && pending.length_squared() > f32::EPSILON {
            transform.rotation = Quat::from_rotation_y(yaw_of(pending));
        }
    }
}

/// System: airborne = above the ground plane by more than the tolerance
pub fn detect_airborne(tuning: Res<CombatTuning>, mut actors: Query<(&Transform, &mut NavigationState)>) {
    let tolerance = tuning.senses.ground_tolerance;

    for (transform, mut navigation) in actors.iter_mut() {
        let airborne = transform.translation.y > tolerance;
        if navigation.airborne != airborne {
            navigation.airborne = airborne;
        }
    }
}
