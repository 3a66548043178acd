//! Behavior systems: target facing, policy step, outbox flush.

use bevy::ecs::query::QueryItem;
use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use super::{Behavior, BehaviorPolicy, Directive, Outbox, PolicyContext, Sensors};
use crate::clock::CombatClock;
use crate::combat::{ClipRequested, Combatant};
use crate::components::{Dead, LineOfSight, MovementCommand, MovementInput, MovementSpeed, NavigationState};
use crate::tuning::CombatTuning;
use crate::DeterministicRng;

/// Query data every policy invocation needs
pub type PolicyItems = (
    Entity,
    &'static mut Combatant,
    &'static mut Behavior,
    &'static mut Transform,
    &'static mut Outbox,
    &'static NavigationState,
    Option<&'static LineOfSight>,
);

/// Live actor positions, snapshotted before mutable policy access
///
/// Dead actors are left out, so a target that died resolves to absent.
#[derive(Debug, Clone, Default)]
pub struct Positions(HashMap<Entity, Vec3>);

impl Positions {
    pub fn snapshot(query: &Query<(Entity, &Transform), Without<Dead>>) -> Self {
        Self(query.iter().map(|(entity, transform)| (entity, transform.translation)).collect())
    }

    pub fn get(&self, entity: Option<Entity>) -> Option<Vec3> {
        entity.and_then(|entity| self.0.get(&entity).copied())
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.0.contains_key(&entity)
    }
}

/// Shared resources of one policy invocation
pub struct PolicyEnv<'a> {
    pub clock: &'a CombatClock,
    pub tuning: &'a CombatTuning,
    pub rng: &'a mut ChaCha8Rng,
}

/// Builds the policy context for one actor and runs `f` with its behavior
pub fn with_behavior<R>(
    item: QueryItem<'_, PolicyItems>,
    target_position: Option<Vec3>,
    env: &mut PolicyEnv,
    f: impl FnOnce(&mut Behavior, &mut Combatant, &mut PolicyContext) -> R,
) -> R {
    let (entity, mut combatant, mut behavior, mut transform, mut outbox, navigation, line_of_sight) = item;

    let mut ctx = PolicyContext {
        entity,
        transform: &mut *transform,
        target_position,
        sensors: Sensors::from_components(navigation, line_of_sight),
        clock: env.clock,
        tuning: env.tuning,
        rng: &mut *env.rng,
        outbox: &mut *outbox,
    };

    f(&mut *behavior, &mut *combatant, &mut ctx)
}

/// [`with_behavior`] through the generic policy interface
pub fn with_policy<R>(
    item: QueryItem<'_, PolicyItems>,
    target_position: Option<Vec3>,
    env: &mut PolicyEnv,
    f: impl FnOnce(&mut dyn BehaviorPolicy, &mut Combatant, &mut PolicyContext) -> R,
) -> R {
    with_behavior(item, target_position, env, |behavior, combatant, ctx| {
        f(behavior.policy_mut(), combatant, ctx)
    })
}

/// System: smooth facing towards the current target
pub fn rotate_towards_targets(
    clock: Res<CombatClock>,
    mut params: ParamSet<(
        Query<(Entity, &Transform), Without<Dead>>,
        Query<(&mut Combatant, &Behavior, &mut Transform, &NavigationState)>,
    )>,
) {
    let positions = Positions::snapshot(&params.p0());
    let dt = clock.delta_secs();

    for (mut combatant, behavior, mut transform, navigation) in params.p1().iter_mut() {
        if !combatant.rotate_towards_target || !behavior.policy().allows_target_facing() {
            continue;
        }
        let target_position = positions.get(combatant.target);
        combatant.look_at_smooth(&mut transform, target_position, navigation.airborne, dt);
    }
}

/// System: one behavior step per combatant (AI state machine or player tick)
pub fn tick_behaviors(
    clock: Res<CombatClock>,
    tuning: Res<CombatTuning>,
    mut rng: ResMut<DeterministicRng>,
    mut params: ParamSet<(Query<(Entity, &Transform), Without<Dead>>, Query<PolicyItems>)>,
) {
    let positions = Positions::snapshot(&params.p0());
    let mut env = PolicyEnv {
        clock: &clock,
        tuning: &tuning,
        rng: &mut rng.rng,
    };

    for item in params.p1().iter_mut() {
        let target_position = positions.get(item.1.target);
        with_policy(item, target_position, &mut env, |policy, combatant, ctx| {
            policy.on_tick(combatant, ctx);
        });
    }
}

/// System: hand this tick's directives to the collaborators
pub fn flush_outboxes(
    mut actors: Query<(
        Entity,
        &mut Outbox,
        &mut MovementCommand,
        &mut NavigationState,
        &mut MovementInput,
        &mut MovementSpeed,
    )>,
    mut clips: EventWriter<ClipRequested>,
) {
    for (entity, mut outbox, mut command, mut navigation, mut input, mut speed) in actors.iter_mut() {
        if outbox.is_empty() {
            continue;
        }

        for directive in outbox.drain() {
            match directive {
                Directive::PlayClip(clip) => {
                    clips.write(ClipRequested { entity, clip });
                }
                Directive::MoveToActor(target) => {
                    *command = MovementCommand::FollowEntity { target };
                    navigation.following_path = true;
                }
                Directive::StopMovement => {
                    *command = MovementCommand::Stop;
                    navigation.following_path = false;
                }
                Directive::AddMovementInput { direction, scale } => input.add(direction, scale),
                Directive::SetMaxWalkSpeed(max_walk_speed) => speed.max_walk_speed = max_walk_speed,
                Directive::SetOrientToMovement(orient) => speed.orient_to_movement = orient,
            }
        }
    }
}
