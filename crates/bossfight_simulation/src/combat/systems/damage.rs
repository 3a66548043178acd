//! Damage resolution and death handling.

use bevy::ecs::query::QueryItem;
use bevy::prelude::*;

use crate::behavior::{with_policy, IncomingHit, PolicyEnv, PolicyItems, Positions};
use crate::clock::CombatClock;
use crate::combat::timeline::ClipPlayback;
use crate::combat::{DamageDealt, DamageRequest, EntityDied};
use crate::components::{Dead, Health, MovementCommand, NavigationState};
use crate::tuning::CombatTuning;
use crate::DeterministicRng;

/// Query data of an actor that can receive damage
pub type DamageTargetItems = (PolicyItems, &'static mut Health);

/// What a single damage application did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Health actually removed (0 = rejected)
    pub applied: u32,
    pub killed: bool,
}

/// Applies one hit to a target and returns the amount actually applied.
///
/// The target's policy decides how much it accepts (self-damage, roll
/// invulnerability, poise); health then clamps it. Reaching zero health runs the
/// policy's death hook immediately so no further behavior fires this tick.
pub fn resolve_damage(item: QueryItem<'_, DamageTargetItems>, hit: &IncomingHit, env: &mut PolicyEnv) -> DamageOutcome {
    let (policy_item, mut health) = item;
    if !health.is_alive() {
        return DamageOutcome::default();
    }

    with_policy(policy_item, None, env, |policy, combatant, ctx| {
        let accepted = policy.on_damage(combatant, ctx, hit);
        let applied = health.take_damage(accepted);
        let killed = applied > 0 && !health.is_alive();
        if killed {
            policy.on_death(combatant, ctx);
        }
        DamageOutcome { applied, killed }
    })
}

/// Emits `DamageDealt` / `EntityDied` for a resolved hit
pub fn report_damage(
    outcome: DamageOutcome,
    attacker: Entity,
    target: Entity,
    dealt: &mut EventWriter<DamageDealt>,
    died: &mut EventWriter<EntityDied>,
) {
    if outcome.applied == 0 {
        return;
    }

    dealt.write(DamageDealt {
        attacker,
        target,
        damage: outcome.applied,
    });

    if outcome.killed {
        died.write(EntityDied {
            entity: target,
            killer: Some(attacker),
        });
        crate::logger::log_info(&format!("💀 {:?} killed by {:?}", target, attacker));
    }
}

/// System: apply external damage requests
pub fn apply_damage_requests(
    mut requests: EventReader<DamageRequest>,
    clock: Res<CombatClock>,
    tuning: Res<CombatTuning>,
    mut rng: ResMut<DeterministicRng>,
    mut params: ParamSet<(Query<(Entity, &Transform), Without<Dead>>, Query<DamageTargetItems>)>,
    mut dealt: EventWriter<DamageDealt>,
    mut died: EventWriter<EntityDied>,
) {
    if requests.is_empty() {
        return;
    }

    let positions = Positions::snapshot(&params.p0());
    let mut env = PolicyEnv {
        clock: &clock,
        tuning: &tuning,
        rng: &mut rng.rng,
    };
    let mut targets = params.p1();

    for request in requests.read() {
        let Ok(item) = targets.get_mut(request.target) else {
            continue;
        };
        let hit = IncomingHit {
            amount: request.amount,
            instigator: request.instigator,
            causer: request.causer,
            causer_position: positions.get(Some(request.causer)),
        };
        let outcome = resolve_damage(item, &hit, &mut env);
        report_damage(outcome, request.causer, request.target, &mut dealt, &mut died);
    }
}

/// System: mark dead actors and cancel their navigation and clips
pub fn mark_dead_on_death(
    mut commands: Commands,
    mut deaths: EventReader<EntityDied>,
    mut actors: Query<(&mut MovementCommand, &mut NavigationState, &mut ClipPlayback)>,
) {
    for event in deaths.read() {
        if let Ok((mut command, mut navigation, mut playback)) = actors.get_mut(event.entity) {
            *command = MovementCommand::Stop;
            navigation.following_path = false;
            playback.current = None;
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
            crate::logger::log(&format!("Marked {:?} as dead", event.entity));
        }
    }
}
