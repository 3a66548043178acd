//! Timeline cue dispatch.

use bevy::prelude::*;

use crate::behavior::{with_policy, PolicyEnv, PolicyItems, Positions};
use crate::clock::CombatClock;
use crate::combat::TimelineEvent;
use crate::components::Dead;
use crate::tuning::CombatTuning;
use crate::DeterministicRng;

/// System: drain the timeline queue into the owners' policies
///
/// Runs once per tick before the behavior step, in arrival order.
pub fn dispatch_timeline_cues(
    mut timeline: EventReader<TimelineEvent>,
    clock: Res<CombatClock>,
    tuning: Res<CombatTuning>,
    mut rng: ResMut<DeterministicRng>,
    mut params: ParamSet<(Query<(Entity, &Transform), Without<Dead>>, Query<PolicyItems>)>,
) {
    if timeline.is_empty() {
        return;
    }

    let positions = Positions::snapshot(&params.p0());
    let mut env = PolicyEnv {
        clock: &clock,
        tuning: &tuning,
        rng: &mut rng.rng,
    };
    let mut actors = params.p1();

    for event in timeline.read() {
        // Owner despawned while its clip was still playing
        let Ok(item) = actors.get_mut(event.entity) else {
            continue;
        };
        let target_position = positions.get(item.1.target);
        with_policy(item, target_position, &mut env, |policy, combatant, ctx| {
            policy.on_cue(combatant, ctx, event.cue);
        });
    }
}
