//! Player input actions (input device → core)

use bevy::prelude::*;

use super::PlayerPolicy;
use crate::behavior::{with_behavior, Behavior, BehaviorPolicy, PolicyContext, PolicyEnv, PolicyItems, Positions};
use crate::clock::CombatClock;
use crate::combat::Combatant;
use crate::components::{CameraRig, Dead, Player};
use crate::targeting::{Candidate, CycleDirection, NearbyEnemies};
use crate::tuning::CombatTuning;
use crate::DeterministicRng;

/// One input action for a player-controlled combatant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    /// Axis values in [-1, 1]; sent every tick the stick is read (0 clears)
    Move { forward: f32, right: f32 },
    Attack,
    Roll,
    CycleTarget { clockwise: bool },
    ToggleCombatMode,
}

/// Event: player input (input device → core)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerInput {
    pub entity: Entity,
    pub action: PlayerAction,
}

impl PlayerInput {
    pub fn new(entity: Entity, action: PlayerAction) -> Self {
        Self { entity, action }
    }
}

/// Query data of a player-controlled combatant
type PlayerItems = (PolicyItems, &'static CameraRig, Option<&'static NearbyEnemies>);

/// System: apply this tick's input actions in arrival order
///
/// Runs in `CombatSet::Input`, after cues and before the behavior step.
pub fn apply_player_input(
    mut inputs: EventReader<PlayerInput>,
    clock: Res<CombatClock>,
    tuning: Res<CombatTuning>,
    mut rng: ResMut<DeterministicRng>,
    mut params: ParamSet<(
        Query<(Entity, &Transform), Without<Dead>>,
        Query<PlayerItems, (With<Player>, Without<Dead>)>,
    )>,
) {
    if inputs.is_empty() {
        return;
    }

    let positions = Positions::snapshot(&params.p0());
    let mut env = PolicyEnv {
        clock: &clock,
        tuning: &tuning,
        rng: &mut rng.rng,
    };
    let mut players = params.p1();

    for input in inputs.read() {
        let Ok((item, camera, nearby)) = players.get_mut(input.entity) else {
            continue;
        };
        let camera = *camera;
        let candidates: Vec<Candidate> = nearby
            .into_iter()
            .flat_map(|nearby| nearby.iter())
            .filter_map(|entity| positions.get(Some(entity)).map(|position| Candidate::new(entity, position)))
            .collect();
        let target_position = positions.get(item.1.target);

        with_behavior(item, target_position, &mut env, |behavior, combatant, ctx| {
            let Behavior::Player(player) = behavior else {
                return;
            };
            apply_action(player, combatant, ctx, &camera, &candidates, input.action);
        });
    }
}

fn apply_action(
    player: &mut PlayerPolicy,
    combatant: &mut Combatant,
    ctx: &mut PolicyContext,
    camera: &CameraRig,
    candidates: &[Candidate],
    action: PlayerAction,
) {
    match action {
        PlayerAction::Move { forward, right } => {
            player.move_input(combatant, camera, forward, right, ctx.outbox);
        }
        PlayerAction::Attack => {
            player.on_attack(combatant, ctx);
        }
        PlayerAction::Roll => {
            player.roll(combatant, ctx, camera);
        }
        PlayerAction::CycleTarget { clockwise } => {
            player.cycle_target(
                combatant,
                ctx,
                candidates,
                camera.location,
                CycleDirection::from_clockwise(clockwise),
            );
        }
        PlayerAction::ToggleCombatMode => {
            player.toggle_combat_mode(combatant, ctx, candidates, camera.location);
        }
    }
}
