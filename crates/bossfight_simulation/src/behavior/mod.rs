//! Behavior policies: the per-actor decision layer on top of [`Combatant`].
//!
//! Every combatant carries the shared combat record (`Combatant`) plus one
//! `Behavior` variant. The variants implement [`BehaviorPolicy`]; the boss wraps
//! the enemy policy and delegates explicitly instead of overriding it.
//!
//! Policies never touch other entities or the engine. They mutate their own
//! record and transform and push [`Directive`]s into their [`Outbox`]; the
//! outbox is flushed to the collaborators at the end of the tick.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::ai::{BossPolicy, EnemyPolicy};
use crate::clock::CombatClock;
use crate::combat::{ClipId, Combatant, TimelineCue};
use crate::components::{LineOfSight, NavigationState};
use crate::player::PlayerPolicy;
use crate::tuning::CombatTuning;

pub mod facing;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_support;

pub use systems::*;

/// Behavior Plugin
///
/// Order inside `CombatSet::Behavior`: rotate towards targets, then one policy step.
/// Outboxes are flushed in `CombatSet::Actuate`.
pub struct BehaviorPlugin;

impl Plugin for BehaviorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (rotate_towards_targets, tick_behaviors)
                .chain()
                .in_set(crate::CombatSet::Behavior),
        )
        .add_systems(FixedUpdate, flush_outboxes.in_set(crate::CombatSet::Actuate));
    }
}

// ============================================================================
// Outgoing directives
// ============================================================================

/// Order handed to a collaborator (clip player, navigation, movement)
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    PlayClip(ClipId),
    /// Path-follow towards an actor
    MoveToActor(Entity),
    /// Cancel any active pathfinding
    StopMovement,
    /// Add displacement input (direction × scale, clamped to unit length by the integrator)
    AddMovementInput { direction: Vec3, scale: f32 },
    SetMaxWalkSpeed(f32),
    SetOrientToMovement(bool),
}

/// Directives emitted this tick, in order
#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct Outbox(pub Vec<Directive>);

impl Outbox {
    pub fn push(&mut self, directive: Directive) {
        self.0.push(directive);
    }

    pub fn play_clip(&mut self, clip: Option<ClipId>) {
        if let Some(clip) = clip {
            self.push(Directive::PlayClip(clip));
        }
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Directive> {
        self.0.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Directive> {
        self.0.iter()
    }
}

// ============================================================================
// Policy context
// ============================================================================

/// Collaborator-reported facts a policy may query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensors {
    pub following_path: bool,
    pub airborne: bool,
    pub line_of_sight: bool,
}

impl Default for Sensors {
    fn default() -> Self {
        Self {
            following_path: false,
            airborne: false,
            line_of_sight: true,
        }
    }
}

impl Sensors {
    pub fn from_components(navigation: &NavigationState, line_of_sight: Option<&LineOfSight>) -> Self {
        Self {
            following_path: navigation.following_path,
            airborne: navigation.airborne,
            line_of_sight: line_of_sight.is_none_or(|sight| sight.0),
        }
    }
}

/// Everything a policy step may read or write besides its own record
pub struct PolicyContext<'a> {
    pub entity: Entity,
    pub transform: &'a mut Transform,
    /// Resolved position of `Combatant::target` (None when absent, despawned or dead)
    pub target_position: Option<Vec3>,
    pub sensors: Sensors,
    pub clock: &'a CombatClock,
    pub tuning: &'a CombatTuning,
    pub rng: &'a mut ChaCha8Rng,
    pub outbox: &'a mut Outbox,
}

impl PolicyContext<'_> {
    pub fn position(&self) -> Vec3 {
        self.transform.translation
    }

    pub fn forward(&self) -> Vec3 {
        *self.transform.forward()
    }

    pub fn delta_secs(&self) -> f32 {
        self.clock.delta_secs()
    }

    pub fn distance_to_target(&self) -> Option<f32> {
        self.target_position.map(|target| self.position().distance(target))
    }

    /// forward · direction-to-target (full 3D direction)
    pub fn facing_dot(&self) -> Option<f32> {
        self.target_position
            .map(|target| self.forward().dot((target - self.position()).normalize_or_zero()))
    }
}

/// A damage application arriving at a policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IncomingHit {
    pub amount: u32,
    pub instigator: Option<Entity>,
    pub causer: Entity,
    pub causer_position: Option<Vec3>,
}

// ============================================================================
// Policy trait
// ============================================================================

pub trait BehaviorPolicy {
    /// One behavior step (state machine or player tick)
    fn on_tick(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext);

    /// Try to start an attack; returns whether a swing started
    fn on_attack(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) -> bool;

    /// Returns the amount accepted (0 = rejected)
    fn on_damage(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, hit: &IncomingHit) -> u32;

    fn on_end_attack(&mut self, combatant: &mut Combatant) {
        combatant.end_attack();
    }

    fn on_cue(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, cue: TimelineCue) {
        apply_base_cue(self, combatant, ctx, cue);
    }

    fn on_death(&mut self, _combatant: &mut Combatant, _ctx: &mut PolicyContext) {}

    /// Smooth target facing is suppressed while this is false
    fn allows_target_facing(&self) -> bool {
        true
    }
}

/// Timeline cues every combatant understands
pub fn apply_base_cue<P: BehaviorPolicy + ?Sized>(
    policy: &mut P,
    combatant: &mut Combatant,
    ctx: &mut PolicyContext,
    cue: TimelineCue,
) {
    match cue {
        TimelineCue::AttackLunge => {
            combatant.attack_lunge(ctx.transform, ctx.target_position, ctx.tuning.combatant.lunge_distance);
        }
        TimelineCue::AttackDamageStart => combatant.set_attack_damaging(true),
        TimelineCue::AttackDamageEnd => combatant.set_attack_damaging(false),
        TimelineCue::AttackNextReady => combatant.attack_next_ready(),
        TimelineCue::AttackEnd => policy.on_end_attack(combatant),
        TimelineCue::MovingForward(on) => combatant.set_moving_forward(on),
        TimelineCue::MovingBackwards(on) => combatant.set_moving_backwards(on),
        TimelineCue::StumbleEnd => combatant.end_stumble(),
        TimelineCue::RollStart | TimelineCue::RollEnd => {}
    }
}

// ============================================================================
// Behavior component
// ============================================================================

#[derive(Component, Debug, Clone)]
pub enum Behavior {
    Player(PlayerPolicy),
    Enemy(EnemyPolicy),
    Boss(BossPolicy),
}

impl Behavior {
    pub fn policy(&self) -> &dyn BehaviorPolicy {
        match self {
            Behavior::Player(policy) => policy,
            Behavior::Enemy(policy) => policy,
            Behavior::Boss(policy) => policy,
        }
    }

    pub fn policy_mut(&mut self) -> &mut dyn BehaviorPolicy {
        match self {
            Behavior::Player(policy) => policy,
            Behavior::Enemy(policy) => policy,
            Behavior::Boss(policy) => policy,
        }
    }

    pub fn as_player(&self) -> Option<&PlayerPolicy> {
        match self {
            Behavior::Player(policy) => Some(policy),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerPolicy> {
        match self {
            Behavior::Player(policy) => Some(policy),
            _ => None,
        }
    }

    /// Enemy view (plain enemy or the enemy core of a boss)
    pub fn as_enemy(&self) -> Option<&EnemyPolicy> {
        match self {
            Behavior::Enemy(policy) => Some(policy),
            Behavior::Boss(boss) => Some(&boss.enemy),
            Behavior::Player(_) => None,
        }
    }

    pub fn as_boss(&self) -> Option<&BossPolicy> {
        match self {
            Behavior::Boss(boss) => Some(boss),
            _ => None,
        }
    }
}
