//! Generic enemy state machine.
//!
//! ```text
//! IDLE ──target within engage radius──▶ CHASE_CLOSE ──in range + facing──▶ ATTACK
//!   ▲                                     ▲      ▲                          │
//!   │                            CHASE_FAR┘      └──────── AttackEnd ───────┘
//!   │                                     ▲
//!   │                                     └──── stumble ends ◀── STUMBLE ◀── hit (interruptable)
//! any ──health reaches zero──▶ DEAD (terminal)
//! ```

use bevy::prelude::*;

use super::EnemyState;
use crate::behavior::facing::face_towards;
use crate::behavior::{BehaviorPolicy, Directive, IncomingHit, PolicyContext};
use crate::combat::Combatant;

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyPolicy {
    pub state: EnemyState,
    /// Hits stagger only while interruptable
    pub interruptable: bool,
}

impl Default for EnemyPolicy {
    fn default() -> Self {
        Self {
            state: EnemyState::Idle,
            interruptable: true,
        }
    }
}

impl EnemyPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    /// No-op once dead
    pub fn set_state(&mut self, state: EnemyState) {
        if !self.state.is_terminal() {
            self.state = state;
        }
    }

    /// One state machine step. `forward_speed` drives the ATTACK forward phase.
    pub fn tick_state(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, forward_speed: f32) {
        match self.state {
            EnemyState::Idle => self.state_idle(combatant, ctx),
            EnemyState::ChaseClose => self.state_chase_close(combatant, ctx),
            EnemyState::ChaseFar => self.state_chase_far(ctx),
            EnemyState::Attack => self.state_attack(combatant, ctx, forward_speed),
            EnemyState::Stumble => self.state_stumble(combatant, ctx),
            EnemyState::Taunt | EnemyState::Dead => {}
        }
    }

    fn state_idle(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) {
        let Some(distance) = ctx.distance_to_target() else {
            return;
        };
        if distance <= ctx.tuning.enemy.engage_radius {
            combatant.target_locked = true;
            self.set_state(EnemyState::ChaseClose);
        }
    }

    fn state_chase_close(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) {
        let (Some(distance), Some(dot)) = (ctx.distance_to_target(), ctx.facing_dot()) else {
            return;
        };

        if distance <= ctx.tuning.enemy.strike_range {
            if dot >= ctx.tuning.enemy.facing_threshold && !combatant.attacking && !combatant.stumbling {
                self.start_attack(combatant, ctx, false);
            }
        } else {
            Self::move_to_target(combatant, ctx);
        }
    }

    fn state_chase_far(&mut self, ctx: &mut PolicyContext) {
        let Some(distance) = ctx.distance_to_target() else {
            return;
        };
        if distance < ctx.tuning.enemy.chase_far_return {
            self.set_state(EnemyState::ChaseClose);
        }
    }

    /// Hits are registered by the weapon system; only the forward drive happens here
    fn state_attack(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, forward_speed: f32) {
        if combatant.moving_forward {
            let step = ctx.forward() * forward_speed * ctx.delta_secs();
            ctx.transform.translation += step;
        }
    }

    fn state_stumble(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) {
        if combatant.stumbling {
            if combatant.moving_backwards {
                let direction = -ctx.forward();
                let scale = ctx.tuning.enemy.stumble_back_scale * ctx.delta_secs();
                ctx.outbox.push(Directive::AddMovementInput { direction, scale });
            }
        } else {
            self.set_state(EnemyState::ChaseClose);
        }
    }

    /// Path-follow towards the target unless a path is already in progress
    pub fn move_to_target(combatant: &Combatant, ctx: &mut PolicyContext) {
        if ctx.sensors.following_path {
            return;
        }
        if let Some(target) = combatant.target {
            ctx.outbox.push(Directive::MoveToActor(target));
        }
    }

    /// Common swing setup: base attack, movement flags off, ATTACK, stop
    /// pathfinding, optionally snap to face the target
    pub fn begin_swing(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, rotate: bool) {
        combatant.attack();
        combatant.clear_movement_flags();
        self.set_state(EnemyState::Attack);
        ctx.outbox.push(Directive::StopMovement);

        if rotate {
            if let Some(target_position) = ctx.target_position {
                face_towards(ctx.transform, target_position);
            }
        }
    }

    /// Standard swing with a uniformly random attack clip.
    ///
    /// Without attack clips nothing starts.
    pub fn start_attack(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, rotate: bool) -> bool {
        if combatant.attack_clips.is_empty() || self.state.is_terminal() {
            return false;
        }

        self.begin_swing(combatant, ctx, rotate);
        let clip = combatant.random_attack_clip(ctx.rng);
        crate::logger::log(&format!("🗡️ {:?} swings ({:?})", ctx.entity, clip));
        ctx.outbox.play_clip(clip);
        true
    }
}

impl BehaviorPolicy for EnemyPolicy {
    fn on_tick(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) {
        let before = self.state;
        let forward_speed = ctx.tuning.enemy.forward_speed;
        self.tick_state(combatant, ctx, forward_speed);

        if self.state != before {
            crate::logger::log(&format!("🤖 {:?}: {:?} → {:?}", ctx.entity, before, self.state));
        }
    }

    fn on_attack(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) -> bool {
        self.start_attack(combatant, ctx, true)
    }

    fn on_damage(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, hit: &IncomingHit) -> u32 {
        if hit.causer == ctx.entity || self.state.is_terminal() {
            return 0;
        }
        if !self.interruptable {
            return hit.amount;
        }

        self.on_end_attack(combatant);
        let clip = combatant.stagger(ctx.transform, hit.causer_position, ctx.rng);
        self.set_state(EnemyState::Stumble);
        ctx.outbox.push(Directive::StopMovement);
        ctx.outbox.play_clip(clip);
        hit.amount
    }

    /// Swing over: back to closing in
    fn on_end_attack(&mut self, combatant: &mut Combatant) {
        combatant.end_attack();
        self.set_state(EnemyState::ChaseClose);
    }

    fn on_death(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) {
        self.set_state(EnemyState::Dead);
        combatant.end_attack();
        combatant.clear_movement_flags();
        combatant.stumbling = false;
        combatant.target_locked = false;

        // Queued reactions (stumble clip) are dropped with the actor
        ctx.outbox.0.clear();
        ctx.outbox.push(Directive::StopMovement);
    }
}
