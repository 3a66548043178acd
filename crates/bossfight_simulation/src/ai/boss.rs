//! Boss: the enemy state machine plus a long-range leap attack and poise.
//!
//! Poise: hits landing within `poise_window` seconds of the first hit of a
//! streak add up; from `poise_hits` on the boss shrugs off stagger. The streak
//! is only re-evaluated when the next hit arrives, so a long quiet gap resets it
//! on that hit (which itself still counts as a fresh, interruptable hit).

use super::{EnemyPolicy, EnemyState};
use crate::behavior::{BehaviorPolicy, IncomingHit, PolicyContext};
use crate::combat::{ClipId, Combatant, TimelineCue};
use crate::combat::selection::pick_any;
use crate::tuning::BossTuning;

#[derive(Debug, Clone, PartialEq)]
pub struct BossPolicy {
    pub enemy: EnemyPolicy,
    pub long_attack_clips: Vec<ClipId>,
    pub long_attack_cooldown: f32,
    /// Clock time of the last long attack (starts one cooldown in the past)
    pub long_attack_timestamp: f32,
    /// Forward drive of the current long attack (target distance + overshoot)
    pub long_attack_forward_speed: f32,
    /// Current swing is a long attack
    pub long_attack_active: bool,
    pub quick_hits_taken: u32,
    /// Clock time of the first hit of the current streak
    pub quick_hits_timestamp: f32,
}

impl BossPolicy {
    pub fn new(long_attack_clips: Vec<ClipId>, tuning: &BossTuning) -> Self {
        Self {
            enemy: EnemyPolicy::new(),
            long_attack_clips,
            long_attack_cooldown: tuning.long_attack_cooldown,
            long_attack_timestamp: -tuning.long_attack_cooldown,
            long_attack_forward_speed: 0.0,
            long_attack_active: false,
            quick_hits_taken: 0,
            quick_hits_timestamp: 0.0,
        }
    }

    pub fn state(&self) -> EnemyState {
        self.enemy.state
    }

    pub fn long_attack_ready(&self, now: f32) -> bool {
        now >= self.long_attack_timestamp + self.long_attack_cooldown
    }

    fn forward_speed(&self, ctx: &PolicyContext) -> f32 {
        if self.long_attack_active {
            self.long_attack_forward_speed
        } else {
            ctx.tuning.enemy.forward_speed
        }
    }

    /// CHASE_CLOSE override: short swing up close, leap from afar, otherwise close in
    fn state_chase_close(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) {
        let (Some(distance), Some(dot)) = (ctx.distance_to_target(), ctx.facing_dot()) else {
            return;
        };
        let tuning = &ctx.tuning.boss;
        let now = ctx.clock.elapsed_secs();

        let aligned_in_range = distance <= tuning.long_attack_range && dot >= ctx.tuning.enemy.facing_threshold;
        if aligned_in_range {
            if distance <= ctx.tuning.enemy.strike_range {
                if !combatant.attacking && !combatant.stumbling {
                    self.start_attack(combatant, ctx, false);
                }
                return;
            }
        } else if self.long_attack_ready(now) && ctx.sensors.line_of_sight && self.long_attack(combatant, ctx) {
            self.long_attack_timestamp = now;
            return;
        }

        EnemyPolicy::move_to_target(combatant, ctx);
    }

    fn start_attack(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, rotate: bool) -> bool {
        let started = self.enemy.start_attack(combatant, ctx, rotate);
        if started {
            self.long_attack_active = false;
        }
        started
    }

    /// Leap: face the target, forward speed = distance + overshoot, long clip.
    ///
    /// Without long-attack clips (or target) nothing starts and the cooldown is untouched.
    pub fn long_attack(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) -> bool {
        if self.long_attack_clips.is_empty() || self.enemy.state.is_terminal() {
            return false;
        }
        let Some(target_position) = ctx.target_position else {
            return false;
        };

        self.enemy.begin_swing(combatant, ctx, true);
        let distance = ctx.position().distance(target_position);
        self.long_attack_forward_speed = distance + ctx.tuning.boss.long_attack_overshoot;
        self.long_attack_active = true;

        let clip = pick_any(ctx.rng, self.long_attack_clips.len()).map(|index| self.long_attack_clips[index].clone());
        crate::logger::log_info(&format!(
            "🦅 {:?} long attack from {:.0} (forward speed {:.0})",
            ctx.entity, distance, self.long_attack_forward_speed
        ));
        ctx.outbox.play_clip(clip);
        true
    }

    /// Poise bookkeeping for an incoming hit (self-damage already rejected)
    fn count_hit(&mut self, now: f32, tuning: &BossTuning) {
        if self.quick_hits_taken == 0 || now - self.quick_hits_timestamp <= tuning.poise_window {
            if self.quick_hits_taken == 0 {
                self.quick_hits_timestamp = now;
            }
            self.quick_hits_taken += 1;
            if self.quick_hits_taken >= tuning.poise_hits {
                self.enemy.interruptable = false;
            }
        } else {
            self.quick_hits_taken = 0;
            self.enemy.interruptable = true;
        }
    }
}

impl BehaviorPolicy for BossPolicy {
    fn on_tick(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) {
        let before = self.enemy.state;
        match self.enemy.state {
            EnemyState::ChaseClose => self.state_chase_close(combatant, ctx),
            _ => {
                let forward_speed = self.forward_speed(ctx);
                self.enemy.tick_state(combatant, ctx, forward_speed);
            }
        }

        if self.enemy.state != before {
            crate::logger::log(&format!("👹 {:?}: {:?} → {:?}", ctx.entity, before, self.enemy.state));
        }
    }

    fn on_attack(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) -> bool {
        self.start_attack(combatant, ctx, true)
    }

    fn on_damage(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, hit: &IncomingHit) -> u32 {
        if hit.causer == ctx.entity || self.enemy.state.is_terminal() {
            return 0;
        }

        self.count_hit(ctx.clock.elapsed_secs(), &ctx.tuning.boss);
        if self.enemy.interruptable {
            // The stagger cuts a leap short
            self.long_attack_active = false;
        }
        self.enemy.on_damage(combatant, ctx, hit)
    }

    fn on_end_attack(&mut self, combatant: &mut Combatant) {
        self.enemy.on_end_attack(combatant);
    }

    fn on_cue(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, cue: TimelineCue) {
        self.enemy.on_cue(combatant, ctx, cue);
    }

    fn on_death(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) {
        self.long_attack_active = false;
        self.enemy.on_death(combatant, ctx);
    }
}
