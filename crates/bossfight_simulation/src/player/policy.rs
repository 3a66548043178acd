//! Player controller logic.
//!
//! Input actions arrive through `apply_player_input`; the per-tick step only
//! maintains the lock and drives roll / stumble displacement. Hits are
//! registered by the shared weapon system like for every other combatant.

use bevy::prelude::*;

use crate::behavior::facing::{current_yaw, flatten, yaw_of};
use crate::behavior::{apply_base_cue, BehaviorPolicy, Directive, IncomingHit, Outbox, PolicyContext};
use crate::combat::{ClipId, Combatant, TimelineCue};
use crate::components::CameraRig;
use crate::targeting::{cycle_target, Candidate, CycleDirection};
use crate::tuning::PlayerTuning;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerPolicy {
    pub rolling: bool,
    /// Yaw the current roll was snapped to
    pub roll_yaw: f32,
    /// Raw axes of the last move input (x = forward, y = right)
    pub input_direction: Vec2,
    /// Next clip of the combo sequence
    pub attack_index: usize,
    pub passive_speed: f32,
    pub combat_speed: f32,
    pub roll_speed: f32,
    pub target_lock_distance: f32,
    pub rolling_distance: f32,
    pub moving_backwards_distance: f32,
    pub roll_clip: Option<ClipId>,
    /// Health ran out; every action is ignored from here on
    pub defeated: bool,
}

impl Default for PlayerPolicy {
    fn default() -> Self {
        Self::from_tuning(&PlayerTuning::default(), None)
    }
}

impl PlayerPolicy {
    pub fn from_tuning(tuning: &PlayerTuning, roll_clip: Option<ClipId>) -> Self {
        Self {
            rolling: false,
            roll_yaw: 0.0,
            input_direction: Vec2::ZERO,
            attack_index: 0,
            passive_speed: tuning.passive_speed,
            combat_speed: tuning.combat_speed,
            roll_speed: tuning.roll_speed,
            target_lock_distance: tuning.target_lock_distance,
            rolling_distance: tuning.rolling_distance,
            moving_backwards_distance: tuning.moving_backwards_distance,
            roll_clip,
            defeated: false,
        }
    }

    fn locomotion_speed(&self, locked: bool) -> f32 {
        if locked {
            self.combat_speed
        } else {
            self.passive_speed
        }
    }

    // ------------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------------

    /// Camera-relative move input. Displacement is blocked while attacking,
    /// rolling or stumbling; the raw axes are always kept for the roll direction.
    pub fn move_input(&mut self, combatant: &Combatant, camera: &CameraRig, forward: f32, right: f32, outbox: &mut Outbox) {
        let blocked = combatant.attacking || self.rolling || combatant.stumbling || self.defeated;
        if !blocked {
            if forward != 0.0 {
                outbox.push(Directive::AddMovementInput {
                    direction: camera.forward(),
                    scale: forward,
                });
            }
            if right != 0.0 {
                outbox.push(Directive::AddMovementInput {
                    direction: camera.right(),
                    scale: right,
                });
            }
        }
        self.input_direction = Vec2::new(forward, right);
    }

    /// Dodge roll towards the camera-relative input (or straight ahead without input).
    ///
    /// Returns whether a roll started.
    pub fn roll(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, camera: &CameraRig) -> bool {
        if self.rolling || combatant.stumbling || self.defeated {
            return false;
        }
        // No clip, no RollEnd: the roll would never finish
        let Some(clip) = self.roll_clip.clone() else {
            return false;
        };
        self.on_end_attack(combatant);

        let dodge = flatten(camera.forward() * self.input_direction.x + camera.right() * self.input_direction.y);
        self.roll_yaw = if self.input_direction != Vec2::ZERO && dodge.length_squared() > f32::EPSILON {
            yaw_of(dodge)
        } else {
            current_yaw(ctx.transform)
        };
        ctx.transform.rotation = Quat::from_rotation_y(self.roll_yaw);

        ctx.outbox.push(Directive::PlayClip(clip));
        self.rolling = true;
        crate::logger::log(&format!("🤸 {:?} rolls (yaw {:.2})", ctx.entity, self.roll_yaw));
        true
    }

    // ------------------------------------------------------------------------
    // Lock-on
    // ------------------------------------------------------------------------

    /// Engage or leave combat mode: lock flag, speed cap, facing mode, target
    /// cleared on leave. Out of combat the player turns to where it walks.
    pub fn set_in_combat(&mut self, combatant: &mut Combatant, in_combat: bool, outbox: &mut Outbox) {
        combatant.target_locked = in_combat;
        outbox.push(Directive::SetMaxWalkSpeed(self.locomotion_speed(in_combat)));
        outbox.push(Directive::SetOrientToMovement(!in_combat));
        if !in_combat {
            combatant.target = None;
        }
    }

    /// Moves the lock to the next candidate; engages combat mode if it was off.
    ///
    /// `current` is the resolved current target (None when absent or dead).
    /// Returns the new target, or None when nothing qualified (lock untouched).
    pub fn cycle_target(
        &mut self,
        combatant: &mut Combatant,
        ctx: &mut PolicyContext,
        candidates: &[Candidate],
        camera_location: Vec3,
        direction: CycleDirection,
    ) -> Option<Entity> {
        let current = combatant
            .target
            .zip(ctx.target_position)
            .map(|(entity, position)| Candidate::new(entity, position));

        let next = cycle_target(current, candidates, ctx.position(), camera_location, direction)?;
        combatant.target = Some(next);
        if !combatant.target_locked {
            self.set_in_combat(combatant, true, ctx.outbox);
        }
        crate::logger::log(&format!("🎯 {:?} locks on {:?}", ctx.entity, next));
        Some(next)
    }

    /// Unlocked: lock on to the nearest candidate. Locked: disengage.
    pub fn toggle_combat_mode(
        &mut self,
        combatant: &mut Combatant,
        ctx: &mut PolicyContext,
        candidates: &[Candidate],
        camera_location: Vec3,
    ) {
        if combatant.target_locked {
            self.set_in_combat(combatant, false, ctx.outbox);
        } else {
            self.cycle_target(combatant, ctx, candidates, camera_location, CycleDirection::Clockwise);
        }
    }

    /// Breaks the lock once the target is gone or out of lock distance
    pub fn focus_target(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) {
        if !combatant.target_locked {
            return;
        }
        let out_of_reach = ctx
            .distance_to_target()
            .is_none_or(|distance| distance >= self.target_lock_distance);
        if out_of_reach {
            crate::logger::log(&format!("🎯 {:?} loses lock on {:?}", ctx.entity, combatant.target));
            self.set_in_combat(combatant, false, ctx.outbox);
        }
    }
}

impl BehaviorPolicy for PlayerPolicy {
    fn on_tick(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) {
        if self.defeated {
            return;
        }
        self.focus_target(combatant, ctx);

        if self.rolling {
            let direction = ctx.forward();
            let scale = self.rolling_distance * ctx.delta_secs();
            ctx.outbox.push(Directive::AddMovementInput { direction, scale });
        } else if combatant.stumbling && combatant.moving_backwards {
            let direction = -ctx.forward();
            let scale = self.moving_backwards_distance * ctx.delta_secs();
            ctx.outbox.push(Directive::AddMovementInput { direction, scale });
        }
    }

    /// Next combo clip; a new swing may start while idle or once the current
    /// one signalled next-attack-ready
    fn on_attack(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) -> bool {
        let can_chain = !combatant.attacking || combatant.next_attack_ready;
        if !can_chain || self.rolling || combatant.stumbling || ctx.sensors.airborne || self.defeated {
            return false;
        }
        if combatant.attack_clips.is_empty() {
            return false;
        }

        combatant.attack();
        if self.attack_index >= combatant.attack_clips.len() {
            self.attack_index = 0;
        }
        let clip = combatant.attack_clips[self.attack_index].clone();
        self.attack_index += 1;

        crate::logger::log(&format!("⚔️ {:?} combo swing {} ({})", ctx.entity, self.attack_index, clip));
        ctx.outbox.push(Directive::PlayClip(clip));
        true
    }

    /// Rolling grants full invulnerability
    fn on_damage(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, hit: &IncomingHit) -> u32 {
        if hit.causer == ctx.entity || self.rolling || self.defeated {
            return 0;
        }

        self.on_end_attack(combatant);
        let clip = combatant.stagger(ctx.transform, hit.causer_position, ctx.rng);
        ctx.outbox.play_clip(clip);
        hit.amount
    }

    /// Full reset: the combo starts over
    fn on_end_attack(&mut self, combatant: &mut Combatant) {
        combatant.end_attack();
        self.attack_index = 0;
    }

    fn on_cue(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext, cue: TimelineCue) {
        match cue {
            TimelineCue::RollStart => {
                self.rolling = true;
                ctx.outbox.push(Directive::SetMaxWalkSpeed(self.roll_speed));
                self.on_end_attack(combatant);
            }
            TimelineCue::RollEnd => {
                self.rolling = false;
                let speed = self.locomotion_speed(combatant.target_locked);
                ctx.outbox.push(Directive::SetMaxWalkSpeed(speed));
            }
            _ => apply_base_cue(self, combatant, ctx, cue),
        }
    }

    fn on_death(&mut self, combatant: &mut Combatant, ctx: &mut PolicyContext) {
        self.defeated = true;
        self.rolling = false;
        self.on_end_attack(combatant);
        combatant.clear_movement_flags();
        combatant.stumbling = false;

        ctx.outbox.0.clear();
        self.set_in_combat(combatant, false, ctx.outbox);
    }

    fn allows_target_facing(&self) -> bool {
        !self.rolling
    }
}
