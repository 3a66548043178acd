//! Combatant: the combat record shared by the player and every enemy.
//!
//! Holds attack/stumble/rotation flags and the per-swing hit-set. The flags are
//! flipped by policies (attack start, stagger) and by timeline cues (damage
//! window, next-attack-ready, stumble end); nothing else writes them.

use bevy::prelude::*;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::behavior::facing::{current_yaw, face_towards, flatten, yaw_delta, yaw_of};
use crate::behavior::Outbox;
use crate::combat::selection::{pick_any, pick_excluding};
use crate::combat::timeline::ClipPlayback;
use crate::components::{Health, MovementCommand, MovementInput, MovementSpeed, NavigationState};

// ============================================================================
// Clip handle
// ============================================================================

/// Name of an authored animation clip
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Reflect)]
#[serde(transparent)]
pub struct ClipId(pub String);

impl ClipId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Combatant Component
// ============================================================================

/// Shared combat state of one actor.
///
/// Invariants:
/// - `attack_damaging` implies `attacking`
/// - `hit_entities` is empty right after `attack()`
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
#[require(
    Transform,
    Health,
    Outbox,
    ClipPlayback,
    MovementCommand,
    NavigationState,
    MovementInput,
    MovementSpeed
)]
pub struct Combatant {
    /// Current target (non-owning; may be stale)
    pub target: Option<Entity>,
    pub target_locked: bool,
    pub attacking: bool,
    /// Damage window of the current swing is open
    pub attack_damaging: bool,
    pub moving_forward: bool,
    pub moving_backwards: bool,
    /// Combo continuation allowed before the swing ends
    pub next_attack_ready: bool,
    pub stumbling: bool,
    pub rotate_towards_target: bool,
    /// Yaw interpolation rate (per second)
    pub rotation_smoothing: f32,
    /// Yaw delta applied by the last smooth look-at (radians per tick)
    pub last_rotation_speed: f32,
    /// Entities already damaged by the current swing
    pub hit_entities: Vec<Entity>,
    /// Ordered attack clips (random pick for AI, combo order for the player)
    pub attack_clips: Vec<ClipId>,
    pub stumble_clips: Vec<ClipId>,
    pub last_stumble_index: Option<usize>,
}

impl Default for Combatant {
    fn default() -> Self {
        Self {
            target: None,
            target_locked: false,
            attacking: false,
            attack_damaging: false,
            moving_forward: false,
            moving_backwards: false,
            next_attack_ready: false,
            stumbling: false,
            rotate_towards_target: true,
            rotation_smoothing: 5.0,
            last_rotation_speed: 0.0,
            hit_entities: Vec::new(),
            attack_clips: Vec::new(),
            stumble_clips: Vec::new(),
            last_stumble_index: None,
        }
    }
}

impl Combatant {
    pub fn new(attack_clips: Vec<ClipId>, stumble_clips: Vec<ClipId>) -> Self {
        Self {
            attack_clips,
            stumble_clips,
            ..Default::default()
        }
    }

    pub fn with_target(mut self, target: Option<Entity>) -> Self {
        self.target = target;
        self
    }

    pub fn with_rotation_smoothing(mut self, smoothing: f32) -> Self {
        self.rotation_smoothing = smoothing;
        self
    }

    // ------------------------------------------------------------------------
    // Swing lifecycle
    // ------------------------------------------------------------------------

    /// Starts a swing: fresh hit-set, damage window closed, combo gate reset
    pub fn attack(&mut self) {
        self.attacking = true;
        self.next_attack_ready = false;
        self.attack_damaging = false;
        self.hit_entities.clear();
    }

    /// Ends the swing. Also closes the damage window so an interrupted swing
    /// cannot keep dealing damage.
    pub fn end_attack(&mut self) {
        self.attacking = false;
        self.next_attack_ready = false;
        self.attack_damaging = false;
    }

    /// Opening the window outside of a swing is ignored
    pub fn set_attack_damaging(&mut self, damaging: bool) {
        if damaging && !self.attacking {
            return;
        }
        self.attack_damaging = damaging;
    }

    pub fn attack_next_ready(&mut self) {
        self.next_attack_ready = true;
    }

    pub fn is_damage_window_open(&self) -> bool {
        self.attacking && self.attack_damaging
    }

    pub fn has_hit(&self, entity: Entity) -> bool {
        self.hit_entities.contains(&entity)
    }

    pub fn register_hit(&mut self, entity: Entity) {
        if !self.has_hit(entity) {
            self.hit_entities.push(entity);
        }
    }

    // ------------------------------------------------------------------------
    // Timeline-driven flags
    // ------------------------------------------------------------------------

    pub fn set_moving_forward(&mut self, moving: bool) {
        self.moving_forward = moving;
    }

    pub fn set_moving_backwards(&mut self, moving: bool) {
        self.moving_backwards = moving;
    }

    pub fn clear_movement_flags(&mut self) {
        self.moving_forward = false;
        self.moving_backwards = false;
    }

    pub fn end_stumble(&mut self) {
        self.stumbling = false;
    }

    // ------------------------------------------------------------------------
    // Orientation
    // ------------------------------------------------------------------------

    /// Exponential yaw smoothing towards the target.
    ///
    /// Only with a resolved target, lock engaged, not mid-swing and grounded.
    /// Interpolation factor is `min(smoothing × dt, 1)` along the shortest arc.
    pub fn look_at_smooth(&mut self, transform: &mut Transform, target_position: Option<Vec3>, airborne: bool, dt: f32) {
        let Some(target_position) = target_position else {
            return;
        };
        if !self.target_locked || self.attacking || airborne {
            return;
        }

        let direction = flatten(target_position - transform.translation);
        if direction.length_squared() <= f32::EPSILON {
            return;
        }

        let yaw = current_yaw(transform);
        let factor = (self.rotation_smoothing * dt).min(1.0);
        let step = yaw_delta(yaw, yaw_of(direction)) * factor;

        self.last_rotation_speed = step;
        transform.rotation = Quat::from_rotation_y(yaw + step);
    }

    /// Lunge cue: face the target (when there is one), then snap forward
    pub fn attack_lunge(&self, transform: &mut Transform, target_position: Option<Vec3>, lunge_distance: f32) {
        if let Some(target_position) = target_position {
            face_towards(transform, target_position);
        }
        let forward = *transform.forward();
        transform.translation += forward * lunge_distance;
    }

    /// Last yaw delta for locomotion blending (0 with target facing disabled)
    pub fn current_rotation_speed(&self) -> f32 {
        if self.rotate_towards_target {
            self.last_rotation_speed
        } else {
            0.0
        }
    }

    // ------------------------------------------------------------------------
    // Clip selection
    // ------------------------------------------------------------------------

    /// Uniformly random attack clip
    pub fn random_attack_clip<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<ClipId> {
        pick_any(rng, self.attack_clips.len()).map(|index| self.attack_clips[index].clone())
    }

    /// Stumble clip that differs from the previous one whenever the pool allows it
    pub fn next_stumble_clip<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<ClipId> {
        let index = pick_excluding(rng, self.stumble_clips.len(), self.last_stumble_index)?;
        self.last_stumble_index = Some(index);
        Some(self.stumble_clips[index].clone())
    }

    /// Shared stagger reaction: movement flags off, stumbling on, face the
    /// damage source. Returns the stumble clip to play.
    ///
    /// Callers end the current attack through their own policy first.
    pub fn stagger<R: Rng + ?Sized>(
        &mut self,
        transform: &mut Transform,
        source_position: Option<Vec3>,
        rng: &mut R,
    ) -> Option<ClipId> {
        self.clear_movement_flags();
        self.stumbling = true;
        let clip = self.next_stumble_clip(rng);
        if let Some(source_position) = source_position {
            face_towards(transform, source_position);
        }
        clip
    }
}
