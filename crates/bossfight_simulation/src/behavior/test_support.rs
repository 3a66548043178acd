//! Policy test rig: owns everything a `PolicyContext` borrows.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{Directive, Outbox, PolicyContext, Sensors};
use crate::clock::CombatClock;
use crate::combat::ClipId;
use crate::tuning::CombatTuning;

pub struct PolicyRig {
    pub entity: Entity,
    pub transform: Transform,
    pub sensors: Sensors,
    pub clock: CombatClock,
    pub tuning: CombatTuning,
    pub rng: ChaCha8Rng,
    pub outbox: Outbox,
}

impl PolicyRig {
    pub fn new() -> Self {
        Self {
            entity: Entity::from_raw(1),
            transform: Transform::default(),
            sensors: Sensors::default(),
            clock: CombatClock::at(10.0, 1.0 / 60.0),
            tuning: CombatTuning::default(),
            rng: ChaCha8Rng::seed_from_u64(7),
            outbox: Outbox::default(),
        }
    }

    /// Actor at `position` facing `look_at` on the ground plane
    pub fn placed(mut self, position: Vec3, look_at: Vec3) -> Self {
        self.transform = Transform::from_translation(position);
        super::facing::face_towards(&mut self.transform, look_at);
        self
    }

    pub fn at_time(&mut self, elapsed: f32) {
        self.clock = CombatClock::at(elapsed, self.clock.delta_secs());
    }

    pub fn ctx(&mut self, target_position: Option<Vec3>) -> PolicyContext<'_> {
        PolicyContext {
            entity: self.entity,
            transform: &mut self.transform,
            target_position,
            sensors: self.sensors,
            clock: &self.clock,
            tuning: &self.tuning,
            rng: &mut self.rng,
            outbox: &mut self.outbox,
        }
    }

    pub fn clips(&self) -> Vec<ClipId> {
        self.outbox
            .iter()
            .filter_map(|directive| match directive {
                Directive::PlayClip(clip) => Some(clip.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn issued(&self, directive: &Directive) -> bool {
        self.outbox.iter().any(|d| d == directive)
    }

    pub fn issued_move_to(&self) -> bool {
        self.outbox.iter().any(|d| matches!(d, Directive::MoveToActor(_)))
    }

    pub fn movement_inputs(&self) -> Vec<(Vec3, f32)> {
        self.outbox
            .iter()
            .filter_map(|directive| match directive {
                Directive::AddMovementInput { direction, scale } => Some((*direction, *scale)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.outbox.0.clear();
    }
}
