//! Combat clock: fixed-step tick time for the combat core.
//!
//! Every system reads delta/elapsed time from [`CombatClock`] instead of
//! `Time<Fixed>`: the clock advances by exactly one step per FixedUpdate run, so
//! a replay with the same seed produces identical timestamps (boss poise window,
//! long-attack cooldown) regardless of wall-clock jitter.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct CombatClock {
    /// Seconds added per tick
    step: f32,
    /// Delta of the current tick (0 before the first tick)
    delta: f32,
    /// Seconds since simulation start
    elapsed: f32,
    tick: u64,
}

impl Default for CombatClock {
    fn default() -> Self {
        Self::from_hz(60.0)
    }
}

impl CombatClock {
    pub fn from_hz(hz: f32) -> Self {
        Self::with_step(1.0 / hz)
    }

    pub fn with_step(step: f32) -> Self {
        Self {
            step,
            delta: 0.0,
            elapsed: 0.0,
            tick: 0,
        }
    }

    /// Clock frozen at `elapsed` with the given per-tick delta.
    ///
    /// Used when a policy is driven outside of the schedule (scripted scenarios, tests).
    pub fn at(elapsed: f32, delta: f32) -> Self {
        Self {
            step: delta,
            delta,
            elapsed,
            tick: 0,
        }
    }

    pub fn advance(&mut self) {
        self.delta = self.step;
        self.elapsed += self.step;
        self.tick += 1;
    }

    pub fn delta_secs(&self) -> f32 {
        self.delta
    }

    pub fn elapsed_secs(&self) -> f32 {
        self.elapsed
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }
}

/// System: advance the combat clock (first thing every FixedUpdate)
pub fn advance_combat_clock(mut clock: ResMut<CombatClock>) {
    clock.advance();
}
