//! Weapon hit registration.
//!
//! While a swing's damage window is open, every actor overlapping the weapon
//! takes one hit per swing. An actor joins the swing's hit-set only when damage
//! was actually applied, so rejected hits (roll invulnerability) can land later
//! in the same window.

use bevy::prelude::*;

use super::damage::{report_damage, resolve_damage, DamageTargetItems};
use crate::behavior::{IncomingHit, PolicyEnv};
use crate::clock::CombatClock;
use crate::combat::{Combatant, DamageDealt, EntityDied, Weapon};
use crate::tuning::CombatTuning;
use crate::DeterministicRng;

/// System: resolve weapon overlaps of open damage windows
pub fn register_weapon_hits(
    clock: Res<CombatClock>,
    tuning: Res<CombatTuning>,
    mut rng: ResMut<DeterministicRng>,
    mut params: ParamSet<(Query<(Entity, &Combatant, &Weapon, &Transform)>, Query<DamageTargetItems>)>,
    mut dealt: EventWriter<DamageDealt>,
    mut died: EventWriter<EntityDied>,
) {
    // Phase 1: candidate (attacker, victim) pairs
    let mut swings = Vec::new();
    for (attacker, combatant, weapon, transform) in params.p0().iter() {
        if !combatant.is_damage_window_open() {
            continue;
        }
        for &victim in &weapon.overlapping {
            if victim == attacker || combatant.has_hit(victim) {
                continue;
            }
            swings.push((attacker, victim, transform.translation));
        }
    }

    if swings.is_empty() {
        return;
    }

    // Phase 2: resolve in order; an earlier hit may have staggered a later attacker
    let damage = tuning.combatant.hit_damage;
    let mut env = PolicyEnv {
        clock: &clock,
        tuning: &tuning,
        rng: &mut rng.rng,
    };
    let mut actors = params.p1();

    for (attacker, victim, attacker_position) in swings {
        let window_open = actors
            .get(attacker)
            .map(|((_, combatant, ..), _)| combatant.is_damage_window_open() && !combatant.has_hit(victim))
            .unwrap_or(false);
        if !window_open {
            continue;
        }

        let Ok(item) = actors.get_mut(victim) else {
            continue;
        };
        let hit = IncomingHit {
            amount: damage,
            instigator: Some(attacker),
            causer: attacker,
            causer_position: Some(attacker_position),
        };
        let outcome = resolve_damage(item, &hit, &mut env);
        if outcome.applied == 0 {
            continue;
        }

        if let Ok(((_, mut combatant, ..), _)) = actors.get_mut(attacker) {
            combatant.register_hit(victim);
        }
        crate::logger::log(&format!("⚔️ {:?} hit {:?} for {}", attacker, victim, outcome.applied));
        report_damage(outcome, attacker, victim, &mut dealt, &mut died);
    }
}
