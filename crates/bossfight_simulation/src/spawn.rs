//! Standard fighter bundles.
//!
//! Clip names refer to `ClipLibrary::standard()`. Required components
//! (`Outbox`, `ClipPlayback`, movement state) come in through `Combatant`.

use bevy::prelude::*;

use crate::ai::{BossPolicy, EnemyPolicy};
use crate::behavior::Behavior;
use crate::combat::{ClipId, Combatant, Weapon};
use crate::components::{CameraRig, Enemy, Health, LineOfSight, MovementSpeed, Player};
use crate::player::PlayerPolicy;
use crate::targeting::{DetectionVolume, NearbyEnemies};
use crate::tuning::CombatTuning;

fn clips(names: &[&str]) -> Vec<ClipId> {
    names.iter().map(|name| ClipId::new(*name)).collect()
}

fn stumble_clips() -> Vec<ClipId> {
    clips(&["stumble_back_1", "stumble_back_2"])
}

/// Player-controlled fighter facing -Z, camera rig behind it
pub fn player_bundle(position: Vec3, tuning: &CombatTuning) -> impl Bundle {
    let combatant = Combatant::new(clips(&["player_attack_1", "player_attack_2", "player_attack_3"]), stumble_clips())
        .with_rotation_smoothing(tuning.combatant.rotation_smoothing);
    let policy = PlayerPolicy::from_tuning(&tuning.player, Some(ClipId::new("combat_roll")));
    let camera_location = position + Vec3::Z * tuning.camera.arm_length;

    (
        Player,
        combatant,
        Behavior::Player(policy),
        Transform::from_translation(position),
        Health::new(tuning.player.max_health),
        Weapon::from_tuning(&tuning.senses),
        // Spawns out of combat
        MovementSpeed {
            max_walk_speed: tuning.player.passive_speed,
            orient_to_movement: true,
        },
        CameraRig::new(0.0, camera_location),
        NearbyEnemies::default(),
        DetectionVolume::new(tuning.player.target_lock_distance),
    )
}

/// Standard enemy chasing `target`
pub fn enemy_bundle(position: Vec3, target: Option<Entity>, tuning: &CombatTuning) -> impl Bundle {
    let combatant = Combatant::new(clips(&["enemy_overhead_smash", "enemy_sweep"]), stumble_clips())
        .with_target(target)
        .with_rotation_smoothing(tuning.combatant.rotation_smoothing);

    (
        Enemy,
        combatant,
        Behavior::Enemy(EnemyPolicy::new()),
        Transform::from_translation(position),
        Health::new(tuning.enemy.max_health),
        Weapon::from_tuning(&tuning.senses),
        LineOfSight(true),
    )
}

/// Boss: the enemy clip set plus the leap slam
pub fn boss_bundle(position: Vec3, target: Option<Entity>, tuning: &CombatTuning) -> impl Bundle {
    let combatant = Combatant::new(clips(&["enemy_overhead_smash", "enemy_sweep"]), stumble_clips())
        .with_target(target)
        .with_rotation_smoothing(tuning.combatant.rotation_smoothing);
    let policy = BossPolicy::new(clips(&["boss_leap_slam"]), &tuning.boss);

    (
        Enemy,
        combatant,
        Behavior::Boss(policy),
        Transform::from_translation(position),
        Health::new(tuning.boss.max_health),
        Weapon::from_tuning(&tuning.senses),
        LineOfSight(true),
    )
}
