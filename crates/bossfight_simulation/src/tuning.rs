//! Combat tuning (all gameplay constants in one RON-loadable resource).
//!
//! Defaults reproduce the shipped game feel. A designer override file only needs
//! the fields it changes: every section is `#[serde(default)]`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid tuning data: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to serialize tuning data: {0}")]
    Serialize(#[from] ron::Error),
}

#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub combatant: CombatantTuning,
    pub enemy: EnemyTuning,
    pub boss: BossTuning,
    pub player: PlayerTuning,
    pub camera: CameraTuning,
    pub senses: SensesTuning,
}

impl CombatTuning {
    pub fn from_ron(text: &str) -> Result<Self, TuningError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    pub fn to_ron(&self) -> Result<String, TuningError> {
        Ok(ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?)
    }
}

/// Shared by every combatant (player and enemies)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatantTuning {
    /// Yaw interpolation rate towards the target (per second)
    pub rotation_smoothing: f32,
    /// Forward snap distance on the `AttackLunge` cue
    pub lunge_distance: f32,
    /// Damage of a single weapon hit
    pub hit_damage: u32,
}

impl Default for CombatantTuning {
    fn default() -> Self {
        Self {
            rotation_smoothing: 5.0,
            lunge_distance: 70.0,
            hit_damage: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    /// IDLE → CHASE_CLOSE when the target is closer than this
    pub engage_radius: f32,
    pub strike_range: f32,
    /// Minimum forward·direction dot product to start a swing
    pub facing_threshold: f32,
    /// CHASE_FAR → CHASE_CLOSE below this distance
    pub chase_far_return: f32,
    /// Forward drive of a standard swing (units/s)
    pub forward_speed: f32,
    /// Movement input scale of the stumble back-step
    pub stumble_back_scale: f32,
    pub max_health: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            engage_radius: 1200.0,
            strike_range: 300.0,
            facing_threshold: 0.95,
            chase_far_return: 850.0,
            forward_speed: 500.0,
            stumble_back_scale: 10.0,
            max_health: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub long_attack_range: f32,
    pub long_attack_cooldown: f32,
    /// Added to the target distance to get the leap forward speed
    pub long_attack_overshoot: f32,
    /// Seconds between consecutive hits that still count as one streak
    pub poise_window: f32,
    /// Streak length after which the boss stops staggering
    pub poise_hits: u32,
    pub max_health: u32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            long_attack_range: 900.0,
            long_attack_cooldown: 5.0,
            long_attack_overshoot: 600.0,
            poise_window: 1.5,
            poise_hits: 3,
            max_health: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub passive_speed: f32,
    pub combat_speed: f32,
    pub roll_speed: f32,
    /// Lock breaks once the target is at least this far away
    pub target_lock_distance: f32,
    /// Roll displacement per second
    pub rolling_distance: f32,
    /// Stumble back-step displacement per second
    pub moving_backwards_distance: f32,
    pub max_health: u32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            passive_speed: 450.0,
            combat_speed: 250.0,
            roll_speed: 600.0,
            target_lock_distance: 1500.0,
            rolling_distance: 600.0,
            moving_backwards_distance: 40.0,
            max_health: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Horizontal player→target distance below which assist stays idle
    pub assist_dead_zone: f32,
    pub assist_yaw_threshold_deg: f32,
    pub assist_gain: f32,
    pub arm_length: f32,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            assist_dead_zone: 400.0,
            assist_yaw_threshold_deg: 30.0,
            assist_gain: 0.5,
            arm_length: 500.0,
        }
    }
}

/// Headless stand-ins for engine sensing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensesTuning {
    pub weapon_reach: f32,
    pub weapon_arc_deg: f32,
    pub path_acceptance_radius: f32,
    /// Height above ground still considered grounded
    pub ground_tolerance: f32,
}

impl Default for SensesTuning {
    fn default() -> Self {
        Self {
            weapon_reach: 180.0,
            weapon_arc_deg: 120.0,
            path_acceptance_radius: 100.0,
            ground_tolerance: 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_game_feel() {
        let tuning = CombatTuning::default();
        assert_eq!(tuning.combatant.lunge_distance, 70.0);
        assert_eq!(tuning.enemy.strike_range, 300.0);
        assert_eq!(tuning.boss.long_attack_cooldown, 5.0);
        assert_eq!(tuning.player.target_lock_distance, 1500.0);
        assert_eq!(tuning.camera.assist_dead_zone, 400.0);
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning = CombatTuning::from_ron("(boss: (poise_window: 2.0), enemy: (strike_range: 250.0))")
            .expect("valid override");

        assert_eq!(tuning.boss.poise_window, 2.0);
        assert_eq!(tuning.boss.poise_hits, 3);
        assert_eq!(tuning.enemy.strike_range, 250.0);
        assert_eq!(tuning.enemy.engage_radius, 1200.0);
        assert_eq!(tuning.player, PlayerTuning::default());
    }

    #[test]
    fn test_ron_text_survives_reload() {
        let mut tuning = CombatTuning::default();
        tuning.player.roll_speed = 720.0;

        let text = tuning.to_ron().expect("serializable");
        let reloaded = CombatTuning::from_ron(&text).expect("parsable");
        assert_eq!(reloaded, tuning);
    }

    #[test]
    fn test_invalid_ron_is_parse_error() {
        let err = CombatTuning::from_ron("(boss: (poise_window: \"soon\"))").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = CombatTuning::load("definitely/not/here.ron").unwrap_err();
        match err {
            TuningError::Io { path, .. } => assert!(path.ends_with("here.ron")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
