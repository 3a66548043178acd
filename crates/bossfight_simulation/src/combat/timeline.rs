//! Headless clip player.
//!
//! Stands in for the engine's animation montages: a requested clip starts
//! playing on the actor and its authored markers are emitted as
//! [`TimelineEvent`]s when playback time passes them. Marker timings live in a
//! [`ClipLibrary`] that can be loaded from RON.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::clock::CombatClock;
use crate::combat::{ClipId, ClipRequested, TimelineCue, TimelineEvent};
use crate::tuning::TuningError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClipMarker {
    /// Seconds from clip start
    pub at: f32,
    pub cue: TimelineCue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipTimeline {
    pub duration: f32,
    /// Sorted by `at`
    pub markers: Vec<ClipMarker>,
}

impl ClipTimeline {
    pub fn new(duration: f32, markers: impl IntoIterator<Item = (f32, TimelineCue)>) -> Self {
        let mut timeline = Self {
            duration,
            markers: markers.into_iter().map(|(at, cue)| ClipMarker { at, cue }).collect(),
        };
        timeline.sort_markers();
        timeline
    }

    fn sort_markers(&mut self) {
        // Stable: markers sharing a timestamp keep their authored order
        self.markers.sort_by(|a, b| a.at.total_cmp(&b.at));
    }
}

/// All clips the clip player knows about
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClipLibrary {
    pub clips: BTreeMap<ClipId, ClipTimeline>,
}

impl ClipLibrary {
    pub fn insert(&mut self, clip: &str, timeline: ClipTimeline) {
        self.clips.insert(ClipId::new(clip), timeline);
    }

    pub fn get(&self, clip: &ClipId) -> Option<&ClipTimeline> {
        self.clips.get(clip)
    }

    pub fn from_ron(text: &str) -> Result<Self, TuningError> {
        let mut library: Self = ron::from_str(text)?;
        for timeline in library.clips.values_mut() {
            timeline.sort_markers();
        }
        Ok(library)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// Clip set used by the standard fighters (see `spawn`)
    pub fn standard() -> Self {
        use TimelineCue::*;

        let mut library = Self::default();

        // Player combo: lunge into a short damage window, combo gate before the end
        library.insert(
            "player_attack_1",
            ClipTimeline::new(
                0.9,
                [(0.15, AttackLunge), (0.25, AttackDamageStart), (0.45, AttackDamageEnd), (0.55, AttackNextReady), (0.9, AttackEnd)],
            ),
        );
        library.insert(
            "player_attack_2",
            ClipTimeline::new(
                1.0,
                [(0.2, AttackLunge), (0.3, AttackDamageStart), (0.5, AttackDamageEnd), (0.6, AttackNextReady), (1.0, AttackEnd)],
            ),
        );
        library.insert(
            "player_attack_3",
            ClipTimeline::new(
                1.3,
                [(0.3, AttackLunge), (0.45, AttackDamageStart), (0.7, AttackDamageEnd), (0.85, AttackNextReady), (1.3, AttackEnd)],
            ),
        );

        // Enemy swings drive forward while winding up
        library.insert(
            "enemy_overhead_smash",
            ClipTimeline::new(
                1.6,
                [
                    (0.3, MovingForward(true)),
                    (0.5, MovingForward(false)),
                    (0.6, AttackDamageStart),
                    (0.8, AttackDamageEnd),
                    (1.6, AttackEnd),
                ],
            ),
        );
        library.insert(
            "enemy_sweep",
            ClipTimeline::new(
                1.4,
                [
                    (0.2, MovingForward(true)),
                    (0.35, MovingForward(false)),
                    (0.5, AttackDamageStart),
                    (0.7, AttackDamageEnd),
                    (1.4, AttackEnd),
                ],
            ),
        );

        // Boss leap: forward phase is long enough to overtake the target
        library.insert(
            "boss_leap_slam",
            ClipTimeline::new(
                2.0,
                [
                    (0.5, MovingForward(true)),
                    (0.9, AttackDamageStart),
                    (1.1, MovingForward(false)),
                    (1.3, AttackDamageEnd),
                    (2.0, AttackEnd),
                ],
            ),
        );

        library.insert(
            "stumble_back_1",
            ClipTimeline::new(0.8, [(0.1, MovingBackwards(true)), (0.5, MovingBackwards(false)), (0.8, StumbleEnd)]),
        );
        library.insert(
            "stumble_back_2",
            ClipTimeline::new(0.9, [(0.15, MovingBackwards(true)), (0.6, MovingBackwards(false)), (0.9, StumbleEnd)]),
        );

        library.insert("combat_roll", ClipTimeline::new(0.8, [(0.0, RollStart), (0.7, RollEnd)]));

        library
    }
}

/// Clip currently playing on an actor
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct ActiveClip {
    pub clip: ClipId,
    pub elapsed: f32,
    /// Index of the next marker to emit
    pub next_marker: usize,
}

#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ClipPlayback {
    pub current: Option<ActiveClip>,
}

impl ClipPlayback {
    pub fn is_playing(&self, clip: &str) -> bool {
        self.current.as_ref().is_some_and(|active| active.clip.as_str() == clip)
    }
}

/// System: start requested clips (a new clip interrupts the current one, its
/// remaining markers are dropped)
pub fn start_requested_clips(
    mut requests: EventReader<ClipRequested>,
    library: Res<ClipLibrary>,
    mut playbacks: Query<&mut ClipPlayback>,
) {
    for request in requests.read() {
        if library.get(&request.clip).is_none() {
            crate::logger::log_warning(&format!(
                "Clip '{}' requested for {:?} is not in the clip library",
                request.clip, request.entity
            ));
            continue;
        }

        if let Ok(mut playback) = playbacks.get_mut(request.entity) {
            playback.current = Some(ActiveClip {
                clip: request.clip.clone(),
                elapsed: 0.0,
                next_marker: 0,
            });
        }
    }
}

/// System: advance playback and emit markers that were passed this tick
pub fn advance_clip_playback(
    clock: Res<CombatClock>,
    library: Res<ClipLibrary>,
    mut playbacks: Query<(Entity, &mut ClipPlayback)>,
    mut cues: EventWriter<TimelineEvent>,
) {
    let dt = clock.delta_secs();

    for (entity, mut playback) in playbacks.iter_mut() {
        let Some(active) = playback.current.as_mut() else {
            continue;
        };
        let Some(timeline) = library.get(&active.clip) else {
            playback.current = None;
            continue;
        };

        active.elapsed += dt;
        while let Some(marker) = timeline.markers.get(active.next_marker) {
            if marker.at > active.elapsed {
                break;
            }
            cues.write(TimelineEvent { entity, cue: marker.cue });
            active.next_marker += 1;
        }

        if active.elapsed >= timeline.duration {
            playback.current = None;
        }
    }
}
