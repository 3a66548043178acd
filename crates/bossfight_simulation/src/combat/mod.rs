//! Combat module: the shared combat record, the timeline protocol and damage flow.
//!
//! Per tick (FixedUpdate):
//! 1. `CombatSet::Cues`: timeline cues queued by the clip player are drained
//!    into the owners' policies (damage window, lunge, combo gate, stumble end)
//! 2. `CombatSet::Hits`: open damage windows hit overlapping actors once per
//!    swing, external damage requests are applied, deaths are marked
//!
//! The clip player and weapon overlap sensing are collaborators; their headless
//! stand-ins live in `timeline` and `sensing`.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod selection;
pub mod sensing;
pub mod systems;
pub mod timeline;

pub use components::*;
pub use events::*;
pub use systems::*;
pub use timeline::{ClipLibrary, ClipMarker, ClipPlayback, ClipTimeline};

/// Combat Plugin
///
/// Registers combat events and the cue/hit systems.
///
/// Order inside `CombatSet::Hits`:
/// 1. register_weapon_hits: weapon overlaps → damage (hit-set filtered)
/// 2. apply_damage_requests: external `DamageRequest` events
/// 3. mark_dead_on_death: `EntityDied` → `Dead` marker, navigation stop
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TimelineEvent>()
            .add_event::<ClipRequested>()
            .add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>();

        app.add_systems(FixedUpdate, dispatch_timeline_cues.in_set(crate::CombatSet::Cues))
            .add_systems(
                FixedUpdate,
                (register_weapon_hits, apply_damage_requests, mark_dead_on_death)
                    .chain()
                    .in_set(crate::CombatSet::Hits),
            );
    }
}
