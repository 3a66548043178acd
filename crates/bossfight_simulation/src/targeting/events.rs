//! Detection events (detection volume collaborator → core)

use bevy::prelude::*;

/// Overlap transition of a detection volume
///
/// Mirrors an engine overlap callback: the collaborator sends `Entered` once
/// when an actor starts overlapping and `Exited` once when it stops. Actors that
/// die or despawn inside the volume may never produce `Exited`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionEvent {
    Entered {
        /// Owner of the detection volume
        observer: Entity,
        actor: Entity,
    },
    Exited {
        observer: Entity,
        actor: Entity,
    },
}
