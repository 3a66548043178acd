//! Combat events: timeline cues in, clip requests out, damage flow.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::ClipId;

/// Marker authored on a clip timeline
///
/// The clip player emits these at their authored times; the core drains them
/// once per tick before the behavior step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum TimelineCue {
    AttackLunge,
    AttackDamageStart,
    AttackDamageEnd,
    AttackNextReady,
    AttackEnd,
    MovingForward(bool),
    MovingBackwards(bool),
    StumbleEnd,
    RollStart,
    RollEnd,
}

/// Event: clip player reached a marker (clip player → core)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TimelineEvent {
    pub entity: Entity,
    pub cue: TimelineCue,
}

/// Event: core wants a clip played on an actor (core → clip player)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ClipRequested {
    pub entity: Entity,
    pub clip: ClipId,
}

/// Event: external damage application (traps, scripted hits, tests)
///
/// Weapon hits do not go through this event: hit registration needs the applied
/// amount back in the same tick and calls the resolver directly.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: u32,
    pub instigator: Option<Entity>,
    pub causer: Entity,
}

/// Event: damage was applied to a target
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
}

/// Event: entity health reached zero
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}
