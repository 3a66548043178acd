//! Targeting components

use bevy::prelude::*;

/// Enemies currently inside the observer's detection volume
///
/// Non-owning: entries may refer to despawned actors until the next prune.
/// Insertion order is kept so iteration stays deterministic.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NearbyEnemies {
    pub enemies: Vec<Entity>,
}

impl NearbyEnemies {
    pub fn contains(&self, entity: Entity) -> bool {
        self.enemies.contains(&entity)
    }

    /// Returns false when already present
    pub fn insert(&mut self, entity: Entity) -> bool {
        if self.contains(entity) {
            return false;
        }
        self.enemies.push(entity);
        true
    }

    /// Returns false when absent
    pub fn remove(&mut self, entity: Entity) -> bool {
        let before = self.enemies.len();
        self.enemies.retain(|&e| e != entity);
        self.enemies.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = Entity> + '_ {
        self.enemies.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

/// Sphere around the observer that reports actors entering/leaving it
///
/// `overlapping` is the collaborator's bookkeeping of the previous tick; the
/// core only consumes the resulting [`DetectionEvent`](super::DetectionEvent)s.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct DetectionVolume {
    pub radius: f32,
    pub overlapping: Vec<Entity>,
}

impl DetectionVolume {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            overlapping: Vec::new(),
        }
    }
}
