//! Targeting systems: nearby-enemy bookkeeping.

use bevy::prelude::*;

use super::{DetectionEvent, NearbyEnemies};
use crate::components::{Dead, Enemy};

/// System: fold detection transitions into `NearbyEnemies`
///
/// Only actors carrying the `Enemy` marker are tracked. Dead and despawned
/// entries are pruned afterwards (the volume never reports them as exited).
pub fn update_nearby_enemies(
    mut detections: EventReader<DetectionEvent>,
    mut observers: Query<&mut NearbyEnemies>,
    enemies: Query<(), (With<Enemy>, Without<Dead>)>,
) {
    for event in detections.read() {
        match *event {
            DetectionEvent::Entered { observer, actor } => {
                if !enemies.contains(actor) {
                    continue;
                }
                let Ok(mut nearby) = observers.get_mut(observer) else {
                    continue;
                };
                if nearby.insert(actor) {
                    crate::logger::log(&format!("👁️ {:?} detected enemy {:?}", observer, actor));
                }
            }
            DetectionEvent::Exited { observer, actor } => {
                let Ok(mut nearby) = observers.get_mut(observer) else {
                    continue;
                };
                if nearby.remove(actor) {
                    crate::logger::log(&format!("👻 {:?} lost enemy {:?}", observer, actor));
                }
            }
        }
    }

    for mut nearby in observers.iter_mut() {
        if nearby.iter().all(|entity| enemies.contains(entity)) {
            continue;
        }
        let before = nearby.enemies.len();
        nearby.enemies.retain(|&entity| enemies.contains(entity));
        crate::logger::log(&format!(
            "Targeting: removed {} dead/invalid enemies from nearby set",
            before - nearby.enemies.len()
        ));
    }
}
