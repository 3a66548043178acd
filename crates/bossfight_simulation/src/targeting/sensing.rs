//! Headless detection volume.
//!
//! Stands in for the engine's overlap callbacks: compares each volume's
//! current contents with the previous tick and reports the transitions.

use bevy::prelude::*;

use super::{DetectionEvent, DetectionVolume};
use crate::components::{Dead, Health};

/// System: emit `DetectionEvent`s for actors entering/leaving detection volumes
pub fn sense_detection_volumes(
    mut volumes: Query<(Entity, &Transform, &mut DetectionVolume)>,
    bodies: Query<(Entity, &Transform), (With<Health>, Without<Dead>)>,
    mut detections: EventWriter<DetectionEvent>,
) {
    for (observer, transform, mut volume) in volumes.iter_mut() {
        let origin = transform.translation;
        let radius = volume.radius;

        let overlapping: Vec<Entity> = bodies
            .iter()
            .filter(|(entity, _)| *entity != observer)
            .filter(|(_, body)| origin.distance(body.translation) <= radius)
            .map(|(entity, _)| entity)
            .collect();

        if volume.overlapping == overlapping {
            continue;
        }

        for &actor in volume.overlapping.iter().filter(|e| !overlapping.contains(e)) {
            detections.write(DetectionEvent::Exited { observer, actor });
        }
        for &actor in overlapping.iter().filter(|e| !volume.overlapping.contains(e)) {
            detections.write(DetectionEvent::Entered { observer, actor });
        }

        volume.overlapping = overlapping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct Seen(Vec<DetectionEvent>);

    fn collect(mut events: EventReader<DetectionEvent>, mut seen: ResMut<Seen>) {
        seen.0.extend(events.read().copied());
    }

    #[test]
    fn test_transitions_reported_once() {
        let mut app = App::new();
        app.add_event::<DetectionEvent>()
            .init_resource::<Seen>()
            .add_systems(Update, (sense_detection_volumes, collect).chain());

        let observer = app
            .world_mut()
            .spawn((Transform::default(), DetectionVolume::new(1500.0)))
            .id();
        let actor = app
            .world_mut()
            .spawn((Transform::from_xyz(0.0, 0.0, -1000.0), Health::new(5)))
            .id();

        app.update();
        app.update();
        assert_eq!(app.world().resource::<Seen>().0, vec![DetectionEvent::Entered { observer, actor }]);

        app.world_mut().entity_mut(actor).insert(Transform::from_xyz(0.0, 0.0, -1600.0));
        app.update();
        assert_eq!(
            app.world().resource::<Seen>().0,
            vec![
                DetectionEvent::Entered { observer, actor },
                DetectionEvent::Exited { observer, actor }
            ]
        );
    }
}
