use bevy::prelude::*;
use nalgebra::Vector3;

use crate::components::{
    AircraftHandle, CheckpointTracker, CollisionComponent, FlightController, Obstacle,
    ObstacleCollision, SpatialComponent, TriggerContact,
};
use crate::plugins::CheckpointEntered;
use crate::resources::{CheckpointTrack, RaceConfig, SimClock};

/// Detect entry into checkpoint triggers, plus proximity to the next
/// checkpoint when distance detection is on.
pub fn checkpoint_detection_system(
    track: Res<CheckpointTrack>,
    config: Res<RaceConfig>,
    mut aircraft: Query<(
        Entity,
        &AircraftHandle,
        &SpatialComponent,
        &FlightController,
        &CheckpointTracker,
        &mut TriggerContact,
    )>,
    mut entered: EventWriter<CheckpointEntered>,
) {
    let trigger_radius = config.race.checkpoint_trigger_radius;
    let detection_radius = if config.is_training() {
        Some(config.training.checkpoint_radius)
    } else if config.race.distance_detection {
        Some(trigger_radius)
    } else {
        None
    };

    for (entity, id, spatial, controller, tracker, mut contact) in aircraft.iter_mut() {
        if controller.frozen {
            continue;
        }

        for checkpoint in track.checkpoints() {
            let inside = (checkpoint.position - spatial.position).norm() < trigger_radius;
            if contact.update(checkpoint.index, inside) {
                entered.send(CheckpointEntered {
                    entity,
                    handle: id.handle,
                    checkpoint: checkpoint.index,
                });
            }
        }

        if let Some(radius) = detection_radius {
            let target = track.checkpoint(tracker.next_checkpoint());
            let distance = (target.position - spatial.position).norm();
            if let Some(checkpoint) = tracker.within_reach(distance, radius) {
                entered.send(CheckpointEntered {
                    entity,
                    handle: id.handle,
                    checkpoint,
                });
            }
        }
    }
}

/// Report the start of every contact between an aircraft and an obstacle.
pub fn obstacle_detection_system(
    clock: Res<SimClock>,
    obstacles: Query<&Obstacle>,
    mut aircraft: Query<(
        Entity,
        &AircraftHandle,
        &SpatialComponent,
        &FlightController,
        &mut CollisionComponent,
    )>,
    mut collisions: EventWriter<ObstacleCollision>,
) {
    let time = clock.elapsed_seconds();

    for (entity, id, spatial, controller, mut collision) in aircraft.iter_mut() {
        if controller.frozen {
            continue;
        }

        let contact = obstacles
            .iter()
            .filter_map(|obstacle| {
                obstacle
                    .penetration(&spatial.position, collision.radius)
                    .map(|depth| (obstacle, depth))
            })
            .max_by(|a, b| a.1.total_cmp(&b.1));

        if collision.register_contact(contact.is_some(), time) {
            if let Some((obstacle, depth)) = contact {
                let towards = (obstacle.center - spatial.position)
                    .try_normalize(1.0e-9)
                    .unwrap_or_else(Vector3::zeros);
                collisions.send(ObstacleCollision {
                    entity,
                    handle: id.handle,
                    impact_point: spatial.position + towards * (collision.radius - depth),
                    penetration_depth: depth,
                });
            }
        }
    }
}
