use bevy::prelude::*;

use crate::components::{
    AircraftHandle, AircraftVisuals, CheckpointTracker, CrashRecovery, FlightController,
    ObstacleCollision, RecoveryAction, SpatialComponent, TrailEffect, TriggerContact,
};
use crate::plugins::{AircraftReset, CheckpointEntered, CheckpointReached, ResetReason};
use crate::resources::{CheckpointTrack, RaceConfig, RaceCoordinator, SimClock};
use crate::systems::TrackPlacement;
use crate::utils::RngManager;

/// Advance trackers on entry into the checkpoint they are flying toward.
pub fn checkpoint_progress_system(
    mut entered: EventReader<CheckpointEntered>,
    mut trackers: Query<(&AircraftHandle, &mut CheckpointTracker)>,
    mut reached: EventWriter<CheckpointReached>,
) {
    for event in entered.read() {
        let Ok((id, mut tracker)) = trackers.get_mut(event.entity) else {
            continue;
        };
        if let Some(progress) = tracker.on_enter_trigger(event.checkpoint) {
            debug!(
                "{} passed checkpoint {} (lap {})",
                id.name, progress.passed, progress.lap
            );
            reached.send(CheckpointReached {
                entity: event.entity,
                handle: event.handle,
                progress,
            });
        }
    }
}

/// Start the crash sequence of aircraft that hit an obstacle while racing.
pub fn collision_response_system(
    coordinator: Res<RaceCoordinator>,
    mut collisions: EventReader<ObstacleCollision>,
    mut aircraft: Query<(
        &AircraftHandle,
        &mut FlightController,
        &mut SpatialComponent,
        &mut CrashRecovery,
        &mut AircraftVisuals,
        &mut TrailEffect,
    )>,
) {
    if coordinator.is_training() {
        // training episodes end on collision instead
        collisions.clear();
        return;
    }

    for collision in collisions.read() {
        let Ok((id, mut controller, mut spatial, mut recovery, mut visuals, mut trail)) =
            aircraft.get_mut(collision.entity)
        else {
            continue;
        };
        if !recovery.begin() {
            continue;
        }
        controller.freeze(&mut spatial);
        trail.set_emitting(false);
        visuals.mesh_visible = false;
        visuals.explosion_visible = true;
        info!(
            "{} crashed at ({:.1}, {:.1}, {:.1})",
            id.name, collision.impact_point.x, collision.impact_point.y, collision.impact_point.z
        );
    }
}

/// Advance running crash sequences: reposition after the explosion, then
/// hand control back.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn recovery_system(
    coordinator: Res<RaceCoordinator>,
    mut rng: ResMut<RngManager>,
    clock: Res<SimClock>,
    track: Res<CheckpointTrack>,
    config: Res<RaceConfig>,
    mut aircraft: Query<(
        Entity,
        &AircraftHandle,
        &mut CrashRecovery,
        &mut AircraftVisuals,
        &mut CheckpointTracker,
        &mut SpatialComponent,
        &mut FlightController,
        &mut TriggerContact,
    )>,
    mut resets: EventWriter<AircraftReset>,
) {
    let placement = TrackPlacement::new(&track, coordinator.aircraft_count(), config.race.spawn_spread);

    for (
        entity,
        id,
        mut recovery,
        mut visuals,
        mut tracker,
        mut spatial,
        mut controller,
        mut contact,
    ) in aircraft.iter_mut()
    {
        match recovery.tick(clock.tick()) {
            Some(RecoveryAction::Reposition) => {
                placement.place(
                    id.handle,
                    false,
                    rng.aircraft_stream(id.handle),
                    &mut tracker,
                    &mut spatial,
                    &mut controller,
                    &mut contact,
                );
                visuals.mesh_visible = true;
                visuals.explosion_visible = false;
                info!("{} back at checkpoint {}", id.name, tracker.last_completed());
                resets.send(AircraftReset {
                    entity,
                    handle: id.handle,
                    reason: ResetReason::Crash,
                });
            }
            Some(RecoveryAction::Thaw) => {
                controller.thaw(&mut spatial);
                debug!("{} recovered", id.name);
            }
            None => {}
        }
    }
}
