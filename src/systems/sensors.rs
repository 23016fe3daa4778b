use bevy::prelude::*;

use crate::components::{CheckpointTracker, FlightController, Obstacle, SpatialComponent};
use crate::resources::{CheckpointTrack, RaceConfig};
use crate::sensors::{encode, Observation, ProbeTarget};

/// Refresh every aircraft's observation for the next decision.
pub fn observation_system(
    track: Res<CheckpointTrack>,
    config: Res<RaceConfig>,
    obstacles: Query<&Obstacle>,
    mut aircraft: Query<(
        &FlightController,
        &SpatialComponent,
        &CheckpointTracker,
        &mut Observation,
    )>,
) {
    let targets = ProbeTarget::collect(
        obstacles.iter(),
        &track,
        config.race.checkpoint_trigger_radius,
    );

    for (controller, spatial, tracker, mut observation) in aircraft.iter_mut() {
        let pose = controller.pose(spatial);
        *observation = encode(
            &pose,
            &track,
            tracker.next_checkpoint(),
            &targets,
            &config.sensors,
        );
    }
}
