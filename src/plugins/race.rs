use bevy::prelude::*;

use crate::components::ObstacleCollision;
use crate::plugins::{
    AircraftReset, CheckpointEntered, CheckpointReached, CountdownText, EpisodeEnded, RaceCommand,
    RaceStateChanged, RewardSignal,
};
use crate::resources::{CheckpointTrack, Countdown, PlayerInput, RaceConfig, RaceCoordinator, SimClock};
use crate::systems::{
    checkpoint_detection_system, checkpoint_progress_system, clock_system,
    collision_response_system, countdown_system, decide_commands_system, episode_reset_system,
    flight_control_system, obstacle_detection_system, observation_system,
    physics_integrator_system, race_bookkeeping_system, race_command_system, race_in_progress,
    race_setup_system, recovery_system, state_effects_system, training_active,
    training_episode_system,
};
use crate::utils::RngManager;

/// Stages of one simulation tick, in execution order.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum RaceSet {
    Clock,
    /// State machine, countdown, timed recoveries and resets
    Schedule,
    Commands,
    Flight,
    Physics,
    Detection,
    Progress,
    Bookkeeping,
    Sensors,
}

/// Installs the race resources, events and tick systems.
pub struct RacePlugin {
    config: RaceConfig,
    track: CheckpointTrack,
}

impl RacePlugin {
    pub fn new(config: RaceConfig, track: CheckpointTrack) -> Self {
        Self { config, track }
    }
}

impl Plugin for RacePlugin {
    fn build(&self, app: &mut App) {
        let coordinator = RaceCoordinator::new(&self.config, self.track.len());

        app.insert_resource(self.config.clone())
            .insert_resource(self.track.clone())
            .insert_resource(coordinator)
            .insert_resource(SimClock::new(self.config.simulation.tick_seconds))
            .insert_resource(RngManager::new(self.config.simulation.seed))
            .insert_resource(Countdown::new(&self.config.countdown))
            .init_resource::<PlayerInput>()
            .add_event::<RaceStateChanged>()
            .add_event::<RaceCommand>()
            .add_event::<CountdownText>()
            .add_event::<CheckpointEntered>()
            .add_event::<CheckpointReached>()
            .add_event::<ObstacleCollision>()
            .add_event::<AircraftReset>()
            .add_event::<RewardSignal>()
            .add_event::<EpisodeEnded>();

        app.configure_sets(
            Update,
            (
                RaceSet::Clock,
                RaceSet::Schedule,
                RaceSet::Commands.run_if(race_in_progress),
                RaceSet::Flight.run_if(race_in_progress),
                RaceSet::Physics.run_if(race_in_progress),
                RaceSet::Detection.run_if(race_in_progress),
                RaceSet::Progress.run_if(race_in_progress),
                RaceSet::Bookkeeping.run_if(race_in_progress),
                RaceSet::Sensors,
            )
                .chain(),
        )
        .add_systems(Update, clock_system.in_set(RaceSet::Clock))
        .add_systems(
            Update,
            (
                race_setup_system,
                countdown_system,
                race_command_system,
                state_effects_system,
                recovery_system.run_if(race_in_progress),
                episode_reset_system.run_if(race_in_progress),
            )
                .chain()
                .in_set(RaceSet::Schedule),
        )
        .add_systems(Update, decide_commands_system.in_set(RaceSet::Commands))
        .add_systems(Update, flight_control_system.in_set(RaceSet::Flight))
        .add_systems(Update, physics_integrator_system.in_set(RaceSet::Physics))
        .add_systems(
            Update,
            (checkpoint_detection_system, obstacle_detection_system)
                .chain()
                .in_set(RaceSet::Detection),
        )
        .add_systems(
            Update,
            (
                checkpoint_progress_system,
                collision_response_system,
                training_episode_system.run_if(training_active),
            )
                .chain()
                .in_set(RaceSet::Progress),
        )
        .add_systems(Update, race_bookkeeping_system.in_set(RaceSet::Bookkeeping))
        .add_systems(Update, observation_system.in_set(RaceSet::Sensors));
    }
}
