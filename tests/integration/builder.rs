use pretty_assertions::assert_eq;
use skyrace::{
    components::{AircraftHandle, Obstacle, TrainingEpisode},
    plugins::RaceBuilder,
    resources::{RaceConfig, RaceCoordinator, RaceState, TrackConfig},
    utils::RaceError,
};

use crate::common::{hold_course, sky_obstacle, square_track};

#[test]
fn test_build_without_aircraft() {
    let result = RaceBuilder::new(RaceConfig::default()).build();
    assert!(matches!(result, Err(RaceError::NoAircraft)));
}

#[test]
fn test_build_without_checkpoints() {
    let mut config = RaceConfig::default();
    config.track = TrackConfig { waypoints: vec![] };
    let result = RaceBuilder::new(config)
        .with_aircraft("alpha", hold_course())
        .build();
    assert!(matches!(result, Err(RaceError::EmptyTrack)));
}

#[test]
fn test_build_rejects_invalid_config() {
    let mut config = RaceConfig::default();
    config.simulation.tick_seconds = 0.0;
    let result = RaceBuilder::new(config)
        .with_aircraft("alpha", hold_course())
        .build();
    assert!(matches!(result, Err(RaceError::InvalidConfig(_))));
}

#[test]
fn test_build_registers_aircraft() {
    let mut config = RaceConfig::default();
    config.obstacles.push(sky_obstacle());
    let mut app = RaceBuilder::new(config)
        .with_track(square_track())
        .with_aircraft("alpha", hold_course())
        .with_aircraft("bravo", hold_course())
        .build()
        .expect("race should build");

    let coordinator = app.world().resource::<RaceCoordinator>();
    assert_eq!(coordinator.state(), RaceState::Preparing);
    assert_eq!(coordinator.aircraft_count(), 2);
    assert_eq!(coordinator.num_checkpoints(), 4);
    assert_eq!(coordinator.name(1), Some("bravo"));
    assert_eq!(coordinator.followed(), 0);

    let world = app.world_mut();
    let mut handles: Vec<usize> = world
        .query::<&AircraftHandle>()
        .iter(world)
        .map(|id| id.handle)
        .collect();
    handles.sort_unstable();
    assert_eq!(handles, vec![0, 1]);
    assert_eq!(world.query::<&Obstacle>().iter(world).count(), 1);
    assert_eq!(world.query::<&TrainingEpisode>().iter(world).count(), 0);
}

#[test]
fn test_training_build_adds_episodes() {
    let mut app = RaceBuilder::new(RaceConfig::default().for_training())
        .with_aircraft("learner", hold_course())
        .build()
        .expect("race should build");

    let world = app.world_mut();
    assert_eq!(world.query::<&TrainingEpisode>().iter(world).count(), 1);
}
