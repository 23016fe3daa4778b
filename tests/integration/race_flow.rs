use std::time::Duration;

use nalgebra::Vector3;
use pretty_assertions::assert_eq;
use skyrace::{
    components::{
        CheckpointTracker, CommandSource, FlightController, SpatialComponent, TrailEffect,
    },
    plugins::{CountdownText, RaceCommand, RaceStateChanged},
    resources::{RaceConfig, RaceState},
    sensors::Observation,
    utils::OBSERVATION_SIZE,
};

use crate::common::{hold_course, square_track, TestAppBuilder};

fn state_changes(app: &crate::common::TestApp) -> Vec<(RaceState, RaceState)> {
    app.recorded::<RaceStateChanged>()
        .into_iter()
        .map(|(_, change)| (change.from, change.to))
        .collect()
}

#[test]
fn test_countdown_gates_playing() {
    let mut app = TestAppBuilder::new()
        .with_config(RaceConfig::default())
        .with_aircraft("alpha", hold_course())
        .build();

    app.run_frame();
    assert_eq!(app.state(), RaceState::Countdown);
    let start = app.component::<SpatialComponent>(0).position;
    assert!(app.component::<FlightController>(0).frozen);

    app.run_steps(243);
    assert_eq!(app.state(), RaceState::Countdown);
    assert_eq!(app.component::<SpatialComponent>(0).position, start);
    assert_eq!(app.race_time(), Duration::ZERO);

    app.run_frame();
    assert_eq!(app.ticks(), 245);
    assert_eq!(app.state(), RaceState::Playing);
    assert!(!app.component::<FlightController>(0).frozen);

    let texts: Vec<String> = app
        .recorded::<CountdownText>()
        .into_iter()
        .map(|(_, text)| text.text)
        .collect();
    assert_eq!(texts, vec!["3", "", "2", "", "1", "", "GO!", ""]);
    assert_eq!(
        state_changes(&app),
        vec![
            (RaceState::Preparing, RaceState::Countdown),
            (RaceState::Countdown, RaceState::Playing)
        ]
    );
}

#[test]
fn test_four_checkpoint_lap() {
    let mut app = TestAppBuilder::new()
        .with_track(square_track())
        .with_aircraft("alpha", hold_course())
        .build();
    app.run_frame();
    assert_eq!(app.state(), RaceState::Playing);

    app.fly_through(0, 0);
    app.fly_through(0, 1);
    // wrong and repeated checkpoints change nothing
    app.fly_through(0, 3);
    app.fly_through(0, 1);
    assert_eq!(app.component::<CheckpointTracker>(0).next_checkpoint(), 2);

    app.fly_through(0, 2);
    app.fly_through(0, 3);

    let tracker = app.component::<CheckpointTracker>(0);
    assert_eq!(tracker.lap(), 2);
    assert_eq!(tracker.next_checkpoint(), 0);
    let status = app.status(0);
    assert_eq!(status.lap, 2);
    assert_eq!(status.checkpoint_index, 0);
    assert_eq!(status.checkpoints_completed(4), 4);
    assert_eq!(app.state(), RaceState::Playing);
}

#[test]
fn test_gameover_follows_player_aircraft() {
    let mut app = TestAppBuilder::new()
        .configure(|config| config.race.num_laps = 1)
        .with_track(square_track())
        .with_aircraft("bot", hold_course())
        .with_aircraft("pilot", CommandSource::Player)
        .build();
    app.run_frame();
    assert_eq!(app.coordinator().followed(), 1);

    for _ in 0..2 {
        for checkpoint in 0..4 {
            app.fly_through(0, checkpoint);
        }
    }
    assert_eq!(app.status(0).lap, 3);
    assert_eq!(app.state(), RaceState::Playing);

    for checkpoint in 0..4 {
        app.fly_through(1, checkpoint);
    }
    assert_eq!(app.state(), RaceState::Gameover);
    assert_eq!(
        state_changes(&app).last(),
        Some(&(RaceState::Playing, RaceState::Gameover))
    );

    let finish_time = app.race_time();
    assert!(finish_time > Duration::ZERO);
    app.run_steps(10);
    assert_eq!(app.race_time(), finish_time);
    assert!(app.component::<FlightController>(1).frozen);
    assert_eq!(
        app.component::<SpatialComponent>(1).velocity,
        Vector3::zeros()
    );

    let standings = app.coordinator().standings();
    assert_eq!(standings[0].name, "bot");
    assert_eq!(app.coordinator().place_label(1), "2nd");
}

#[test]
fn test_pause_excludes_paused_time() {
    let mut app = TestAppBuilder::new()
        .with_track(square_track())
        .with_aircraft("alpha", hold_course())
        .build();

    app.run_steps(100);
    assert_eq!(app.race_time(), Duration::from_millis(1980));

    app.send(RaceCommand::Pause);
    app.run_frame();
    assert_eq!(app.state(), RaceState::Paused);
    assert_eq!(app.race_time(), Duration::from_millis(2000));
    let status = app.status(0);
    let position = app.component::<SpatialComponent>(0).position;

    app.run_steps(49);
    assert_eq!(app.race_time(), Duration::from_millis(2000));
    assert_eq!(app.status(0), status);
    assert_eq!(app.component::<SpatialComponent>(0).position, position);

    app.send(RaceCommand::Resume);
    app.run_frame();
    assert_eq!(app.state(), RaceState::Playing);
    assert_eq!(app.race_time(), Duration::from_millis(2000));

    app.run_steps(99);
    assert_eq!(app.ticks(), 250);
    assert_eq!(app.race_time(), Duration::from_millis(3980));
}

#[test]
fn test_player_pause_button_toggles() {
    let mut app = TestAppBuilder::new()
        .with_track(square_track())
        .with_aircraft("pilot", CommandSource::Player)
        .build();
    app.run_steps(5);

    app.input_mut().pause_requested = true;
    app.run_frame();
    assert_eq!(app.state(), RaceState::Paused);
    assert!(!app.input_mut().pause_requested);
    assert!(app.component::<FlightController>(0).frozen);

    app.input_mut().pause_requested = true;
    app.run_frame();
    assert_eq!(app.state(), RaceState::Playing);
    assert!(!app.component::<FlightController>(0).frozen);
}

#[test]
fn test_invalid_commands_are_ignored() {
    let mut app = TestAppBuilder::new()
        .with_config(RaceConfig::default())
        .with_track(square_track())
        .with_aircraft("alpha", hold_course())
        .build();
    app.run_frame();

    // no pausing during the countdown, no resuming what is not paused
    app.send(RaceCommand::Pause);
    app.send(RaceCommand::Resume);
    app.run_frame();
    assert_eq!(app.state(), RaceState::Countdown);
}

#[test]
fn test_ranking_by_progress_then_distance() {
    let mut app = TestAppBuilder::new()
        .configure(|config| config.flight.thrust = 0.0)
        .with_track(square_track())
        .with_aircraft("alpha", hold_course())
        .with_aircraft("bravo", hold_course())
        .build();
    app.run_frame();
    let mut places = vec![app.status(0).place, app.status(1).place];
    places.sort();
    assert_eq!(places, vec![1, 2]);

    let gate = app.track().checkpoint(0).position;
    app.teleport(0, gate + Vector3::new(0.0, 300.0, 0.0));
    app.teleport(1, gate + Vector3::new(0.0, 45.0, 0.0));
    app.run_steps(30);
    assert_eq!(app.status(1).place, 1);
    assert_eq!(app.status(0).place, 2);

    app.fly_through(0, 0);
    app.teleport(0, gate + Vector3::new(0.0, 300.0, 0.0));
    app.run_steps(30);
    assert_eq!(app.status(0).place, 1);
    assert_eq!(app.coordinator().place_label(0), "1st");
    assert_eq!(app.status(1).place, 2);
}

#[test]
fn test_trail_clears_when_boost_restarts() {
    let mut app = TestAppBuilder::new()
        .with_track(square_track())
        .with_aircraft("pilot", CommandSource::Player)
        .build();

    app.input_mut().boost = 1.0;
    app.run_steps(5);
    let trail = app.component::<TrailEffect>(0);
    assert!(trail.emitting);
    assert_eq!(trail.points.len(), 5);

    app.input_mut().boost = 0.0;
    app.run_steps(3);
    let trail = app.component::<TrailEffect>(0);
    assert!(!trail.emitting);
    assert_eq!(trail.points.len(), 5);

    app.input_mut().boost = 1.0;
    app.run_frame();
    assert_eq!(app.component::<TrailEffect>(0).points.len(), 1);
}

#[test]
fn test_observations_have_fixed_length() {
    let mut app = TestAppBuilder::new()
        .with_aircraft("alpha", hold_course())
        .with_aircraft("bravo", hold_course())
        .build();
    app.run_steps(3);

    for handle in 0..2 {
        let observation = app.component::<Observation>(handle);
        assert_eq!(observation.len(), OBSERVATION_SIZE);
        assert!(observation.to_checkpoint().norm() > 0.0);
        for probe in 0..observation.probe_count() {
            let reading = observation.probe(probe).unwrap();
            assert!((0.0..=1.0).contains(&reading.distance));
        }
    }
}

#[test]
fn test_restart_prepares_a_new_race() {
    let mut app = TestAppBuilder::new()
        .with_track(square_track())
        .with_aircraft("alpha", hold_course())
        .build();
    app.run_frame();
    app.fly_through(0, 0);
    app.fly_through(0, 1);
    assert_eq!(app.status(0).checkpoint_index, 2);

    app.send(RaceCommand::Restart);
    app.run_frame();
    assert_eq!(app.state(), RaceState::Preparing);
    assert_eq!(app.race_time(), Duration::ZERO);

    app.run_frame();
    assert_eq!(app.state(), RaceState::Playing);
    assert_eq!(app.component::<CheckpointTracker>(0).next_checkpoint(), 0);
    assert_eq!(app.status(0).checkpoint_index, 0);
    assert_eq!(app.status(0).lap, 1);
    assert_eq!(
        state_changes(&app)[2..].to_vec(),
        vec![
            (RaceState::Playing, RaceState::Preparing),
            (RaceState::Preparing, RaceState::Countdown),
            (RaceState::Countdown, RaceState::Playing)
        ]
    );
}
