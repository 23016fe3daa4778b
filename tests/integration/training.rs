use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use skyrace::{
    components::{CheckpointTracker, CrashRecovery, EpisodeEnd, FlightController, TrainingEpisode},
    plugins::{
        AircraftReset, CountdownText, EpisodeEnded, RaceCommand, RaceStateChanged, ResetReason,
        RewardSignal,
    },
    resources::{RaceConfig, RaceState},
};

use crate::common::{hold_course, open_sky, sky_obstacle, square_track, TestApp, TestAppBuilder};

const STEP_PENALTY: f64 = 1.0 / 5000.0;

fn training(edit: impl FnOnce(&mut RaceConfig)) -> TestApp {
    TestAppBuilder::new()
        .configure(|config| {
            config.training.enabled = true;
            config.flight.thrust = 0.0;
            edit(config);
        })
        .with_track(square_track())
        .with_aircraft("learner", hold_course())
        .build()
}

fn last_reward(app: &TestApp) -> (u64, RewardSignal) {
    app.recorded::<RewardSignal>()
        .last()
        .copied()
        .expect("no reward recorded")
}

#[test]
fn test_training_skips_countdown() {
    let mut app = TestAppBuilder::new()
        .with_config(RaceConfig::default().for_training())
        .with_aircraft("learner", hold_course())
        .build();
    app.run_frame();

    assert_eq!(app.state(), RaceState::Playing);
    assert!(!app.component::<FlightController>(0).frozen);
    assert!(app.recorded::<CountdownText>().is_empty());
    let changes: Vec<RaceStateChanged> = app
        .recorded::<RaceStateChanged>()
        .into_iter()
        .map(|(_, change)| change)
        .collect();
    assert_eq!(
        changes,
        vec![RaceStateChanged {
            from: RaceState::Preparing,
            to: RaceState::Playing
        }]
    );
    assert_eq!(app.component::<TrainingEpisode>(0).episode, 1);
}

#[test]
fn test_step_timeout_ends_episode() {
    let mut app = training(|config| config.training.step_timeout = 50);

    app.run_steps(50);
    let (tick, signal) = last_reward(&app);
    assert_eq!(tick, 50);
    assert_relative_eq!(signal.reward, -STEP_PENALTY, epsilon = 1e-12);
    assert!(!signal.done);

    app.run_frame();
    let (tick, signal) = last_reward(&app);
    assert_eq!(tick, 51);
    assert_relative_eq!(signal.reward, -STEP_PENALTY - 0.5, epsilon = 1e-12);
    assert!(signal.done);

    let ended = app.recorded::<EpisodeEnded>();
    assert_eq!(ended.len(), 1);
    let (tick, episode) = ended[0];
    assert_eq!(tick, 51);
    assert_eq!(episode.reason, EpisodeEnd::Timeout);
    assert_eq!(episode.steps, 51);
    assert_eq!(episode.episode, 1);
    assert_relative_eq!(
        episode.cumulative_reward,
        -51.0 * STEP_PENALTY - 0.5,
        epsilon = 1e-9
    );

    app.run_frame();
    let resets: Vec<(u64, ResetReason)> = app
        .recorded::<AircraftReset>()
        .into_iter()
        .map(|(tick, reset)| (tick, reset.reason))
        .collect();
    assert_eq!(
        resets,
        vec![(1, ResetReason::Start), (52, ResetReason::Episode)]
    );
    let episode = app.component::<TrainingEpisode>(0);
    assert_eq!(episode.episode, 2);
    assert_eq!(episode.steps, 1);
    assert!(episode.is_running());
}

#[test]
fn test_checkpoint_reward_extends_window() {
    let mut app = training(|config| config.training.step_timeout = 50);
    app.run_steps(10);

    let next = app.component::<CheckpointTracker>(0).next_checkpoint();
    app.fly_through(0, next);

    let (tick, signal) = last_reward(&app);
    assert_eq!(tick, 11);
    assert_relative_eq!(signal.reward, 0.5 - STEP_PENALTY, epsilon = 1e-12);
    assert!(!signal.done);

    let episode = app.component::<TrainingEpisode>(0);
    assert_eq!(episode.next_step_timeout, 60);
    assert_eq!(episode.steps, 11);
    let tracker = app.component::<CheckpointTracker>(0);
    assert_eq!(tracker.next_checkpoint(), (next + 1) % 4);
}

#[test]
fn test_collision_ends_episode_without_crash_sequence() {
    let mut app = training(|config| config.obstacles.push(sky_obstacle()));
    app.run_steps(10);
    app.teleport(0, open_sky());
    app.run_frame();

    let (_, signal) = last_reward(&app);
    assert_relative_eq!(signal.reward, -1.0 - STEP_PENALTY, epsilon = 1e-12);
    assert!(signal.done);
    let ended = app.recorded::<EpisodeEnded>();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].1.reason, EpisodeEnd::Collision);

    assert!(!app.component::<FlightController>(0).frozen);
    assert!(!app.component::<CrashRecovery>(0).is_active());

    // put back on the track next tick
    app.run_frame();
    assert_eq!(app.component::<TrainingEpisode>(0).episode, 2);
}

#[test]
fn test_pause_rejected_in_training() {
    let mut app = training(|_| {});
    app.run_frame();

    app.send(RaceCommand::Pause);
    app.run_frame();
    assert_eq!(app.state(), RaceState::Playing);
    assert!(!app.component::<FlightController>(0).frozen);

    app.input_mut().pause_requested = true;
    app.run_frame();
    assert_eq!(app.state(), RaceState::Playing);
}

#[test]
fn test_max_steps_ends_without_penalty() {
    let mut app = training(|config| config.training.max_steps = 20);
    app.run_steps(20);

    let ended = app.recorded::<EpisodeEnded>();
    assert_eq!(ended.len(), 1);
    let (tick, episode) = ended[0];
    assert_eq!(tick, 20);
    assert_eq!(episode.reason, EpisodeEnd::MaxSteps);
    assert_eq!(episode.steps, 20);
    assert_relative_eq!(episode.cumulative_reward, -1.0, epsilon = 1e-9);
}

#[test]
fn test_no_race_timeouts_in_training() {
    let mut app = training(|_| {});
    app.run_steps(800);

    assert_eq!(app.state(), RaceState::Playing);
    assert_eq!(app.status(0).timeouts, 0);
    assert!(app
        .recorded::<AircraftReset>()
        .iter()
        .all(|(_, reset)| reset.reason != ResetReason::Timeout));
    // 300-step windows: episodes end on ticks 301 and 602
    assert_eq!(app.component::<TrainingEpisode>(0).episode, 3);
}

#[test]
fn test_without_auto_reset_episode_stays_over() {
    let mut app = training(|config| {
        config.training.step_timeout = 50;
        config.training.auto_reset = false;
    });
    app.run_steps(60);

    let resets = app.recorded::<AircraftReset>();
    assert_eq!(resets.len(), 1);
    assert_eq!(resets[0].1.reason, ResetReason::Start);

    let episode = app.component::<TrainingEpisode>(0);
    assert_eq!(episode.episode, 1);
    assert_eq!(episode.ended, Some(EpisodeEnd::Timeout));
    assert_eq!(episode.steps, 51);
    assert_eq!(last_reward(&app).0, 51);
}
