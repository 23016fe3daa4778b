use std::time::Duration;

use nalgebra::Vector3;
use pretty_assertions::assert_eq;
use skyrace::{
    components::{AircraftVisuals, CrashRecovery, FlightController, RecoveryStage, SpatialComponent},
    plugins::{AircraftReset, RaceCommand, ResetReason},
    resources::RaceState,
};

use crate::common::{hold_course, open_sky, sky_obstacle, square_track, TestApp, TestAppBuilder};

fn race_with_obstacle() -> TestApp {
    TestAppBuilder::new()
        .configure(|config| config.obstacles.push(sky_obstacle()))
        .with_track(square_track())
        .with_aircraft("alpha", hold_course())
        .with_aircraft("bravo", hold_course())
        .build()
}

fn crash(app: &mut TestApp, handle: usize) {
    app.teleport(handle, open_sky());
    app.run_frame();
}

#[test]
fn test_crash_recovery_sequence() {
    let mut app = race_with_obstacle();
    app.run_steps(10);
    crash(&mut app, 0);

    assert!(app.component::<FlightController>(0).frozen);
    assert_eq!(app.component::<SpatialComponent>(0).velocity, Vector3::zeros());
    assert_eq!(
        app.component::<AircraftVisuals>(0),
        AircraftVisuals {
            mesh_visible: false,
            explosion_visible: true
        }
    );
    assert_eq!(
        app.component::<CrashRecovery>(0).stage(),
        Some(RecoveryStage::Exploding)
    );
    // the other aircraft keeps flying
    assert!(!app.component::<FlightController>(1).frozen);

    app.run_steps(99);
    assert_eq!(
        app.component::<CrashRecovery>(0).stage(),
        Some(RecoveryStage::Exploding)
    );
    assert_eq!(app.component::<SpatialComponent>(0).position, open_sky());

    app.run_frame();
    assert_eq!(app.ticks(), 111);
    assert_eq!(
        app.component::<CrashRecovery>(0).stage(),
        Some(RecoveryStage::Repositioned)
    );
    assert_eq!(app.component::<AircraftVisuals>(0), AircraftVisuals::default());
    assert!(app.component::<FlightController>(0).frozen);
    let restart = app.track().checkpoint(3).position;
    assert!((app.component::<SpatialComponent>(0).position - restart).norm() < 25.0);

    app.run_steps(49);
    assert!(app.component::<FlightController>(0).frozen);
    app.run_frame();
    assert!(!app.component::<FlightController>(0).frozen);
    assert!(!app.component::<CrashRecovery>(0).is_active());

    app.run_steps(5);
    assert!(app.component::<SpatialComponent>(0).velocity.norm() > 0.0);

    let crash_resets: Vec<u64> = app
        .recorded::<AircraftReset>()
        .into_iter()
        .filter(|(_, reset)| reset.reason == ResetReason::Crash)
        .map(|(tick, reset)| {
            assert_eq!(reset.handle, 0);
            tick
        })
        .collect();
    assert_eq!(crash_resets, vec![111]);
}

#[test]
fn test_pause_suspends_recovery() {
    let mut app = race_with_obstacle();
    app.run_steps(10);
    crash(&mut app, 0);
    app.run_steps(50);

    app.send(RaceCommand::Pause);
    app.run_steps(200);
    assert_eq!(app.state(), RaceState::Paused);

    app.send(RaceCommand::Resume);
    app.run_frame();
    assert_eq!(app.state(), RaceState::Playing);
    // still wrecked: resuming does not thaw a crashed aircraft
    assert!(app.component::<FlightController>(0).frozen);
    assert!(!app.component::<FlightController>(1).frozen);

    app.run_steps(48);
    assert_eq!(
        app.component::<CrashRecovery>(0).stage(),
        Some(RecoveryStage::Exploding)
    );
    app.run_frame();
    assert_eq!(
        app.component::<CrashRecovery>(0).stage(),
        Some(RecoveryStage::Repositioned)
    );
}

#[test]
fn test_checkpoint_time_runs_during_recovery() {
    let mut app = race_with_obstacle();
    app.run_steps(10);
    crash(&mut app, 0);
    assert_eq!(app.status(0).time_remaining, Duration::from_millis(14_780));

    app.run_steps(50);
    assert_eq!(
        app.component::<CrashRecovery>(0).stage(),
        Some(RecoveryStage::Exploding)
    );
    assert_eq!(app.status(0).time_remaining, Duration::from_millis(13_780));
    assert_eq!(app.status(0).time_remaining, app.status(1).time_remaining);
}

#[test]
fn test_timeout_cuts_recovery_short() {
    let mut app = TestAppBuilder::new()
        .configure(|config| {
            config.obstacles.push(sky_obstacle());
            config.race.checkpoint_bonus_time = 1.0;
        })
        .with_track(square_track())
        .with_aircraft("alpha", hold_course())
        .build();
    app.run_steps(10);
    crash(&mut app, 0);
    assert!(app.component::<CrashRecovery>(0).is_active());

    app.run_steps(38);
    assert!(app.component::<FlightController>(0).frozen);
    app.run_frame();
    assert_eq!(app.ticks(), 50);
    assert_eq!(app.status(0).timeouts, 1);
    assert!(!app.component::<CrashRecovery>(0).is_active());
    assert!(!app.component::<FlightController>(0).frozen);
    assert_eq!(app.component::<AircraftVisuals>(0), AircraftVisuals::default());
    let restart = app.track().checkpoint(3).position;
    assert!((app.component::<SpatialComponent>(0).position - restart).norm() < 10.0);

    // the cancelled sequence never repositions again
    app.run_steps(120);
    let reasons: Vec<ResetReason> = app
        .recorded::<AircraftReset>()
        .into_iter()
        .map(|(_, reset)| reset.reason)
        .collect();
    assert!(!reasons.contains(&ResetReason::Crash));
    assert_eq!(
        reasons[..2].to_vec(),
        vec![ResetReason::Start, ResetReason::Timeout]
    );
}
