use std::time::Duration;

use pretty_assertions::assert_eq;
use skyrace::{
    components::{CheckpointTracker, SpatialComponent},
    plugins::{AircraftReset, ResetReason},
};

use crate::common::{hold_course, open_sky, square_track, TestApp, TestAppBuilder};

fn stalled_race() -> TestApp {
    TestAppBuilder::new()
        .configure(|config| config.flight.thrust = 0.0)
        .with_track(square_track())
        .with_aircraft("alpha", hold_course())
        .build()
}

#[test]
fn test_timeout_resets_at_tick_750() {
    let mut app = stalled_race();
    app.run_steps(100);
    app.teleport(0, open_sky());

    app.run_steps(649);
    assert_eq!(app.ticks(), 749);
    assert_eq!(app.status(0).timeouts, 0);
    assert_eq!(app.status(0).time_remaining, Duration::from_millis(20));
    assert_eq!(app.component::<SpatialComponent>(0).position, open_sky());

    app.run_frame();
    let status = app.status(0);
    assert_eq!(status.timeouts, 1);
    assert_eq!(status.time_remaining, Duration::from_secs(15));
    let restart = app.track().checkpoint(3).position;
    let position = app.component::<SpatialComponent>(0).position;
    assert!((position - restart).norm() < 10.0);
    assert_eq!(app.component::<CheckpointTracker>(0).next_checkpoint(), 0);

    let resets: Vec<(u64, ResetReason)> = app
        .recorded::<AircraftReset>()
        .into_iter()
        .map(|(tick, reset)| (tick, reset.reason))
        .collect();
    assert_eq!(
        resets,
        vec![(1, ResetReason::Start), (750, ResetReason::Timeout)]
    );

    app.run_frame();
    assert_eq!(app.status(0).timeouts, 1);
}

#[test]
fn test_checkpoint_restores_bonus_time() {
    let mut app = stalled_race();
    app.run_steps(300);
    assert_eq!(app.status(0).time_remaining, Duration::from_secs(9));

    app.fly_through(0, 0);
    assert_eq!(app.status(0).time_remaining, Duration::from_millis(14_980));

    // the reset goes back to the checkpoint just passed
    app.teleport(0, open_sky());
    app.run_steps(749);
    assert_eq!(app.status(0).timeouts, 1);
    let restart = app.track().checkpoint(0).position;
    let position = app.component::<SpatialComponent>(0).position;
    assert!((position - restart).norm() < 10.0);
    assert_eq!(app.component::<CheckpointTracker>(0).next_checkpoint(), 1);
}
