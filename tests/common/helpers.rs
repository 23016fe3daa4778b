use nalgebra::Vector3;
use skyrace::{
    agents::HoldCourse,
    components::CommandSource,
    resources::{CheckpointTrack, ObstacleConfig},
};

/// Four checkpoints on a 500 m square at 100 m altitude.
pub fn square_track() -> CheckpointTrack {
    CheckpointTrack::from_positions(&[
        Vector3::new(0.0, 100.0, -500.0),
        Vector3::new(500.0, 100.0, -500.0),
        Vector3::new(500.0, 100.0, 0.0),
        Vector3::new(0.0, 100.0, 0.0),
    ])
    .expect("square track is valid")
}

pub fn hold_course() -> CommandSource {
    CommandSource::Policy(Box::new(HoldCourse))
}

/// A point well away from every checkpoint of [`square_track`].
pub fn open_sky() -> Vector3<f64> {
    Vector3::new(-2000.0, 800.0, 2000.0)
}

/// Obstacle parked in [`open_sky`].
pub fn sky_obstacle() -> ObstacleConfig {
    let center = open_sky();
    ObstacleConfig {
        center: [center.x, center.y, center.z],
        radius: 20.0,
    }
}
