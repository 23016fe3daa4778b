pub mod clock;
pub mod config;
mod countdown;
mod input;
pub mod race;
pub mod track;

pub use clock::{duration_from_secs, SimClock};
pub use config::{
    CountdownConfig, CountdownStep, FlightConfig, GameDifficulty, ObstacleConfig, PhysicsConfig,
    ProbeFan, RaceConfig, RaceRules, SensorConfig, SimulationConfig, TrackConfig, TrainingConfig,
    WaypointConfig,
};
pub use countdown::{Countdown, CountdownProgress};
pub use input::PlayerInput;
pub use race::{
    place_label, rank, ProgressUpdate, RaceClock, RaceCoordinator, RaceState, RaceStatus,
    RankEntry, Standing,
};
pub use track::{Checkpoint, CheckpointKind, CheckpointTrack, Waypoint};
