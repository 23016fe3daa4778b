pub mod aircraft;
pub mod checkpoint;
pub mod collision;
pub mod control;
pub mod flight;
pub mod physics;
pub mod recovery;
pub mod spatial;
pub mod training;

pub use aircraft::{AircraftHandle, PendingReset};
pub use checkpoint::{CheckpointTracker, ProgressEvent, TriggerContact};
pub use collision::{CollisionComponent, Obstacle, ObstacleCollision};
pub use control::{AircraftControl, CommandSource, ControlCommand, DiscreteAction};
pub use flight::{FlightController, SmoothingState, TrailEffect};
pub use physics::PhysicsComponent;
pub use recovery::{AircraftVisuals, CrashRecovery, RecoveryAction, RecoveryStage, RecoverySequence};
pub use spatial::{EulerAngles, Pose, SpatialComponent};
pub use training::{EpisodeEnd, TrainingEpisode};
