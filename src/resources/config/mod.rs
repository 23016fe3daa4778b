pub mod countdown;
pub mod flight;
pub mod physics;
pub mod race;
pub mod sensors;
pub mod simulation;
pub mod track;
pub mod training;

pub use countdown::{CountdownConfig, CountdownStep};
pub use flight::FlightConfig;
pub use physics::PhysicsConfig;
pub use race::{GameDifficulty, RaceRules};
pub use sensors::{ProbeFan, SensorConfig};
pub use simulation::SimulationConfig;
pub use track::{ObstacleConfig, TrackConfig, WaypointConfig};
pub use training::TrainingConfig;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::{RaceError, Result, KINEMATIC_OBS_SIZE, OBSERVATION_SIZE, PROBE_WIDTH};

/// Every tunable of a race or training session.
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    pub simulation: SimulationConfig,
    pub flight: FlightConfig,
    pub physics: PhysicsConfig,
    pub race: RaceRules,
    pub training: TrainingConfig,
    pub sensors: SensorConfig,
    pub countdown: CountdownConfig,
    pub track: TrackConfig,
    pub obstacles: Vec<ObstacleConfig>,
}

impl RaceConfig {
    pub fn load(path: &str) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: Self = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &str) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_yaml::to_writer(file, self)?;
        Ok(())
    }

    /// Same configuration with training mode switched on.
    pub fn for_training(mut self) -> Self {
        self.training.enabled = true;
        self
    }

    pub fn is_training(&self) -> bool {
        self.training.enabled
    }

    pub fn validate(&self) -> Result<()> {
        fn check(condition: bool, message: &str) -> Result<()> {
            if condition {
                Ok(())
            } else {
                Err(RaceError::InvalidConfig(message.to_string()))
            }
        }

        check(
            self.simulation.tick_seconds > 0.0,
            "tick_seconds must be positive",
        )?;
        check(self.race.num_laps >= 1, "num_laps must be at least 1")?;
        check(
            self.race.checkpoint_bonus_time > 0.0,
            "checkpoint_bonus_time must be positive",
        )?;
        check(
            self.race.place_update_interval >= 0.0,
            "place_update_interval must not be negative",
        )?;
        check(
            self.race.checkpoint_trigger_radius > 0.0,
            "checkpoint_trigger_radius must be positive",
        )?;
        check(
            self.race.spawn_spread[0] <= self.race.spawn_spread[1],
            "spawn_spread must be an ordered range",
        )?;
        check(
            self.race.recovery_explosion_delay >= 0.0 && self.race.recovery_thaw_delay >= 0.0,
            "recovery delays must not be negative",
        )?;
        check(
            self.flight.max_pitch_angle > 0.0 && self.flight.max_pitch_angle < 180.0,
            "max_pitch_angle must lie in (0, 180)",
        )?;
        check(
            self.flight.max_roll_angle > 0.0 && self.flight.max_roll_angle < 180.0,
            "max_roll_angle must lie in (0, 180)",
        )?;
        check(
            self.flight.smoothing_rate > 0.0,
            "smoothing_rate must be positive",
        )?;
        check(self.physics.mass > 0.0, "mass must be positive")?;
        check(self.physics.drag >= 0.0, "drag must not be negative")?;
        check(
            self.training.checkpoint_radius > 0.0,
            "training checkpoint_radius must be positive",
        )?;
        check(self.sensors.ray_range > 0.0, "ray_range must be positive")?;
        check(
            KINEMATIC_OBS_SIZE + self.sensors.probe_count() * PROBE_WIDTH == OBSERVATION_SIZE,
            "sensor fans must produce exactly 13 probes",
        )?;
        check(
            self.countdown.steps.iter().all(|step| step.seconds >= 0.0),
            "countdown steps must not be negative",
        )?;
        Ok(())
    }
}
