use serde::{Deserialize, Serialize};

/// Control response of every aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightConfig {
    /// Forward thrust force [N].
    pub thrust: f64,
    /// Pitch rate per unit of smoothed command [deg/s].
    pub pitch_speed: f64,
    /// Yaw rate per unit of smoothed command [deg/s].
    pub yaw_speed: f64,
    /// Roll rate per unit of smoothed command [deg/s].
    pub roll_speed: f64,
    /// Thrust multiplier while boosting.
    pub boost_multiplier: f64,
    /// Pitch limit either side of level [deg].
    pub max_pitch_angle: f64,
    /// Roll limit either side of level [deg].
    pub max_roll_angle: f64,
    /// Maximum change of a smoothed command per second.
    pub smoothing_rate: f64,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            thrust: 100_000.0,
            pitch_speed: 100.0,
            yaw_speed: 100.0,
            roll_speed: 100.0,
            boost_multiplier: 2.0,
            max_pitch_angle: 45.0,
            max_roll_angle: 45.0,
            smoothing_rate: 2.0,
        }
    }
}
