use serde::{Deserialize, Serialize};

/// A waypoint of the race path as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaypointConfig {
    /// World position [m], +Y up.
    pub position: [f64; 3],
    /// Pitch, yaw, roll in degrees. Derived from the path when omitted.
    #[serde(default)]
    pub rotation: Option<[f64; 3]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    pub waypoints: Vec<WaypointConfig>,
}

impl Default for TrackConfig {
    /// An eight-gate oval flown clockwise seen from above.
    fn default() -> Self {
        let waypoints = (0..8)
            .map(|i| {
                let theta = i as f64 * std::f64::consts::TAU / 8.0;
                WaypointConfig {
                    position: [
                        600.0 * theta.sin(),
                        120.0 + 30.0 * (2.0 * theta).sin(),
                        -400.0 * theta.cos(),
                    ],
                    rotation: None,
                }
            })
            .collect();
        Self { waypoints }
    }
}

/// A spherical obstacle placed in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleConfig {
    pub center: [f64; 3],
    pub radius: f64,
}
