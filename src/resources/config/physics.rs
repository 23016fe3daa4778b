use serde::{Deserialize, Serialize};

/// Rigid-body parameters for the thrust integrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Aircraft mass [kg].
    pub mass: f64,
    /// Linear damping coefficient [1/s].
    pub drag: f64,
    /// Speed limit applied after integration [m/s].
    pub max_velocity: f64,
    /// Radius of the aircraft's collision sphere [m].
    pub collision_radius: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            mass: 1000.0,
            drag: 2.0,
            max_velocity: 300.0,
            collision_radius: 4.0,
        }
    }
}
