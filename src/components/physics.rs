use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::SpatialComponent;
use crate::resources::PhysicsConfig;

/// Rigid-body properties and the force accumulated for the current tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicsComponent {
    /// Mass [kg]
    pub mass: f64,
    /// Linear damping [1/s]
    pub drag: f64,
    /// Speed limit [m/s]
    pub max_velocity: f64,
    /// Net world-space force for this tick [N]
    pub net_force: Vector3<f64>,
}

impl PhysicsComponent {
    pub fn from_config(config: &PhysicsConfig) -> Self {
        Self {
            mass: config.mass,
            drag: config.drag,
            max_velocity: config.max_velocity,
            net_force: Vector3::zeros(),
        }
    }

    pub fn clear_forces(&mut self) {
        self.net_force = Vector3::zeros();
    }

    /// Advance `spatial` by `dt` under the accumulated force.
    ///
    /// Semi-implicit Euler: velocity first, then damping, then position.
    pub fn integrate(&self, spatial: &mut SpatialComponent, dt: f64) {
        let acceleration = self.net_force / self.mass;
        spatial.velocity += acceleration * dt;
        spatial.velocity *= (1.0 - self.drag * dt).max(0.0);
        spatial.angular_velocity *= (1.0 - self.drag * dt).max(0.0);

        apply_velocity_limits(spatial, self.max_velocity);

        spatial.position += spatial.velocity * dt;
    }
}

/// Limit linear velocity magnitude.
fn apply_velocity_limits(spatial: &mut SpatialComponent, max_velocity: f64) {
    let velocity_norm = spatial.velocity.norm();
    if velocity_norm > max_velocity {
        spatial.velocity *= max_velocity / velocity_norm;
    }
}
