use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::resources::ObstacleConfig;

/// Raised when an aircraft touches a static obstacle.
#[derive(Event, Debug, Clone, Copy)]
pub struct ObstacleCollision {
    /// Aircraft that collided
    pub entity: Entity,
    pub handle: usize,
    /// Point of impact in space
    pub impact_point: Vector3<f64>,
    /// Penetration depth
    pub penetration_depth: f64,
}

#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CollisionComponent {
    /// Radius of the aircraft's collision sphere
    pub radius: f64,
    /// Whether the aircraft was touching an obstacle on the last check
    #[serde(skip)]
    pub has_collided: bool,
    /// Collisions since the last reset
    #[serde(skip)]
    pub collision_count: u32,
    /// Simulation time of the last collision
    #[serde(skip)]
    pub last_collision_time: f64,
}

impl CollisionComponent {
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            has_collided: false,
            collision_count: 0,
            last_collision_time: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.has_collided = false;
        self.collision_count = 0;
        self.last_collision_time = 0.0;
    }

    /// Record contact state; returns `true` only when a new contact starts.
    pub fn register_contact(&mut self, touching: bool, time: f64) -> bool {
        let started = touching && !self.has_collided;
        if started {
            self.collision_count += 1;
            self.last_collision_time = time;
        }
        self.has_collided = touching;
        started
    }
}

/// A static spherical obstacle.
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub center: Vector3<f64>,
    pub radius: f64,
}

impl Obstacle {
    pub fn from_config(config: &ObstacleConfig) -> Self {
        Self {
            center: Vector3::from(config.center),
            radius: config.radius,
        }
    }

    /// Overlap depth with a sphere, if they intersect.
    pub fn penetration(&self, position: &Vector3<f64>, radius: f64) -> Option<f64> {
        let depth = self.radius + radius - (position - self.center).norm();
        (depth > 0.0).then_some(depth)
    }
}
