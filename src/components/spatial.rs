use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::utils::{attitude_from_euler, euler_from_attitude, forward_axis, normalize_angle, signed_angle};

/// Component for storing spatial state of an entity
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialComponent {
    /// Position in world space [m]
    pub position: Vector3<f64>,

    /// Linear velocity in world space [m/s]
    pub velocity: Vector3<f64>,

    /// Attitude quaternion (rotation from body to world frame)
    pub attitude: UnitQuaternion<f64>,

    /// Angular velocity in body frame [rad/s]
    pub angular_velocity: Vector3<f64>,
}

impl Default for SpatialComponent {
    fn default() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            angular_velocity: Vector3::zeros(),
        }
    }
}

impl SpatialComponent {
    /// Create a new spatial component at a specific position
    pub fn at_position(position: Vector3<f64>) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Stop all linear and angular motion.
    pub fn halt(&mut self) {
        self.velocity = Vector3::zeros();
        self.angular_velocity = Vector3::zeros();
    }

    /// Forward direction in world space.
    pub fn forward(&self) -> Vector3<f64> {
        self.attitude * forward_axis()
    }

    /// Express a world-space direction in the body frame.
    pub fn to_local(&self, direction: &Vector3<f64>) -> Vector3<f64> {
        self.attitude.inverse() * direction
    }

    /// Express a body-frame direction in world space.
    pub fn to_world(&self, direction: &Vector3<f64>) -> Vector3<f64> {
        self.attitude * direction
    }
}

/// Pitch, yaw and roll in degrees, each stored in `[0, 360)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EulerAngles {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

impl EulerAngles {
    pub fn new(pitch: f64, yaw: f64, roll: f64) -> Self {
        Self {
            pitch: normalize_angle(pitch),
            yaw: normalize_angle(yaw),
            roll: normalize_angle(roll),
        }
    }

    pub fn from_attitude(attitude: &UnitQuaternion<f64>) -> Self {
        let (pitch, yaw, roll) = euler_from_attitude(attitude);
        Self::new(pitch, yaw, roll)
    }

    pub fn to_attitude(&self) -> UnitQuaternion<f64> {
        attitude_from_euler(self.pitch, self.yaw, self.roll)
    }

    /// Angles as signed values in `(-180, 180]`: (pitch, yaw, roll).
    pub fn signed(&self) -> Vector3<f64> {
        Vector3::new(
            signed_angle(self.pitch),
            signed_angle(self.yaw),
            signed_angle(self.roll),
        )
    }
}

/// Snapshot of an aircraft after a flight step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vector3<f64>,
    pub orientation: EulerAngles,
    pub velocity: Vector3<f64>,
}

impl Pose {
    /// Orientation as signed degrees (pitch, yaw, roll).
    pub fn signed_orientation(&self) -> Vector3<f64> {
        self.orientation.signed()
    }
}
