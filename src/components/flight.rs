use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::components::{ControlCommand, EulerAngles, PhysicsComponent, Pose, SpatialComponent};
use crate::resources::FlightConfig;
use crate::utils::{clamp_angle, move_toward};

/// Rate-limited command values, each in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SmoothingState {
    pub pitch: f64,
    pub yaw: f64,
    pub roll: f64,
}

/// Exhaust trail shown while boosting.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct TrailEffect {
    pub emitting: bool,
    pub points: Vec<Vector3<f64>>,
    pub max_points: usize,
}

impl Default for TrailEffect {
    fn default() -> Self {
        Self {
            emitting: false,
            points: Vec::new(),
            max_points: 200,
        }
    }
}

impl TrailEffect {
    /// Follow the boost command. History is dropped only when the trail
    /// switches on.
    pub fn set_emitting(&mut self, emitting: bool) {
        if emitting && !self.emitting {
            self.points.clear();
        }
        self.emitting = emitting;
    }

    pub fn record(&mut self, position: Vector3<f64>) {
        if !self.emitting {
            return;
        }
        if self.points.len() == self.max_points {
            self.points.remove(0);
        }
        self.points.push(position);
    }
}

/// Arcade flight model of one aircraft.
///
/// The controller owns the Euler orientation; the attitude in the
/// [`SpatialComponent`] is rebuilt from it every step.
#[derive(Component, Debug, Clone)]
pub struct FlightController {
    pub config: FlightConfig,
    pub orientation: EulerAngles,
    pub smoothing: SmoothingState,
    pub frozen: bool,
}

impl FlightController {
    pub fn new(config: FlightConfig) -> Self {
        Self {
            config,
            orientation: EulerAngles::default(),
            smoothing: SmoothingState::default(),
            frozen: false,
        }
    }

    /// Rotate by one tick of `command` and return the thrust force in world
    /// space. Frozen aircraft neither turn nor thrust.
    pub fn steer(
        &mut self,
        command: &ControlCommand,
        dt: f64,
        spatial: &mut SpatialComponent,
        trail: &mut TrailEffect,
    ) -> Vector3<f64> {
        trail.set_emitting(command.boost && !self.frozen);
        if self.frozen {
            return Vector3::zeros();
        }

        let config = &self.config;
        let signed_roll = self.orientation.signed().z;
        let roll_target = if command.yaw == 0 {
            -signed_roll / config.max_roll_angle
        } else {
            -f64::from(command.yaw)
        };

        let max_delta = config.smoothing_rate * dt;
        self.smoothing.pitch = move_toward(self.smoothing.pitch, f64::from(command.pitch), max_delta);
        self.smoothing.yaw = move_toward(self.smoothing.yaw, f64::from(command.yaw), max_delta);
        self.smoothing.roll = move_toward(self.smoothing.roll, roll_target, max_delta);

        let pitch = clamp_angle(
            self.orientation.pitch + self.smoothing.pitch * dt * config.pitch_speed,
            -config.max_pitch_angle,
            config.max_pitch_angle,
        );
        let yaw = self.orientation.yaw + self.smoothing.yaw * dt * config.yaw_speed;
        let roll = clamp_angle(
            self.orientation.roll + self.smoothing.roll * dt * config.roll_speed,
            -config.max_roll_angle,
            config.max_roll_angle,
        );

        self.orientation = EulerAngles::new(pitch, yaw, roll);
        spatial.attitude = self.orientation.to_attitude();

        let boost = if command.boost {
            config.boost_multiplier
        } else {
            1.0
        };
        spatial.forward() * config.thrust * boost
    }

    /// One full tick: steer, integrate, report the resulting pose.
    pub fn step(
        &mut self,
        command: &ControlCommand,
        dt: f64,
        spatial: &mut SpatialComponent,
        physics: &mut PhysicsComponent,
        trail: &mut TrailEffect,
    ) -> Pose {
        physics.net_force = self.steer(command, dt, spatial, trail);
        physics.integrate(spatial, dt);
        physics.clear_forces();
        trail.record(spatial.position);
        self.pose(spatial)
    }

    pub fn pose(&self, spatial: &SpatialComponent) -> Pose {
        Pose {
            position: spatial.position,
            orientation: self.orientation,
            velocity: spatial.velocity,
        }
    }

    /// Stop the aircraft and suspend control.
    pub fn freeze(&mut self, spatial: &mut SpatialComponent) {
        self.frozen = true;
        spatial.halt();
    }

    /// Stop the aircraft and hand control back.
    pub fn thaw(&mut self, spatial: &mut SpatialComponent) {
        self.frozen = false;
        spatial.halt();
    }

    /// Adopt the attitude already written to `spatial` and forget smoothed
    /// input.
    pub fn reset(&mut self, spatial: &mut SpatialComponent) {
        self.orientation = EulerAngles::from_attitude(&spatial.attitude);
        spatial.attitude = self.orientation.to_attitude();
        self.smoothing = SmoothingState::default();
        spatial.halt();
    }
}
