use bevy::prelude::*;
use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::resources::config::TrackConfig;
use crate::utils::{attitude_from_euler, forward_axis, rad_to_deg, right_axis, RaceError, Result};

/// A point of the race path with the attitude an aircraft should have there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
}

impl Waypoint {
    pub fn new(position: Vector3<f64>, orientation: UnitQuaternion<f64>) -> Self {
        Self {
            position,
            orientation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckpointKind {
    Gate,
    /// Start/finish line; always the last checkpoint of the lap.
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub index: usize,
    pub position: Vector3<f64>,
    pub orientation: UnitQuaternion<f64>,
    pub kind: CheckpointKind,
}

impl Checkpoint {
    /// Direction an aircraft should fly through the gate.
    pub fn forward(&self) -> Vector3<f64> {
        self.orientation * forward_axis()
    }
}

/// Closed race path with one checkpoint per path unit.
///
/// Path offsets are measured in path units: unit `i` is waypoint `i` and
/// offsets wrap modulo the waypoint count. Positions between waypoints follow
/// a uniform Catmull-Rom spline, orientations are slerped.
#[derive(Resource, Debug, Clone)]
pub struct CheckpointTrack {
    waypoints: Vec<Waypoint>,
    checkpoints: Vec<Checkpoint>,
}

impl CheckpointTrack {
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self> {
        if waypoints.is_empty() {
            return Err(RaceError::EmptyTrack);
        }

        let count = waypoints.len();
        let checkpoints = waypoints
            .iter()
            .enumerate()
            .map(|(index, waypoint)| Checkpoint {
                index,
                position: waypoint.position,
                orientation: waypoint.orientation,
                kind: if index == count - 1 {
                    CheckpointKind::Finish
                } else {
                    CheckpointKind::Gate
                },
            })
            .collect();

        Ok(Self {
            waypoints,
            checkpoints,
        })
    }

    /// Build a track from positions only, facing each waypoint along the path.
    pub fn from_positions(positions: &[Vector3<f64>]) -> Result<Self> {
        let waypoints = positions
            .iter()
            .enumerate()
            .map(|(i, position)| Waypoint::new(*position, tangent_orientation(positions, i)))
            .collect();
        Self::new(waypoints)
    }

    pub fn from_config(config: &TrackConfig) -> Result<Self> {
        let positions: Vec<Vector3<f64>> = config
            .waypoints
            .iter()
            .map(|w| Vector3::new(w.position[0], w.position[1], w.position[2]))
            .collect();

        let waypoints = config
            .waypoints
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let orientation = match w.rotation {
                    Some([pitch, yaw, roll]) => attitude_from_euler(pitch, yaw, roll),
                    None => tangent_orientation(&positions, i),
                };
                Waypoint::new(positions[i], orientation)
            })
            .collect();
        Self::new(waypoints)
    }

    /// Number of checkpoints (and path units).
    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Checkpoint by index, wrapping past the end of the lap.
    pub fn checkpoint(&self, index: usize) -> &Checkpoint {
        &self.checkpoints[index % self.checkpoints.len()]
    }

    pub fn finish_index(&self) -> usize {
        self.checkpoints.len() - 1
    }

    /// The checkpoint completed just before `index`.
    pub fn previous_index(&self, index: usize) -> usize {
        let n = self.len();
        (index % n + n - 1) % n
    }

    /// Wrap a path offset into `[0, len)`.
    pub fn wrap_unit(&self, unit: f64) -> f64 {
        unit.rem_euclid(self.len() as f64)
    }

    /// Position on the path at a path-unit offset.
    pub fn position_at(&self, unit: f64) -> Vector3<f64> {
        let (segment, t) = self.segment(unit);
        let n = self.len();
        let p0 = self.waypoints[(segment + n - 1) % n].position;
        let p1 = self.waypoints[segment].position;
        let p2 = self.waypoints[(segment + 1) % n].position;
        let p3 = self.waypoints[(segment + 2) % n].position;
        catmull_rom(&p0, &p1, &p2, &p3, t)
    }

    /// Orientation on the path at a path-unit offset.
    pub fn orientation_at(&self, unit: f64) -> UnitQuaternion<f64> {
        let (segment, t) = self.segment(unit);
        let from = self.waypoints[segment].orientation;
        let to = self.waypoints[(segment + 1) % self.len()].orientation;
        from.try_slerp(&to, t, 1.0e-9).unwrap_or(from)
    }

    /// Pose for an aircraft restarting from the checkpoint before `next`,
    /// shifted sideways by `lateral_offset` metres.
    pub fn reset_pose(
        &self,
        next_checkpoint: usize,
        lateral_offset: f64,
    ) -> (Vector3<f64>, UnitQuaternion<f64>) {
        let unit = self.previous_index(next_checkpoint) as f64;
        let base = self.position_at(unit);
        let orientation = self.orientation_at(unit);
        let offset = orientation * (right_axis() * lateral_offset);
        (base + offset, orientation)
    }

    fn segment(&self, unit: f64) -> (usize, f64) {
        let wrapped = self.wrap_unit(unit);
        let segment = (wrapped.floor() as usize).min(self.len() - 1);
        (segment, wrapped - segment as f64)
    }
}

fn catmull_rom(
    p0: &Vector3<f64>,
    p1: &Vector3<f64>,
    p2: &Vector3<f64>,
    p3: &Vector3<f64>,
    t: f64,
) -> Vector3<f64> {
    let t2 = t * t;
    let t3 = t2 * t;
    (p1 * 2.0 + (p2 - p0) * t + (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * t2
        + (p1 * 3.0 - p0 - p2 * 3.0 + p3) * t3)
        * 0.5
}

/// Attitude looking along the closed path through waypoint `i`, wings level.
fn tangent_orientation(positions: &[Vector3<f64>], i: usize) -> UnitQuaternion<f64> {
    let n = positions.len();
    let mut tangent = positions[(i + 1) % n] - positions[(i + n - 1) % n];
    if tangent.norm() < 1e-9 {
        tangent = positions[(i + 1) % n] - positions[i];
    }
    if tangent.norm() < 1e-9 {
        return UnitQuaternion::identity();
    }

    let direction = tangent.normalize();
    let pitch = rad_to_deg(direction.y.clamp(-1.0, 1.0).asin());
    let yaw = rad_to_deg(direction.x.atan2(-direction.z));
    attitude_from_euler(pitch, yaw, 0.0)
}
