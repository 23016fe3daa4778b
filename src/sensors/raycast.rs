use nalgebra::Vector3;

use crate::components::Obstacle;
use crate::resources::CheckpointTrack;

/// Object classes a probe can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeClass {
    Obstacle = 0,
    Checkpoint = 1,
}

/// A sphere visible to ray probes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeTarget {
    pub center: Vector3<f64>,
    pub radius: f64,
    pub class: ProbeClass,
}

impl ProbeTarget {
    /// Every obstacle plus every checkpoint trigger of the track.
    pub fn collect<'a>(
        obstacles: impl IntoIterator<Item = &'a Obstacle>,
        track: &CheckpointTrack,
        checkpoint_radius: f64,
    ) -> Vec<ProbeTarget> {
        let mut targets: Vec<ProbeTarget> = obstacles
            .into_iter()
            .map(|obstacle| ProbeTarget {
                center: obstacle.center,
                radius: obstacle.radius,
                class: ProbeClass::Obstacle,
            })
            .collect();
        targets.extend(track.checkpoints().iter().map(|checkpoint| ProbeTarget {
            center: checkpoint.position,
            radius: checkpoint_radius,
            class: ProbeClass::Checkpoint,
        }));
        targets
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    pub class: ProbeClass,
    /// Distance along the probe [m]
    pub distance: f64,
}

/// Sweep a sphere of `probe_radius` from `origin` along the unit vector
/// `direction` for `length` metres and return the nearest target it touches.
pub fn sphere_cast(
    origin: &Vector3<f64>,
    direction: &Vector3<f64>,
    length: f64,
    probe_radius: f64,
    targets: &[ProbeTarget],
) -> Option<ProbeHit> {
    targets
        .iter()
        .filter_map(|target| {
            let distance = ray_sphere(origin, direction, &target.center, target.radius + probe_radius)?;
            (distance <= length).then_some(ProbeHit {
                class: target.class,
                distance,
            })
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Entry distance of a ray into a sphere; 0 when starting inside.
fn ray_sphere(
    origin: &Vector3<f64>,
    direction: &Vector3<f64>,
    center: &Vector3<f64>,
    radius: f64,
) -> Option<f64> {
    let offset = origin - center;
    let c = offset.norm_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }

    let b = offset.dot(direction);
    if b > 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    Some(-b - discriminant.sqrt())
}
