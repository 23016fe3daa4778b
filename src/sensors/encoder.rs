use nalgebra::Vector3;

use crate::components::Pose;
use crate::resources::{CheckpointTrack, ProbeFan, SensorConfig};
use crate::sensors::{sphere_cast, Observation, ProbeTarget};
use crate::utils::{deg_to_rad, KINEMATIC_OBS_SIZE, PROBE_CLASSES, PROBE_WIDTH};

/// Build the observation of an aircraft at `pose` flying toward checkpoint
/// `next_checkpoint`.
pub fn encode(
    pose: &Pose,
    track: &CheckpointTrack,
    next_checkpoint: usize,
    targets: &[ProbeTarget],
    config: &SensorConfig,
) -> Observation {
    let attitude = pose.orientation.to_attitude();
    let to_local = attitude.inverse();
    let checkpoint = track.checkpoint(next_checkpoint);

    let mut values = Vec::with_capacity(KINEMATIC_OBS_SIZE + config.probe_count() * PROBE_WIDTH);
    push_vector(&mut values, &(to_local * pose.velocity));
    push_vector(&mut values, &(to_local * (checkpoint.position - pose.position)));
    push_vector(&mut values, &(to_local * checkpoint.forward()));

    for fan in &config.fans {
        for &angle in &fan.angles {
            let (start, end) = probe_segment(fan, angle, config.ray_range);
            let origin = pose.position + attitude * start;
            let span = attitude * (end - start);
            let length = span.norm();
            let reading = if length > 0.0 {
                sphere_cast(&origin, &(span / length), length, config.probe_radius, targets)
                    .map(|hit| (hit.class, hit.distance / length))
            } else {
                None
            };

            let mut probe = [0.0_f32; PROBE_WIDTH];
            match reading {
                Some((class, fraction)) => {
                    probe[class as usize] = 1.0;
                    probe[PROBE_CLASSES] = 1.0;
                    probe[PROBE_CLASSES + 1] = fraction as f32;
                }
                None => probe[PROBE_CLASSES + 1] = 1.0,
            }
            values.extend_from_slice(&probe);
        }
    }

    Observation::new(values)
}

/// Start and end of a probe in the body frame. 90 degrees points straight
/// ahead; smaller angles sweep to the right.
fn probe_segment(fan: &ProbeFan, angle: f64, range: f64) -> (Vector3<f64>, Vector3<f64>) {
    let angle = deg_to_rad(angle);
    let start = Vector3::new(0.0, fan.start_offset, 0.0);
    let end = Vector3::new(range * angle.cos(), fan.end_offset, -range * angle.sin());
    (start, end)
}

fn push_vector(values: &mut Vec<f32>, vector: &Vector3<f64>) {
    values.extend(vector.iter().map(|&v| v as f32));
}
