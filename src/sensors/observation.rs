use bevy::prelude::*;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::utils::{KINEMATIC_OBS_SIZE, PROBE_CLASSES, PROBE_WIDTH};

/// Fixed-length input of a decision maker.
///
/// Layout: local velocity (3), local offset to the next checkpoint (3), the
/// next checkpoint's forward axis in the local frame (3), then four values
/// per probe: obstacle tag, checkpoint tag, hit flag, normalised distance.
#[derive(Component, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub values: Vec<f32>,
}

impl Observation {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn local_velocity(&self) -> Vector3<f32> {
        self.vector_at(0)
    }

    pub fn to_checkpoint(&self) -> Vector3<f32> {
        self.vector_at(3)
    }

    pub fn checkpoint_forward(&self) -> Vector3<f32> {
        self.vector_at(6)
    }

    pub fn probe_count(&self) -> usize {
        self.values.len().saturating_sub(KINEMATIC_OBS_SIZE) / PROBE_WIDTH
    }

    /// The four values of probe `index`, in fan order.
    pub fn probe(&self, index: usize) -> Option<ProbeReading> {
        let start = KINEMATIC_OBS_SIZE + index * PROBE_WIDTH;
        let values = self.values.get(start..start + PROBE_WIDTH)?;
        Some(ProbeReading {
            tags: [values[0], values[1]],
            hit: values[PROBE_CLASSES] > 0.5,
            distance: values[PROBE_CLASSES + 1],
        })
    }

    fn vector_at(&self, start: usize) -> Vector3<f32> {
        match self.values.get(start..start + 3) {
            Some(v) => Vector3::new(v[0], v[1], v[2]),
            None => Vector3::zeros(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeReading {
    pub tags: [f32; PROBE_CLASSES],
    pub hit: bool,
    /// Fraction of the probe length, 1.0 when nothing was hit
    pub distance: f32,
}
