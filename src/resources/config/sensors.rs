use serde::{Deserialize, Serialize};

/// A horizontal fan of ray probes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeFan {
    /// Probe angles in degrees; 90 points straight ahead, lower values
    /// sweep to the right.
    pub angles: Vec<f64>,
    /// Height of the ray origin above the aircraft [m].
    #[serde(default)]
    pub start_offset: f64,
    /// Height of the ray end point above the aircraft at full range [m].
    pub end_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Maximum probe range [m].
    pub ray_range: f64,
    /// Radius of the swept probe sphere [m].
    pub probe_radius: f64,
    pub fans: Vec<ProbeFan>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            ray_range: 250.0,
            probe_radius: 0.5,
            fans: vec![
                ProbeFan {
                    angles: vec![60.0, 90.0, 120.0],
                    start_offset: 0.0,
                    end_offset: 75.0,
                },
                ProbeFan {
                    angles: vec![60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0],
                    start_offset: 0.0,
                    end_offset: 0.0,
                },
                ProbeFan {
                    angles: vec![60.0, 90.0, 120.0],
                    start_offset: 0.0,
                    end_offset: -75.0,
                },
            ],
        }
    }
}

impl SensorConfig {
    pub fn probe_count(&self) -> usize {
        self.fans.iter().map(|fan| fan.angles.len()).sum()
    }
}
