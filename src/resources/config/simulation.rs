use serde::{Deserialize, Serialize};

/// Tick and seeding parameters shared by every system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Length of one simulation tick in seconds.
    pub tick_seconds: f64,
    /// Master seed for spawn spread and training resets.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_seconds: 0.02,
            seed: 42,
        }
    }
}
