use serde::{Deserialize, Serialize};

/// Episode and reward shaping parameters used when a policy is being trained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub enabled: bool,
    /// Episode length cap in ticks; 0 means unlimited.
    pub max_steps: u32,
    /// Ticks allowed between two checkpoints.
    pub step_timeout: u32,
    /// Distance at which the next checkpoint counts as reached [m].
    pub checkpoint_radius: f64,
    pub checkpoint_reward: f64,
    pub timeout_penalty: f64,
    pub collision_penalty: f64,
    /// Start a new episode on the tick after one ends.
    pub auto_reset: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            max_steps: 5000,
            step_timeout: 300,
            checkpoint_radius: 50.0,
            checkpoint_reward: 0.5,
            timeout_penalty: 0.5,
            collision_penalty: 1.0,
            auto_reset: true,
        }
    }
}
