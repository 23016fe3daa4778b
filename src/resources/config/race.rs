use serde::{Deserialize, Serialize};

/// Policy strength picked in the menu; only consumed by whoever supplies the
/// decision makers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameDifficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

/// Rules of an interactive race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceRules {
    pub num_laps: u32,
    /// Seconds granted on every checkpoint before a forced reset.
    pub checkpoint_bonus_time: f64,
    /// Minimum seconds between two ranking passes.
    pub place_update_interval: f64,
    /// Radius of the trigger volume around each checkpoint [m].
    pub checkpoint_trigger_radius: f64,
    /// Also advance when within `checkpoint_trigger_radius` of the next
    /// checkpoint, without requiring a fresh trigger entry.
    pub distance_detection: bool,
    /// Seconds between a crash and the reposition.
    pub recovery_explosion_delay: f64,
    /// Seconds between the reposition and control being handed back.
    pub recovery_thaw_delay: f64,
    /// Lateral spacing range between aircraft on a reset [m].
    pub spawn_spread: [f64; 2],
    pub difficulty: GameDifficulty,
}

impl Default for RaceRules {
    fn default() -> Self {
        Self {
            num_laps: 2,
            checkpoint_bonus_time: 15.0,
            place_update_interval: 0.5,
            checkpoint_trigger_radius: 40.0,
            distance_detection: false,
            recovery_explosion_delay: 2.0,
            recovery_thaw_delay: 1.0,
            spawn_spread: [9.0, 10.0],
            difficulty: GameDifficulty::Normal,
        }
    }
}
