use bevy::prelude::*;

use crate::components::{EpisodeEnd, ProgressEvent};
use crate::resources::RaceState;

/// Published on every race state transition.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceStateChanged {
    pub from: RaceState,
    pub to: RaceState,
}

/// Requests from outside the simulation.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceCommand {
    Pause,
    Resume,
    /// Pause while playing, resume while paused
    TogglePause,
    /// Back to `Preparing`; the race is set up again on the next tick
    Restart,
}

/// Text the countdown display should show now. Empty clears it.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct CountdownText {
    pub text: String,
}

/// An aircraft entered the trigger of a checkpoint, or came within the
/// detection radius of its next one.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointEntered {
    pub entity: Entity,
    pub handle: usize,
    pub checkpoint: usize,
}

/// An aircraft passed the checkpoint it was flying toward.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckpointReached {
    pub entity: Entity,
    pub handle: usize,
    pub progress: ProgressEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// Placed on the grid when the race was set up
    Start,
    /// Ran out of time before the next checkpoint
    Timeout,
    /// Put back on the track after a crash
    Crash,
    /// New training episode
    Episode,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AircraftReset {
    pub entity: Entity,
    pub handle: usize,
    pub reason: ResetReason,
}

/// Reward earned by a training aircraft during one tick.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct RewardSignal {
    pub entity: Entity,
    pub handle: usize,
    pub reward: f64,
    pub done: bool,
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct EpisodeEnded {
    pub entity: Entity,
    pub handle: usize,
    pub episode: u32,
    pub steps: u32,
    pub reason: EpisodeEnd,
    pub cumulative_reward: f64,
}
