use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Result of passing the checkpoint an aircraft was flying toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressEvent {
    /// Checkpoint just passed
    pub passed: usize,
    /// Checkpoint to fly toward now
    pub next: usize,
    pub lap: u32,
    pub lap_completed: bool,
}

/// Per-aircraft progress around the track. Laps count from one.
#[derive(Component, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointTracker {
    next: usize,
    lap: u32,
    num_checkpoints: usize,
}

impl CheckpointTracker {
    pub fn new(num_checkpoints: usize) -> Self {
        Self {
            next: 0,
            lap: 1,
            num_checkpoints: num_checkpoints.max(1),
        }
    }

    pub fn next_checkpoint(&self) -> usize {
        self.next
    }

    pub fn lap(&self) -> u32 {
        self.lap
    }

    pub fn num_checkpoints(&self) -> usize {
        self.num_checkpoints
    }

    /// The checkpoint behind the current target.
    pub fn last_completed(&self) -> usize {
        (self.next + self.num_checkpoints - 1) % self.num_checkpoints
    }

    /// Advance if `index` is the checkpoint being flown toward; any other
    /// checkpoint is ignored.
    pub fn on_enter_trigger(&mut self, index: usize) -> Option<ProgressEvent> {
        if index != self.next {
            return None;
        }

        let passed = self.next;
        self.next = (self.next + 1) % self.num_checkpoints;
        let lap_completed = self.next == 0;
        if lap_completed {
            self.lap += 1;
        }

        Some(ProgressEvent {
            passed,
            next: self.next,
            lap: self.lap,
            lap_completed,
        })
    }

    /// The next checkpoint if `distance` to it is inside `radius`; reaching
    /// it counts the same as entering its trigger.
    pub fn within_reach(&self, distance: f64, radius: f64) -> Option<usize> {
        (distance < radius).then_some(self.next)
    }

    /// Retarget without touching the lap count.
    pub fn set_next(&mut self, index: usize) {
        self.next = index % self.num_checkpoints;
    }

    pub fn reset(&mut self) {
        self.next = 0;
        self.lap = 1;
    }
}

/// Checkpoint trigger volumes the aircraft was inside on the previous tick.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerContact {
    inside: Vec<usize>,
}

impl TriggerContact {
    /// Record whether the aircraft is inside checkpoint `index` and return
    /// `true` only on entry.
    pub fn update(&mut self, index: usize, inside: bool) -> bool {
        let position = self.inside.iter().position(|&i| i == index);
        match (inside, position) {
            (true, None) => {
                self.inside.push(index);
                true
            }
            (false, Some(at)) => {
                self.inside.swap_remove(at);
                false
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.inside.clear();
    }
}
