use std::time::Duration;

use bevy::prelude::*;

/// Visibility flags a renderer would apply to the aircraft.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AircraftVisuals {
    pub mesh_visible: bool,
    pub explosion_visible: bool,
}

impl Default for AircraftVisuals {
    fn default() -> Self {
        Self {
            mesh_visible: true,
            explosion_visible: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStage {
    /// Wreck shown, aircraft frozen where it crashed
    Exploding,
    /// Back on the track, still frozen
    Repositioned,
}

/// What the recovery system must do after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    Reposition,
    Thaw,
}

#[derive(Debug, Clone)]
pub struct RecoverySequence {
    pub stage: RecoveryStage,
    pub timer: Timer,
}

/// Timed crash recovery of one aircraft: freeze, explode, reposition, thaw.
#[derive(Component, Debug, Clone)]
pub struct CrashRecovery {
    pub sequence: Option<RecoverySequence>,
    explosion_delay: Duration,
    thaw_delay: Duration,
}

impl CrashRecovery {
    pub fn new(explosion_delay: Duration, thaw_delay: Duration) -> Self {
        Self {
            sequence: None,
            explosion_delay,
            thaw_delay,
        }
    }

    pub fn is_active(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn stage(&self) -> Option<RecoveryStage> {
        self.sequence.as_ref().map(|s| s.stage)
    }

    /// Start a sequence unless one is already running.
    pub fn begin(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        self.sequence = Some(RecoverySequence {
            stage: RecoveryStage::Exploding,
            timer: Timer::new(self.explosion_delay, TimerMode::Once),
        });
        true
    }

    /// Advance the running sequence by `dt`.
    pub fn tick(&mut self, dt: Duration) -> Option<RecoveryAction> {
        let thaw_delay = self.thaw_delay;
        let sequence = self.sequence.as_mut()?;
        if !sequence.timer.tick(dt).finished() {
            return None;
        }

        match sequence.stage {
            RecoveryStage::Exploding => {
                sequence.stage = RecoveryStage::Repositioned;
                sequence.timer = Timer::new(thaw_delay, TimerMode::Once);
                Some(RecoveryAction::Reposition)
            }
            RecoveryStage::Repositioned => {
                self.sequence = None;
                Some(RecoveryAction::Thaw)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.sequence = None;
    }
}
