use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::resources::TrainingConfig;

/// Why a training episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EpisodeEnd {
    /// No checkpoint within the step timeout window
    Timeout,
    /// Hit an obstacle
    Collision,
    /// Step budget exhausted
    MaxSteps,
}

/// Reward and termination bookkeeping of one training aircraft.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct TrainingEpisode {
    pub episode: u32,
    pub steps: u32,
    pub next_step_timeout: u32,
    pub cumulative_reward: f64,
    /// Reward collected during the current tick
    pub pending_reward: f64,
    pub ended: Option<EpisodeEnd>,
    config: TrainingConfig,
}

impl TrainingEpisode {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            episode: 0,
            steps: 0,
            next_step_timeout: config.step_timeout,
            cumulative_reward: 0.0,
            pending_reward: 0.0,
            ended: None,
            config,
        }
    }

    /// Start a fresh episode.
    pub fn begin(&mut self) {
        self.episode += 1;
        self.steps = 0;
        self.next_step_timeout = self.config.step_timeout;
        self.cumulative_reward = 0.0;
        self.pending_reward = 0.0;
        self.ended = None;
    }

    pub fn is_running(&self) -> bool {
        self.ended.is_none()
    }

    /// Count one decision step: apply the time penalty and check the step
    /// timeout and step budget.
    pub fn step(&mut self) -> Option<EpisodeEnd> {
        if !self.is_running() {
            return None;
        }
        self.steps += 1;
        self.add_reward(-1.0 / f64::from(self.config.max_steps.max(1)));

        if self.steps > self.next_step_timeout {
            self.add_reward(-self.config.timeout_penalty);
            self.ended = Some(EpisodeEnd::Timeout);
        } else if self.config.max_steps > 0 && self.steps >= self.config.max_steps {
            self.ended = Some(EpisodeEnd::MaxSteps);
        }
        self.ended
    }

    /// Reward a checkpoint and reopen the timeout window.
    pub fn on_checkpoint(&mut self) {
        if !self.is_running() {
            return;
        }
        self.add_reward(self.config.checkpoint_reward);
        self.next_step_timeout = self.steps + self.config.step_timeout;
    }

    pub fn on_collision(&mut self) -> Option<EpisodeEnd> {
        if !self.is_running() {
            return None;
        }
        self.add_reward(-self.config.collision_penalty);
        self.ended = Some(EpisodeEnd::Collision);
        self.ended
    }

    pub fn take_reward(&mut self) -> f64 {
        std::mem::take(&mut self.pending_reward)
    }

    fn add_reward(&mut self, reward: f64) {
        self.pending_reward += reward;
        self.cumulative_reward += reward;
    }
}
