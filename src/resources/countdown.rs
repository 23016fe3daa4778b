use bevy::prelude::*;
use std::time::Duration;

use crate::resources::clock::duration_from_secs;
use crate::resources::config::{CountdownConfig, CountdownStep};

/// What a countdown tick produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountdownProgress {
    /// Texts shown during this tick, in order.
    pub texts: Vec<String>,
    pub finished: bool,
}

/// Timed sequence of countdown texts gating the start of the race.
#[derive(Resource, Debug, Clone)]
pub struct Countdown {
    steps: Vec<CountdownStep>,
    current: Option<usize>,
    timer: Timer,
    finished: bool,
}

impl Countdown {
    pub fn new(config: &CountdownConfig) -> Self {
        Self {
            steps: config.steps.clone(),
            current: None,
            timer: Timer::new(Duration::ZERO, TimerMode::Once),
            finished: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.current.is_some() && !self.finished
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Text currently on screen.
    pub fn text(&self) -> Option<&str> {
        match self.current {
            Some(i) if !self.finished => self.steps.get(i).map(|s| s.text.as_str()),
            _ => None,
        }
    }

    /// Begin from the first step. Returns the first text, if any.
    pub fn start(&mut self) -> Option<String> {
        self.finished = false;
        self.current = None;
        self.enter_step(0)
    }

    /// Advance by one tick.
    pub fn tick(&mut self, dt: Duration) -> CountdownProgress {
        let mut progress = CountdownProgress::default();
        if self.finished || self.current.is_none() {
            progress.finished = self.finished;
            return progress;
        }

        self.timer.tick(dt);
        while self.timer.finished() && !self.finished {
            let next = self.current.map_or(0, |i| i + 1);
            if let Some(text) = self.enter_step(next) {
                progress.texts.push(text);
            }
        }
        progress.finished = self.finished;
        progress
    }

    fn enter_step(&mut self, index: usize) -> Option<String> {
        match self.steps.get(index) {
            Some(step) => {
                self.current = Some(index);
                self.timer = Timer::new(duration_from_secs(step.seconds), TimerMode::Once);
                if step.seconds <= 0.0 {
                    // Zero-length steps complete without waiting for a tick.
                    self.timer.tick(Duration::ZERO);
                }
                Some(step.text.clone())
            }
            None => {
                self.current = Some(index);
                self.finished = true;
                None
            }
        }
    }
}
