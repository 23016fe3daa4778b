use bevy::prelude::*;
use std::time::Duration;

/// Convert seconds to a `Duration`, rounding to the nearest nanosecond so
/// decimal tick lengths such as 0.02 s add up without drift.
pub fn duration_from_secs(secs: f64) -> Duration {
    Duration::from_nanos((secs.max(0.0) * 1e9).round() as u64)
}

/// Fixed-step simulation clock. One `App::update()` is one tick.
#[derive(Resource, Debug, Clone)]
pub struct SimClock {
    tick: Duration,
    ticks: u64,
    elapsed: Duration,
}

impl SimClock {
    pub fn new(tick_seconds: f64) -> Self {
        Self {
            tick: duration_from_secs(tick_seconds),
            ticks: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn advance(&mut self) {
        self.ticks += 1;
        self.elapsed += self.tick;
    }

    /// Length of one tick.
    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Length of one tick in seconds.
    pub fn dt(&self) -> f64 {
        self.tick.as_secs_f64()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time since the app started, paused or not.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}
