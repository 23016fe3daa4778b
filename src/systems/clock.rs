use bevy::prelude::*;

use crate::resources::SimClock;

/// Advance simulation time by one fixed tick.
pub fn clock_system(mut clock: ResMut<SimClock>) {
    clock.advance();
}
