use bevy::prelude::*;

/// Stable race handle and display name of an aircraft.
#[derive(Component, Debug, Clone, PartialEq, Eq, Hash)]
pub struct AircraftHandle {
    pub handle: usize,
    pub name: String,
}

impl AircraftHandle {
    pub fn new(handle: usize, name: &str) -> Self {
        Self {
            handle,
            name: name.to_string(),
        }
    }
}

/// Marks an aircraft whose pose must be placed on the track on the next
/// tick. In training the next checkpoint is re-drawn first.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingReset {
    pub randomize_target: bool,
}
