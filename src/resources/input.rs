use bevy::prelude::*;

/// Latest readings of the human input device, written by whatever owns the
/// device binding.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Pitch axis in [-1, 1]; positive pulls the nose up.
    pub pitch: f32,
    /// Yaw axis in [-1, 1]; positive turns right.
    pub yaw: f32,
    /// Boost button in [0, 1].
    pub boost: f32,
    /// Set by the device when the pause button is pressed; consumed once.
    pub pause_requested: bool,
}
