use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::components::{CheckpointTracker, FlightController, SpatialComponent, TriggerContact};
use crate::resources::CheckpointTrack;

/// Puts aircraft back on the track beside the checkpoint they last passed.
pub struct TrackPlacement<'a> {
    pub track: &'a CheckpointTrack,
    pub aircraft_count: usize,
    /// Range of the lateral spacing between neighbours [m]
    pub spread: [f64; 2],
}

impl<'a> TrackPlacement<'a> {
    pub fn new(track: &'a CheckpointTrack, aircraft_count: usize, spread: [f64; 2]) -> Self {
        Self {
            track,
            aircraft_count,
            spread,
        }
    }

    /// Sideways offset of aircraft `handle` so the grid is centred on the path.
    pub fn lateral_offset(&self, handle: usize, rng: &mut ChaCha8Rng) -> f64 {
        let [low, high] = self.spread;
        let spacing = if low < high {
            rng.gen_range(low..high)
        } else {
            low
        };
        (handle as f64 - self.aircraft_count as f64 / 2.0) * spacing
    }

    /// Reposition an aircraft with zero velocity and zeroed smoothing. With
    /// `randomize_target` the next checkpoint is drawn uniformly first.
    #[allow(clippy::too_many_arguments)]
    pub fn place(
        &self,
        handle: usize,
        randomize_target: bool,
        rng: &mut ChaCha8Rng,
        tracker: &mut CheckpointTracker,
        spatial: &mut SpatialComponent,
        controller: &mut FlightController,
        contact: &mut TriggerContact,
    ) {
        if randomize_target {
            tracker.set_next(rng.gen_range(0..self.track.len()));
        }

        let offset = self.lateral_offset(handle, rng);
        let (position, attitude) = self.track.reset_pose(tracker.next_checkpoint(), offset);
        spatial.position = position;
        spatial.attitude = attitude;
        controller.reset(spatial);
        contact.clear();
    }
}
