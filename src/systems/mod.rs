mod clock;
mod detection;
mod flight;
mod placement;
mod progress;
mod race;
mod sensors;
mod training;

pub use clock::clock_system;
pub use detection::{checkpoint_detection_system, obstacle_detection_system};
pub use flight::{decide_commands_system, flight_control_system, physics_integrator_system};
pub use placement::TrackPlacement;
pub use progress::{checkpoint_progress_system, collision_response_system, recovery_system};
pub use race::{
    change_state, countdown_system, race_bookkeeping_system, race_command_system,
    race_in_progress, race_setup_system, state_effects_system, training_active,
};
pub use sensors::observation_system;
pub use training::{episode_reset_system, training_episode_system};
