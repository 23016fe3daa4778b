mod builder;
mod events;
mod race;

pub use builder::RaceBuilder;
pub use events::{
    AircraftReset, CheckpointEntered, CheckpointReached, CountdownText, EpisodeEnded,
    RaceCommand, RaceStateChanged, ResetReason, RewardSignal,
};
pub use race::{RacePlugin, RaceSet};
