use std::io;
use thiserror::Error;

use crate::resources::RaceState;

#[derive(Error, Debug)]
pub enum RaceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_yaml::Error),

    #[error("Track error: no checkpoints defined")]
    EmptyTrack,

    #[error("Race error: no aircraft registered")]
    NoAircraft,

    #[error("Invalid action: {0}")]
    InvalidAction(String),

    #[error("Invalid state transition from {from:?} to {to:?}")]
    InvalidTransition { from: RaceState, to: RaceState },

    #[error("Pause and resume are not available in training mode")]
    PauseInTraining,

    #[error("Unknown aircraft handle: {0}")]
    UnknownAircraft(usize),
}

pub type Result<T> = std::result::Result<T, RaceError>;
