/// Scalars contributed by a single ray probe: two class tags, hit flag, distance.
pub const PROBE_WIDTH: usize = 4;

/// Number of object classes a probe can report.
pub const PROBE_CLASSES: usize = 2;

/// Velocity, checkpoint offset and checkpoint heading, each in the local frame.
pub const KINEMATIC_OBS_SIZE: usize = 9;

/// Full observation length handed to a decision maker.
pub const OBSERVATION_SIZE: usize = 61;

/// Discrete value used for the negative direction of pitch and yaw actions.
pub const NEGATIVE_ACTION: u8 = 2;
