use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::agents::DecisionMaker;
use crate::utils::{RaceError, Result, NEGATIVE_ACTION};

/// Per-tick control input of one aircraft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlCommand {
    /// -1 nose down, 0 hold, 1 nose up
    pub pitch: i8,
    /// -1 turn left, 0 hold, 1 turn right
    pub yaw: i8,
    pub boost: bool,
}

impl ControlCommand {
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// The discrete action exchanged with a decision maker: `0` hold, `1`
/// positive, `2` negative. Boost is `0` or `1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscreteAction {
    pub pitch: u8,
    pub yaw: u8,
    pub boost: u8,
}

impl DiscreteAction {
    pub fn new(pitch: u8, yaw: u8, boost: u8) -> Self {
        Self { pitch, yaw, boost }
    }

    pub fn from_slice(values: &[u8]) -> Result<Self> {
        match values {
            [pitch, yaw, boost] => Ok(Self::new(*pitch, *yaw, *boost)),
            _ => Err(RaceError::InvalidAction(format!(
                "expected 3 action branches, got {}",
                values.len()
            ))),
        }
    }

    /// Quantise continuous input axes: each axis is rounded and -1 is
    /// remapped to the negative action.
    pub fn from_axes(pitch: f32, yaw: f32, boost: f32) -> Self {
        Self {
            pitch: axis_to_action(pitch),
            yaw: axis_to_action(yaw),
            boost: u8::from(boost.round() >= 1.0),
        }
    }

    pub fn to_command(self) -> Result<ControlCommand> {
        let boost = match self.boost {
            0 => false,
            1 => true,
            other => {
                return Err(RaceError::InvalidAction(format!(
                    "boost branch must be 0 or 1, got {}",
                    other
                )))
            }
        };
        Ok(ControlCommand {
            pitch: action_to_axis(self.pitch, "pitch")?,
            yaw: action_to_axis(self.yaw, "yaw")?,
            boost,
        })
    }
}

fn axis_to_action(value: f32) -> u8 {
    let rounded = value.clamp(-1.0, 1.0).round();
    if rounded >= 1.0 {
        1
    } else if rounded <= -1.0 {
        NEGATIVE_ACTION
    } else {
        0
    }
}

fn action_to_axis(value: u8, branch: &str) -> Result<i8> {
    match value {
        0 => Ok(0),
        1 => Ok(1),
        NEGATIVE_ACTION => Ok(-1),
        other => Err(RaceError::InvalidAction(format!(
            "{} branch must be 0, 1 or 2, got {}",
            branch, other
        ))),
    }
}

/// Where an aircraft's commands come from, chosen when it is added.
pub enum CommandSource {
    Policy(Box<dyn DecisionMaker>),
    /// Reads the `PlayerInput` resource.
    Player,
}

impl CommandSource {
    pub fn is_player(&self) -> bool {
        matches!(self, CommandSource::Player)
    }

    pub fn name(&self) -> &str {
        match self {
            CommandSource::Policy(policy) => policy.name(),
            CommandSource::Player => "player",
        }
    }
}

/// Component holding an aircraft's command source and the command it will
/// fly this tick.
#[derive(Component)]
pub struct AircraftControl {
    pub source: CommandSource,
    pub command: ControlCommand,
}

impl AircraftControl {
    pub fn new(source: CommandSource) -> Self {
        Self {
            source,
            command: ControlCommand::neutral(),
        }
    }
}
