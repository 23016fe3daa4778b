use crate::components::DiscreteAction;
use crate::sensors::Observation;
use crate::utils::{rad_to_deg, NEGATIVE_ACTION};

/// Anything that turns observations into discrete actions.
///
/// Lifecycle hooks default to no-ops so simple controllers only implement
/// `decide`.
pub trait DecisionMaker: Send + Sync {
    fn name(&self) -> &str;

    fn decide(&mut self, observation: &Observation) -> DiscreteAction;

    /// Reward earned since the previous decision and whether the episode
    /// ended with it.
    fn on_reward(&mut self, _reward: f64, _done: bool) {}

    fn on_episode_begin(&mut self) {}
}

/// Flies straight and level without boosting.
pub struct HoldCourse;

impl DecisionMaker for HoldCourse {
    fn name(&self) -> &str {
        "hold_course"
    }

    fn decide(&mut self, _observation: &Observation) -> DiscreteAction {
        DiscreteAction::default()
    }
}

/// Steers toward the next checkpoint using only the observation.
pub struct CheckpointSeeker {
    /// Heading and elevation error ignored either side of zero [deg]
    pub deadband: f64,
    /// Boost while the heading error is below this [deg]
    pub boost_cone: f64,
    /// Climb away when the straight-ahead probe reports an obstacle closer
    /// than this fraction of its range
    pub avoid_fraction: f32,
    episodes: u32,
    total_reward: f64,
}

impl Default for CheckpointSeeker {
    fn default() -> Self {
        Self {
            deadband: 3.0,
            boost_cone: 10.0,
            avoid_fraction: 0.25,
            episodes: 0,
            total_reward: 0.0,
        }
    }
}

impl CheckpointSeeker {
    pub fn episodes(&self) -> u32 {
        self.episodes
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    fn obstacle_ahead(&self, observation: &Observation) -> bool {
        // middle probe of the level fan
        let count = observation.probe_count();
        if count == 0 {
            return false;
        }
        observation
            .probe(count / 2)
            .map(|probe| probe.hit && probe.tags[0] > 0.5 && probe.distance < self.avoid_fraction)
            .unwrap_or(false)
    }
}

impl DecisionMaker for CheckpointSeeker {
    fn name(&self) -> &str {
        "checkpoint_seeker"
    }

    fn decide(&mut self, observation: &Observation) -> DiscreteAction {
        let target = observation.to_checkpoint().cast::<f64>();
        let heading = rad_to_deg(target.x.atan2(-target.z));
        let elevation = rad_to_deg(target.y.atan2(target.x.hypot(target.z)));

        let yaw = axis_action(heading, self.deadband);
        let pitch = if self.obstacle_ahead(observation) {
            1
        } else {
            axis_action(elevation, self.deadband)
        };
        let boost = u8::from(heading.abs() < self.boost_cone);

        DiscreteAction::new(pitch, yaw, boost)
    }

    fn on_reward(&mut self, reward: f64, _done: bool) {
        self.total_reward += reward;
    }

    fn on_episode_begin(&mut self) {
        self.episodes += 1;
    }
}

fn axis_action(error: f64, deadband: f64) -> u8 {
    if error > deadband {
        1
    } else if error < -deadband {
        NEGATIVE_ACTION
    } else {
        0
    }
}
