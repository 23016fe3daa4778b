use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::time::Duration;

use crate::resources::clock::duration_from_secs;
use crate::resources::config::RaceConfig;
use crate::utils::{RaceError, Result};

/// Lifecycle of a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RaceState {
    #[default]
    Preparing,
    Countdown,
    Playing,
    Paused,
    Gameover,
}

impl RaceState {
    fn can_transition_to(self, next: RaceState, training: bool) -> bool {
        use RaceState::*;
        match (self, next) {
            (_, Preparing) => true,
            (Preparing, Countdown) => true,
            (Preparing, Playing) => training,
            (Countdown, Playing) => true,
            (Playing, Paused) | (Paused, Playing) => !training,
            (Playing, Gameover) => true,
            _ => false,
        }
    }

    /// Whether aircraft are held in place while in this state.
    pub fn freezes_aircraft(self) -> bool {
        matches!(self, RaceState::Paused | RaceState::Gameover)
    }
}

/// Race time that only accrues while playing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RaceClock {
    previously_elapsed: Duration,
    last_resume: Duration,
}

impl RaceClock {
    fn on_enter(&mut self, state: RaceState, now: Duration) {
        match state {
            RaceState::Playing => self.last_resume = now,
            RaceState::Paused | RaceState::Gameover => {
                self.previously_elapsed += now.saturating_sub(self.last_resume);
            }
            RaceState::Preparing | RaceState::Countdown => {
                self.previously_elapsed = Duration::ZERO;
                self.last_resume = Duration::ZERO;
            }
        }
    }

    pub fn race_time(&self, state: RaceState, now: Duration) -> Duration {
        match state {
            RaceState::Playing => self.previously_elapsed + now.saturating_sub(self.last_resume),
            RaceState::Paused | RaceState::Gameover => self.previously_elapsed,
            RaceState::Preparing | RaceState::Countdown => Duration::ZERO,
        }
    }
}

/// Progress of one aircraft as seen by the coordinator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RaceStatus {
    pub checkpoint_index: usize,
    pub lap: u32,
    /// 1-based rank; 0 until the first ranking pass.
    pub place: usize,
    pub time_remaining: Duration,
    /// Resets forced by running out of time.
    pub timeouts: u32,
}

impl RaceStatus {
    fn start(bonus: Duration) -> Self {
        Self {
            checkpoint_index: 0,
            lap: 1,
            place: 0,
            time_remaining: bonus,
            timeouts: 0,
        }
    }

    pub fn checkpoints_completed(&self, num_checkpoints: usize) -> i64 {
        self.checkpoint_index as i64 + (self.lap as i64 - 1) * num_checkpoints as i64
    }
}

/// Inputs of the ranking order for one aircraft.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankEntry {
    pub checkpoints_completed: i64,
    /// Straight-line distance to the aircraft's own next checkpoint.
    pub distance: f64,
}

/// Assign places 1..=M: more checkpoints completed ranks ahead, ties go to the
/// aircraft closer to its next checkpoint, remaining ties keep input order.
pub fn rank(entries: &[RankEntry]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| compare_entries(&entries[a], &entries[b]));

    let mut places = vec![0; entries.len()];
    for (position, &index) in order.iter().enumerate() {
        places[index] = position + 1;
    }
    places
}

fn compare_entries(a: &RankEntry, b: &RankEntry) -> Ordering {
    b.checkpoints_completed
        .cmp(&a.checkpoints_completed)
        .then_with(|| a.distance.total_cmp(&b.distance))
}

/// Ordinal label for a place, e.g. "1st", "12th", "23rd". Empty when unranked.
pub fn place_label(place: usize) -> String {
    if place == 0 {
        return String::new();
    }
    if (11..=13).contains(&(place % 100)) {
        return format!("{place}th");
    }
    match place % 10 {
        1 => format!("{place}st"),
        2 => format!("{place}nd"),
        3 => format!("{place}rd"),
        _ => format!("{place}th"),
    }
}

/// One row of the race table, ordered by place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub handle: usize,
    pub name: String,
    pub place: usize,
    pub lap: u32,
    pub checkpoint: usize,
    pub time_remaining: f64,
}

#[derive(Debug, Clone)]
struct Racer {
    entity: Entity,
    name: String,
    player: bool,
}

/// Outcome of mirroring an aircraft's tracker into its status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressUpdate {
    pub advanced: bool,
    pub lap_completed: bool,
    /// The followed aircraft has completed the configured number of laps.
    pub race_finished: bool,
}

/// Owns the race state machine, race clock and every aircraft's status.
///
/// Aircraft are addressed by the handle returned from [`register`], which
/// indexes every per-aircraft table.
///
/// [`register`]: RaceCoordinator::register
#[derive(Resource, Debug, Clone)]
pub struct RaceCoordinator {
    state: RaceState,
    clock: RaceClock,
    racers: Vec<Racer>,
    statuses: Vec<RaceStatus>,
    followed: Option<usize>,
    num_checkpoints: usize,
    num_laps: u32,
    bonus_time: Duration,
    place_interval: Duration,
    last_place_update: Option<Duration>,
    training: bool,
}

impl RaceCoordinator {
    pub fn new(config: &RaceConfig, num_checkpoints: usize) -> Self {
        Self {
            state: RaceState::Preparing,
            clock: RaceClock::default(),
            racers: Vec::new(),
            statuses: Vec::new(),
            followed: None,
            num_checkpoints,
            num_laps: config.race.num_laps,
            bonus_time: duration_from_secs(config.race.checkpoint_bonus_time),
            place_interval: duration_from_secs(config.race.place_update_interval),
            last_place_update: None,
            training: config.is_training(),
        }
    }

    /// Add an aircraft and return its handle. The first player-controlled
    /// aircraft becomes the followed one.
    pub fn register(&mut self, entity: Entity, name: &str, player: bool) -> usize {
        let handle = self.racers.len();
        self.racers.push(Racer {
            entity,
            name: name.to_string(),
            player,
        });
        self.statuses.push(RaceStatus::start(self.bonus_time));
        if player && !self.racers[..handle].iter().any(|r| r.player) {
            self.followed = Some(handle);
        }
        handle
    }

    pub fn state(&self) -> RaceState {
        self.state
    }

    pub fn is_training(&self) -> bool {
        self.training
    }

    pub fn aircraft_count(&self) -> usize {
        self.racers.len()
    }

    pub fn num_checkpoints(&self) -> usize {
        self.num_checkpoints
    }

    pub fn num_laps(&self) -> u32 {
        self.num_laps
    }

    pub fn bonus_time(&self) -> Duration {
        self.bonus_time
    }

    /// The aircraft whose laps decide the end of the race.
    pub fn followed(&self) -> usize {
        self.followed.unwrap_or(0)
    }

    pub fn entity(&self, handle: usize) -> Option<Entity> {
        self.racers.get(handle).map(|r| r.entity)
    }

    pub fn name(&self, handle: usize) -> Option<&str> {
        self.racers.get(handle).map(|r| r.name.as_str())
    }

    pub fn status(&self, handle: usize) -> Option<&RaceStatus> {
        self.statuses.get(handle)
    }

    pub fn statuses(&self) -> &[RaceStatus] {
        &self.statuses
    }

    pub fn race_time(&self, now: Duration) -> Duration {
        self.clock.race_time(self.state, now)
    }

    /// Move to `next`, applying the clock bookkeeping of entering it.
    /// Returns the state that was left.
    pub fn transition(&mut self, next: RaceState, now: Duration) -> Result<RaceState> {
        if self.training && (next == RaceState::Paused || self.state == RaceState::Paused) {
            return Err(RaceError::PauseInTraining);
        }
        if !self.state.can_transition_to(next, self.training) {
            return Err(RaceError::InvalidTransition {
                from: self.state,
                to: next,
            });
        }

        let previous = self.state;
        self.state = next;
        self.clock.on_enter(next, now);
        info!("Race state {:?} -> {:?}", previous, next);
        Ok(previous)
    }

    pub fn pause(&mut self, now: Duration) -> Result<RaceState> {
        self.transition(RaceState::Paused, now)
    }

    pub fn resume(&mut self, now: Duration) -> Result<RaceState> {
        if self.training {
            return Err(RaceError::PauseInTraining);
        }
        if self.state != RaceState::Paused {
            return Err(RaceError::InvalidTransition {
                from: self.state,
                to: RaceState::Playing,
            });
        }
        self.transition(RaceState::Playing, now)
    }

    /// Reset every status to the start of lap one.
    pub fn begin_race(&mut self) {
        let bonus = self.bonus_time;
        for status in &mut self.statuses {
            *status = RaceStatus::start(bonus);
        }
        self.last_place_update = None;
    }

    /// Whether a ranking pass is due at `now`.
    pub fn ranking_due(&self, now: Duration) -> bool {
        match self.last_place_update {
            None => true,
            Some(last) => last + self.place_interval < now,
        }
    }

    /// Rank all aircraft. `distances[h]` is aircraft `h`'s distance to the
    /// checkpoint its status points at.
    pub fn update_places(&mut self, distances: &[f64], now: Duration) {
        let entries: Vec<RankEntry> = self
            .statuses
            .iter()
            .zip(distances)
            .map(|(status, &distance)| RankEntry {
                checkpoints_completed: status.checkpoints_completed(self.num_checkpoints),
                distance,
            })
            .collect();

        for (status, place) in self.statuses.iter_mut().zip(rank(&entries)) {
            status.place = place;
        }
        self.last_place_update = Some(now);
    }

    /// Mirror an aircraft's tracker into its status. A changed checkpoint or
    /// lap restores the bonus time; a one-checkpoint track only changes lap.
    pub fn observe_progress(
        &mut self,
        handle: usize,
        next_checkpoint: usize,
        lap: u32,
    ) -> Result<ProgressUpdate> {
        let followed = self.followed();
        let bonus = self.bonus_time;
        let num_laps = self.num_laps;
        let status = self
            .statuses
            .get_mut(handle)
            .ok_or(RaceError::UnknownAircraft(handle))?;

        let mut update = ProgressUpdate::default();
        if status.checkpoint_index != next_checkpoint || status.lap != lap {
            status.checkpoint_index = next_checkpoint;
            status.time_remaining = bonus;
            update.advanced = true;

            if lap != status.lap {
                status.lap = lap;
                update.lap_completed = true;
                update.race_finished = handle == followed && status.lap > num_laps;
            }
        }
        Ok(update)
    }

    /// Count down an aircraft's checkpoint time. Returns `true` when it ran
    /// out; the bonus is then restored and the caller must set it back.
    pub fn tick_time_remaining(&mut self, handle: usize, dt: Duration) -> Result<bool> {
        let bonus = self.bonus_time;
        let status = self
            .statuses
            .get_mut(handle)
            .ok_or(RaceError::UnknownAircraft(handle))?;

        status.time_remaining = status.time_remaining.saturating_sub(dt);
        if status.time_remaining.is_zero() {
            status.time_remaining = bonus;
            status.timeouts += 1;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn place_label(&self, handle: usize) -> String {
        self.statuses
            .get(handle)
            .map(|s| place_label(s.place))
            .unwrap_or_default()
    }

    pub fn standings(&self) -> Vec<Standing> {
        let mut rows: Vec<Standing> = self
            .statuses
            .iter()
            .zip(&self.racers)
            .enumerate()
            .map(|(handle, (status, racer))| Standing {
                handle,
                name: racer.name.clone(),
                place: status.place,
                lap: status.lap,
                checkpoint: status.checkpoint_index,
                time_remaining: status.time_remaining.as_secs_f64(),
            })
            .collect();
        rows.sort_by_key(|row| (row.place == 0, row.place, row.handle));
        rows
    }
}
