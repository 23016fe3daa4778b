use bevy::prelude::*;

use crate::components::{
    AircraftControl, AircraftHandle, AircraftVisuals, CheckpointTracker, CollisionComponent,
    CommandSource, CrashRecovery, FlightController, SpatialComponent, TrainingEpisode,
    TriggerContact,
};
use crate::plugins::{AircraftReset, CountdownText, RaceCommand, RaceStateChanged, ResetReason};
use crate::resources::{CheckpointTrack, Countdown, PlayerInput, RaceConfig, RaceCoordinator, RaceState, SimClock};
use crate::systems::TrackPlacement;
use crate::utils::{Result, RngManager};

/// Run condition: aircraft are flying.
pub fn race_in_progress(coordinator: Res<RaceCoordinator>) -> bool {
    coordinator.state() == RaceState::Playing
}

/// Run condition: the race runs in training mode.
pub fn training_active(coordinator: Res<RaceCoordinator>) -> bool {
    coordinator.is_training()
}

/// Transition the coordinator and publish the change.
pub fn change_state(
    coordinator: &mut RaceCoordinator,
    next: RaceState,
    clock: &SimClock,
    changes: &mut EventWriter<RaceStateChanged>,
) -> Result<()> {
    let from = coordinator.transition(next, clock.elapsed())?;
    changes.send(RaceStateChanged { from, to: next });
    Ok(())
}

/// Put every aircraft on the grid while preparing, then start the countdown
/// (or go straight to playing when training).
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn race_setup_system(
    mut coordinator: ResMut<RaceCoordinator>,
    mut countdown: ResMut<Countdown>,
    mut rng: ResMut<RngManager>,
    clock: Res<SimClock>,
    track: Res<CheckpointTrack>,
    config: Res<RaceConfig>,
    mut aircraft: Query<(
        Entity,
        &AircraftHandle,
        &mut SpatialComponent,
        &mut FlightController,
        &mut CheckpointTracker,
        &mut TriggerContact,
        &mut CollisionComponent,
        &mut CrashRecovery,
        &mut AircraftVisuals,
        Option<&mut TrainingEpisode>,
        &mut AircraftControl,
    )>,
    mut changes: EventWriter<RaceStateChanged>,
    mut texts: EventWriter<CountdownText>,
    mut resets: EventWriter<AircraftReset>,
) {
    if coordinator.state() != RaceState::Preparing {
        return;
    }

    let training = coordinator.is_training();
    let placement = TrackPlacement::new(&track, coordinator.aircraft_count(), config.race.spawn_spread);

    for (
        entity,
        id,
        mut spatial,
        mut controller,
        mut tracker,
        mut contact,
        mut collision,
        mut recovery,
        mut visuals,
        episode,
        mut control,
    ) in aircraft.iter_mut()
    {
        tracker.reset();
        recovery.cancel();
        collision.reset();
        *visuals = AircraftVisuals::default();
        placement.place(
            id.handle,
            training,
            rng.aircraft_stream(id.handle),
            &mut tracker,
            &mut spatial,
            &mut controller,
            &mut contact,
        );

        if training {
            if let Some(mut episode) = episode {
                episode.begin();
            }
            if let CommandSource::Policy(policy) = &mut control.source {
                policy.on_episode_begin();
            }
        } else {
            controller.freeze(&mut spatial);
        }
        resets.send(AircraftReset {
            entity,
            handle: id.handle,
            reason: ResetReason::Start,
        });
    }
    coordinator.begin_race();
    info!(
        "Race prepared: {} aircraft, {} checkpoints, {} laps",
        coordinator.aircraft_count(),
        coordinator.num_checkpoints(),
        coordinator.num_laps()
    );

    let next = if training {
        RaceState::Playing
    } else {
        RaceState::Countdown
    };
    if let Err(e) = change_state(&mut coordinator, next, &clock, &mut changes) {
        error!("Failed to leave Preparing: {}", e);
        return;
    }

    if !training {
        if let Some(text) = countdown.start() {
            texts.send(CountdownText { text });
        }
    }
}

/// Tick the countdown and start the race once it has run out.
pub fn countdown_system(
    mut coordinator: ResMut<RaceCoordinator>,
    mut countdown: ResMut<Countdown>,
    clock: Res<SimClock>,
    mut changes: EventWriter<RaceStateChanged>,
    mut texts: EventWriter<CountdownText>,
) {
    if coordinator.state() != RaceState::Countdown {
        return;
    }

    let finished = if countdown.is_finished() {
        true
    } else {
        let progress = countdown.tick(clock.tick());
        for text in progress.texts {
            texts.send(CountdownText { text });
        }
        progress.finished
    };

    if finished {
        if let Err(e) = change_state(&mut coordinator, RaceState::Playing, &clock, &mut changes) {
            error!("Failed to start race: {}", e);
        }
    }
}

/// Apply pause, resume and restart requests.
pub fn race_command_system(
    mut coordinator: ResMut<RaceCoordinator>,
    mut input: ResMut<PlayerInput>,
    clock: Res<SimClock>,
    mut commands: EventReader<RaceCommand>,
    mut changes: EventWriter<RaceStateChanged>,
) {
    let mut requests: Vec<RaceCommand> = commands.read().copied().collect();
    if input.pause_requested {
        input.pause_requested = false;
        requests.push(RaceCommand::TogglePause);
    }

    for request in requests {
        let next = match request {
            RaceCommand::Pause => RaceState::Paused,
            RaceCommand::Resume => RaceState::Playing,
            RaceCommand::Restart => RaceState::Preparing,
            RaceCommand::TogglePause => match coordinator.state() {
                RaceState::Paused => RaceState::Playing,
                _ => RaceState::Paused,
            },
        };

        let result = if next == RaceState::Playing {
            coordinator.resume(clock.elapsed()).map(|from| {
                changes.send(RaceStateChanged { from, to: next });
            })
        } else {
            change_state(&mut coordinator, next, &clock, &mut changes)
        };
        if let Err(e) = result {
            warn!("Ignoring {:?}: {}", request, e);
        }
    }
}

/// Freeze or thaw aircraft when the race state changes.
pub fn state_effects_system(
    mut changes: EventReader<RaceStateChanged>,
    mut aircraft: Query<(&mut FlightController, &mut SpatialComponent, &CrashRecovery)>,
) {
    for change in changes.read() {
        if change.to.freezes_aircraft() {
            for (mut controller, mut spatial, _) in aircraft.iter_mut() {
                controller.freeze(&mut spatial);
            }
        } else if change.to == RaceState::Playing {
            for (mut controller, mut spatial, recovery) in aircraft.iter_mut() {
                // crashed aircraft wait for their own recovery
                if !recovery.is_active() {
                    controller.thaw(&mut spatial);
                }
            }
        }
    }
}

/// Mirror checkpoint progress into the coordinator, apply checkpoint
/// timeouts, re-rank at the configured cadence and detect the end of the race.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn race_bookkeeping_system(
    mut coordinator: ResMut<RaceCoordinator>,
    mut rng: ResMut<RngManager>,
    clock: Res<SimClock>,
    track: Res<CheckpointTrack>,
    config: Res<RaceConfig>,
    mut aircraft: Query<(
        Entity,
        &AircraftHandle,
        &mut CheckpointTracker,
        &mut SpatialComponent,
        &mut FlightController,
        &mut TriggerContact,
        &mut CrashRecovery,
        &mut AircraftVisuals,
    )>,
    mut changes: EventWriter<RaceStateChanged>,
    mut resets: EventWriter<AircraftReset>,
) {
    let now = clock.elapsed();
    let training = coordinator.is_training();
    let mut finished = false;

    for (_, id, tracker, ..) in aircraft.iter() {
        match coordinator.observe_progress(id.handle, tracker.next_checkpoint(), tracker.lap()) {
            Ok(update) => {
                if update.lap_completed {
                    info!("{} started lap {}", id.name, tracker.lap());
                }
                finished |= update.race_finished && !training;
            }
            Err(e) => error!("Progress for {}: {}", id.name, e),
        }
    }

    if !training {
        let placement =
            TrackPlacement::new(&track, coordinator.aircraft_count(), config.race.spawn_spread);
        for (
            entity,
            id,
            mut tracker,
            mut spatial,
            mut controller,
            mut contact,
            mut recovery,
            mut visuals,
        ) in aircraft.iter_mut()
        {
            match coordinator.tick_time_remaining(id.handle, clock.tick()) {
                Ok(true) => {
                    info!(
                        "{} ran out of time, back to checkpoint {}",
                        id.name,
                        tracker.last_completed()
                    );
                    // the timeout reposition replaces a pending crash recovery
                    if recovery.is_active() {
                        recovery.cancel();
                        *visuals = AircraftVisuals::default();
                        controller.thaw(&mut spatial);
                    }
                    placement.place(
                        id.handle,
                        false,
                        rng.aircraft_stream(id.handle),
                        &mut tracker,
                        &mut spatial,
                        &mut controller,
                        &mut contact,
                    );
                    resets.send(AircraftReset {
                        entity,
                        handle: id.handle,
                        reason: ResetReason::Timeout,
                    });
                }
                Ok(false) => {}
                Err(e) => error!("Timeout for {}: {}", id.name, e),
            }
        }
    }

    if coordinator.ranking_due(now) || finished {
        let mut distances = vec![f64::INFINITY; coordinator.aircraft_count()];
        for (_, id, tracker, spatial, ..) in aircraft.iter() {
            if let Some(distance) = distances.get_mut(id.handle) {
                let target = track.checkpoint(tracker.next_checkpoint());
                *distance = (target.position - spatial.position).norm();
            }
        }
        coordinator.update_places(&distances, now);
    }

    if finished {
        match change_state(&mut coordinator, RaceState::Gameover, &clock, &mut changes) {
            Ok(()) => info!(
                "Race over after {:.2}s",
                coordinator.race_time(now).as_secs_f64()
            ),
            Err(e) => error!("Failed to end race: {}", e),
        }
    }
}
