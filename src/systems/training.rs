use std::collections::HashMap;

use bevy::prelude::*;

use crate::components::{
    AircraftControl, AircraftHandle, CheckpointTracker, CommandSource, FlightController,
    ObstacleCollision, PendingReset, SpatialComponent, TrainingEpisode, TriggerContact,
};
use crate::plugins::{AircraftReset, CheckpointReached, EpisodeEnded, ResetReason, RewardSignal};
use crate::resources::{CheckpointTrack, RaceConfig, RaceCoordinator};
use crate::systems::TrackPlacement;
use crate::utils::RngManager;

/// Per-tick rewards and termination of training episodes.
#[allow(clippy::type_complexity)]
pub fn training_episode_system(
    mut commands: Commands,
    config: Res<RaceConfig>,
    mut reached: EventReader<CheckpointReached>,
    mut collisions: EventReader<ObstacleCollision>,
    mut aircraft: Query<(
        Entity,
        &AircraftHandle,
        &mut TrainingEpisode,
        &mut AircraftControl,
    )>,
    mut rewards: EventWriter<RewardSignal>,
    mut ended: EventWriter<EpisodeEnded>,
) {
    let mut checkpoints: HashMap<Entity, u32> = HashMap::new();
    for event in reached.read() {
        *checkpoints.entry(event.entity).or_default() += 1;
    }
    let crashed: Vec<Entity> = collisions.read().map(|c| c.entity).collect();

    for (entity, id, mut episode, mut control) in aircraft.iter_mut() {
        if !episode.is_running() {
            continue;
        }

        for _ in 0..checkpoints.get(&entity).copied().unwrap_or(0) {
            episode.on_checkpoint();
        }
        if crashed.contains(&entity) {
            episode.on_collision();
        }
        episode.step();

        let reward = episode.take_reward();
        let done = !episode.is_running();
        if let CommandSource::Policy(policy) = &mut control.source {
            policy.on_reward(reward, done);
        }
        rewards.send(RewardSignal {
            entity,
            handle: id.handle,
            reward,
            done,
        });

        if let Some(reason) = episode.ended {
            info!(
                "{} episode {} ended after {} steps ({:?}), reward {:.3}",
                id.name, episode.episode, episode.steps, reason, episode.cumulative_reward
            );
            ended.send(EpisodeEnded {
                entity,
                handle: id.handle,
                episode: episode.episode,
                steps: episode.steps,
                reason,
                cumulative_reward: episode.cumulative_reward,
            });
            if config.training.auto_reset {
                commands.entity(entity).insert(PendingReset {
                    randomize_target: true,
                });
            }
        }
    }
}

/// Place aircraft flagged for a reset and begin their next episode.
#[allow(clippy::too_many_arguments, clippy::type_complexity)]
pub fn episode_reset_system(
    mut commands: Commands,
    coordinator: Res<RaceCoordinator>,
    mut rng: ResMut<RngManager>,
    track: Res<CheckpointTrack>,
    config: Res<RaceConfig>,
    mut aircraft: Query<(
        Entity,
        &AircraftHandle,
        &PendingReset,
        &mut CheckpointTracker,
        &mut SpatialComponent,
        &mut FlightController,
        &mut TriggerContact,
        Option<&mut TrainingEpisode>,
        &mut AircraftControl,
    )>,
    mut resets: EventWriter<AircraftReset>,
) {
    let placement = TrackPlacement::new(&track, coordinator.aircraft_count(), config.race.spawn_spread);

    for (
        entity,
        id,
        pending,
        mut tracker,
        mut spatial,
        mut controller,
        mut contact,
        episode,
        mut control,
    ) in aircraft.iter_mut()
    {
        placement.place(
            id.handle,
            pending.randomize_target,
            rng.aircraft_stream(id.handle),
            &mut tracker,
            &mut spatial,
            &mut controller,
            &mut contact,
        );
        if let Some(mut episode) = episode {
            episode.begin();
        }
        if let CommandSource::Policy(policy) = &mut control.source {
            policy.on_episode_begin();
        }
        commands.entity(entity).remove::<PendingReset>();

        debug!(
            "{} reset toward checkpoint {}",
            id.name,
            tracker.next_checkpoint()
        );
        resets.send(AircraftReset {
            entity,
            handle: id.handle,
            reason: ResetReason::Episode,
        });
    }
}
