use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;

use crate::components::{
    AircraftControl, AircraftHandle, AircraftVisuals, CheckpointTracker, CollisionComponent,
    CommandSource, CrashRecovery, FlightController, Obstacle, PhysicsComponent, SpatialComponent,
    TrailEffect, TrainingEpisode, TriggerContact,
};
use crate::plugins::RacePlugin;
use crate::resources::{duration_from_secs, CheckpointTrack, RaceConfig, RaceCoordinator};
use crate::sensors::Observation;
use crate::utils::{RaceError, Result};

/// Assembles a headless race app. Setup problems are reported by
/// [`RaceBuilder::build`] before any tick runs.
pub struct RaceBuilder {
    config: RaceConfig,
    track: Option<CheckpointTrack>,
    aircraft: Vec<(String, CommandSource)>,
    log_level: Option<Level>,
}

impl RaceBuilder {
    pub fn new(config: RaceConfig) -> Self {
        Self {
            config,
            track: None,
            aircraft: Vec::new(),
            log_level: None,
        }
    }

    /// Race on `track` instead of the one described by the configuration.
    pub fn with_track(mut self, track: CheckpointTrack) -> Self {
        self.track = Some(track);
        self
    }

    pub fn with_aircraft(mut self, name: &str, source: CommandSource) -> Self {
        self.aircraft.push((name.to_string(), source));
        self
    }

    pub fn with_logging(mut self, level: Level) -> Self {
        self.log_level = Some(level);
        self
    }

    pub fn build(self) -> Result<App> {
        self.config.validate()?;
        let track = match self.track {
            Some(track) => track,
            None => CheckpointTrack::from_config(&self.config.track)?,
        };
        if track.is_empty() {
            return Err(RaceError::EmptyTrack);
        }
        if self.aircraft.is_empty() {
            return Err(RaceError::NoAircraft);
        }

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        if let Some(level) = self.log_level {
            app.add_plugins(LogPlugin {
                level,
                ..default()
            });
        }
        app.add_plugins(RacePlugin::new(self.config.clone(), track.clone()));

        let world = app.world_mut();
        for obstacle in &self.config.obstacles {
            world.spawn((Obstacle::from_config(obstacle), Name::new("Obstacle")));
        }

        let config = &self.config;
        for (name, source) in self.aircraft {
            let player = source.is_player();
            let entity = world
                .spawn((
                    SpatialComponent::default(),
                    PhysicsComponent::from_config(&config.physics),
                    FlightController::new(config.flight.clone()),
                    TrailEffect::default(),
                    CheckpointTracker::new(track.len()),
                    TriggerContact::default(),
                    CollisionComponent::new(config.physics.collision_radius),
                    CrashRecovery::new(
                        duration_from_secs(config.race.recovery_explosion_delay),
                        duration_from_secs(config.race.recovery_thaw_delay),
                    ),
                    AircraftVisuals::default(),
                    AircraftControl::new(source),
                    Observation::default(),
                    Name::new(name.clone()),
                ))
                .id();
            if config.is_training() {
                world
                    .entity_mut(entity)
                    .insert(TrainingEpisode::new(config.training.clone()));
            }

            let handle = world
                .resource_mut::<RaceCoordinator>()
                .register(entity, &name, player);
            world
                .entity_mut(entity)
                .insert(AircraftHandle::new(handle, &name));
            info!("Added aircraft {} as handle {}", name, handle);
        }

        app.finish();
        app.cleanup();
        Ok(app)
    }
}
