use std::env;

use bevy::log::Level;
use serde::Serialize;

use skyrace::{
    agents::CheckpointSeeker,
    components::CommandSource,
    plugins::RaceBuilder,
    resources::{RaceConfig, RaceCoordinator, RaceState, SimClock, Standing},
};

/// Upper bound on simulated ticks (ten minutes at the default tick).
const MAX_TICKS: u64 = 30_000;
const DEFAULT_AIRCRAFT: usize = 4;

#[derive(Serialize)]
struct RaceSummary {
    state: RaceState,
    ticks: u64,
    race_time: f64,
    standings: Vec<Standing>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config_path = None;
    let mut aircraft_count = DEFAULT_AIRCRAFT;
    for arg in env::args().skip(1) {
        match arg.parse::<usize>() {
            Ok(count) => aircraft_count = count,
            Err(_) => config_path = Some(arg),
        }
    }

    let config = match &config_path {
        Some(path) => RaceConfig::load(path)?,
        None => RaceConfig::default(),
    };

    let mut builder = RaceBuilder::new(config).with_logging(Level::INFO);
    for index in 0..aircraft_count {
        builder = builder.with_aircraft(
            &format!("seeker-{}", index + 1),
            CommandSource::Policy(Box::new(CheckpointSeeker::default())),
        );
    }
    let mut app = builder.build()?;

    loop {
        app.update();
        let world = app.world();
        let ticks = world.resource::<SimClock>().ticks();
        if world.resource::<RaceCoordinator>().state() == RaceState::Gameover || ticks >= MAX_TICKS {
            break;
        }
    }

    let world = app.world();
    let clock = world.resource::<SimClock>();
    let coordinator = world.resource::<RaceCoordinator>();
    let summary = RaceSummary {
        state: coordinator.state(),
        ticks: clock.ticks(),
        race_time: coordinator.race_time(clock.elapsed()).as_secs_f64(),
        standings: coordinator.standings(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
