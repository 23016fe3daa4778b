use bevy::prelude::*;

use crate::components::{
    AircraftControl, AircraftHandle, CommandSource, ControlCommand, DiscreteAction,
    FlightController, PhysicsComponent, SpatialComponent, TrailEffect,
};
use crate::resources::{PlayerInput, SimClock};
use crate::sensors::Observation;

/// Ask every aircraft's command source for this tick's command.
pub fn decide_commands_system(
    input: Res<PlayerInput>,
    mut aircraft: Query<(&AircraftHandle, &FlightController, &Observation, &mut AircraftControl)>,
) {
    for (id, controller, observation, mut control) in aircraft.iter_mut() {
        if controller.frozen {
            control.command = ControlCommand::neutral();
            continue;
        }

        let action = match &mut control.source {
            CommandSource::Policy(policy) => policy.decide(observation),
            CommandSource::Player => DiscreteAction::from_axes(input.pitch, input.yaw, input.boost),
        };
        control.command = match action.to_command() {
            Ok(command) => command,
            Err(e) => {
                warn!("{} produced an invalid action: {}", id.name, e);
                ControlCommand::neutral()
            }
        };
    }
}

/// Turn commands into attitude changes and thrust.
pub fn flight_control_system(
    clock: Res<SimClock>,
    mut aircraft: Query<(
        &mut FlightController,
        &AircraftControl,
        &mut SpatialComponent,
        &mut PhysicsComponent,
        &mut TrailEffect,
    )>,
) {
    let dt = clock.dt();

    for (mut controller, control, mut spatial, mut physics, mut trail) in aircraft.iter_mut() {
        physics.net_force = controller.steer(&control.command, dt, &mut spatial, &mut trail);
    }
}

/// Integrate accumulated forces. Frozen aircraft stay where they are.
pub fn physics_integrator_system(
    clock: Res<SimClock>,
    mut aircraft: Query<(
        &FlightController,
        &mut PhysicsComponent,
        &mut SpatialComponent,
        &mut TrailEffect,
    )>,
) {
    let dt = clock.dt();

    for (controller, mut physics, mut spatial, mut trail) in aircraft.iter_mut() {
        if !controller.frozen {
            physics.integrate(&mut spatial, dt);
            trail.record(spatial.position);
        }
        physics.clear_forces();
    }
}
