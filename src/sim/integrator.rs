use crate::config::SimConfig;
use crate::dynamics::forces::{held_by_ground, Forces};
use crate::dynamics::state::{FlightState, EPS};
use crate::motor::MotorCurve;

// ---------------------------------------------------------------------------
// One explicit time step
// ---------------------------------------------------------------------------

/// Start and end of a single step, as seen by the event detectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub dt: f64,
    /// State at the start of the step, force columns filled in.
    pub start: FlightState,
    pub time: f64,     // end of step, s
    pub altitude: f64, // m
    pub velocity: f64, // m/s
    /// `m - mdot dt` before the dry-mass floor is applied.
    pub mass: f64,
    /// Mass-flow rate used over the step (zero once dry).
    pub mass_flow: f64,
    /// Curve rate at the end time, without the dry-mass cutoff.
    pub next_mass_flow: f64,
}

impl Step {
    /// State written for the end of the step; mass floored at `dry_mass`.
    pub fn end_state(&self, dry_mass: f64) -> FlightState {
        self.start
            .advanced(self.time, self.altitude, self.velocity, self.mass.max(dry_mass))
    }
}

/// Mass-flow rate at the current state: the curve value, or zero once the
/// propellant is gone.
pub fn mass_flow_at(state: &FlightState, dry_mass: f64, curve: &MotorCurve) -> f64 {
    if state.mass <= dry_mass + EPS {
        0.0
    } else {
        curve.rate(state.time)
    }
}

/// Single forward-Euler step with the ground-contact guard.
///
/// While the pad holds the vehicle (on the ground, not climbing, net force
/// not upward) acceleration is zeroed and altitude/velocity stay exactly 0.
/// Mass and time advance in either case.
pub fn euler_step(state: &FlightState, config: &SimConfig, curve: &MotorCurve) -> Step {
    let dt = config.dt;
    let mdot = mass_flow_at(state, config.dry_mass, curve);
    let forces = Forces::evaluate(config, mdot, state.velocity, state.mass);
    let mut accel = forces.acceleration(config.gravity, state.velocity, state.mass);

    let (altitude, velocity) = if held_by_ground(state.altitude, state.velocity, &forces) {
        accel = 0.0;
        (0.0, 0.0)
    } else {
        (
            state.altitude + state.velocity * dt,
            state.velocity + accel * dt,
        )
    };

    let time = state.time + dt;
    Step {
        dt,
        start: FlightState {
            acceleration: accel,
            thrust: forces.thrust,
            drag: forces.drag,
            weight: forces.weight,
            ..*state
        },
        time,
        altitude,
        velocity,
        mass: state.mass - mdot * dt,
        mass_flow: mdot,
        next_mass_flow: curve.rate(time),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
