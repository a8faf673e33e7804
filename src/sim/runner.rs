use std::path::Path;

use tracing::debug;

use super::event::FlightEvents;
use super::integrator::euler_step;
use super::result::SimulationResult;
use crate::config::SimConfig;
use crate::dynamics::state::FlightState;
use crate::motor::{load_curve_or_default, MotorCurve};

// ---------------------------------------------------------------------------
// Full flight simulation
// ---------------------------------------------------------------------------

/// Simulate from the pad until touchdown or until the step budget
/// (`ceil(max_time / dt) + 2` samples) is used up.
///
/// The configuration is trusted; see [`SimConfig::validate`].
pub fn simulate(config: &SimConfig, curve: &MotorCurve) -> SimulationResult {
    let budget = config.step_budget();
    debug!(
        budget,
        dt = config.dt,
        initial_mass = config.initial_mass(),
        curve_samples = curve.len(),
        "starting flight"
    );

    let mut states = Vec::with_capacity(initial_capacity(budget));
    states.push(FlightState::on_pad(config.initial_mass()));
    let mut events = FlightEvents::default();

    for i in 0..budget.saturating_sub(1) {
        let mut step = euler_step(&states[i], config, curve);
        states[i] = step.start;

        let landed = events.record(&mut step, config.dry_mass);
        states.push(step.end_state(config.dry_mass));

        if landed {
            break;
        }
    }

    let result = SimulationResult::package(states, events);
    debug!(samples = result.series.len(), t_end = ?result.t_end, "flight finished");
    result
}

/// Samples reserved up front. Long budgets grow the buffer on demand.
const MAX_PREALLOCATED: usize = 1 << 16;

fn initial_capacity(budget: usize) -> usize {
    budget.min(MAX_PREALLOCATED)
}

/// Load the curve at `curve_path` (built-in trapezoid when there is none)
/// and simulate.
pub fn simulate_with_curve_path(config: &SimConfig, curve_path: Option<&Path>) -> SimulationResult {
    let curve = load_curve_or_default(curve_path);
    simulate(config, &curve)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::event::BurnoutCause;
    use approx::assert_abs_diff_eq;

    fn long_run() -> SimConfig {
        SimConfig {
            max_time: 200.0,
            ..SimConfig::default()
        }
    }

    #[test]
    fn default_flight_reaches_all_milestones() {
        let r = simulate(&long_run(), &MotorCurve::default_trapezoid());
        let b = r.events.burnout.expect("burnout");
        let a = r.events.apogee.expect("apogee");
        let td = r.events.touchdown.expect("touchdown");

        // 13.5 kg of the 30 kg load burns, so the curve ends first
        assert_eq!(b.cause, BurnoutCause::CurveEnd);
        assert_abs_diff_eq!(b.time, 5.0, epsilon = 0.02);
        assert!(b.time < a.time && a.time < td.time);
        assert!(a.altitude > 1_000.0, "apogee {}", a.altitude);
        assert_abs_diff_eq!(r.maxima.altitude.unwrap(), a.altitude, epsilon = 5.0);
    }

    #[test]
    fn touchdown_ends_run_on_the_ground() {
        let r = simulate(&long_run(), &MotorCurve::default_trapezoid());
        let last = r.series.last().unwrap();
        assert_eq!(last.altitude, 0.0);
        let td = r.events.touchdown.unwrap();
        assert!(td.time <= last.time + 1e-9);
        assert!(td.time > last.time - long_run().dt - 1e-9);
        assert_eq!(r.t_end, Some(last.time));
    }

    #[test]
    fn constant_flow_burns_out_between_steps() {
        // masses 10, 8, 6, 4 at t = 0, 1, 2, 3 with 5 kg dry -> MECO at 2.5 s
        let cfg = SimConfig {
            dt: 1.0,
            max_time: 6.0,
            dry_mass: 5.0,
            propellant_mass: 5.0,
            ..SimConfig::default()
        };
        let curve = MotorCurve::new(vec![(0.0, 2.0), (100.0, 2.0)]);
        let r = simulate(&cfg, &curve);

        assert_eq!(&r.series.mass[..4], &[10.0, 8.0, 6.0, 5.0]);
        let b = r.events.burnout.unwrap();
        assert_eq!(b.cause, BurnoutCause::PropellantExhausted);
        assert_abs_diff_eq!(b.time, 2.5, epsilon = 1e-9);
    }

    #[test]
    fn step_budget_bounds_the_series() {
        let cfg = SimConfig {
            max_time: 3.0,
            ..SimConfig::default()
        };
        let r = simulate(&cfg, &MotorCurve::default_trapezoid());
        assert!(r.events.touchdown.is_none());
        assert_eq!(r.series.len(), cfg.step_budget());
    }

    #[test]
    fn long_budgets_are_not_reserved_up_front() {
        let cfg = SimConfig {
            dt: 1e-4,
            max_time: 1000.0,
            ..SimConfig::default()
        };
        assert_eq!(cfg.step_budget(), 10_000_002);
        assert_eq!(initial_capacity(cfg.step_budget()), MAX_PREALLOCATED);
        assert_eq!(initial_capacity(52), 52);
    }

    #[test]
    fn budget_beyond_reservation_still_runs_to_touchdown() {
        // ~5300 samples at dt = 0.01; shrink the step so the run outgrows the reservation
        let cfg = SimConfig {
            dt: 5e-4,
            max_time: 200.0,
            ..SimConfig::default()
        };
        let r = simulate(&cfg, &MotorCurve::default_trapezoid());
        assert!(r.series.len() > MAX_PREALLOCATED);
        assert!(r.events.touchdown.is_some());
    }

    #[test]
    fn force_columns_lag_on_the_last_sample() {
        let cfg = SimConfig {
            max_time: 1.0,
            ..SimConfig::default()
        };
        let r = simulate(&cfg, &MotorCurve::default_trapezoid());
        let n = r.series.len();
        assert_eq!(r.series.thrust[n - 1], r.series.thrust[n - 2]);
        assert_eq!(r.series.acceleration[n - 1], r.series.acceleration[n - 2]);
    }

    #[test]
    fn missing_curve_path_uses_default() {
        let cfg = long_run();
        let from_path = simulate_with_curve_path(&cfg, Some(Path::new("/no/such/curve.csv")));
        let direct = simulate(&cfg, &MotorCurve::default_trapezoid());
        assert_eq!(from_path, direct);
    }
}
