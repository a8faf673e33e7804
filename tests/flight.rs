use std::io::Write;

use approx::assert_abs_diff_eq;
use rocket_1dof::sim::event::BurnoutCause;
use rocket_1dof::{simulate, simulate_with_curve_path, MotorCurve, SimConfig};

fn long_run() -> SimConfig {
    SimConfig {
        max_time: 200.0,
        ..SimConfig::default()
    }
}

#[test]
fn mass_never_increases_and_stays_above_dry() {
    let cfg = long_run();
    let r = simulate(&cfg, &MotorCurve::default_trapezoid());
    for pair in r.series.mass.windows(2) {
        assert!(pair[1] <= pair[0], "mass went up: {} -> {}", pair[0], pair[1]);
    }
    assert!(r.series.mass.iter().all(|&m| m >= cfg.dry_mass));
}

#[test]
fn propellant_exhaustion_floors_mass_at_dry() {
    // 40 kg/s for 2 s would need 80 kg; only 10 kg on board
    let cfg = SimConfig {
        propellant_mass: 10.0,
        ..long_run()
    };
    let curve = MotorCurve::new(vec![(0.0, 40.0), (2.0, 40.0)]);
    let r = simulate(&cfg, &curve);
    let b = r.events.burnout.expect("burnout");
    assert_eq!(b.cause, BurnoutCause::PropellantExhausted);
    assert_abs_diff_eq!(b.time, 0.25, epsilon = 1e-6);
    assert!(r.series.mass.iter().all(|&m| m >= cfg.dry_mass));
    assert_abs_diff_eq!(*r.series.mass.last().unwrap(), cfg.dry_mass, epsilon = 1e-9);
}

#[test]
fn empty_vehicle_rests_on_the_pad() {
    let cfg = SimConfig {
        propellant_mass: 0.0,
        ..SimConfig::default()
    };
    let r = simulate(&cfg, &MotorCurve::default_trapezoid());
    assert!(r.series.altitude.iter().all(|&h| h == 0.0));
    assert!(r.series.velocity.iter().all(|&v| v == 0.0));
    assert!(r.series.acceleration.iter().all(|&a| a == 0.0));
    assert!(r.events.burnout.is_none());
    assert!(r.events.apogee.is_none());
    assert!(r.events.touchdown.is_none());
    // ran the whole budget
    assert_eq!(r.series.len(), cfg.step_budget());
}

#[test]
fn weak_motor_never_lifts_off() {
    // 0.2 kg/s * 960 m/s = 192 N against ~490 N of weight
    let cfg = SimConfig::default();
    let curve = MotorCurve::new(vec![(0.0, 0.2), (3.0, 0.2)]);
    let r = simulate(&cfg, &curve);
    assert_eq!(r.maxima.altitude, Some(0.0));
    assert!(r.events.apogee.is_none());
    assert!(r.events.touchdown.is_none());
    // the burn itself still ends with the curve
    let b = r.events.burnout.expect("curve end");
    assert_eq!(b.cause, BurnoutCause::CurveEnd);
    assert_eq!(b.altitude, 0.0);
}

#[test]
fn degenerate_curve_means_no_thrust() {
    let cfg = SimConfig::default();
    let r = simulate(&cfg, &MotorCurve::new(vec![(0.0, 5.0)]));
    assert!(r.series.thrust.iter().all(|&t| t == 0.0));
    assert!(r.events.burnout.is_none());
    assert_eq!(r.series.mass.last().copied(), Some(cfg.initial_mass()));
}

#[test]
fn identical_inputs_give_identical_results() {
    let cfg = long_run();
    let curve = MotorCurve::default_trapezoid();
    let a = simulate(&cfg, &curve);
    let b = simulate(&cfg, &curve);
    assert_eq!(a, b);
    let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&a.series.altitude), bits(&b.series.altitude));
    assert_eq!(a.metrics(), b.metrics());
}

#[test]
fn every_run_terminates_within_budget() {
    let curve = MotorCurve::default_trapezoid();
    for (dt, max_time) in [(0.1, 5.0), (0.05, 1000.0), (0.001, 20.0)] {
        let cfg = SimConfig {
            dt,
            max_time,
            ..SimConfig::default()
        };
        let r = simulate(&cfg, &curve);
        assert!(r.series.len() <= cfg.step_budget());
        assert!(r.series.len() == cfg.step_budget() || r.events.touchdown.is_some());
    }
}

#[test]
fn events_are_ordered_and_consistent() {
    let r = simulate(&long_run(), &MotorCurve::default_trapezoid());
    let b = r.events.burnout.unwrap();
    let a = r.events.apogee.unwrap();
    let td = r.events.touchdown.unwrap();
    assert!(0.0 < b.time && b.time < a.time && a.time < td.time);
    assert!(b.velocity > 0.0);
    assert!(a.altitude > b.altitude);
    assert!(r.maxima.velocity.unwrap() >= b.velocity - 1.0);
    assert_eq!(*r.series.altitude.last().unwrap(), 0.0);
    assert!(r.series.altitude.iter().all(|&h| h >= 0.0));
}

#[test]
fn smaller_steps_converge() {
    let curve = MotorCurve::default_trapezoid();
    let coarse = simulate(&SimConfig { dt: 0.01, ..long_run() }, &curve);
    let fine = simulate(&SimConfig { dt: 0.001, ..long_run() }, &curve);
    let ha = coarse.events.apogee.unwrap().altitude;
    let hb = fine.events.apogee.unwrap().altitude;
    assert!((ha - hb).abs() / hb < 0.01, "apogee {ha} vs {hb}");
}

#[test]
fn curve_file_drives_the_run() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Time_S,MDOT_kg_s").unwrap();
    writeln!(file, "0.0,0.0").unwrap();
    writeln!(file, "0.5,3.0").unwrap();
    writeln!(file, "4.5,3.0").unwrap();
    writeln!(file, "5.0,0.0").unwrap();

    let cfg = long_run();
    let from_file = simulate_with_curve_path(&cfg, Some(file.path()));
    let built_in = simulate(&cfg, &MotorCurve::default_trapezoid());
    assert_eq!(from_file, built_in);
}
