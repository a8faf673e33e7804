use rocket_1dof::io::{csv, json};
use rocket_1dof::{simulate, MotorCurve, SimConfig};

fn main() {
    // Parameters of the classroom 1-DOF exercise (86 mm body, 0.625 kg of propellant)
    let config = SimConfig {
        gravity: 9.78,
        air_density: 1.0,
        dry_mass: 2.2,
        propellant_mass: 0.625,
        drag_coefficient: 0.75,
        reference_area: 0.005_81,
        exhaust_velocity: 960.0,
        ..SimConfig::default()
    };
    // 0.625 kg spread over a 1 s ramp-up, 1 s plateau and 1 s ramp-down
    let curve = MotorCurve::new(vec![(0.0, 0.0), (1.0, 0.3125), (2.0, 0.3125), (3.0, 0.0)]);

    println!(
        "Simulating {:.3} kg of propellant over {} curve points ...",
        curve.total_propellant(),
        curve.len()
    );
    let result = simulate(&config, &curve);

    for (kind, t) in result.events.timeline() {
        println!("{kind:<10} t = {t:.3} s");
    }
    if let Some(h) = result.maxima.altitude {
        println!("Max altitude: {h:.1} m");
    }

    csv::write_time_series_file("default_flight_trajectory.csv", &result.series)
        .expect("Failed to write CSV");
    json::write_metrics_file("default_flight_metrics.json", &result.metrics())
        .expect("Failed to write JSON");

    println!("Exported: default_flight_trajectory.csv, default_flight_metrics.json");
}
