use std::io;
use std::process;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rocket_1dof::config::{reference_area_from_diameter, SimConfig};
use rocket_1dof::io::{csv, json};
use rocket_1dof::motor::load_curve_or_default;
use rocket_1dof::sim::{self, SimulationResult};
use rocket_1dof::{MotorCurve, Result};

#[derive(Parser)]
#[command(
    name = "rocket-1dof",
    version,
    about = "Vertical 1-DOF rocket flight simulator (forward Euler, fixed step)"
)]
struct Cli {
    /// Integration step dt (s)
    #[arg(long)]
    dt: Option<f64>,

    /// Maximum simulated time (s)
    #[arg(long)]
    tmax: Option<f64>,

    /// Gravity g (m/s^2)
    #[arg(long)]
    g: Option<f64>,

    /// Air density rho (kg/m^3)
    #[arg(long)]
    rho: Option<f64>,

    /// Drag coefficient Cd
    #[arg(long)]
    cd: Option<f64>,

    /// Reference area A (m^2)
    #[arg(long, conflicts_with = "diameter")]
    area: Option<f64>,

    /// Body diameter D (m); sets A = pi (D/2)^2
    #[arg(long)]
    diameter: Option<f64>,

    /// Dry mass (kg)
    #[arg(long)]
    m_dry: Option<f64>,

    /// Propellant mass (kg)
    #[arg(long)]
    m_prop: Option<f64>,

    /// Exhaust velocity ue (m/s)
    #[arg(long)]
    ue: Option<f64>,

    /// Mass-flow curve CSV (time_s,mdot_kg_s); built-in trapezoid if absent
    #[arg(long)]
    curve: Option<PathBuf>,

    /// JSON parameter file (dt, tmax, rho, g, Cd, A, D, m_dry, m_prop, ue)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for metrics.json and trajectory.csv
    #[arg(long, default_value = "plots")]
    out: PathBuf,

    /// Do not write any files
    #[arg(long, default_value_t = false)]
    no_files: bool,

    /// What to print on stdout
    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Json)]
    output: OutputFormat,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

impl Cli {
    /// Defaults, then the parameter file, then explicit flags.
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::from_json_file(path)?,
            None => SimConfig::default(),
        };

        let overrides = [
            (&mut config.dt, self.dt),
            (&mut config.max_time, self.tmax),
            (&mut config.gravity, self.g),
            (&mut config.air_density, self.rho),
            (&mut config.drag_coefficient, self.cd),
            (&mut config.reference_area, self.area),
            (&mut config.dry_mass, self.m_dry),
            (&mut config.propellant_mass, self.m_prop),
            (&mut config.exhaust_velocity, self.ue),
        ];
        for (field, value) in overrides {
            if let Some(v) = value {
                *field = v;
            }
        }
        if let Some(d) = self.diameter {
            config.reference_area = reference_area_from_diameter(d);
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = cli.sim_config()?;
    let curve = load_curve_or_default(cli.curve.as_deref());

    let result = sim::simulate(&config, &curve);
    let metrics = result.metrics();

    if !cli.no_files {
        let metrics_path = cli.out.join("metrics.json");
        let csv_path = cli.out.join("trajectory.csv");
        json::write_metrics_file(&metrics_path, &metrics)?;
        csv::write_time_series_file(&csv_path, &result.series)?;
        info!("wrote {} and {}", metrics_path.display(), csv_path.display());
    }

    match cli.output {
        OutputFormat::Json => json::write_metrics(io::stdout().lock(), &metrics)?,
        OutputFormat::Table => print_report(&config, &curve, &result),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Text report
// ---------------------------------------------------------------------------

fn fmt_opt(v: Option<f64>, width: usize, precision: usize) -> String {
    match v {
        Some(x) => format!("{:>width$.precision$}", x),
        None => format!("{:>width$}", "-"),
    }
}

fn print_report(config: &SimConfig, curve: &MotorCurve, result: &SimulationResult) {
    println!();
    println!("====================================================================");
    println!("  1-DOF VERTICAL FLIGHT");
    println!("====================================================================");
    println!();
    println!("  Vehicle Parameters");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  Dry mass:      {:>8.2} kg    Propellant:   {:>8.2} kg",
        config.dry_mass, config.propellant_mass
    );
    println!(
        "  Cd:            {:>8.3}       Area:         {:>8.5} m^2",
        config.drag_coefficient, config.reference_area
    );
    println!(
        "  ue:            {:>8.0} m/s   Curve burn:   {:>8.2} kg ({} pts)",
        config.exhaust_velocity,
        curve.total_propellant(),
        curve.len()
    );
    println!(
        "  g:             {:>8.3} m/s^2 rho:          {:>8.3} kg/m^3",
        config.gravity, config.air_density
    );
    println!();

    let metrics = result.metrics();
    println!("  Flight Events");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  MECO      t={}s   alt={}m   vel={}m/s",
        fmt_opt(metrics.meco.t, 7, 3),
        fmt_opt(metrics.meco.h, 9, 1),
        fmt_opt(metrics.meco.v, 7, 1),
    );
    println!(
        "  APOGEE    t={}s   alt={}m",
        fmt_opt(metrics.apogee.t, 7, 3),
        fmt_opt(metrics.apogee.h, 9, 1),
    );
    println!("  TOUCHDOWN t={}s", fmt_opt(metrics.touchdown.t, 7, 3));
    println!();

    println!("  Performance Summary");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!("  Max altitude:  {} m", fmt_opt(metrics.maxima.h_max, 10, 1));
    println!("  Max velocity:  {} m/s", fmt_opt(metrics.maxima.v_max, 10, 1));
    println!("  Max accel:     {} m/s^2", fmt_opt(metrics.maxima.a_max, 10, 1));
    println!("  Final time:    {} s", fmt_opt(metrics.final_state.t_end, 10, 2));
    println!();

    println!("  Trajectory");
    println!("  ──────────────────────────────────────────────────────────────────");
    println!(
        "  {:>7}  {:>9}  {:>9}  {:>8}  {:>9}  {:>7}",
        "t (s)", "alt (m)", "vel (m/s)", "mass(kg)", "thrust(N)", "phase"
    );
    println!("  {}", "─".repeat(60));

    let series = &result.series;
    let burnout_t = metrics.meco.t.unwrap_or(f64::INFINITY);
    let sample_interval = (series.len() / 30).max(1);
    for i in (0..series.len()).filter(|&i| i % sample_interval == 0 || i + 1 == series.len()) {
        let Some(s) = series.get(i) else { continue };
        let phase = if s.time < burnout_t {
            "BURN"
        } else if s.velocity > 0.0 {
            "COAST"
        } else {
            "DESC"
        };
        println!(
            "  {:>7.2}  {:>9.1}  {:>9.1}  {:>8.3}  {:>9.1}  {:>7}",
            s.time, s.altitude, s.velocity, s.mass, s.thrust, phase
        );
    }

    println!();
    println!("  Simulation: {} samples, dt={} s", series.len(), config.dt);
    println!("====================================================================");
    println!();
}
