//! Vertical (one degree of freedom) rocket flight simulation.
//!
//! Thrust comes from a tabulated propellant mass-flow curve; gravity and
//! quadratic drag oppose it. A fixed-step forward-Euler loop integrates
//! altitude, velocity and mass from the pad until touchdown and locates
//! burnout, apogee and touchdown inside the step where each occurs.

pub mod config;
pub mod dynamics;
pub mod error;
pub mod io;
pub mod motor;
pub mod sim;

pub use config::SimConfig;
pub use dynamics::state::FlightState;
pub use error::{Error, Result};
pub use motor::MotorCurve;
pub use sim::{simulate, simulate_with_curve_path, Metrics, SimulationResult, TimeSeries};
