pub mod event;
pub mod integrator;
pub mod result;
pub mod runner;

pub use event::{EventKind, FlightEvents};
pub use integrator::{euler_step, Step};
pub use result::{Metrics, SimulationResult, TimeSeries};
pub use runner::{simulate, simulate_with_curve_path};
