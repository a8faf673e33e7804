pub mod forces;
pub mod state;

pub use forces::{signum, thrust_direction, Forces, Signum};
pub use state::{FlightState, EPS};
