// ---------------------------------------------------------------------------
// Numeric tolerance
// ---------------------------------------------------------------------------

/// Absolute tolerance used for every near-zero comparison in the engine
/// (curve boundaries, dry-mass reached, ground contact, signum, and the
/// epsilon added to interpolation denominators).
pub const EPS: f64 = 1e-12;

// ---------------------------------------------------------------------------
// 1DOF state: one sample of the vertical flight
// ---------------------------------------------------------------------------

/// One discrete sample of the flight. Up is positive.
///
/// `acceleration`, `thrust`, `drag` and `weight` are the values evaluated
/// at the start of the step that leaves this sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightState {
    pub time: f64,         // s
    pub altitude: f64,     // m
    pub velocity: f64,     // m/s, signed
    pub mass: f64,         // kg  (never below dry mass)
    pub acceleration: f64, // m/s^2
    pub thrust: f64,       // N
    pub drag: f64,         // N, signed (positive while ascending)
    pub weight: f64,       // N
}

impl FlightState {
    /// Vehicle sitting on the pad at t = 0 with the given total mass.
    pub fn on_pad(mass: f64) -> Self {
        Self {
            mass,
            ..Self::default()
        }
    }

    /// Next sample: new kinematic values, force columns carried over from
    /// this sample until the next step evaluates them.
    pub fn advanced(&self, time: f64, altitude: f64, velocity: f64, mass: f64) -> Self {
        Self {
            time,
            altitude,
            velocity,
            mass,
            ..*self
        }
    }
}
