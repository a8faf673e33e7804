use tracing::info;

use super::integrator::Step;
use crate::dynamics::state::EPS;

// ---------------------------------------------------------------------------
// Flight events
// ---------------------------------------------------------------------------

/// Kinds of milestone events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Burnout,
    Apogee,
    Touchdown,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::Burnout => "MECO",
            EventKind::Apogee => "APOGEE",
            EventKind::Touchdown => "TOUCHDOWN",
        };
        f.pad(name)
    }
}

/// End of powered flight (MECO).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnoutEvent {
    pub time: f64,
    pub altitude: f64,
    pub velocity: f64,
    pub cause: BurnoutCause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnoutCause {
    /// Mass reached the dry mass inside the step.
    PropellantExhausted,
    /// The mass-flow curve dropped to zero at the end of the step.
    CurveEnd,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApogeeEvent {
    pub time: f64,
    pub altitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchdownEvent {
    pub time: f64,
}

// ---------------------------------------------------------------------------
// Crossing interpolation
// ---------------------------------------------------------------------------

/// Fraction of the step at which a quantity going from `before` (> 0) to
/// `after` (<= 0) crosses zero. `EPS` in the denominator keeps it finite.
pub fn crossing_fraction(before: f64, after: f64) -> f64 {
    before / (before - after + EPS)
}

fn lerp(a: f64, b: f64, theta: f64) -> f64 {
    a + theta * (b - a)
}

// ---------------------------------------------------------------------------
// Detectors (pure: one step in, at most one record out)
// ---------------------------------------------------------------------------

/// Mass drops to the dry mass during the step.
pub fn detect_propellant_exhaustion(step: &Step, dry_mass: f64) -> Option<BurnoutEvent> {
    let s = &step.start;
    if s.mass > dry_mass + EPS && step.mass <= dry_mass + EPS {
        let theta = crossing_fraction(s.mass - dry_mass, step.mass - dry_mass);
        Some(BurnoutEvent {
            time: s.time + theta * step.dt,
            altitude: lerp(s.altitude, step.altitude, theta),
            velocity: lerp(s.velocity, step.velocity, theta),
            cause: BurnoutCause::PropellantExhausted,
        })
    } else {
        None
    }
}

/// Mass flow was on for this step and the curve is off at its end. No
/// sub-step refinement: the end-of-step values are recorded.
pub fn detect_curve_end(step: &Step) -> Option<BurnoutEvent> {
    if step.mass_flow > EPS && step.next_mass_flow <= EPS {
        Some(BurnoutEvent {
            time: step.time,
            altitude: step.altitude,
            velocity: step.velocity,
            cause: BurnoutCause::CurveEnd,
        })
    } else {
        None
    }
}

/// Velocity crosses zero going down.
pub fn detect_apogee(step: &Step) -> Option<ApogeeEvent> {
    let s = &step.start;
    if s.velocity > 0.0 && step.velocity <= 0.0 {
        let theta = crossing_fraction(s.velocity, step.velocity);
        Some(ApogeeEvent {
            time: s.time + theta * step.dt,
            altitude: lerp(s.altitude, step.altitude, theta),
        })
    } else {
        None
    }
}

/// Altitude crosses zero on the way down.
pub fn detect_touchdown(step: &Step) -> Option<TouchdownEvent> {
    let s = &step.start;
    if s.altitude > 0.0 && step.altitude <= 0.0 {
        let theta = crossing_fraction(s.altitude, step.altitude);
        Some(TouchdownEvent {
            time: s.time + theta * step.dt,
        })
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Event log for one run
// ---------------------------------------------------------------------------

/// Milestones of a run. Each slot is written at most once.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightEvents {
    pub burnout: Option<BurnoutEvent>,
    pub apogee: Option<ApogeeEvent>,
    pub touchdown: Option<TouchdownEvent>,
}

impl FlightEvents {
    /// Run every armed detector on `step`, in order: burnout by mass,
    /// burnout by curve end, apogee, touchdown. A touchdown pins the step's
    /// end altitude to exactly 0. Returns true when touchdown was recorded
    /// by this step.
    pub fn record(&mut self, step: &mut Step, dry_mass: f64) -> bool {
        if self.burnout.is_none() {
            let found =
                detect_propellant_exhaustion(step, dry_mass).or_else(|| detect_curve_end(step));
            if let Some(b) = found {
                info!(t = b.time, h = b.altitude, v = b.velocity, cause = ?b.cause, "MECO");
                self.burnout = Some(b);
            }
        }

        if self.apogee.is_none() {
            if let Some(a) = detect_apogee(step) {
                info!(t = a.time, h = a.altitude, "apogee");
                self.apogee = Some(a);
            }
        }

        if self.touchdown.is_none() {
            if let Some(td) = detect_touchdown(step) {
                info!(t = td.time, "touchdown");
                self.touchdown = Some(td);
                step.altitude = 0.0;
                return true;
            }
        }
        false
    }

    /// Recorded events in time order.
    pub fn timeline(&self) -> Vec<(EventKind, f64)> {
        let mut out = Vec::with_capacity(3);
        if let Some(b) = self.burnout {
            out.push((EventKind::Burnout, b.time));
        }
        if let Some(a) = self.apogee {
            out.push((EventKind::Apogee, a.time));
        }
        if let Some(td) = self.touchdown {
            out.push((EventKind::Touchdown, td.time));
        }
        out.sort_by(|a, b| a.1.total_cmp(&b.1));
        out
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
