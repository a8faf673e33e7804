use crate::dynamics::state::EPS;

// ---------------------------------------------------------------------------
// Mass-flow curve
// ---------------------------------------------------------------------------

/// Propellant mass-flow rate versus time, as `(time_s, mdot_kg_s)` samples
/// sorted by ascending time. Fewer than two samples means "no curve": the
/// rate is zero everywhere.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MotorCurve {
    samples: Vec<(f64, f64)>,
}

impl MotorCurve {
    /// Build a curve, sorting by time. Equal times keep their input order.
    pub fn new(mut samples: Vec<(f64, f64)>) -> Self {
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { samples }
    }

    /// The "no curve" sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in trapezoid: 0.5 s ramp-up to 3 kg/s, 4 s steady, 0.5 s ramp-down.
    pub fn default_trapezoid() -> Self {
        Self::new(vec![(0.0, 0.0), (0.5, 3.0), (4.5, 3.0), (5.0, 0.0)])
    }

    pub fn samples(&self) -> &[(f64, f64)] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// At least two samples, so there is something to interpolate.
    pub fn is_usable(&self) -> bool {
        self.samples.len() >= 2
    }

    /// First and last sample times.
    pub fn span(&self) -> Option<(f64, f64)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) if self.is_usable() => Some((first.0, last.0)),
            _ => None,
        }
    }

    /// Propellant the curve would burn if nothing cut it short (trapezoid rule), kg.
    pub fn total_propellant(&self) -> f64 {
        self.samples
            .windows(2)
            .map(|w| 0.5 * (w[0].1 + w[1].1) * (w[1].0 - w[0].0))
            .sum()
    }

    /// Instantaneous mass-flow rate at `t`, kg/s.
    ///
    /// Exact tabulated values at the two end times, zero outside the span,
    /// linear interpolation inside.
    pub fn rate(&self, t: f64) -> f64 {
        let (first, last) = match (self.samples.first(), self.samples.last()) {
            (Some(&first), Some(&last)) if self.is_usable() => (first, last),
            _ => return 0.0,
        };

        if t <= first.0 || t >= last.0 {
            if (t - first.0).abs() < EPS {
                return first.1;
            }
            if (t - last.0).abs() < EPS {
                return last.1;
            }
            return 0.0;
        }

        interpolate(&self.samples, t)
    }
}

/// Linear interpolation for `t` strictly inside the sample span.
fn interpolate(samples: &[(f64, f64)], t: f64) -> f64 {
    // first index whose time is >= t; the span check guarantees 1..len
    let hi = samples.partition_point(|s| s.0 < t);
    let (t0, r0) = samples[hi - 1];
    let (t1, r1) = samples[hi];
    r0 + (r1 - r0) * (t - t0) / (t1 - t0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
