use serde::{Deserialize, Serialize};

use super::event::FlightEvents;
use crate::dynamics::state::FlightState;

// ---------------------------------------------------------------------------
// Time series
// ---------------------------------------------------------------------------

/// Column-oriented trajectory, one entry per sample.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub time: Vec<f64>,
    pub altitude: Vec<f64>,
    pub velocity: Vec<f64>,
    pub mass: Vec<f64>,
    pub acceleration: Vec<f64>,
    pub thrust: Vec<f64>,
    pub drag: Vec<f64>,
    pub weight: Vec<f64>,
}

impl TimeSeries {
    pub fn from_states(states: &[FlightState]) -> Self {
        let column = |f: fn(&FlightState) -> f64| states.iter().map(f).collect::<Vec<_>>();
        Self {
            time: column(|s| s.time),
            altitude: column(|s| s.altitude),
            velocity: column(|s| s.velocity),
            mass: column(|s| s.mass),
            acceleration: column(|s| s.acceleration),
            thrust: column(|s| s.thrust),
            drag: column(|s| s.drag),
            weight: column(|s| s.weight),
        }
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Sample `i` as a row.
    pub fn get(&self, i: usize) -> Option<FlightState> {
        (i < self.len()).then(|| FlightState {
            time: self.time[i],
            altitude: self.altitude[i],
            velocity: self.velocity[i],
            mass: self.mass[i],
            acceleration: self.acceleration[i],
            thrust: self.thrust[i],
            drag: self.drag[i],
            weight: self.weight[i],
        })
    }

    pub fn last(&self) -> Option<FlightState> {
        self.len().checked_sub(1).and_then(|i| self.get(i))
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Maxima {
    pub altitude: Option<f64>,
    pub velocity: Option<f64>,
    pub acceleration: Option<f64>,
}

impl Maxima {
    pub fn from_series(series: &TimeSeries) -> Self {
        Self {
            altitude: max_of(&series.altitude),
            velocity: max_of(&series.velocity),
            acceleration: max_of(&series.acceleration),
        }
    }
}

fn max_of(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub series: TimeSeries,
    pub events: FlightEvents,
    pub maxima: Maxima,
    pub t_end: Option<f64>,
}

impl SimulationResult {
    /// Trim the raw buffer and assemble the result. No physics here.
    pub fn package(mut states: Vec<FlightState>, events: FlightEvents) -> Self {
        states.truncate(trimmed_len(&states));
        let series = TimeSeries::from_states(&states);
        let maxima = Maxima::from_series(&series);
        let t_end = series.time.last().copied();
        Self {
            series,
            events,
            maxima,
            t_end,
        }
    }

    pub fn metrics(&self) -> Metrics {
        Metrics::from(self)
    }
}

/// Length up to and including the last sample with `time > 0`, or 1 when
/// the run never left t = 0.
pub fn trimmed_len(states: &[FlightState]) -> usize {
    match states.iter().rposition(|s| s.time > 0.0) {
        Some(last) => last + 1,
        None => states.len().min(1),
    }
}

// ---------------------------------------------------------------------------
// Metrics record (external JSON contract)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(rename = "MECO")]
    pub meco: MecoMetrics,
    pub apogee: ApogeeMetrics,
    pub touchdown: TouchdownMetrics,
    pub maxima: MaximaMetrics,
    #[serde(rename = "final")]
    pub final_state: FinalMetrics,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MecoMetrics {
    pub t: Option<f64>,
    pub h: Option<f64>,
    #[serde(rename = "V")]
    pub v: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApogeeMetrics {
    pub t: Option<f64>,
    pub h: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TouchdownMetrics {
    pub t: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaximaMetrics {
    pub h_max: Option<f64>,
    #[serde(rename = "V_max")]
    pub v_max: Option<f64>,
    pub a_max: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalMetrics {
    pub t_end: Option<f64>,
}

impl From<&SimulationResult> for Metrics {
    fn from(r: &SimulationResult) -> Self {
        let b = r.events.burnout;
        let a = r.events.apogee;
        Metrics {
            meco: MecoMetrics {
                t: b.map(|e| e.time),
                h: b.map(|e| e.altitude),
                v: b.map(|e| e.velocity),
            },
            apogee: ApogeeMetrics {
                t: a.map(|e| e.time),
                h: a.map(|e| e.altitude),
            },
            touchdown: TouchdownMetrics {
                t: r.events.touchdown.map(|e| e.time),
            },
            maxima: MaximaMetrics {
                h_max: r.maxima.altitude,
                v_max: r.maxima.velocity,
                a_max: r.maxima.acceleration,
            },
            final_state: FinalMetrics { t_end: r.t_end },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
