use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::{debug, warn};

use super::curve::MotorCurve;

/// Header of the time column (matched case-insensitively).
pub const TIME_COLUMN: &str = "time_s";
/// Header of the mass-flow column (matched case-insensitively).
pub const MASS_FLOW_COLUMN: &str = "mdot_kg_s";

/// Errors raised by the strict curve reader.
#[derive(Debug, Error)]
pub enum CurveError {
    #[error("failed to read mass-flow curve: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse mass-flow curve: {0}")]
    Csv(#[from] csv::Error),
    #[error("mass-flow curve needs at least two columns, found {0}")]
    TooFewColumns(usize),
    #[error("row {row}: cannot parse {value:?} as a number")]
    BadNumber { row: usize, value: String },
}

// ---------------------------------------------------------------------------
// Column resolution
// ---------------------------------------------------------------------------

/// Indices of the time and mass-flow columns. Named columns win; otherwise
/// the first and second columns are used.
pub fn resolve_columns(headers: &StringRecord) -> (usize, usize) {
    let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));

    let time = find(TIME_COLUMN).unwrap_or_else(|| {
        warn!("no '{}' column, using column 0 as time", TIME_COLUMN);
        0
    });
    let mdot = find(MASS_FLOW_COLUMN).unwrap_or_else(|| {
        warn!("no '{}' column, using column 1 as mass flow", MASS_FLOW_COLUMN);
        1
    });
    (time, mdot)
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Strictly read a headed two-column table from any reader.
pub fn read_curve<R: Read>(reader: R) -> Result<MotorCurve, CurveError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    if headers.len() < 2 {
        return Err(CurveError::TooFewColumns(headers.len()));
    }
    let (time_idx, mdot_idx) = resolve_columns(&headers);

    let mut samples = Vec::new();
    for (i, rec) in rdr.records().enumerate() {
        let r = rec?;
        let row = i + 2; // 1-based, after the header line
        let t = parse_cell(&r, time_idx, row)?;
        let mdot = parse_cell(&r, mdot_idx, row)?;
        samples.push((t, mdot));
    }
    Ok(MotorCurve::new(samples))
}

/// Strictly read a curve from a CSV file.
pub fn read_curve_file<P: AsRef<Path>>(path: P) -> Result<MotorCurve, CurveError> {
    let file = std::fs::File::open(path)?;
    read_curve(file)
}

/// Best-effort load. `None` when no path is given, the file does not exist,
/// or it cannot be read as a table; failures are logged, never raised.
/// A readable table with fewer than two rows is returned as a degenerate
/// curve (zero thrust), not replaced.
pub fn load_curve(path: Option<&Path>) -> Option<MotorCurve> {
    let path = path?;
    if !path.exists() {
        debug!("curve file {} not found", path.display());
        return None;
    }
    match read_curve_file(path) {
        Ok(curve) => {
            debug!("loaded {} mass-flow samples from {}", curve.len(), path.display());
            Some(curve)
        }
        Err(err) => {
            warn!("ignoring mass-flow curve {}: {}", path.display(), err);
            None
        }
    }
}

/// Load the curve at `path`, substituting the built-in trapezoid when there
/// is no usable source.
pub fn load_curve_or_default(path: Option<&Path>) -> MotorCurve {
    load_curve(path).unwrap_or_else(|| {
        debug!("using built-in trapezoidal mass-flow curve");
        MotorCurve::default_trapezoid()
    })
}

fn parse_cell(record: &StringRecord, idx: usize, row: usize) -> Result<f64, CurveError> {
    let value = record.get(idx).unwrap_or("");
    value.parse::<f64>().map_err(|_| CurveError::BadNumber {
        row,
        value: value.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
