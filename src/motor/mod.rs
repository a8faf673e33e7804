pub mod curve;
pub mod source;

pub use curve::MotorCurve;
pub use source::{load_curve, load_curve_or_default, read_curve, read_curve_file, CurveError};
