use std::fs;
use std::io::Write;
use std::path::Path;

use crate::sim::result::TimeSeries;

/// Column names, in the order written.
pub const HEADER: [&str; 8] = [
    "time_s",
    "altitude_m",
    "velocity_m_s",
    "mass_kg",
    "acceleration_m_s2",
    "thrust_n",
    "drag_n",
    "weight_n",
];

/// Write the trajectory as CSV, one row per sample.
pub fn write_time_series<W: Write>(writer: W, series: &TimeSeries) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(HEADER)?;

    for i in 0..series.len() {
        let row = [
            series.time[i],
            series.altitude[i],
            series.velocity[i],
            series.mass[i],
            series.acceleration[i],
            series.thrust[i],
            series.drag[i],
            series.weight[i],
        ];
        wtr.write_record(row.iter().map(|v| v.to_string()))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the trajectory CSV to `path`, creating parent directories.
pub fn write_time_series_file<P: AsRef<Path>>(path: P, series: &TimeSeries) -> csv::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = fs::File::create(path)?;
    write_time_series(file, series)
}
