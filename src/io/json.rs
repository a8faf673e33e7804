use std::fs;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::result::Metrics;

/// Write the metrics record as pretty-printed JSON.
pub fn write_metrics<W: Write>(mut writer: W, metrics: &Metrics) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, metrics)?;
    writeln!(writer)?;
    writer.flush()
}

/// Write the metrics JSON to `path`, creating parent directories.
pub fn write_metrics_file<P: AsRef<Path>>(path: P, metrics: &Metrics) -> io::Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = fs::File::create(path)?;
    write_metrics(io::BufWriter::new(file), metrics)
}
