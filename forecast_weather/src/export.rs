//! CSV serialization of forecast output

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::pipeline::ForecastSeries;

/// File name under which callers offer the export for download.
pub const CSV_FILE_NAME: &str = "forecast.csv";
/// MIME type of the exported artifact.
pub const CSV_MIME_TYPE: &str = "text/csv";
/// Export header, in column order.
pub const CSV_HEADER: [&str; 2] = ["Date", "Forecasted_Temperature"];
/// Date format shared with the input tables.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Write the forecast as CSV: one row per step, in date order.
pub fn write_csv<W: Write>(writer: W, forecast: &ForecastSeries) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for row in forecast.rows() {
        csv_writer.write_record([
            row.date.format(DATE_FORMAT).to_string(),
            row.temperature.to_string(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Render the forecast into an in-memory CSV byte buffer, ready to be
/// offered as a downloadable artifact.
pub fn to_csv_bytes(forecast: &ForecastSeries) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(&mut buffer, forecast)?;
    Ok(buffer)
}

/// Write the forecast CSV to a file.
pub fn write_csv_file<P: AsRef<Path>>(path: P, forecast: &ForecastSeries) -> Result<()> {
    let file = File::create(&path)?;
    write_csv(file, forecast)?;
    debug!(
        path = %path.as_ref().display(),
        rows = forecast.len(),
        "forecast exported"
    );
    Ok(())
}
