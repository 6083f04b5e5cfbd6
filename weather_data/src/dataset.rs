//! Dataset loading and per-country series extraction

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tracing::debug;

use crate::error::{DataError, Result};
use crate::observation::{Observation, ObservationSeries};

/// Grouping column.
pub const COUNTRY_COLUMN: &str = "country";
/// Timestamp column.
pub const TIMESTAMP_COLUMN: &str = "last_updated";
/// Value column.
pub const TEMPERATURE_COLUMN: &str = "temperature_celsius";

/// A fully parsed input table.
///
/// Construction validates every required cell; a dataset either loads
/// completely or not at all. Row order is preserved as read, and only
/// matters once [`WeatherDataset::series_for`] sorts a country's records.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherDataset {
    observations: Vec<Observation>,
}

impl WeatherDataset {
    /// Load a dataset from a CSV file.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Self::from_dataframe(df)
    }

    /// Build a dataset from an existing DataFrame.
    pub fn from_dataframe(df: DataFrame) -> Result<Self> {
        for column in [COUNTRY_COLUMN, TIMESTAMP_COLUMN, TEMPERATURE_COLUMN] {
            if !df.get_column_names().iter().any(|name| *name == column) {
                return Err(DataError::MissingColumn(column.to_string()));
            }
        }

        let countries = extract_strings(&df, COUNTRY_COLUMN)?;
        let timestamps = extract_timestamps(&df, TIMESTAMP_COLUMN)?;
        let temperatures = extract_floats(&df, TEMPERATURE_COLUMN)?;

        let observations: Vec<Observation> = countries
            .into_iter()
            .zip(timestamps)
            .zip(temperatures)
            .map(|((country, recorded_at), temperature)| Observation {
                recorded_at,
                country,
                temperature,
            })
            .collect();

        debug!(rows = observations.len(), "weather dataset loaded");

        Ok(Self { observations })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset holds no rows.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// All rows, in input order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Distinct countries, sorted, for user selection.
    pub fn countries(&self) -> Vec<String> {
        let mut countries: Vec<String> = self
            .observations
            .iter()
            .map(|obs| obs.country.clone())
            .collect();
        countries.sort();
        countries.dedup();
        countries
    }

    /// All observations for one country, ascending by timestamp.
    ///
    /// An unknown country yields an empty series; downstream length
    /// validation decides what to do with it.
    pub fn series_for(&self, country: &str) -> ObservationSeries {
        let observations: Vec<Observation> = self
            .observations
            .iter()
            .filter(|obs| obs.country == country)
            .cloned()
            .collect();

        ObservationSeries::new(country, observations)
    }
}

fn extract_strings(df: &DataFrame, column: &str) -> Result<Vec<String>> {
    let col = df.column(column)?;
    match col.dtype() {
        DataType::Utf8 => {
            let mut values = Vec::with_capacity(col.len());
            for (row, value) in col.utf8()?.into_iter().enumerate() {
                match value {
                    Some(v) => values.push(v.to_string()),
                    None => {
                        return Err(DataError::MissingValue {
                            row,
                            column: column.to_string(),
                        })
                    }
                }
            }
            Ok(values)
        }
        other => Err(DataError::ColumnType {
            column: column.to_string(),
            dtype: other.to_string(),
        }),
    }
}

fn extract_floats(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
    let col = df.column(column)?;

    let raw: Vec<Option<f64>> = match col.dtype() {
        DataType::Float64 => col.f64()?.into_iter().collect(),
        DataType::Float32 => col
            .f32()?
            .into_iter()
            .map(|v| v.map(|v| v as f64))
            .collect(),
        DataType::Int64 => col
            .i64()?
            .into_iter()
            .map(|v| v.map(|v| v as f64))
            .collect(),
        DataType::Int32 => col
            .i32()?
            .into_iter()
            .map(|v| v.map(|v| v as f64))
            .collect(),
        other => {
            return Err(DataError::ColumnType {
                column: column.to_string(),
                dtype: other.to_string(),
            })
        }
    };

    let mut values = Vec::with_capacity(raw.len());
    for (row, value) in raw.into_iter().enumerate() {
        match value {
            Some(v) => values.push(v),
            None => {
                return Err(DataError::MissingValue {
                    row,
                    column: column.to_string(),
                })
            }
        }
    }
    Ok(values)
}

fn extract_timestamps(df: &DataFrame, column: &str) -> Result<Vec<NaiveDateTime>> {
    let col = df.column(column)?;

    match col.dtype() {
        DataType::Utf8 => {
            let mut values = Vec::with_capacity(col.len());
            for (row, value) in col.utf8()?.into_iter().enumerate() {
                let raw = value.ok_or_else(|| DataError::MissingValue {
                    row,
                    column: column.to_string(),
                })?;
                let parsed = parse_timestamp(raw).ok_or_else(|| DataError::InvalidTimestamp {
                    row,
                    value: raw.to_string(),
                })?;
                values.push(parsed);
            }
            Ok(values)
        }
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            let mut values = Vec::with_capacity(col.len());
            for (row, value) in col.datetime()?.into_iter().enumerate() {
                let raw = value.ok_or_else(|| DataError::MissingValue {
                    row,
                    column: column.to_string(),
                })?;
                let parsed =
                    timestamp_from_raw(raw, unit).ok_or_else(|| DataError::InvalidTimestamp {
                        row,
                        value: raw.to_string(),
                    })?;
                values.push(parsed);
            }
            Ok(values)
        }
        DataType::Date => {
            let mut values = Vec::with_capacity(col.len());
            for (row, value) in col.date()?.into_iter().enumerate() {
                let raw = value.ok_or_else(|| DataError::MissingValue {
                    row,
                    column: column.to_string(),
                })?;
                let parsed = date_from_epoch_days(raw).ok_or_else(|| {
                    DataError::InvalidTimestamp {
                        row,
                        value: raw.to_string(),
                    }
                })?;
                values.push(parsed);
            }
            Ok(values)
        }
        other => Err(DataError::ColumnType {
            column: column.to_string(),
            dtype: other.to_string(),
        }),
    }
}

/// Parse an ISO-style timestamp string, with or without a time component.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn timestamp_from_raw(raw: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let (secs, nanos) = match unit {
        TimeUnit::Nanoseconds => (
            raw.div_euclid(1_000_000_000),
            raw.rem_euclid(1_000_000_000) as u32,
        ),
        TimeUnit::Microseconds => (
            raw.div_euclid(1_000_000),
            (raw.rem_euclid(1_000_000) * 1_000) as u32,
        ),
        TimeUnit::Milliseconds => (
            raw.div_euclid(1_000),
            (raw.rem_euclid(1_000) * 1_000_000) as u32,
        ),
    };
    NaiveDateTime::from_timestamp_opt(secs, nanos)
}

fn date_from_epoch_days(days: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?
        .checked_add_signed(chrono::Duration::days(days as i64))?
        .and_hms_opt(0, 0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_space_separated_datetime() {
        let parsed = parse_timestamp("2024-01-10 13:15:00").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn parses_datetime_without_seconds() {
        let parsed = parse_timestamp("2024-01-10 13:15").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 1, 10)
                .unwrap()
                .and_hms_opt(13, 15, 0)
                .unwrap()
        );
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let parsed = parse_timestamp("2024-01-10").unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 1, 10)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn parses_rfc3339() {
        let parsed = parse_timestamp("2024-01-10T13:15:00+00:00").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("not-a-date"), None);
    }
}
