//! Observation types for per-country weather series

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single weather record: one country, one timestamp, one temperature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// When the record was taken
    pub recorded_at: NaiveDateTime,
    /// Grouping key that partitions the dataset into independent series
    pub country: String,
    /// Temperature in degrees Celsius
    pub temperature: f64,
}

/// All observations for a single country, ascending by timestamp.
///
/// Duplicate timestamps are tolerated and kept in their incoming order;
/// nothing upstream enforces uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSeries {
    country: String,
    observations: Vec<Observation>,
}

impl ObservationSeries {
    /// Build a series, sorting the records ascending by timestamp.
    ///
    /// The sort is stable, so records sharing a timestamp keep their
    /// relative input order.
    pub fn new(country: impl Into<String>, mut observations: Vec<Observation>) -> Self {
        observations.sort_by_key(|obs| obs.recorded_at);
        Self {
            country: country.into(),
            observations,
        }
    }

    /// The country this series belongs to.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The underlying records, ascending by timestamp.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Temperature values in timestamp order.
    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.temperature).collect()
    }

    /// Timestamps in ascending order.
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.observations.iter().map(|obs| obs.recorded_at).collect()
    }

    /// Timestamp of the most recent observation.
    pub fn last_recorded_at(&self) -> Option<NaiveDateTime> {
        self.observations.last().map(|obs| obs.recorded_at)
    }

    /// Calendar date of the most recent observation.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.last_recorded_at().map(|ts| ts.date())
    }
}
