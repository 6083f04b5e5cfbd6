//! End-to-end per-country forecast pipeline
//!
//! One request runs the whole flow synchronously: validate the series
//! length, resolve a trained model (pre-fitted artifact, cache, or a fresh
//! fit), project forward, and attach daily future dates. There is no retry
//! and no fallback model; every failure is returned to the caller.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use weather_data::{ObservationSeries, WeatherDataset};

use crate::cache::ModelCache;
use crate::error::{ForecastError, Result};
use crate::models::arima::{ArimaModel, TrainedArimaModel};
use crate::models::{ForecastModel, TrainedForecastModel};

/// Minimum observations required before fitting.
pub const MIN_OBSERVATIONS: usize = 30;

/// Fixed (p, d, q) model order used unless configured otherwise.
pub const DEFAULT_ORDER: (usize, usize, usize) = (5, 1, 0);

/// Validated forecast horizon in days.
///
/// Construction enforces the supported range, so the pipeline never sees
/// an out-of-range horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Horizon(usize);

impl Horizon {
    /// Shortest supported horizon.
    pub const MIN: usize = 7;
    /// Longest supported horizon.
    pub const MAX: usize = 90;
    /// Default horizon.
    pub const DEFAULT: usize = 30;

    /// Validate a horizon in days.
    pub fn new(days: usize) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&days) {
            return Err(ForecastError::InvalidHorizon {
                value: days,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(days))
    }

    /// The horizon in days.
    pub fn days(self) -> usize {
        self.0
    }
}

impl Default for Horizon {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for Horizon {
    type Error = ForecastError;

    fn try_from(days: usize) -> Result<Self> {
        Self::new(days)
    }
}

/// A single forecast request: one country, one horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub country: String,
    pub horizon: Horizon,
}

impl ForecastRequest {
    pub fn new(country: impl Into<String>, horizon: Horizon) -> Self {
        Self {
            country: country.into(),
            horizon,
        }
    }
}

/// One projected day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub temperature: f64,
}

/// Dated forecast for one country.
///
/// Rows are daily, strictly increasing, and start one day after the last
/// observation, regardless of gaps or cadence in the input series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSeries {
    country: String,
    rows: Vec<ForecastRow>,
}

impl ForecastSeries {
    /// The country this forecast belongs to.
    pub fn country(&self) -> &str {
        &self.country
    }

    /// The projected rows, in date order.
    pub fn rows(&self) -> &[ForecastRow] {
        &self.rows
    }

    /// Number of projected days.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the forecast holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Projected dates, in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.rows.iter().map(|row| row.date).collect()
    }

    /// Projected temperatures, in date order.
    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.temperature).collect()
    }
}

/// Pipeline configuration.
///
/// `artifact_path` switches the pipeline from fit-per-request to a
/// pre-fitted model loaded once at construction; everything else about the
/// run is identical between the two modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum observations required before fitting
    #[serde(default = "default_min_observations")]
    pub min_observations: usize,
    /// ARIMA (p, d, q) order
    #[serde(default = "default_order")]
    pub order: (usize, usize, usize),
    /// Optional pre-fitted model artifact; skips fitting entirely when set
    #[serde(default)]
    pub artifact_path: Option<PathBuf>,
}

fn default_min_observations() -> usize {
    MIN_OBSERVATIONS
}

fn default_order() -> (usize, usize, usize) {
    DEFAULT_ORDER
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_observations: MIN_OBSERVATIONS,
            order: DEFAULT_ORDER,
            artifact_path: None,
        }
    }
}

impl PipelineConfig {
    /// Read a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        serde_json::from_str(&contents)
            .map_err(|err| ForecastError::InvalidParameter(format!("config: {}", err)))
    }
}

/// The forecast pipeline.
///
/// Stateless between runs apart from an optionally injected [`ModelCache`];
/// each run reads its series and produces an independent result.
#[derive(Debug)]
pub struct ForecastPipeline {
    config: PipelineConfig,
    model: ArimaModel,
    artifact: Option<Arc<TrainedArimaModel>>,
    cache: Option<Arc<ModelCache>>,
}

impl ForecastPipeline {
    /// Pipeline with the fixed default configuration, no cache, no artifact.
    pub fn new() -> Self {
        let (p, d, q) = DEFAULT_ORDER;
        Self {
            config: PipelineConfig::default(),
            model: ArimaModel::new(p, d, q),
            artifact: None,
            cache: None,
        }
    }

    /// Pipeline from explicit configuration.
    ///
    /// A configured artifact is loaded now, so a bad file fails
    /// construction rather than every request.
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        let (p, d, q) = config.order;
        let artifact = match &config.artifact_path {
            Some(path) => Some(Arc::new(TrainedArimaModel::load(path)?)),
            None => None,
        };

        Ok(Self {
            model: ArimaModel::new(p, d, q),
            artifact,
            cache: None,
            config,
        })
    }

    /// Share a model cache across requests.
    pub fn with_cache(mut self, cache: Arc<ModelCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one request end to end.
    pub fn run(&self, series: &ObservationSeries, horizon: Horizon) -> Result<ForecastSeries> {
        let country = series.country();
        debug!(
            country,
            observations = series.len(),
            horizon = horizon.days(),
            "validating series"
        );

        if series.len() < self.config.min_observations {
            return Err(ForecastError::InsufficientData {
                country: country.to_string(),
                observed: series.len(),
                required: self.config.min_observations,
            });
        }
        let last_date = match series.last_date() {
            Some(date) => date,
            None => {
                return Err(ForecastError::InsufficientData {
                    country: country.to_string(),
                    observed: 0,
                    required: self.config.min_observations.max(1),
                })
            }
        };

        let trained = self.resolve_model(series)?;
        debug!(country, model = trained.name(), "projecting");
        let projected = trained.forecast(horizon.days())?;

        let rows = projected
            .values()
            .iter()
            .enumerate()
            .map(|(step, &temperature)| ForecastRow {
                date: last_date + chrono::Duration::days(step as i64 + 1),
                temperature,
            })
            .collect();

        debug!(country, rows = horizon.days(), "forecast assembled");
        Ok(ForecastSeries {
            country: country.to_string(),
            rows,
        })
    }

    /// Resolve a request against a full dataset.
    pub fn run_request(
        &self,
        dataset: &WeatherDataset,
        request: &ForecastRequest,
    ) -> Result<ForecastSeries> {
        let series = dataset.series_for(&request.country);
        self.run(&series, request.horizon)
    }

    fn resolve_model(&self, series: &ObservationSeries) -> Result<Arc<TrainedArimaModel>> {
        if let Some(artifact) = &self.artifact {
            debug!(country = series.country(), "using pre-fitted artifact");
            return Ok(Arc::clone(artifact));
        }

        let values = series.values();
        match &self.cache {
            Some(cache) => cache.get_or_fit(series.country(), || self.model.fit(&values)),
            None => Ok(Arc::new(self.model.fit(&values)?)),
        }
    }
}

impl Default for ForecastPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot entry point with the default pipeline.
///
/// Callable from any interface: web handler, CLI, or test harness.
pub fn run_forecast(series: &ObservationSeries, horizon: Horizon) -> Result<ForecastSeries> {
    ForecastPipeline::new().run(series, horizon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn horizon_accepts_the_documented_range() {
        assert_eq!(Horizon::new(7).unwrap().days(), 7);
        assert_eq!(Horizon::new(90).unwrap().days(), 90);
        assert_eq!(Horizon::default().days(), 30);
    }

    #[test]
    fn horizon_rejects_out_of_range_values() {
        for days in [0, 6, 91, 365] {
            let err = Horizon::new(days).unwrap_err();
            assert!(matches!(
                err,
                ForecastError::InvalidHorizon { value, min: 7, max: 90 } if value == days
            ));
        }
    }

    #[test]
    fn config_defaults_match_the_fixed_pipeline() {
        let config = PipelineConfig::default();
        assert_eq!(config.min_observations, 30);
        assert_eq!(config.order, (5, 1, 0));
        assert_eq!(config.artifact_path, None);
    }

    #[test]
    fn config_json_fills_in_defaults() {
        let config: PipelineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());

        let config: PipelineConfig =
            serde_json::from_str(r#"{"min_observations": 10, "order": [3, 1, 0]}"#).unwrap();
        assert_eq!(config.min_observations, 10);
        assert_eq!(config.order, (3, 1, 0));
    }
}
