//! Forecasting models for temperature series

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, Result};

/// Projected values for a fixed number of future steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    /// Forecasted values
    values: Vec<f64>,
    /// Number of periods forecasted
    horizon: usize,
    /// Confidence intervals (optional)
    intervals: Option<Vec<(f64, f64)>>,
}

impl ForecastResult {
    /// Create a new forecast result
    pub fn new(values: Vec<f64>, horizon: usize) -> Result<Self> {
        if values.len() != horizon {
            return Err(ForecastError::InvalidParameter(format!(
                "forecast length {} does not match horizon {}",
                values.len(),
                horizon
            )));
        }

        Ok(Self {
            values,
            horizon,
            intervals: None,
        })
    }

    /// Attach confidence intervals, one per step.
    pub fn with_intervals(mut self, intervals: Vec<(f64, f64)>) -> Result<Self> {
        if intervals.len() != self.horizon {
            return Err(ForecastError::InvalidParameter(format!(
                "intervals length {} does not match horizon {}",
                intervals.len(),
                self.horizon
            )));
        }

        self.intervals = Some(intervals);
        Ok(self)
    }

    /// Get the forecasted values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Get the number of periods forecasted
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Get the confidence intervals, if available
    pub fn intervals(&self) -> Option<&[(f64, f64)]> {
        self.intervals.as_deref()
    }
}

/// Trained forecast model
pub trait TrainedForecastModel: Debug {
    /// Generate forecast for future periods
    fn forecast(&self, steps: usize) -> Result<ForecastResult>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be fitted to a value sequence
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Fit the model to values in time order
    fn fit(&self, values: &[f64]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod arima;
