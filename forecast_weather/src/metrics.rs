//! Forecast accuracy evaluation

use std::fmt;

use tracing::debug;
use weather_data::ObservationSeries;

use crate::error::{ForecastError, Result};
use crate::models::arima::ArimaModel;
use crate::models::{ForecastModel, TrainedForecastModel};

/// Forecast accuracy metrics
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastAccuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error
    pub mape: f64,
    /// Symmetric Mean Absolute Percentage Error
    pub smape: f64,
}

impl fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        writeln!(f, "  MAE:   {:.4}", self.mae)?;
        writeln!(f, "  MSE:   {:.4}", self.mse)?;
        writeln!(f, "  RMSE:  {:.4}", self.rmse)?;
        writeln!(f, "  MAPE:  {:.4}%", self.mape)?;
        writeln!(f, "  SMAPE: {:.4}%", self.smape)?;
        Ok(())
    }
}

/// Calculate accuracy metrics for a forecast vs actual values
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    if forecast.len() != actual.len() || forecast.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "forecast and actual values must have the same non-zero length".to_string(),
        ));
    }

    let n = forecast.len() as f64;

    let errors: Vec<f64> = forecast
        .iter()
        .zip(actual.iter())
        .map(|(&f, &a)| a - f)
        .collect();

    let mae = errors.iter().map(|e| e.abs()).sum::<f64>() / n;
    let mse = errors.iter().map(|e| e.powi(2)).sum::<f64>() / n;
    let rmse = mse.sqrt();

    let mape = actual
        .iter()
        .zip(errors.iter())
        .filter(|(&a, _)| a != 0.0)
        .map(|(&a, &e)| (e.abs() / a.abs()) * 100.0)
        .sum::<f64>()
        / n;

    let smape = actual
        .iter()
        .zip(forecast.iter())
        .map(|(&a, &f)| {
            let denominator = a.abs() + f.abs();
            if denominator == 0.0 {
                0.0
            } else {
                200.0 * (a - f).abs() / denominator
            }
        })
        .sum::<f64>()
        / n;

    Ok(ForecastAccuracy {
        mae,
        mse,
        rmse,
        mape,
        smape,
    })
}

/// Split values into training and test sets, chronologically.
pub fn train_test_split(values: &[f64], test_ratio: f64) -> (Vec<f64>, Vec<f64>) {
    if values.is_empty() || test_ratio <= 0.0 || test_ratio >= 1.0 {
        return (values.to_vec(), Vec::new());
    }

    let test_size = (values.len() as f64 * test_ratio).round() as usize;
    let train_size = values.len() - test_size;

    (values[..train_size].to_vec(), values[train_size..].to_vec())
}

/// Holdout evaluation: fit on the head of the series, forecast the tail,
/// and score the projection against what actually happened.
pub fn evaluate_holdout(
    series: &ObservationSeries,
    model: &ArimaModel,
    test_ratio: f64,
) -> Result<ForecastAccuracy> {
    if test_ratio <= 0.0 || test_ratio >= 1.0 {
        return Err(ForecastError::InvalidParameter(format!(
            "test ratio {} outside (0, 1)",
            test_ratio
        )));
    }

    let values = series.values();
    let (train, test) = train_test_split(&values, test_ratio);
    if train.is_empty() || test.is_empty() {
        return Err(ForecastError::InvalidParameter(
            "series too short for holdout evaluation".to_string(),
        ));
    }

    debug!(
        country = series.country(),
        train = train.len(),
        test = test.len(),
        "holdout evaluation"
    );

    let trained = model.fit(&train)?;
    let projected = trained.forecast(test.len())?;
    forecast_accuracy(projected.values(), &test)
}
