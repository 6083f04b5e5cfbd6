//! Autoregressive integrated model with least-squares estimation

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};
use tracing::debug;

use crate::error::{ForecastError, Result};
use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};

/// Pivot threshold below which the normal equations count as singular.
const SINGULARITY_EPSILON: f64 = 1e-10;

/// ARIMA(p, d, q) model configuration.
///
/// Only autoregressive integrated forms are estimated; fitting fails for
/// q > 0. Fitting is deterministic for identical input ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArimaModel {
    /// Name of the model
    name: String,
    /// AR order (p)
    p: usize,
    /// Differencing order (d)
    d: usize,
    /// MA order (q)
    q: usize,
}

impl ArimaModel {
    /// Create a new ARIMA model
    pub fn new(p: usize, d: usize, q: usize) -> Self {
        Self {
            name: format!("ARIMA({},{},{})", p, d, q),
            p,
            d,
            q,
        }
    }

    /// The (p, d, q) order
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    fn validate(&self) -> Result<()> {
        if self.p == 0 {
            return Err(ForecastError::InvalidParameter(
                "autoregressive order must be at least 1".to_string(),
            ));
        }
        if self.q > 0 {
            return Err(ForecastError::InvalidParameter(
                "moving-average terms are not supported".to_string(),
            ));
        }
        Ok(())
    }
}

impl ForecastModel for ArimaModel {
    type Trained = TrainedArimaModel;

    fn fit(&self, values: &[f64]) -> Result<TrainedArimaModel> {
        self.validate()?;

        let min_len = self.p + self.d + 1;
        if values.len() < min_len {
            return Err(ForecastError::ModelFit(format!(
                "{} needs at least {} observations, got {}",
                self.name,
                min_len,
                values.len()
            )));
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::ModelFit(format!(
                "non-finite value at index {}",
                index
            )));
        }

        // Difference d times, remembering the last level at each depth so
        // forecasts can be integrated back.
        let mut working = values.to_vec();
        let mut level_tails = Vec::with_capacity(self.d);
        for _ in 0..self.d {
            level_tails.push(working[working.len() - 1]);
            working = difference(&working);
        }

        let mean = working.iter().sum::<f64>() / working.len() as f64;
        let centered: Vec<f64> = working.iter().map(|v| v - mean).collect();

        let coefficients = estimate_ar(&centered, self.p)?;
        let residual_variance = ar_residual_variance(&centered, &coefficients, self.p);
        let lag_state = centered[centered.len() - self.p..].to_vec();

        debug!(
            model = %self.name,
            ?coefficients,
            residual_variance,
            "model fitted"
        );

        Ok(TrainedArimaModel {
            name: self.name.clone(),
            p: self.p,
            d: self.d,
            coefficients,
            mean,
            residual_variance,
            lag_state,
            level_tails,
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Fitted model state: everything needed to project forward.
///
/// Serializable, so a fitted model can be persisted with [`save`] and
/// reused later with [`load`] instead of refitting.
///
/// [`save`]: TrainedArimaModel::save
/// [`load`]: TrainedArimaModel::load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedArimaModel {
    name: String,
    p: usize,
    d: usize,
    /// Fitted AR coefficients, lag 1 first
    coefficients: Vec<f64>,
    /// Mean of the differenced series
    mean: f64,
    /// Variance of the one-step residuals on the differenced scale
    residual_variance: f64,
    /// Last p centered values of the differenced series
    lag_state: Vec<f64>,
    /// Last observed level at each differencing depth, outermost first
    level_tails: Vec<f64>,
}

impl TrainedArimaModel {
    /// The fitted AR coefficients, lag 1 first.
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// The (p, d, q) order of the fitted model.
    pub fn order(&self) -> (usize, usize, usize) {
        (self.p, self.d, 0)
    }

    /// Residual variance on the differenced scale.
    pub fn residual_variance(&self) -> f64 {
        self.residual_variance
    }

    /// Forecast with symmetric confidence bands at the given level.
    ///
    /// Bands are an approximation: the residual standard error scaled by
    /// the square root of the step count, around the point forecast.
    pub fn forecast_with_intervals(&self, steps: usize, confidence: f64) -> Result<ForecastResult> {
        if confidence <= 0.0 || confidence >= 1.0 {
            return Err(ForecastError::InvalidParameter(format!(
                "confidence level {} outside (0, 1)",
                confidence
            )));
        }

        let result = self.forecast(steps)?;
        let normal =
            Normal::new(0.0, 1.0).map_err(|err| ForecastError::ModelFit(err.to_string()))?;
        let quantile = normal.inverse_cdf(0.5 + confidence / 2.0);
        let stderr = self.residual_variance.sqrt();

        let intervals = result
            .values()
            .iter()
            .enumerate()
            .map(|(step, value)| {
                let margin = quantile * stderr * ((step + 1) as f64).sqrt();
                (value - margin, value + margin)
            })
            .collect();

        result.with_intervals(intervals)
    }

    /// Persist the fitted model as a binary artifact.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes =
            bincode::serialize(self).map_err(|err| ForecastError::Artifact(err.to_string()))?;
        fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a previously saved artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = fs::read(path)?;
        bincode::deserialize(&bytes).map_err(|err| ForecastError::Artifact(err.to_string()))
    }
}

impl TrainedForecastModel for TrainedArimaModel {
    fn forecast(&self, steps: usize) -> Result<ForecastResult> {
        if steps == 0 {
            return Err(ForecastError::InvalidParameter(
                "forecast steps must be at least 1".to_string(),
            ));
        }

        // AR recurrence on the centered differenced scale.
        let mut history = self.lag_state.clone();
        let mut differenced = Vec::with_capacity(steps);
        for _ in 0..steps {
            let mut projected = 0.0;
            for (i, phi) in self.coefficients.iter().enumerate() {
                projected += phi * history[history.len() - 1 - i];
            }
            history.push(projected);
            differenced.push(projected + self.mean);
        }

        // Undo each differencing round, innermost first.
        let mut values = differenced;
        for tail in self.level_tails.iter().rev() {
            let mut current = *tail;
            values = values
                .into_iter()
                .map(|delta| {
                    current += delta;
                    current
                })
                .collect();
        }

        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::ModelFit(
                "forecast produced non-finite values".to_string(),
            ));
        }

        ForecastResult::new(values, steps)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// First-order differencing.
fn difference(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Least-squares AR(p) coefficients via the normal equations.
fn estimate_ar(centered: &[f64], p: usize) -> Result<Vec<f64>> {
    let n = centered.len();
    if n <= p {
        return Err(ForecastError::ModelFit(format!(
            "{} observations after differencing cannot support {} lags",
            n, p
        )));
    }

    let mut gram = vec![vec![0.0; p]; p];
    let mut moment = vec![0.0; p];
    for t in p..n {
        for i in 0..p {
            moment[i] += centered[t - 1 - i] * centered[t];
            for j in 0..p {
                gram[i][j] += centered[t - 1 - i] * centered[t - 1 - j];
            }
        }
    }

    solve_linear_system(gram, moment)
}

/// Gaussian elimination with partial pivoting.
fn solve_linear_system(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot_row = (col..n)
            .max_by(|&x, &y| {
                a[x][col]
                    .abs()
                    .partial_cmp(&a[y][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot_row][col].abs() < SINGULARITY_EPSILON {
            return Err(ForecastError::ModelFit(
                "singular normal equations; the series may be constant".to_string(),
            ));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in (col + 1)..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut solution = vec![0.0; n];
    for row in (0..n).rev() {
        let mut sum = b[row];
        for k in (row + 1)..n {
            sum -= a[row][k] * solution[k];
        }
        solution[row] = sum / a[row][row];
    }
    Ok(solution)
}

/// Mean squared one-step residual of the fitted AR recurrence.
fn ar_residual_variance(centered: &[f64], coefficients: &[f64], p: usize) -> f64 {
    let n = centered.len();
    if n <= p {
        return 0.0;
    }

    let mut sum_sq = 0.0;
    for t in p..n {
        let mut fitted = 0.0;
        for (i, phi) in coefficients.iter().enumerate() {
            fitted += phi * centered[t - 1 - i];
        }
        let residual = centered[t] - fitted;
        sum_sq += residual * residual;
    }
    sum_sq / (n - p) as f64
}
