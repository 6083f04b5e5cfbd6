//! # Forecast Weather
//!
//! A Rust library for projecting short-horizon temperature forecasts from
//! historical per-country weather records.
//!
//! ## Features
//!
//! - End-to-end pipeline: validate, fit, project, attach daily dates
//! - Autoregressive integrated modeling with least-squares estimation,
//!   fixed at order (5, 1, 0) by default
//! - Bounded per-country model cache with fit de-duplication
//! - Forecast export as `forecast.csv` and bincode model artifacts
//! - Holdout accuracy evaluation (MAE, MSE, RMSE, MAPE, SMAPE)
//!
//! ## Quick Start
//!
//! ```no_run
//! use forecast_weather::pipeline::{ForecastPipeline, Horizon};
//! use weather_data::WeatherDataset;
//!
//! # fn main() -> forecast_weather::error::Result<()> {
//! // Load data
//! let dataset = WeatherDataset::from_csv("weather.csv")?;
//! let series = dataset.series_for("Pakistan");
//!
//! // Run the pipeline with the fixed default configuration
//! let pipeline = ForecastPipeline::new();
//! let forecast = pipeline.run(&series, Horizon::default())?;
//!
//! for row in forecast.rows() {
//!     println!("{} {:.2}", row.date, row.temperature);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod error;
pub mod export;
pub mod metrics;
pub mod models;
pub mod pipeline;

// Re-export commonly used types
pub use crate::cache::ModelCache;
pub use crate::error::ForecastError;
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::pipeline::{
    run_forecast, ForecastPipeline, ForecastRequest, ForecastSeries, Horizon, PipelineConfig,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
