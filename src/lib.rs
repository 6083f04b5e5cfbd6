//! Workspace facade for the weather forecasting crates.
//!
//! Re-exports the member crates so demo programs and downstream consumers
//! can depend on a single package.
//!
//! - [`weather_data`]: observation types and CSV ingestion
//! - [`forecast_weather`]: models, pipeline, cache, metrics, and export

pub use forecast_weather;
pub use weather_data;
