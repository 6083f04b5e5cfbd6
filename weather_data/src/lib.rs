//! # Weather Data
//!
//! Observation types and CSV ingestion for per-country weather series.
//!
//! The input table must carry three columns: `country`, `last_updated`
//! (an ISO-parseable timestamp), and `temperature_celsius`. Additional
//! columns are ignored. Loading validates the whole table up front; a
//! missing column, unparsable timestamp, or null temperature fails the
//! load with no partial result.
//!
//! ## Quick Start
//!
//! ```no_run
//! use weather_data::WeatherDataset;
//!
//! # fn main() -> weather_data::Result<()> {
//! let dataset = WeatherDataset::from_csv("weather.csv")?;
//!
//! for country in dataset.countries() {
//!     let series = dataset.series_for(&country);
//!     println!("{}: {} observations", country, series.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod dataset;
pub mod error;
pub mod observation;

// Re-export commonly used types
pub use crate::dataset::WeatherDataset;
pub use crate::error::{DataError, Result};
pub use crate::observation::{Observation, ObservationSeries};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
