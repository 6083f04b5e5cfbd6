//! Command-line interface for the weather forecasting pipeline.
//!
//! # Example
//!
//! ```bash
//! # List selectable countries
//! weather countries --input weather.csv
//!
//! # Forecast 30 days for one country and write forecast.csv
//! weather forecast --input weather.csv --country Pakistan
//!
//! # Persist a fitted model and reuse it
//! weather train --input weather.csv --country Pakistan --output model.bin
//! weather forecast --input weather.csv --country Pakistan --artifact model.bin
//!
//! # Score accuracy on a chronological holdout
//! weather evaluate --input weather.csv --country Pakistan --holdout 0.2
//! ```

pub mod commands;

use clap::{Parser, Subcommand};

pub use commands::{CountriesCommand, EvaluateCommand, ForecastCommand, TrainCommand};

/// Per-country temperature forecasting from historical weather records.
#[derive(Parser, Debug)]
#[command(name = "weather")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Forecast temperatures for one country and export the result
    Forecast(ForecastCommand),

    /// List the countries available in a dataset
    Countries(CountriesCommand),

    /// Fit a model and save it as a reusable artifact
    Train(TrainCommand),

    /// Score forecast accuracy on a chronological holdout
    Evaluate(EvaluateCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_forecast_invocation() {
        let cli = Cli::try_parse_from([
            "weather",
            "forecast",
            "--input",
            "weather.csv",
            "--country",
            "Pakistan",
            "--horizon",
            "14",
        ])
        .unwrap();

        match cli.command {
            Commands::Forecast(cmd) => {
                assert_eq!(cmd.country, "Pakistan");
                assert_eq!(cmd.horizon, 14);
                assert_eq!(cmd.output.to_str(), Some("forecast.csv"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn horizon_defaults_to_thirty() {
        let cli = Cli::try_parse_from([
            "weather",
            "forecast",
            "--input",
            "weather.csv",
            "--country",
            "Norway",
        ])
        .unwrap();

        match cli.command {
            Commands::Forecast(cmd) => assert_eq!(cmd.horizon, 30),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn a_missing_country_flag_is_a_parse_error() {
        let result = Cli::try_parse_from(["weather", "forecast", "--input", "weather.csv"]);
        assert!(result.is_err());
    }
}
