use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use forecast_weather::models::arima::ArimaModel;
use forecast_weather::models::{ForecastModel, TrainedForecastModel};
use forecast_weather::pipeline::{DEFAULT_ORDER, MIN_OBSERVATIONS};
use forecast_weather::ForecastError;
use weather_data::WeatherDataset;

/// Fit a model for one country and persist it as a binary artifact.
#[derive(Args, Debug)]
pub struct TrainCommand {
    /// Input CSV with country, last_updated and temperature_celsius columns
    #[arg(long)]
    pub input: PathBuf,

    /// Country to fit
    #[arg(long)]
    pub country: String,

    /// Artifact output path
    #[arg(long, default_value = "model.bin")]
    pub output: PathBuf,
}

impl TrainCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let dataset = WeatherDataset::from_csv(&self.input)
            .with_context(|| format!("loading {}", self.input.display()))?;
        let series = dataset.series_for(&self.country);

        if series.len() < MIN_OBSERVATIONS {
            return Err(ForecastError::InsufficientData {
                country: self.country.clone(),
                observed: series.len(),
                required: MIN_OBSERVATIONS,
            }
            .into());
        }

        let (p, d, q) = DEFAULT_ORDER;
        let model = ArimaModel::new(p, d, q);
        let trained = model.fit(&series.values())?;
        trained.save(&self.output)?;

        info!(path = %self.output.display(), "artifact written");
        println!(
            "Saved {} for {} ({} observations) to {}",
            trained.name(),
            self.country,
            series.len(),
            self.output.display()
        );

        Ok(())
    }
}
