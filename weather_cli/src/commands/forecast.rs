use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::info;

use forecast_weather::export;
use forecast_weather::pipeline::{ForecastPipeline, ForecastRequest, Horizon, PipelineConfig};
use weather_data::WeatherDataset;

/// Run the forecast pipeline for one country.
#[derive(Args, Debug)]
pub struct ForecastCommand {
    /// Input CSV with country, last_updated and temperature_celsius columns
    #[arg(long)]
    pub input: PathBuf,

    /// Country to forecast
    #[arg(long)]
    pub country: String,

    /// Forecast horizon in days (7-90)
    #[arg(long, default_value_t = Horizon::DEFAULT)]
    pub horizon: usize,

    /// Output CSV path
    #[arg(long, default_value = export::CSV_FILE_NAME)]
    pub output: PathBuf,

    /// Pre-fitted model artifact; skips fitting when given
    #[arg(long)]
    pub artifact: Option<PathBuf>,

    /// JSON pipeline configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ForecastCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let dataset = WeatherDataset::from_csv(&self.input)
            .with_context(|| format!("loading {}", self.input.display()))?;

        let request = ForecastRequest::new(&self.country, Horizon::new(self.horizon)?);

        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if self.artifact.is_some() {
            config.artifact_path = self.artifact.clone();
        }

        let pipeline = ForecastPipeline::with_config(config)?;
        let forecast = pipeline.run_request(&dataset, &request)?;

        println!(
            "{}-day forecast for {}:",
            forecast.len(),
            forecast.country()
        );
        for row in forecast.rows() {
            println!("  {}  {:8.2}", row.date, row.temperature);
        }

        export::write_csv_file(&self.output, &forecast)
            .with_context(|| format!("writing {}", self.output.display()))?;
        info!(path = %self.output.display(), "forecast written");
        println!("Wrote {}", self.output.display());

        Ok(())
    }
}
