use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use forecast_weather::metrics::evaluate_holdout;
use forecast_weather::models::arima::ArimaModel;
use forecast_weather::models::ForecastModel;
use forecast_weather::pipeline::DEFAULT_ORDER;
use weather_data::WeatherDataset;

/// Score forecast accuracy for one country on a chronological holdout.
#[derive(Args, Debug)]
pub struct EvaluateCommand {
    /// Input CSV with country, last_updated and temperature_celsius columns
    #[arg(long)]
    pub input: PathBuf,

    /// Country to evaluate
    #[arg(long)]
    pub country: String,

    /// Fraction of the series held out for scoring
    #[arg(long, default_value_t = 0.2)]
    pub holdout: f64,
}

impl EvaluateCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let dataset = WeatherDataset::from_csv(&self.input)
            .with_context(|| format!("loading {}", self.input.display()))?;
        let series = dataset.series_for(&self.country);

        let (p, d, q) = DEFAULT_ORDER;
        let model = ArimaModel::new(p, d, q);
        let accuracy = evaluate_holdout(&series, &model, self.holdout)?;

        println!("{} holdout evaluation ({}):", self.country, model.name());
        println!("{}", accuracy);

        Ok(())
    }
}
