use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use weather_data::WeatherDataset;

/// List the countries available for forecasting.
#[derive(Args, Debug)]
pub struct CountriesCommand {
    /// Input CSV with country, last_updated and temperature_celsius columns
    #[arg(long)]
    pub input: PathBuf,
}

impl CountriesCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let dataset = WeatherDataset::from_csv(&self.input)
            .with_context(|| format!("loading {}", self.input.display()))?;

        let countries = dataset.countries();
        for country in &countries {
            let series = dataset.series_for(country);
            println!("{}  ({} observations)", country, series.len());
        }
        println!("{} countries", countries.len());

        Ok(())
    }
}
