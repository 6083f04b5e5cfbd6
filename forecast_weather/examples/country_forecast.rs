//! Forecast one country from a CSV file given on the command line.
//!
//! Usage: country_forecast <data.csv> <country> [horizon]

use std::env;

use forecast_weather::export;
use forecast_weather::pipeline::{ForecastPipeline, Horizon};
use weather_data::WeatherDataset;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("usage: country_forecast <data.csv> <country> [horizon]");
        std::process::exit(2);
    }

    let horizon = match args.get(3) {
        Some(raw) => Horizon::new(raw.parse()?)?,
        None => Horizon::default(),
    };

    let dataset = WeatherDataset::from_csv(&args[1])?;
    println!(
        "Loaded {} observations across {} countries",
        dataset.len(),
        dataset.countries().len()
    );

    let series = dataset.series_for(&args[2]);
    let forecast = ForecastPipeline::new().run(&series, horizon)?;

    println!("\n{}-day forecast for {}:", forecast.len(), forecast.country());
    for row in forecast.rows() {
        println!("  {}  {:6.2}", row.date, row.temperature);
    }

    export::write_csv_file(export::CSV_FILE_NAME, &forecast)?;
    println!("\nWrote {}", export::CSV_FILE_NAME);

    Ok(())
}
