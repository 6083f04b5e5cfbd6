//! End-to-end tour: build a small dataset, run the pipeline, export CSV.

use chrono::NaiveDate;
use forecast_weather::export;
use forecast_weather::pipeline::{ForecastPipeline, Horizon};
use weather_data::{Observation, ObservationSeries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Weather Forecast: Pipeline Tour");
    println!("===============================\n");

    // Two months of drifting temperatures for one country.
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let observations: Vec<Observation> = (0..60)
        .map(|day| Observation {
            recorded_at: (start + chrono::Duration::days(day))
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            country: "Pakistan".to_string(),
            temperature: 24.0
                + 6.0 * (day as f64 * 0.12).sin()
                + 0.04 * day as f64
                + ((day * 37) % 11) as f64 * 0.2,
        })
        .collect();
    let series = ObservationSeries::new("Pakistan", observations);
    println!(
        "Series: {} observations ending {}",
        series.len(),
        series.last_date().unwrap()
    );

    let pipeline = ForecastPipeline::new();
    let forecast = pipeline.run(&series, Horizon::new(14)?)?;

    println!("\n14-day forecast for {}:", forecast.country());
    for row in forecast.rows() {
        println!("  {}  {:6.2}", row.date, row.temperature);
    }

    let bytes = export::to_csv_bytes(&forecast)?;
    println!(
        "\n{} ({} bytes, {}):",
        export::CSV_FILE_NAME,
        bytes.len(),
        export::CSV_MIME_TYPE
    );
    print!("{}", String::from_utf8_lossy(&bytes));

    Ok(())
}
