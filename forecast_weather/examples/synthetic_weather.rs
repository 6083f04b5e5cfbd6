//! Fit and evaluate models on synthetic seasonal temperature data.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use forecast_weather::metrics::evaluate_holdout;
use forecast_weather::models::arima::ArimaModel;
use forecast_weather::models::{ForecastModel, TrainedForecastModel};
use forecast_weather::pipeline::DEFAULT_ORDER;
use weather_data::{Observation, ObservationSeries};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Forecast Weather: Synthetic Data Example");
    println!("========================================\n");

    let mut rng = StdRng::seed_from_u64(7);
    let noise = Normal::new(0.0, 0.8)?;

    for (country, base_temperature) in [("Norway", 4.0), ("Pakistan", 27.0), ("Brazil", 23.0)] {
        let series = synthetic_series(country, base_temperature, 120, &mut rng, &noise);

        let (p, d, q) = DEFAULT_ORDER;
        let model = ArimaModel::new(p, d, q);
        let trained = model.fit(&series.values())?;
        let projected = trained.forecast_with_intervals(10, 0.95)?;

        println!("{} ({}):", country, trained.name());
        let intervals = projected.intervals().unwrap_or(&[]);
        for (step, value) in projected.values().iter().enumerate() {
            let (lower, upper) = intervals.get(step).copied().unwrap_or((*value, *value));
            println!(
                "  day {:2}: {:6.2}  [{:6.2}, {:6.2}]",
                step + 1,
                value,
                lower,
                upper
            );
        }

        let accuracy = evaluate_holdout(&series, &model, 0.2)?;
        println!("{}", accuracy);
    }

    Ok(())
}

fn synthetic_series(
    country: &str,
    base_temperature: f64,
    days: usize,
    rng: &mut StdRng,
    noise: &Normal<f64>,
) -> ObservationSeries {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();

    let observations = (0..days)
        .map(|day| Observation {
            recorded_at: start + chrono::Duration::days(day as i64),
            country: country.to_string(),
            temperature: base_temperature
                + 8.0 * (day as f64 * std::f64::consts::TAU / 365.0).sin()
                + noise.sample(rng),
        })
        .collect();

    ObservationSeries::new(country, observations)
}
