use std::fmt::Write as _;
use std::io::Write as _;
use std::sync::Arc;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;

use forecast_weather::cache::ModelCache;
use forecast_weather::models::arima::ArimaModel;
use forecast_weather::models::{ForecastModel, TrainedForecastModel};
use forecast_weather::pipeline::{
    run_forecast, ForecastPipeline, ForecastRequest, Horizon, PipelineConfig, DEFAULT_ORDER,
};
use forecast_weather::ForecastError;
use weather_data::{Observation, ObservationSeries, WeatherDataset};

fn temperature_at(day: usize) -> f64 {
    20.0 + 5.0 * (day as f64 * 0.35).sin() + day as f64 * 0.03 + ((day * 7919) % 101) as f64 * 0.03
}

/// Consecutive daily observations ending on `end`.
fn daily_series(country: &str, end: NaiveDate, days: usize) -> ObservationSeries {
    let start = end - chrono::Duration::days(days as i64 - 1);
    let observations = (0..days)
        .map(|day| Observation {
            recorded_at: (start + chrono::Duration::days(day as i64))
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            country: country.to_string(),
            temperature: temperature_at(day),
        })
        .collect();
    ObservationSeries::new(country, observations)
}

#[test]
fn forty_daily_observations_yield_a_seven_day_forecast() {
    let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let series = daily_series("Pakistan", end, 40);

    let forecast = ForecastPipeline::new()
        .run(&series, Horizon::new(7).unwrap())
        .unwrap();

    assert_eq!(forecast.country(), "Pakistan");
    assert_eq!(forecast.len(), 7);
    let expected: Vec<NaiveDate> = (1..=7)
        .map(|offset| end + chrono::Duration::days(offset))
        .collect();
    assert_eq!(forecast.dates(), expected);
    assert!(forecast.values().iter().all(|v| v.is_finite()));
}

#[rstest]
#[case(7)]
#[case(30)]
#[case(90)]
fn short_series_fails_for_any_horizon(#[case] horizon: usize) {
    let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let series = daily_series("Nowhereland", end, 10);

    let err = run_forecast(&series, Horizon::new(horizon).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::InsufficientData {
            observed: 10,
            required: 30,
            ..
        }
    ));
}

#[test]
fn short_series_never_reaches_the_cache() {
    let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let series = daily_series("Nowhereland", end, 10);
    let cache = Arc::new(ModelCache::default());

    let pipeline = ForecastPipeline::new().with_cache(Arc::clone(&cache));
    pipeline.run(&series, Horizon::default()).unwrap_err();

    assert!(cache.is_empty());
}

#[test]
fn empty_series_is_insufficient() {
    let series = ObservationSeries::new("Nowhereland", Vec::new());
    let err = run_forecast(&series, Horizon::default()).unwrap_err();
    assert!(matches!(
        err,
        ForecastError::InsufficientData { observed: 0, .. }
    ));
}

#[rstest]
#[case(7)]
#[case(42)]
#[case(90)]
fn forecast_has_exactly_horizon_rows(#[case] horizon: usize) {
    let end = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
    let series = daily_series("Norway", end, 60);

    let forecast = run_forecast(&series, Horizon::new(horizon).unwrap()).unwrap();

    assert_eq!(forecast.len(), horizon);
    for window in forecast.dates().windows(2) {
        assert_eq!(window[1] - window[0], chrono::Duration::days(1));
    }
    assert_eq!(forecast.dates()[0], end + chrono::Duration::days(1));
}

#[test]
fn identical_inputs_produce_identical_forecasts() {
    let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let series = daily_series("Pakistan", end, 45);

    let first = run_forecast(&series, Horizon::default()).unwrap();
    let second = run_forecast(&series, Horizon::default()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn irregular_input_cadence_still_yields_daily_output() {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    // One observation every third day; the output cadence stays daily.
    let observations: Vec<Observation> = (0..35)
        .map(|step| Observation {
            recorded_at: (start + chrono::Duration::days(step * 3))
                .and_hms_opt(6, 0, 0)
                .unwrap(),
            country: "Brazil".to_string(),
            temperature: temperature_at(step as usize),
        })
        .collect();
    let series = ObservationSeries::new("Brazil", observations);
    let last = start + chrono::Duration::days(34 * 3);

    let forecast = run_forecast(&series, Horizon::new(7).unwrap()).unwrap();

    let expected: Vec<NaiveDate> = (1..=7)
        .map(|offset| last + chrono::Duration::days(offset))
        .collect();
    assert_eq!(forecast.dates(), expected);
}

#[test]
fn constant_series_fails_as_a_model_fit_error() {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let observations: Vec<Observation> = (0..40)
        .map(|day| Observation {
            recorded_at: (start + chrono::Duration::days(day))
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            country: "Flatland".to_string(),
            temperature: 21.0,
        })
        .collect();
    let series = ObservationSeries::new("Flatland", observations);

    let err = run_forecast(&series, Horizon::default()).unwrap_err();
    assert!(matches!(err, ForecastError::ModelFit(_)));
}

#[test]
fn artifact_mode_skips_fitting_but_matches_the_fitted_model() {
    let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let series = daily_series("Pakistan", end, 40);

    let (p, d, q) = DEFAULT_ORDER;
    let trained = ArimaModel::new(p, d, q).fit(&series.values()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("model.bin");
    trained.save(&path).unwrap();

    let config = PipelineConfig {
        artifact_path: Some(path),
        ..PipelineConfig::default()
    };
    let pipeline = ForecastPipeline::with_config(config).unwrap();

    let forecast = pipeline.run(&series, Horizon::new(7).unwrap()).unwrap();
    assert_eq!(forecast.values(), trained.forecast(7).unwrap().values());

    // Insufficient data still wins over a loaded artifact.
    let short = daily_series("Pakistan", end, 10);
    let err = pipeline.run(&short, Horizon::new(7).unwrap()).unwrap_err();
    assert!(matches!(err, ForecastError::InsufficientData { .. }));
}

#[test]
fn cached_pipeline_fits_once_per_country() {
    let end = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
    let series = daily_series("Pakistan", end, 40);
    let cache = Arc::new(ModelCache::default());

    let pipeline = ForecastPipeline::new().with_cache(Arc::clone(&cache));
    let first = pipeline.run(&series, Horizon::default()).unwrap();
    let second = pipeline.run(&series, Horizon::default()).unwrap();

    assert_eq!(first, second);
    assert_eq!(cache.len(), 1);
    assert!(cache.contains("Pakistan"));
}

#[test]
fn run_request_resolves_the_series_from_a_dataset() {
    let start = NaiveDate::from_ymd_opt(2023, 12, 2).unwrap();
    let mut contents = String::from("country,last_updated,temperature_celsius\n");
    for day in 0..40usize {
        let date = start + chrono::Duration::days(day as i64);
        writeln!(contents, "Pakistan,{} 09:00:00,{}", date, temperature_at(day)).unwrap();
    }

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    let dataset = WeatherDataset::from_csv(file.path()).unwrap();

    let request = ForecastRequest::new("Pakistan", Horizon::new(7).unwrap());
    let forecast = ForecastPipeline::new()
        .run_request(&dataset, &request)
        .unwrap();

    assert_eq!(forecast.len(), 7);
    assert_eq!(
        forecast.dates()[0],
        NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()
    );

    let missing = ForecastRequest::new("Nowhereland", Horizon::new(7).unwrap());
    let err = ForecastPipeline::new()
        .run_request(&dataset, &missing)
        .unwrap_err();
    assert!(matches!(
        err,
        ForecastError::InsufficientData { observed: 0, .. }
    ));
}
