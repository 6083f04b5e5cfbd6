use pretty_assertions::assert_eq;
use rstest::rstest;

use forecast_weather::models::arima::{ArimaModel, TrainedArimaModel};
use forecast_weather::models::{ForecastModel, ForecastResult, TrainedForecastModel};
use forecast_weather::ForecastError;

fn wavy_values(n: usize) -> Vec<f64> {
    (0..n)
        .map(|t| {
            18.0 + 6.0 * (t as f64 * 0.4).sin()
                + t as f64 * 0.05
                + ((t * 7919) % 101) as f64 * 0.02
        })
        .collect()
}

#[test]
fn fit_is_deterministic() {
    let values = wavy_values(50);
    let model = ArimaModel::new(5, 1, 0);

    let first = model.fit(&values).unwrap();
    let second = model.fit(&values).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        first.forecast(30).unwrap().values(),
        second.forecast(30).unwrap().values()
    );
}

#[rstest]
#[case(1)]
#[case(7)]
#[case(90)]
fn forecast_length_matches_steps(#[case] steps: usize) {
    let trained = ArimaModel::new(5, 1, 0).fit(&wavy_values(60)).unwrap();

    let forecast = trained.forecast(steps).unwrap();

    assert_eq!(forecast.horizon(), steps);
    assert_eq!(forecast.values().len(), steps);
    assert!(forecast.values().iter().all(|v| v.is_finite()));
}

#[test]
fn zero_steps_are_rejected() {
    let trained = ArimaModel::new(5, 1, 0).fit(&wavy_values(60)).unwrap();
    let err = trained.forecast(0).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidParameter(_)));
}

#[test]
fn artifact_round_trip_preserves_the_model() {
    let trained = ArimaModel::new(5, 1, 0).fit(&wavy_values(60)).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pakistan.bin");
    trained.save(&path).unwrap();

    let loaded = TrainedArimaModel::load(&path).unwrap();

    assert_eq!(trained, loaded);
    assert_eq!(
        trained.forecast(14).unwrap().values(),
        loaded.forecast(14).unwrap().values()
    );
}

#[test]
fn loading_garbage_is_an_artifact_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.bin");
    std::fs::write(&path, b"definitely not a model").unwrap();

    let err = TrainedArimaModel::load(&path).unwrap_err();
    assert!(matches!(err, ForecastError::Artifact(_)));
}

#[test]
fn loading_a_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = TrainedArimaModel::load(dir.path().join("absent.bin")).unwrap_err();
    assert!(matches!(err, ForecastError::Io(_)));
}

#[test]
fn forecast_result_length_must_match_horizon() {
    let err = ForecastResult::new(vec![1.0, 2.0], 3).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidParameter(_)));
}

#[test]
fn model_reports_its_order_and_name() {
    let model = ArimaModel::new(5, 1, 0);
    assert_eq!(model.order(), (5, 1, 0));
    assert_eq!(model.name(), "ARIMA(5,1,0)");

    let trained = model.fit(&wavy_values(40)).unwrap();
    assert_eq!(trained.order(), (5, 1, 0));
    assert_eq!(TrainedForecastModel::name(&trained), "ARIMA(5,1,0)");
    assert_eq!(trained.coefficients().len(), 5);
}
