use std::collections::BTreeMap;
use std::fs;

use super::*;
use crate::risk::RiskBand;

fn series(rain: &[f64], rh: &[f64], soil: &[f64]) -> HourlySeries {
    let wrap = |v: &[f64]| Some(v.iter().copied().map(Some).collect());
    HourlySeries {
        precipitation: wrap(rain),
        relative_humidity: wrap(rh),
        soil_moisture: wrap(soil),
        other: BTreeMap::new(),
    }
}

#[test]
fn sums_rain_and_averages_the_rest() {
    let s = series(
        &[5.0, 10.0, 15.0, 20.0, 10.0, 15.0, 99.0],
        &[60.0, 62.0, 64.0, 66.0, 68.0, 70.0, 0.0],
        &[0.3, 0.3, 0.3, 0.3, 0.3, 0.3, 0.0],
    );
    let w = aggregate(&s, 0, 6).unwrap();
    assert_eq!(w.rain_sum_mm, Some(75.0));
    assert!((w.humidity_avg.unwrap() - 65.0).abs() < 1e-12);
    assert!((w.soil_moisture_avg.unwrap() - 0.3).abs() < 1e-12);
}

#[test]
fn window_can_start_later() {
    let s = series(&[100.0, 1.0, 2.0], &[50.0, 50.0, 50.0], &[0.1, 0.1, 0.1]);
    let w = aggregate(&s, 1, 2).unwrap();
    assert_eq!(w.rain_sum_mm, Some(3.0));
    assert_eq!(w.start, 1);
    assert_eq!(w.hours, 2);
}

#[test]
fn short_series_is_an_error() {
    let s = series(&[1.0, 2.0], &[50.0, 50.0], &[0.1, 0.1]);
    let err = aggregate(&s, 0, 6).unwrap_err();
    assert!(err.to_string().contains("runs past 2 hourly values"), "got {err}");
}

#[test]
fn null_hour_is_an_error() {
    let mut s = series(&[1.0; 6], &[50.0; 6], &[0.1; 6]);
    if let Some(rain) = s.precipitation.as_mut() {
        rain[3] = None;
    }
    let err = aggregate(&s, 0, 6).unwrap_err();
    assert!(matches!(err, FloodError::InvalidInput { .. }));
    assert!(err.to_string().contains("hour 3"), "got {err}");
}

#[test]
fn zero_length_window_is_an_error() {
    let s = series(&[1.0], &[50.0], &[0.1]);
    assert!(aggregate(&s, 0, 0).is_err());
}

#[test]
fn missing_series_is_not_scored() {
    let s = HourlySeries {
        precipitation: Some(vec![Some(25.0); 6]),
        ..HourlySeries::default()
    };
    let w = aggregate(&s, 0, 6).unwrap();
    assert_eq!(w.humidity_avg, None);
    let obs = w.observations();
    assert_eq!(obs.len(), 1);
    assert_eq!(obs[0].kind, ParameterKind::Rainfall);
    assert_eq!(obs[0].value, 150.0);
}

#[test]
fn evaluate_scores_the_window() {
    let s = series(&[25.0; 6], &[100.0; 6], &[0.6; 6]);
    let (w, a) = evaluate(&ProfileRegistry::builtin(), &s, 0, 6).unwrap();
    assert_eq!(w.rain_sum_mm, Some(150.0));
    assert!((a.composite_score - 3.675).abs() < 1e-12);
    assert_eq!(a.band, RiskBand::Severe);
}

#[test]
fn evaluate_empty_document_has_nothing_to_score() {
    let err = evaluate(&ProfileRegistry::builtin(), &HourlySeries::default(), 0, 6).unwrap_err();
    assert!(matches!(err, FloodError::NoObservations));
}

#[test]
fn run_reads_forecast_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("forecast.json");
    fs::write(
        &path,
        r#"{"hourly": {
            "precipitation": [0.0, 0.4, 2.1, 6.3, 4.0, 1.2, 0.0, 0.0],
            "relative_humidity": [71, 74, 80, 88, 91, 90, 85, 80],
            "soil_moisture": [0.21, 0.22, 0.24, 0.27, 0.29, 0.30, 0.30, 0.29]
        }}"#,
    )
    .unwrap();
    run(&ProfileRegistry::builtin(), &path, 0, 6, false).unwrap();
    run(&ProfileRegistry::builtin(), &path, 2, 6, true).unwrap();
}

#[test]
fn open_meteo_series_names_are_scored() {
    let forecast: Forecast = serde_json::from_str(
        r#"{"hourly": {
            "time": ["2024-10-29T00:00", "2024-10-29T01:00"],
            "precipitation": [10.0, 10.0],
            "relative_humidity_2m": [100, 100],
            "soil_moisture_0_to_7cm": [0.6, 0.6]
        }}"#,
    )
    .unwrap();
    assert!(forecast.hourly.ignored_series().is_empty());
    let (w, a) = evaluate(&ProfileRegistry::builtin(), &forecast.hourly, 0, 2).unwrap();
    assert_eq!(w.humidity_avg, Some(100.0));
    assert_eq!(w.soil_moisture_avg, Some(0.6));
    assert_eq!(a.multipliers.len(), 3);
    assert_eq!(a.multipliers[&ParameterKind::RelativeHumidity], 1.05);
    assert_eq!(a.multipliers[&ParameterKind::SoilMoisture], 1.4);
}

#[test]
fn unscored_series_are_reported() {
    let forecast: Forecast = serde_json::from_str(
        r#"{"hourly": {
            "time": ["2024-10-29T00:00"],
            "precipitation": [4.0],
            "temperature_2m": [18.5],
            "soil_moisture_7_to_28cm": [0.3]
        }}"#,
    )
    .unwrap();
    assert_eq!(
        forecast.hourly.ignored_series(),
        ["soil_moisture_7_to_28cm", "temperature_2m"]
    );
    assert_eq!(forecast.hourly.soil_moisture, None);
}
