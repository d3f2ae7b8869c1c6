use forecast_bridge::{ForecastError, ForecasterConfig, PredictOptions, DEFAULT_ALPHA};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = ForecasterConfig::default();
    assert_eq!(config.alpha, DEFAULT_ALPHA);
    assert!(config.warn_on_horizon_change);

    let options = PredictOptions::from_config(&config);
    assert_eq!(options, PredictOptions::default());
}

#[test]
fn test_partial_json_uses_defaults() {
    let config = ForecasterConfig::from_json_str(r#"{ "alpha": 0.1 }"#).unwrap();
    assert_eq!(config.alpha, 0.1);
    assert!(config.warn_on_horizon_change);
}

#[test]
fn test_invalid_alpha_rejected() {
    let err = ForecasterConfig::from_json_str(r#"{ "alpha": 1.5 }"#).unwrap_err();
    assert!(matches!(err, ForecastError::ConfigError(_)));

    let err = ForecasterConfig::from_json_str("not json").unwrap_err();
    assert!(matches!(err, ForecastError::ConfigError(_)));
}

#[test]
fn test_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "alpha": 0.2, "warn_on_horizon_change": false }}"#).unwrap();

    let config = ForecasterConfig::from_file(file.path()).unwrap();
    assert_eq!(config.alpha, 0.2);
    assert!(!config.warn_on_horizon_change);

    let round_trip = ForecasterConfig::from_json_str(&config.to_json().unwrap()).unwrap();
    assert_eq!(round_trip, config);
}

#[test]
fn test_missing_file() {
    let result = ForecasterConfig::from_file("/nonexistent/forecaster.json");
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}
