use chrono::{NaiveDate, NaiveDateTime};
use forecast_bridge::models::{LinearRegression, MovingAverage, PREDICTION_COLUMN};
use forecast_bridge::{RegressionModel, TimeFrame, TimeSeries};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use time_index::{DatetimeIndex, Frequency, TimeIndex};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn daily_index(start: NaiveDateTime, len: usize) -> TimeIndex {
    TimeIndex::from(DatetimeIndex::from_start(start, len, Frequency::Day).unwrap())
}

fn create_test_data() -> (TimeFrame, TimeSeries) {
    let index = daily_index(at(2023, 1, 1), 5);
    let y = TimeSeries::new(index.clone(), vec![100.0, 102.0, 104.0, 103.0, 105.0]).unwrap();
    (TimeFrame::empty(index), y)
}

#[test]
fn test_moving_average() {
    let (x, y) = create_test_data();
    let mut model = MovingAverage::new(3).unwrap();
    model.fit(&x, &y).unwrap();

    assert_eq!(model.level(), Some(104.0));

    let future = TimeFrame::empty(daily_index(at(2023, 1, 6), 2));
    let preds = model.predict(&future).unwrap();

    assert_eq!(preds.len(), 2);
    assert_eq!(preds.column_names(), vec![PREDICTION_COLUMN.to_string()]);
    assert_eq!(preds.column_f64(PREDICTION_COLUMN).unwrap(), vec![Some(104.0), Some(104.0)]);
}

#[test]
fn test_moving_average_needs_enough_data() {
    let (x, y) = create_test_data();
    let mut model = MovingAverage::new(10).unwrap();
    assert!(model.fit(&x, &y).is_err());
}

#[test]
fn test_linear_regression_trend() {
    let index = daily_index(at(2023, 1, 1), 6);
    let y = TimeSeries::new(index.clone(), vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0]).unwrap();
    let mut model = LinearRegression::new();
    model.fit(&TimeFrame::empty(index), &y).unwrap();

    let coefficients = model.coefficients().unwrap();
    assert!((coefficients[0] - 10.0).abs() < 1e-9);
    assert!((coefficients[1] - 2.0).abs() < 1e-9);

    // Three days after the last training key
    let future = TimeFrame::empty(daily_index(at(2023, 1, 9), 1));
    let preds = model.predict(&future).unwrap();
    assert!((preds.column_f64(PREDICTION_COLUMN).unwrap()[0].unwrap() - 26.0).abs() < 1e-9);
}

#[test]
fn test_linear_regression_rejects_missing_covariates() {
    let index = daily_index(at(2023, 1, 1), 4);
    let temp = Series::new("temp", &[Some(1.0), None, Some(2.0), Some(0.5)]);
    let x = TimeFrame::new(index.clone(), DataFrame::new(vec![temp]).unwrap()).unwrap();
    let y = TimeSeries::new(index, vec![1.0, 2.0, 3.0, 4.0]).unwrap();

    let mut model = LinearRegression::new();
    assert!(model.fit(&x, &y).is_err());
}

#[test]
fn test_predict_before_fit() {
    let future = TimeFrame::empty(daily_index(at(2023, 1, 1), 1));

    assert!(MovingAverage::new(2).unwrap().predict(&future).is_err());
    assert!(LinearRegression::new().predict(&future).is_err());
}

#[test]
fn test_model_parameter_validation() {
    let result = MovingAverage::new(0);
    assert!(result.is_err());
}
