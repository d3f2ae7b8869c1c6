//! Translation between forecaster inputs and the wrapped model's format
//!
//! The wrapped model works on tables keyed by timestamps. Callers may key
//! their data by periods, by timestamps, or only by position, so every
//! input is normalized and aligned here before it reaches the model, and
//! predictions are re-keyed in the caller's flavour on the way back.

use crate::error::{ForecastError, Result};
use crate::frame::{series_to_f64, TimeFrame, TimeSeries};
use polars::prelude::*;
use time_index::{DatetimeIndex, Frequency, IndexKind, Period, PeriodIndex, TimeIndex};

/// Column holding join keys while two frames are merged
const INDEX_KEY: &str = "__index_key";

/// Convert a period index to the timestamps of its period starts.
///
/// Timestamp indices pass through unchanged.
pub fn ensure_datetime_index(index: &TimeIndex) -> Result<TimeIndex> {
    Ok(index.to_datetime()?)
}

fn join_keys(index: &TimeIndex) -> Result<Series> {
    let normalized = ensure_datetime_index(index)?;
    let timestamps = normalized.timestamps().ok_or_else(|| {
        ForecastError::AmbiguousAlignment(format!(
            "Cannot join on a {}, a PeriodIndex or DatetimeIndex is required",
            index.kind()
        ))
    })?;

    let keys: Vec<i64> = timestamps
        .iter()
        .map(|ts| ts.and_utc().timestamp_millis())
        .collect();

    Ok(Series::new(INDEX_KEY, keys))
}

/// Place `real` onto `base_index`.
///
/// A time-aware `real` is left-joined on its keys: every base key is kept,
/// unmatched rows of `real` are dropped and missing cells become null.
/// Otherwise rows are assigned to the base keys by position, which needs
/// equal lengths.
fn safe_merge(real: &TimeFrame, base_index: &TimeIndex) -> Result<TimeFrame> {
    if !real.index().is_time_aware() {
        if real.len() != base_index.len() {
            return Err(ForecastError::AmbiguousAlignment(format!(
                "Cannot assign {} rows by position onto {} keys",
                real.len(),
                base_index.len()
            )));
        }
        return TimeFrame::new(base_index.clone(), real.data().clone());
    }

    if real.width() == 0 {
        return Ok(TimeFrame::empty(base_index.clone()));
    }

    let base = DataFrame::new(vec![join_keys(base_index)?])?;
    let mut right = real.data().clone();
    right.with_column(join_keys(real.index())?)?;

    let joined = base.left_join(&right, [INDEX_KEY], [INDEX_KEY])?;
    let data = joined.drop(INDEX_KEY)?;

    TimeFrame::new(base_index.clone(), data)
}

/// Adapt fit inputs to timestamp-keyed data.
///
/// Whichever of `y` and `x` carries a period or timestamp index decides the
/// time frame; `y` wins when both do. Fails when neither is time-aware, or
/// when the other side has to be assigned by position and the lengths
/// differ.
pub fn adapt_fit_data(y: &TimeSeries, x: Option<&TimeFrame>) -> Result<(TimeSeries, TimeFrame)> {
    if y.index().is_time_aware() {
        let dt_index = ensure_datetime_index(y.index())?;
        let y_train = TimeSeries::new(dt_index.clone(), y.values().to_vec())?;

        let x_train = match x {
            None => TimeFrame::empty(dt_index),
            Some(x) => safe_merge(x, &dt_index).map_err(|e| match e {
                ForecastError::AmbiguousAlignment(_) => ForecastError::AmbiguousAlignment(format!(
                    "Combination of datetime information in y, no datetime information in X \
                     and different lengths (y: {}, X: {}) is ambiguous and not supported",
                    y.len(),
                    x.len()
                )),
                other => other,
            })?,
        };

        return Ok((y_train, x_train));
    }

    match x {
        Some(x) if x.index().is_time_aware() => {
            if x.len() != y.len() {
                return Err(ForecastError::AmbiguousAlignment(format!(
                    "Combination of datetime information in X, no datetime information in y \
                     and different lengths (X: {}, y: {}) is ambiguous and not supported",
                    x.len(),
                    y.len()
                )));
            }

            let dt_index = ensure_datetime_index(x.index())?;
            let x_train = TimeFrame::new(dt_index.clone(), x.data().clone())?;
            let y_train = TimeSeries::new(dt_index, y.values().to_vec())?;

            Ok((y_train, x_train))
        }
        _ => {
            let x_kind = x.map_or_else(
                || "no exogenous data".to_string(),
                |x| x.index().kind().to_string(),
            );

            Err(ForecastError::AmbiguousAlignment(format!(
                "At least one of y or X must have a PeriodIndex or DatetimeIndex. \
                 You provided {} for X and {} for y",
                x_kind,
                y.index().kind()
            )))
        }
    }
}

/// Build the model's prediction input over the resolved horizon `index`.
pub fn adapt_predict_data(x: Option<&TimeFrame>, index: &TimeIndex) -> Result<TimeFrame> {
    match x {
        None => Ok(TimeFrame::empty(index.clone())),
        Some(x) => safe_merge(x, index).map_err(|e| match e {
            ForecastError::AmbiguousAlignment(_) => ForecastError::AmbiguousAlignment(format!(
                "Providing exogenous variables without datetime information in the index \
                 while having a different length than the forecasting horizon \
                 (X: {}, horizon: {}) is not supported. Align the lengths or add \
                 datetime information to the index of X",
                x.len(),
                index.len()
            )),
            other => other,
        }),
    }
}

/// Re-key raw model predictions in the caller's index flavour.
///
/// The first column of `preds` holds the predicted values; null predictions
/// become `NaN`.
pub fn convert_predictions(preds: &TimeFrame, freq: Frequency, kind: IndexKind) -> Result<TimeSeries> {
    let column = preds.data().select_at_idx(0).ok_or_else(|| {
        ForecastError::ModelError("Prediction table has no columns".to_string())
    })?;

    let values: Vec<f64> = series_to_f64(column)
        .map_err(|e| ForecastError::ModelError(e.to_string()))?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();

    let normalized = ensure_datetime_index(preds.index())?;
    let timestamps = normalized.timestamps().ok_or_else(|| {
        ForecastError::ModelError(format!(
            "Predictions must be keyed by timestamps, got a {}",
            preds.index().kind()
        ))
    })?;

    let index = match kind {
        IndexKind::Period => TimeIndex::Period(PeriodIndex::new(
            timestamps
                .iter()
                .map(|ts| Period::containing(*ts, freq))
                .collect(),
            freq,
        )?),
        IndexKind::Datetime | IndexKind::Positional => {
            TimeIndex::Datetime(DatetimeIndex::with_freq(timestamps.to_vec(), freq))
        }
    };

    TimeSeries::new(index, values)
}
