//! Indexed series and tables

use crate::error::{ForecastError, Result};
use polars::prelude::*;
use time_index::TimeIndex;

/// Numeric observations keyed by a time index
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    index: TimeIndex,
    values: Vec<f64>,
}

impl TimeSeries {
    /// Create a series; the index and the values must have the same length
    pub fn new(index: TimeIndex, values: Vec<f64>) -> Result<Self> {
        if index.len() != values.len() {
            return Err(ForecastError::DataError(format!(
                "Index length ({}) doesn't match values length ({})",
                index.len(),
                values.len()
            )));
        }

        Ok(Self { index, values })
    }

    /// Series keyed by the positions `0..values.len()`
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            index: TimeIndex::range(values.len()),
            values,
        }
    }

    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn into_parts(self) -> (TimeIndex, Vec<f64>) {
        (self.index, self.values)
    }
}

/// Covariate columns keyed by a time index.
///
/// The polars frame holds only the data columns; the keys live in `index`.
/// A frame without columns may sit on an index of any length.
#[derive(Debug, Clone)]
pub struct TimeFrame {
    index: TimeIndex,
    data: DataFrame,
}

impl TimeFrame {
    /// Create a frame; a non-empty frame must have one row per index key
    pub fn new(index: TimeIndex, data: DataFrame) -> Result<Self> {
        if data.width() > 0 && data.height() != index.len() {
            return Err(ForecastError::DataError(format!(
                "Index length ({}) doesn't match frame height ({})",
                index.len(),
                data.height()
            )));
        }

        Ok(Self { index, data })
    }

    /// Frame with no columns over `index`
    pub fn empty(index: TimeIndex) -> Self {
        Self {
            index,
            data: DataFrame::default(),
        }
    }

    /// Frame keyed by the positions `0..data.height()`
    pub fn from_dataframe(data: DataFrame) -> Self {
        Self {
            index: TimeIndex::range(data.height()),
            data,
        }
    }

    pub fn index(&self) -> &TimeIndex {
        &self.index
    }

    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Number of rows, which is the number of index keys
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of data columns
    pub fn width(&self) -> usize {
        self.data.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Get a column as f64 values, nulls kept as `None`
    pub fn column_f64(&self, column_name: &str) -> Result<Vec<Option<f64>>> {
        let col = self.data.column(column_name).map_err(|e| {
            ForecastError::DataError(format!("Column '{}' not found: {}", column_name, e))
        })?;

        series_to_f64(col)
    }
}

/// Cast a numeric polars series to f64, keeping nulls
pub(crate) fn series_to_f64(series: &Series) -> Result<Vec<Option<f64>>> {
    if !series.dtype().is_numeric() {
        return Err(ForecastError::DataError(format!(
            "Column '{}' of type {} cannot be converted to f64",
            series.name(),
            series.dtype()
        )));
    }

    let casted = series.cast(&DataType::Float64)?;
    Ok(casted.f64()?.into_iter().collect())
}
