//! Regression models wrapped by the forecaster

use crate::error::Result;
use crate::frame::{TimeFrame, TimeSeries};
use polars::prelude::*;
use std::fmt::Debug;

/// Name of the column reference models write their predictions to
pub const PREDICTION_COLUMN: &str = "prediction";

/// Regression model working on timestamp-keyed tables.
///
/// `fit` receives the covariates and the target on the same keys.
/// `predict` returns a table over the keys of `x` whose first column holds
/// the predictions.
pub trait RegressionModel: Debug {
    /// Fit the model
    fn fit(&mut self, x: &TimeFrame, y: &TimeSeries) -> Result<()>;

    /// Predict one value per row of `x`
    fn predict(&self, x: &TimeFrame) -> Result<TimeFrame>;

    /// Name of the model
    fn name(&self) -> &str;
}

impl<M: RegressionModel + ?Sized> RegressionModel for Box<M> {
    fn fit(&mut self, x: &TimeFrame, y: &TimeSeries) -> Result<()> {
        (**self).fit(x, y)
    }

    fn predict(&self, x: &TimeFrame) -> Result<TimeFrame> {
        (**self).predict(x)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// One-column prediction table over the keys of `x`
pub(crate) fn prediction_frame(x: &TimeFrame, values: Vec<f64>) -> Result<TimeFrame> {
    let data = DataFrame::new(vec![Series::new(PREDICTION_COLUMN, values)])?;
    TimeFrame::new(x.index().clone(), data)
}

pub mod linear_regression;
pub mod moving_average;

pub use linear_regression::LinearRegression;
pub use moving_average::MovingAverage;
