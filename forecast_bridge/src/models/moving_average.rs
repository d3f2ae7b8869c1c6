//! Moving average model

use crate::error::{ForecastError, Result};
use crate::frame::{TimeFrame, TimeSeries};
use crate::models::{prediction_frame, RegressionModel};

/// Predicts the mean of the last `window` observations for every row.
///
/// Covariates are ignored.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    /// Name of the model
    name: String,
    /// Window size
    window: usize,
    /// Average of the last window, set by fit
    level: Option<f64>,
}

impl MovingAverage {
    /// Create a new moving average model
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(ForecastError::InvalidParameter(
                "Window size must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!("Moving Average (window={})", window),
            window,
            level: None,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Fitted level, if any
    pub fn level(&self) -> Option<f64> {
        self.level
    }
}

impl RegressionModel for MovingAverage {
    fn fit(&mut self, _x: &TimeFrame, y: &TimeSeries) -> Result<()> {
        let values = y.values();
        if values.len() < self.window {
            return Err(ForecastError::ModelError(format!(
                "Insufficient data for moving average. Need at least {} observations, got {}.",
                self.window,
                values.len()
            )));
        }

        let tail = &values[values.len() - self.window..];
        self.level = Some(tail.iter().sum::<f64>() / self.window as f64);

        Ok(())
    }

    fn predict(&self, x: &TimeFrame) -> Result<TimeFrame> {
        let level = self.level.ok_or_else(|| {
            ForecastError::ModelError(format!("{} must be fitted before predicting", self.name))
        })?;

        prediction_frame(x, vec![level; x.len()])
    }

    fn name(&self) -> &str {
        &self.name
    }
}
