//! # Forecast Bridge
//!
//! Adapts regression models that work on timestamp-keyed tables to a
//! forecasting interface driven by horizons and cutoffs.
//!
//! ## Features
//!
//! - Indexed series and covariate tables backed by polars
//! - Period, timestamp and positional keys, normalized to timestamps for the model
//! - Relative and absolute forecasting horizons with contiguity checks
//! - Left-join alignment of covariates, positional assignment as a fallback
//! - Predictions returned in the caller's original index flavour
//!
//! ## Quick Start
//!
//! ```rust
//! use forecast_bridge::models::LinearRegression;
//! use forecast_bridge::{ForecastingHorizon, RegressionForecaster, TimeSeries};
//! use time_index::{Frequency, Period, PeriodIndex, TimeIndex};
//!
//! let start = Period::new(200, Frequency::Quarter);
//! let index = TimeIndex::from(PeriodIndex::from_start(start, 6));
//! let y = TimeSeries::new(index, vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0])?;
//!
//! let mut forecaster = RegressionForecaster::new(LinearRegression::new());
//! forecaster.fit(&y, None, None)?;
//!
//! let fh = ForecastingHorizon::relative([1, 2])?;
//! let preds = forecaster.predict(Some(&fh), None)?;
//! assert!((preds.values()[0] - 22.0).abs() < 1e-6);
//! assert!(matches!(preds.index(), TimeIndex::Period(_)));
//! # Ok::<(), forecast_bridge::ForecastError>(())
//! ```

pub mod adapt;
pub mod config;
pub mod error;
pub mod forecaster;
pub mod frame;
pub mod horizon;
pub mod models;

// Re-export commonly used types
pub use crate::config::{ForecasterConfig, DEFAULT_ALPHA};
pub use crate::error::{ForecastError, Result};
pub use crate::forecaster::{FitState, PredictOptions, RegressionForecaster};
pub use crate::frame::{TimeFrame, TimeSeries};
pub use crate::horizon::{Cutoff, ForecastingHorizon, HorizonSlot};
pub use crate::models::RegressionModel;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
