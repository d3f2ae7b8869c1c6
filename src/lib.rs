//! # Forecast Bridge Workspace
//!
//! Umbrella crate re-exporting the workspace members:
//!
//! - [`time_index`]: frequencies, periods and time indices
//! - [`forecast_bridge`]: the forecaster adapter and its reference models
//!
//! ## Example
//!
//! ```
//! use forecast_bridge_workspace::prelude::*;
//!
//! let start = Period::new(0, Frequency::Year);
//! let y = TimeSeries::new(
//!     TimeIndex::from(PeriodIndex::from_start(start, 3)),
//!     vec![1.0, 1.0, 1.0],
//! )?;
//!
//! let mut forecaster = RegressionForecaster::new(MovingAverage::new(3)?);
//! forecaster.fit(&y, None, Some(&ForecastingHorizon::relative([1])?))?;
//!
//! let preds = forecaster.predict(None, None)?;
//! assert_eq!(preds.index().to_owned(), TimeIndex::from(PeriodIndex::from_start(start + 3, 1)));
//! # Ok::<(), ForecastError>(())
//! ```

pub use forecast_bridge;
pub use time_index;

/// Types needed for a fit/predict round trip
pub mod prelude {
    pub use forecast_bridge::models::{LinearRegression, MovingAverage, RegressionModel};
    pub use forecast_bridge::{
        Cutoff, ForecastError, ForecastingHorizon, ForecasterConfig, PredictOptions,
        RegressionForecaster, TimeFrame, TimeSeries,
    };
    pub use time_index::{
        DatetimeIndex, Frequency, IndexKind, Period, PeriodIndex, TimeIndex,
    };
}
