//! Forecaster wrapping a timestamp-keyed regression model
//!
//! [`RegressionForecaster`] accepts period-, timestamp- or position-keyed
//! data plus a [`ForecastingHorizon`], translates everything into the
//! timestamp-keyed tables a [`RegressionModel`] expects, and hands the
//! predictions back in the caller's index flavour.
//!
//! ```rust
//! use forecast_bridge::models::MovingAverage;
//! use forecast_bridge::{ForecastingHorizon, RegressionForecaster, TimeSeries};
//! use time_index::{Frequency, Period, PeriodIndex, TimeIndex};
//!
//! let start = Period::new(600, Frequency::Month);
//! let index = TimeIndex::from(PeriodIndex::from_start(start, 4));
//! let y = TimeSeries::new(index, vec![1.0, 2.0, 3.0, 4.0])?;
//!
//! let mut forecaster = RegressionForecaster::new(MovingAverage::new(2)?);
//! let fh = ForecastingHorizon::relative(1..=3)?;
//! forecaster.fit(&y, None, Some(&fh))?;
//!
//! let preds = forecaster.predict(None, None)?;
//! assert_eq!(preds.values(), &[3.5, 3.5, 3.5]);
//! # Ok::<(), forecast_bridge::ForecastError>(())
//! ```

use crate::adapt::{adapt_fit_data, adapt_predict_data, convert_predictions};
use crate::config::{ForecasterConfig, DEFAULT_ALPHA};
use crate::error::{ForecastError, Result};
use crate::frame::{TimeFrame, TimeSeries};
use crate::horizon::{extract_datetime_index, Cutoff, ForecastingHorizon, HorizonSlot};
use crate::models::RegressionModel;
use time_index::IndexKind;
use tracing::debug;

/// Options for a single predict call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictOptions {
    /// Request prediction intervals alongside point forecasts
    pub return_pred_int: bool,
    /// Significance level of the intervals
    pub alpha: f64,
}

impl Default for PredictOptions {
    fn default() -> Self {
        Self {
            return_pred_int: false,
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl PredictOptions {
    /// Point forecasts with the configured significance level
    pub fn from_config(config: &ForecasterConfig) -> Self {
        Self {
            return_pred_int: false,
            alpha: config.alpha,
        }
    }

    /// Request intervals at significance level `alpha`
    pub fn with_intervals(alpha: f64) -> Self {
        Self {
            return_pred_int: true,
            alpha,
        }
    }
}

/// What fit learned about the caller's keys
#[derive(Debug, Clone, PartialEq)]
pub struct FitRecord {
    cutoff: Cutoff,
    index_kind: IndexKind,
}

impl FitRecord {
    /// Take the cutoff from whichever input established the time frame
    fn from_inputs(y: &TimeSeries, x: Option<&TimeFrame>) -> Result<Self> {
        let source = if y.index().is_time_aware() {
            y.index()
        } else {
            x.map(TimeFrame::index)
                .filter(|index| index.is_time_aware())
                .ok_or_else(|| {
                    ForecastError::AmbiguousAlignment(
                        "Neither y nor X carries a PeriodIndex or DatetimeIndex".to_string(),
                    )
                })?
        };

        Ok(Self {
            cutoff: Cutoff::from_index(source)?,
            index_kind: source.kind(),
        })
    }

    pub fn cutoff(&self) -> &Cutoff {
        &self.cutoff
    }

    pub fn index_kind(&self) -> IndexKind {
        self.index_kind
    }
}

/// Lifecycle of a forecaster
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FitState {
    #[default]
    Unfitted,
    Fitted(FitRecord),
}

impl FitState {
    pub fn is_fitted(&self) -> bool {
        matches!(self, FitState::Fitted(_))
    }

    /// The fit record, or a not-fitted error naming `estimator`
    pub fn check_is_fitted(&self, estimator: &str) -> Result<&FitRecord> {
        match self {
            FitState::Fitted(record) => Ok(record),
            FitState::Unfitted => Err(ForecastError::NotFitted(format!(
                "This instance of {} has not been fitted yet; please call fit first",
                estimator
            ))),
        }
    }
}

/// Forecaster that delegates to a timestamp-keyed regression model
#[derive(Debug)]
pub struct RegressionForecaster<M> {
    model: M,
    config: ForecasterConfig,
    horizon: HorizonSlot,
    state: FitState,
    y: Option<TimeSeries>,
    x: Option<TimeFrame>,
}

impl<M: RegressionModel> RegressionForecaster<M> {
    /// Wrap `model` with the default configuration
    pub fn new(model: M) -> Self {
        let config = ForecasterConfig::default();
        Self {
            model,
            horizon: HorizonSlot::new(config.warn_on_horizon_change),
            config,
            state: FitState::Unfitted,
            y: None,
            x: None,
        }
    }

    /// Wrap `model` with `config`, which is validated first
    pub fn with_config(model: M, config: ForecasterConfig) -> Result<Self> {
        config.validate()?;

        let horizon = HorizonSlot::new(config.warn_on_horizon_change);
        Ok(Self {
            model,
            config,
            horizon,
            state: FitState::Unfitted,
            y: None,
            x: None,
        })
    }

    /// Fit the wrapped model on `y` and optional covariates `x`.
    ///
    /// A horizon given here is kept for predict calls that omit one. On
    /// error the forecaster keeps its previous inputs, horizon and state.
    pub fn fit(
        &mut self,
        y: &TimeSeries,
        x: Option<&TimeFrame>,
        fh: Option<&ForecastingHorizon>,
    ) -> Result<&mut Self> {
        if y.is_empty() {
            return Err(ForecastError::DataError(
                "Cannot fit on an empty time series".to_string(),
            ));
        }

        let (y_train, x_train) = adapt_fit_data(y, x)?;
        let record = FitRecord::from_inputs(y, x)?;

        debug!(
            model = self.model.name(),
            rows = y_train.len(),
            covariates = x_train.width(),
            index = %record.index_kind,
            "fitting wrapped model"
        );

        self.model.fit(&x_train, &y_train)?;

        // Nothing is stored until the model has accepted the data
        self.y = Some(y.clone());
        self.x = x.cloned();
        self.horizon.set_for_fit(fh);
        self.state = FitState::Fitted(record);

        Ok(self)
    }

    /// Point forecasts over `fh`, or over the horizon given to fit
    pub fn predict(
        &mut self,
        fh: Option<&ForecastingHorizon>,
        x: Option<&TimeFrame>,
    ) -> Result<TimeSeries> {
        let options = PredictOptions::from_config(&self.config);
        self.predict_with(fh, x, &options)
    }

    /// Forecasts with explicit options.
    ///
    /// Interval predictions are not available for any wrapped model and
    /// always fail.
    pub fn predict_with(
        &mut self,
        fh: Option<&ForecastingHorizon>,
        x: Option<&TimeFrame>,
        options: &PredictOptions,
    ) -> Result<TimeSeries> {
        if options.return_pred_int {
            return Err(Self::check_model_consistent_with_pred_int(options.alpha));
        }

        let record = self.state.check_is_fitted(self.model.name())?.clone();
        let fh = self.horizon.set_for_predict(fh)?.clone();

        let index = extract_datetime_index(&fh, record.cutoff())?;
        let x_pred = adapt_predict_data(x, &index)?;

        debug!(
            model = self.model.name(),
            steps = index.len(),
            covariates = x_pred.width(),
            "predicting with wrapped model"
        );

        let raw = self.model.predict(&x_pred)?;
        convert_predictions(&raw, record.cutoff().freq(), record.index_kind())
    }

    fn check_model_consistent_with_pred_int(alpha: f64) -> ForecastError {
        ForecastError::NotImplemented(format!(
            "Full support for confidence intervals is not implemented (alpha = {})",
            alpha
        ))
    }

    pub fn is_fitted(&self) -> bool {
        self.state.is_fitted()
    }

    pub fn state(&self) -> &FitState {
        &self.state
    }

    /// Last training key, once fitted
    pub fn cutoff(&self) -> Option<&Cutoff> {
        match &self.state {
            FitState::Fitted(record) => Some(record.cutoff()),
            FitState::Unfitted => None,
        }
    }

    /// Stored forecasting horizon
    pub fn fh(&self) -> Option<&ForecastingHorizon> {
        self.horizon.get()
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &ForecasterConfig {
        &self.config
    }

    /// Target series passed to the last fit
    pub fn y(&self) -> Option<&TimeSeries> {
        self.y.as_ref()
    }

    /// Covariates passed to the last fit
    pub fn x(&self) -> Option<&TimeFrame> {
        self.x.as_ref()
    }
}
