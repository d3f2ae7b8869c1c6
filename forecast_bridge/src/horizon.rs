//! Forecasting horizons and cutoffs
//!
//! A horizon names the future keys to predict, either as step offsets from
//! the cutoff (the last training key) or as absolute keys. Resolving a
//! horizon against a cutoff yields timestamps at the cutoff's frequency.

use crate::error::{ForecastError, Result};
use chrono::NaiveDateTime;
use time_index::{DatetimeIndex, Frequency, IndexKind, Period, TimeIndex};
use tracing::warn;

/// Relative steps or absolute keys
#[derive(Debug, Clone, PartialEq)]
pub enum HorizonValues {
    /// Steps after the cutoff, 1 being the first key after it
    Relative(Vec<i64>),
    /// Period or timestamp keys
    Absolute(TimeIndex),
}

/// Future keys to predict
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastingHorizon {
    values: HorizonValues,
}

impl ForecastingHorizon {
    /// Horizon of steps relative to the cutoff; steps are sorted and deduplicated
    pub fn relative<I>(steps: I) -> Result<Self>
    where
        I: IntoIterator<Item = i64>,
    {
        let mut steps: Vec<i64> = steps.into_iter().collect();
        steps.sort_unstable();
        steps.dedup();

        if steps.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Forecasting horizon must contain at least one step".to_string(),
            ));
        }

        Ok(Self {
            values: HorizonValues::Relative(steps),
        })
    }

    /// Horizon of absolute period or timestamp keys
    pub fn absolute(index: TimeIndex) -> Result<Self> {
        if !index.is_time_aware() {
            return Err(ForecastError::InvalidParameter(format!(
                "Absolute forecasting horizon needs a PeriodIndex or DatetimeIndex, got {}",
                index.kind()
            )));
        }
        if index.is_empty() {
            return Err(ForecastError::InvalidParameter(
                "Forecasting horizon must contain at least one key".to_string(),
            ));
        }

        Ok(Self {
            values: HorizonValues::Absolute(index),
        })
    }

    pub fn values(&self) -> &HorizonValues {
        &self.values
    }

    pub fn is_relative(&self) -> bool {
        matches!(self.values, HorizonValues::Relative(_))
    }

    pub fn len(&self) -> usize {
        match &self.values {
            HorizonValues::Relative(steps) => steps.len(),
            HorizonValues::Absolute(index) => index.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve to timestamps at the cutoff's frequency.
    ///
    /// Period keys resolve to their start instants. Absolute timestamps are
    /// kept as given under a timestamp cutoff and snapped to period starts
    /// under a period cutoff.
    pub fn to_absolute(&self, cutoff: &Cutoff) -> Result<DatetimeIndex> {
        let freq = cutoff.freq();

        let timestamps = match (&self.values, cutoff) {
            (HorizonValues::Relative(steps), Cutoff::Period(period)) => steps
                .iter()
                .map(|step| period.checked_add(*step)?.start_time())
                .collect::<time_index::Result<Vec<_>>>()?,
            (HorizonValues::Relative(steps), Cutoff::Timestamp { at, .. }) => steps
                .iter()
                .map(|step| freq.advance(*at, *step))
                .collect::<time_index::Result<Vec<_>>>()?,
            (HorizonValues::Absolute(TimeIndex::Period(index)), _) => index
                .periods()
                .iter()
                .map(|period| period.as_freq(freq)?.start_time())
                .collect::<time_index::Result<Vec<_>>>()?,
            (HorizonValues::Absolute(TimeIndex::Datetime(index)), Cutoff::Period(_)) => index
                .timestamps()
                .iter()
                .map(|ts| Period::containing(*ts, freq).start_time())
                .collect::<time_index::Result<Vec<_>>>()?,
            (HorizonValues::Absolute(TimeIndex::Datetime(index)), Cutoff::Timestamp { .. }) => {
                index.timestamps().to_vec()
            }
            (HorizonValues::Absolute(TimeIndex::Positional(_)), _) => {
                return Err(ForecastError::InvalidParameter(
                    "Absolute forecasting horizon cannot be positional".to_string(),
                ))
            }
        };

        Ok(DatetimeIndex::with_freq(timestamps, freq))
    }
}

/// Last training key together with its frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cutoff {
    Period(Period),
    Timestamp { at: NaiveDateTime, freq: Frequency },
}

impl Cutoff {
    /// Cutoff at the last key of a time-aware index
    pub fn from_index(index: &TimeIndex) -> Result<Self> {
        match index {
            TimeIndex::Period(periods) => periods.last().map(Cutoff::Period).ok_or_else(|| {
                ForecastError::DataError("Cannot take a cutoff from an empty index".to_string())
            }),
            TimeIndex::Datetime(timestamps) => {
                let at = timestamps.last().ok_or_else(|| {
                    ForecastError::DataError(
                        "Cannot take a cutoff from an empty index".to_string(),
                    )
                })?;
                let freq = timestamps.freq().ok_or_else(|| {
                    ForecastError::MissingFrequency(format!(
                        "DatetimeIndex ending at {} has no frequency and none can be inferred \
                         from {} timestamp(s)",
                        at,
                        timestamps.len()
                    ))
                })?;
                Ok(Cutoff::Timestamp { at, freq })
            }
            TimeIndex::Positional(_) => Err(ForecastError::MissingFrequency(
                "A positional index carries no frequency to take a cutoff from".to_string(),
            )),
        }
    }

    pub fn freq(&self) -> Frequency {
        match self {
            Cutoff::Period(period) => period.freq(),
            Cutoff::Timestamp { freq, .. } => *freq,
        }
    }

    /// Flavour of the index the cutoff was taken from
    pub fn kind(&self) -> IndexKind {
        match self {
            Cutoff::Period(_) => IndexKind::Period,
            Cutoff::Timestamp { .. } => IndexKind::Datetime,
        }
    }
}

/// Resolve `fh` against `cutoff`, rejecting horizons with gaps.
///
/// The unique resolved keys must fill the whole range between their minimum
/// and maximum at the cutoff's frequency, counted in period ordinals.
pub fn extract_datetime_index(fh: &ForecastingHorizon, cutoff: &Cutoff) -> Result<TimeIndex> {
    let index = fh.to_absolute(cutoff)?;
    let freq = cutoff.freq();

    let mut unique = index.timestamps().to_vec();
    unique.sort_unstable();
    unique.dedup();

    if let (Some(first), Some(last)) = (unique.first(), unique.last()) {
        let span = i128::from(freq.ordinal_of(*last)) - i128::from(freq.ordinal_of(*first)) + 1;
        if span != unique.len() as i128 {
            return Err(ForecastError::UnsupportedHorizon(format!(
                "Non contiguous horizons are not supported: {} unique keys span {} {} steps \
                 from {} to {}",
                unique.len(),
                span,
                freq,
                first,
                last
            )));
        }
    }

    Ok(TimeIndex::Datetime(index))
}

/// Optional-horizon bookkeeping shared by fit and predict.
///
/// A horizon may be given to fit, to predict, or to both; the latest one
/// wins.
#[derive(Debug, Clone)]
pub struct HorizonSlot {
    fh: Option<ForecastingHorizon>,
    warn_on_change: bool,
}

impl Default for HorizonSlot {
    fn default() -> Self {
        Self::new(true)
    }
}

impl HorizonSlot {
    pub fn new(warn_on_change: bool) -> Self {
        Self {
            fh: None,
            warn_on_change,
        }
    }

    pub fn get(&self) -> Option<&ForecastingHorizon> {
        self.fh.as_ref()
    }

    /// Record the horizon passed to fit, if any
    pub fn set_for_fit(&mut self, fh: Option<&ForecastingHorizon>) {
        if let Some(fh) = fh {
            self.fh = Some(fh.clone());
        }
    }

    /// Record the horizon passed to predict and return the one to use
    pub fn set_for_predict(&mut self, fh: Option<&ForecastingHorizon>) -> Result<&ForecastingHorizon> {
        if let Some(fh) = fh {
            if self.warn_on_change && self.fh.as_ref().map_or(false, |previous| previous != fh) {
                warn!("The provided forecasting horizon differs from the previous one and replaces it");
            }
            self.fh = Some(fh.clone());
        }

        self.fh.as_ref().ok_or_else(|| {
            ForecastError::MissingHorizon(
                "The forecasting horizon must be passed either to fit or predict, \
                 but was found in neither"
                    .to_string(),
            )
        })
    }
}
