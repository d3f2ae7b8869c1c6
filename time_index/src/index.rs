//! Period, timestamp and positional indices

use crate::frequency::Frequency;
use crate::period::Period;
use crate::{IndexError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flavour of a [`TimeIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndexKind {
    Period,
    Datetime,
    /// Plain integer positions with no calendar meaning
    Positional,
}

impl IndexKind {
    /// Period and datetime indices carry calendar information
    pub fn is_time_aware(&self) -> bool {
        matches!(self, IndexKind::Period | IndexKind::Datetime)
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Period => write!(f, "PeriodIndex"),
            IndexKind::Datetime => write!(f, "DatetimeIndex"),
            IndexKind::Positional => write!(f, "PositionalIndex"),
        }
    }
}

/// Sequence of periods sharing one frequency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodIndex {
    periods: Vec<Period>,
    freq: Frequency,
}

impl PeriodIndex {
    /// Create a period index; every period must have frequency `freq`
    pub fn new(periods: Vec<Period>, freq: Frequency) -> Result<Self> {
        if let Some(other) = periods.iter().find(|p| p.freq() != freq) {
            return Err(IndexError::InvalidInput(format!(
                "period {} has frequency {}, expected {}",
                other,
                other.freq(),
                freq
            )));
        }

        Ok(Self { periods, freq })
    }

    /// `len` consecutive periods starting at `start`
    pub fn from_start(start: Period, len: usize) -> Self {
        let periods = (0..len as i64).map(|step| start + step).collect();
        Self {
            periods,
            freq: start.freq(),
        }
    }

    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    pub fn freq(&self) -> Frequency {
        self.freq
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn last(&self) -> Option<Period> {
        self.periods.last().copied()
    }

    /// Convert to the start instant of every period
    pub fn to_timestamp(&self) -> Result<DatetimeIndex> {
        let timestamps = self
            .periods
            .iter()
            .map(Period::start_time)
            .collect::<Result<Vec<_>>>()?;

        Ok(DatetimeIndex::with_freq(timestamps, self.freq))
    }
}

/// Sequence of timestamps, optionally tagged with a frequency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatetimeIndex {
    timestamps: Vec<NaiveDateTime>,
    freq: Option<Frequency>,
}

impl DatetimeIndex {
    /// Create a datetime index, inferring the frequency from the first two keys
    pub fn new(timestamps: Vec<NaiveDateTime>) -> Self {
        let freq = Frequency::infer(&timestamps);
        Self { timestamps, freq }
    }

    pub fn with_freq(timestamps: Vec<NaiveDateTime>, freq: Frequency) -> Self {
        Self {
            timestamps,
            freq: Some(freq),
        }
    }

    /// `len` consecutive timestamps starting at `start`
    pub fn from_start(start: NaiveDateTime, len: usize, freq: Frequency) -> Result<Self> {
        let timestamps = (0..len as i64)
            .map(|step| freq.advance(start, step))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::with_freq(timestamps, freq))
    }

    pub fn timestamps(&self) -> &[NaiveDateTime] {
        &self.timestamps
    }

    pub fn freq(&self) -> Option<Frequency> {
        self.freq
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn last(&self) -> Option<NaiveDateTime> {
        self.timestamps.last().copied()
    }

    /// Periods of frequency `freq` containing each timestamp
    pub fn to_period(&self, freq: Frequency) -> PeriodIndex {
        PeriodIndex {
            periods: self
                .timestamps
                .iter()
                .map(|ts| Period::containing(*ts, freq))
                .collect(),
            freq,
        }
    }
}

/// Keys of an indexed series or table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeIndex {
    Period(PeriodIndex),
    Datetime(DatetimeIndex),
    Positional(Vec<i64>),
}

impl TimeIndex {
    /// Positional index `0..len`
    pub fn range(len: usize) -> Self {
        TimeIndex::Positional((0..len as i64).collect())
    }

    pub fn kind(&self) -> IndexKind {
        match self {
            TimeIndex::Period(_) => IndexKind::Period,
            TimeIndex::Datetime(_) => IndexKind::Datetime,
            TimeIndex::Positional(_) => IndexKind::Positional,
        }
    }

    pub fn is_time_aware(&self) -> bool {
        self.kind().is_time_aware()
    }

    pub fn len(&self) -> usize {
        match self {
            TimeIndex::Period(index) => index.len(),
            TimeIndex::Datetime(index) => index.len(),
            TimeIndex::Positional(positions) => positions.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn freq(&self) -> Option<Frequency> {
        match self {
            TimeIndex::Period(index) => Some(index.freq()),
            TimeIndex::Datetime(index) => index.freq(),
            TimeIndex::Positional(_) => None,
        }
    }

    /// Normalize to a timestamp index.
    ///
    /// Period keys become their start instants and keep their frequency.
    /// Datetime and positional indices are returned unchanged.
    pub fn to_datetime(&self) -> Result<TimeIndex> {
        match self {
            TimeIndex::Period(index) => Ok(TimeIndex::Datetime(index.to_timestamp()?)),
            other => Ok(other.clone()),
        }
    }

    /// Timestamps of a datetime index
    pub fn timestamps(&self) -> Option<&[NaiveDateTime]> {
        match self {
            TimeIndex::Datetime(index) => Some(index.timestamps()),
            _ => None,
        }
    }
}

impl From<PeriodIndex> for TimeIndex {
    fn from(index: PeriodIndex) -> Self {
        TimeIndex::Period(index)
    }
}

impl From<DatetimeIndex> for TimeIndex {
    fn from(index: DatetimeIndex) -> Self {
        TimeIndex::Datetime(index)
    }
}
