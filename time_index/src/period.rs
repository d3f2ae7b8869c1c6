//! Calendar periods

use crate::frequency::Frequency;
use crate::{IndexError, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A span of calendar time, such as the month of March 2021
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    ordinal: i64,
    freq: Frequency,
}

impl Period {
    /// Create a period from its ordinal (0 is the period containing the Unix epoch)
    pub fn new(ordinal: i64, freq: Frequency) -> Self {
        Self { ordinal, freq }
    }

    /// The period of frequency `freq` that contains `ts`
    pub fn containing(ts: NaiveDateTime, freq: Frequency) -> Self {
        Self::new(freq.ordinal_of(ts), freq)
    }

    /// The period of frequency `freq` that contains midnight of `date`
    pub fn from_date(date: NaiveDate, freq: Frequency) -> Self {
        Self::containing(date.and_time(chrono::NaiveTime::default()), freq)
    }

    pub fn ordinal(&self) -> i64 {
        self.ordinal
    }

    pub fn freq(&self) -> Frequency {
        self.freq
    }

    /// First instant of the period
    pub fn start_time(&self) -> Result<NaiveDateTime> {
        self.freq.start_of(self.ordinal)
    }

    /// The period `steps` later, or an error when the ordinal overflows
    pub fn checked_add(&self, steps: i64) -> Result<Self> {
        self.ordinal
            .checked_add(steps)
            .map(|ordinal| Self::new(ordinal, self.freq))
            .ok_or_else(|| {
                IndexError::OutOfRange(format!(
                    "period ordinal {} of {} cannot move by {} steps",
                    self.ordinal, self.freq, steps
                ))
            })
    }

    /// Re-express this period at another frequency, anchored on its start
    pub fn as_freq(&self, freq: Frequency) -> Result<Self> {
        Ok(Self::containing(self.start_time()?, freq))
    }
}

/// Panics on ordinal overflow, like integer addition; see [`Period::checked_add`]
impl Add<i64> for Period {
    type Output = Period;

    fn add(self, steps: i64) -> Period {
        Period::new(self.ordinal + steps, self.freq)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = match self.start_time() {
            Ok(start) => start,
            Err(_) => return write!(f, "{}#{}", self.freq.alias(), self.ordinal),
        };

        match self.freq {
            Frequency::Year => write!(f, "{:04}", start.year()),
            Frequency::Quarter => write!(f, "{:04}Q{}", start.year(), start.month0() / 3 + 1),
            Frequency::Month => write!(f, "{}", start.format("%Y-%m")),
            Frequency::Week | Frequency::Day => write!(f, "{}", start.format("%Y-%m-%d")),
            Frequency::Hour => write!(f, "{}", start.format("%Y-%m-%d %H:00")),
            Frequency::Minute => write!(f, "{}", start.format("%Y-%m-%d %H:%M")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_arithmetic() {
        let march = Period::from_date(date(2021, 3, 14), Frequency::Month);
        let june = march + 3;

        assert_eq!(june.start_time().unwrap().date(), date(2021, 6, 1));
        assert_eq!(june.ordinal() - march.ordinal(), 3);
        assert!(march < june);
    }

    #[test]
    fn test_display() {
        assert_eq!(Period::from_date(date(2021, 8, 3), Frequency::Quarter).to_string(), "2021Q3");
        assert_eq!(Period::from_date(date(2021, 8, 3), Frequency::Month).to_string(), "2021-08");
        assert_eq!(Period::from_date(date(2021, 8, 3), Frequency::Year).to_string(), "2021");
    }

    #[test]
    fn test_as_freq() {
        let q3 = Period::from_date(date(2021, 8, 3), Frequency::Quarter);
        let july = q3.as_freq(Frequency::Month).unwrap();
        assert_eq!(july, Period::from_date(date(2021, 7, 1), Frequency::Month));
    }

    #[test]
    fn test_checked_add_overflow() {
        let march = Period::from_date(date(2021, 3, 14), Frequency::Month);
        assert_eq!(march.checked_add(2).unwrap(), march + 2);
        assert!(matches!(
            march.checked_add(i64::MAX),
            Err(IndexError::OutOfRange(_))
        ));
    }
}
