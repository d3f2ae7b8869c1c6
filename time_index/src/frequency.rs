//! Sampling frequencies and calendar arithmetic

use crate::{IndexError, Result};
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spacing between consecutive keys of a time index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Minute,
    Hour,
    Day,
    /// Weeks running Monday to Sunday
    Week,
    Month,
    Quarter,
    Year,
}

impl Frequency {
    /// Short alias, in the style of pandas offset strings
    pub fn alias(&self) -> &'static str {
        match self {
            Frequency::Minute => "T",
            Frequency::Hour => "H",
            Frequency::Day => "D",
            Frequency::Week => "W",
            Frequency::Month => "M",
            Frequency::Quarter => "Q",
            Frequency::Year => "A",
        }
    }

    fn months_per_step(&self) -> i64 {
        match self {
            Frequency::Month => 1,
            Frequency::Quarter => 3,
            Frequency::Year => 12,
            _ => 0,
        }
    }

    /// Move `ts` forward (or backward for negative `steps`) by whole steps.
    ///
    /// Month based frequencies keep the day of month, clamped to the length
    /// of the target month.
    pub fn advance(&self, ts: NaiveDateTime, steps: i64) -> Result<NaiveDateTime> {
        let shifted = match self {
            Frequency::Minute => TimeDelta::try_minutes(steps).and_then(|d| ts.checked_add_signed(d)),
            Frequency::Hour => TimeDelta::try_hours(steps).and_then(|d| ts.checked_add_signed(d)),
            Frequency::Day => TimeDelta::try_days(steps).and_then(|d| ts.checked_add_signed(d)),
            Frequency::Week => TimeDelta::try_weeks(steps).and_then(|d| ts.checked_add_signed(d)),
            Frequency::Month | Frequency::Quarter | Frequency::Year => self
                .months_per_step()
                .checked_mul(steps)
                .and_then(|months| shift_months(ts, months)),
        };

        shifted.ok_or_else(|| {
            IndexError::OutOfRange(format!(
                "cannot advance {} by {} steps of {}",
                ts, steps, self
            ))
        })
    }

    /// Ordinal of the period of this frequency that contains `ts`.
    ///
    /// Ordinal 0 is the period containing 1970-01-01 00:00.
    pub fn ordinal_of(&self, ts: NaiveDateTime) -> i64 {
        let seconds = ts.and_utc().timestamp();
        let months_since_epoch =
            (i64::from(ts.year()) - 1970) * 12 + i64::from(ts.month0());

        match self {
            Frequency::Minute => seconds.div_euclid(60),
            Frequency::Hour => seconds.div_euclid(3_600),
            Frequency::Day => seconds.div_euclid(86_400),
            // 1970-01-01 is a Thursday, the enclosing week starts on 1969-12-29
            Frequency::Week => (seconds.div_euclid(86_400) + 3).div_euclid(7),
            Frequency::Month => months_since_epoch,
            Frequency::Quarter => months_since_epoch.div_euclid(3),
            Frequency::Year => i64::from(ts.year()) - 1970,
        }
    }

    /// First instant of the period with the given ordinal
    pub fn start_of(&self, ordinal: i64) -> Result<NaiveDateTime> {
        let epoch = NaiveDateTime::default();
        let out_of_range =
            || IndexError::OutOfRange(format!("period ordinal {} of {}", ordinal, self));

        match self {
            Frequency::Minute | Frequency::Hour | Frequency::Day => {
                self.advance(epoch, ordinal).map_err(|_| out_of_range())
            }
            Frequency::Week => ordinal
                .checked_mul(7)
                .and_then(|days| days.checked_sub(3))
                .and_then(TimeDelta::try_days)
                .and_then(|delta| epoch.checked_add_signed(delta))
                .ok_or_else(out_of_range),
            Frequency::Month | Frequency::Quarter | Frequency::Year => {
                let months = ordinal
                    .checked_mul(self.months_per_step())
                    .ok_or_else(out_of_range)?;
                let year = months
                    .div_euclid(12)
                    .checked_add(1970)
                    .and_then(|year| i32::try_from(year).ok())
                    .ok_or_else(out_of_range)?;
                let month = u32::try_from(months.rem_euclid(12) + 1).map_err(|_| out_of_range())?;

                NaiveDate::from_ymd_opt(year, month, 1)
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
                    .ok_or_else(out_of_range)
            }
        }
    }

    /// Guess the frequency from the spacing of the first two timestamps
    pub fn infer(timestamps: &[NaiveDateTime]) -> Option<Frequency> {
        let (first, second) = match timestamps {
            [first, second, ..] => (*first, *second),
            _ => return None,
        };

        let candidates = [
            Frequency::Minute,
            Frequency::Hour,
            Frequency::Day,
            Frequency::Week,
            Frequency::Month,
            Frequency::Quarter,
            Frequency::Year,
        ];

        candidates
            .into_iter()
            .find(|freq| freq.advance(first, 1).map_or(false, |next| next == second))
    }

    /// Whether `ts` is the first instant of a period of this frequency
    pub fn is_aligned(&self, ts: NaiveDateTime) -> bool {
        self.start_of(self.ordinal_of(ts))
            .map_or(false, |start| start == ts)
    }
}

fn shift_months(ts: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        ts.checked_add_months(Months::new(magnitude))
    } else {
        ts.checked_sub_months(Months::new(magnitude))
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Minute => "minute",
            Frequency::Hour => "hour",
            Frequency::Day => "day",
            Frequency::Week => "week",
            Frequency::Month => "month",
            Frequency::Quarter => "quarter",
            Frequency::Year => "year",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Frequency {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self> {
        // Case matters for the one-letter aliases: "M" is month, "min" is minute
        match s {
            "T" | "min" => return Ok(Frequency::Minute),
            "H" => return Ok(Frequency::Hour),
            "D" => return Ok(Frequency::Day),
            "W" | "W-SUN" => return Ok(Frequency::Week),
            "M" | "MS" => return Ok(Frequency::Month),
            "Q" | "QS" => return Ok(Frequency::Quarter),
            "A" | "AS" | "Y" | "YS" => return Ok(Frequency::Year),
            _ => {}
        }

        match s.to_lowercase().as_str() {
            "minute" | "minutely" | "1min" => Ok(Frequency::Minute),
            "hour" | "hourly" | "1h" => Ok(Frequency::Hour),
            "day" | "daily" | "1d" => Ok(Frequency::Day),
            "week" | "weekly" | "1w" => Ok(Frequency::Week),
            "month" | "monthly" => Ok(Frequency::Month),
            "quarter" | "quarterly" => Ok(Frequency::Quarter),
            "year" | "yearly" | "annual" => Ok(Frequency::Year),
            _ => Err(IndexError::UnknownFrequency(s.to_string())),
        }
    }
}
