//! Contiguous ranges of keys

use crate::frequency::Frequency;
use crate::period::Period;
use crate::Result;
use chrono::NaiveDateTime;

/// Every timestamp from `start` to `end` inclusive, stepping by `freq`.
///
/// Steps are taken from `start` each time so month clamping does not drift.
pub fn date_range(
    start: NaiveDateTime,
    end: NaiveDateTime,
    freq: Frequency,
) -> Result<Vec<NaiveDateTime>> {
    let mut timestamps = Vec::new();
    let mut step = 0;

    loop {
        let current = freq.advance(start, step)?;
        if current > end {
            break;
        }
        timestamps.push(current);
        step += 1;
    }

    Ok(timestamps)
}

/// Every period from `start` to `end` inclusive
pub fn period_range(start: Period, end: Period) -> Vec<Period> {
    (start.ordinal()..=end.ordinal())
        .map(|ordinal| Period::new(ordinal, start.freq()))
        .collect()
}
