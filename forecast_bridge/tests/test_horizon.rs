use chrono::{NaiveDate, NaiveDateTime};
use forecast_bridge::horizon::extract_datetime_index;
use forecast_bridge::{Cutoff, ForecastError, ForecastingHorizon, HorizonSlot};
use pretty_assertions::assert_eq;
use rstest::rstest;
use time_index::{
    DatetimeIndex, Frequency, IndexError, IndexKind, Period, PeriodIndex, TimeIndex,
};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn month(y: i32, m: u32) -> Period {
    Period::containing(at(y, m, 1), Frequency::Month)
}

#[test]
fn test_relative_horizon_is_sorted_and_deduplicated() {
    let fh = ForecastingHorizon::relative([3, 1, 2, 3]).unwrap();
    assert!(fh.is_relative());
    assert_eq!(fh.len(), 3);

    assert!(ForecastingHorizon::relative(Vec::<i64>::new()).is_err());
}

#[test]
fn test_absolute_horizon_requires_time_keys() {
    let err = ForecastingHorizon::absolute(TimeIndex::range(3)).unwrap_err();
    assert!(matches!(err, ForecastError::InvalidParameter(_)));
}

#[test]
fn test_relative_horizon_on_period_cutoff() {
    let cutoff = Cutoff::Period(month(2020, 12));
    let fh = ForecastingHorizon::relative(1..=3).unwrap();

    let index = fh.to_absolute(&cutoff).unwrap();

    assert_eq!(index.timestamps(), &[at(2021, 1, 1), at(2021, 2, 1), at(2021, 3, 1)]);
    assert_eq!(index.freq(), Some(Frequency::Month));
}

#[test]
fn test_relative_horizon_on_timestamp_cutoff() {
    let cutoff = Cutoff::Timestamp {
        at: at(2021, 1, 31),
        freq: Frequency::Month,
    };
    let fh = ForecastingHorizon::relative([1, 2]).unwrap();

    let index = fh.to_absolute(&cutoff).unwrap();

    assert_eq!(index.timestamps(), &[at(2021, 2, 28), at(2021, 3, 31)]);
}

#[test]
fn test_absolute_period_horizon_on_period_cutoff() {
    let cutoff = Cutoff::Period(month(2020, 12));
    let fh = ForecastingHorizon::absolute(TimeIndex::from(
        PeriodIndex::from_start(month(2021, 1), 2),
    ))
    .unwrap();

    let index = extract_datetime_index(&fh, &cutoff).unwrap();

    assert_eq!(index.timestamps().unwrap(), &[at(2021, 1, 1), at(2021, 2, 1)]);
}

#[test]
fn test_absolute_timestamps_snap_to_period_cutoff() {
    let cutoff = Cutoff::Period(month(2020, 12));
    let fh = ForecastingHorizon::absolute(TimeIndex::from(DatetimeIndex::new(vec![
        at(2021, 1, 15),
        at(2021, 2, 15),
    ])))
    .unwrap();

    let index = fh.to_absolute(&cutoff).unwrap();

    assert_eq!(index.timestamps(), &[at(2021, 1, 1), at(2021, 2, 1)]);
}

#[rstest]
#[case(vec![1, 2, 3], true)]
#[case(vec![2, 3], true)]
#[case(vec![1, 3], false)]
#[case(vec![1, 2, 5], false)]
fn test_contiguity(#[case] steps: Vec<i64>, #[case] contiguous: bool) {
    let cutoff = Cutoff::Period(Period::containing(at(2021, 3, 1), Frequency::Day));
    let fh = ForecastingHorizon::relative(steps).unwrap();

    let result = extract_datetime_index(&fh, &cutoff);

    if contiguous {
        assert!(result.is_ok());
    } else {
        assert!(matches!(result, Err(ForecastError::UnsupportedHorizon(_))));
    }
}

#[test]
fn test_gapped_absolute_timestamps_rejected() {
    let cutoff = Cutoff::Timestamp {
        at: at(2021, 1, 1),
        freq: Frequency::Day,
    };
    let fh = ForecastingHorizon::absolute(TimeIndex::from(DatetimeIndex::new(vec![
        at(2021, 1, 2),
        at(2021, 1, 4),
    ])))
    .unwrap();

    let err = extract_datetime_index(&fh, &cutoff).unwrap_err();
    assert!(err.to_string().contains("Non contiguous"));
}

#[test]
fn test_wide_gapped_horizon_rejected_from_ordinals() {
    let cutoff = Cutoff::Timestamp {
        at: at(2021, 1, 1),
        freq: Frequency::Hour,
    };
    let fh = ForecastingHorizon::relative([1, 30_000_000]).unwrap();

    let err = extract_datetime_index(&fh, &cutoff).unwrap_err();
    assert!(err.to_string().contains("2 unique keys span 30000000 hour steps"));
}

#[test]
fn test_contiguous_month_ends_on_timestamp_cutoff() {
    let cutoff = Cutoff::Timestamp {
        at: at(2020, 12, 31),
        freq: Frequency::Month,
    };
    let fh = ForecastingHorizon::relative(1..=3).unwrap();

    let index = extract_datetime_index(&fh, &cutoff).unwrap();
    assert_eq!(
        index.timestamps().unwrap(),
        &[at(2021, 1, 31), at(2021, 2, 28), at(2021, 3, 31)]
    );
}

#[rstest]
#[case(Cutoff::Period(month(2020, 12)), i64::MAX)]
#[case(Cutoff::Period(month(2020, 12)), i64::MIN)]
#[case(Cutoff::Timestamp { at: at(2021, 1, 1), freq: Frequency::Hour }, i64::MAX)]
#[case(Cutoff::Timestamp { at: at(2021, 1, 1), freq: Frequency::Hour }, i64::MAX / 2)]
#[case(Cutoff::Timestamp { at: at(2021, 1, 1), freq: Frequency::Month }, i64::MAX)]
fn test_extreme_steps_are_out_of_range(#[case] cutoff: Cutoff, #[case] step: i64) {
    let fh = ForecastingHorizon::relative([step]).unwrap();

    let err = extract_datetime_index(&fh, &cutoff).unwrap_err();
    assert!(matches!(err, ForecastError::Index(IndexError::OutOfRange(_))));
}

#[test]
fn test_cutoff_from_index() {
    let periods = TimeIndex::from(PeriodIndex::from_start(month(2020, 1), 4));
    let cutoff = Cutoff::from_index(&periods).unwrap();
    assert_eq!(cutoff, Cutoff::Period(month(2020, 4)));
    assert_eq!(cutoff.kind(), IndexKind::Period);

    let timestamps = TimeIndex::from(DatetimeIndex::new(vec![at(2020, 1, 1), at(2020, 1, 8)]));
    let cutoff = Cutoff::from_index(&timestamps).unwrap();
    assert_eq!(cutoff.freq(), Frequency::Week);
    assert_eq!(cutoff.kind(), IndexKind::Datetime);
}

#[test]
fn test_cutoff_needs_frequency() {
    let single = TimeIndex::from(DatetimeIndex::new(vec![at(2020, 1, 1)]));
    assert!(matches!(
        Cutoff::from_index(&single),
        Err(ForecastError::MissingFrequency(_))
    ));

    assert!(matches!(
        Cutoff::from_index(&TimeIndex::range(3)),
        Err(ForecastError::MissingFrequency(_))
    ));
}

#[test]
fn test_horizon_slot() {
    let mut slot = HorizonSlot::default();
    assert!(matches!(
        slot.set_for_predict(None),
        Err(ForecastError::MissingHorizon(_))
    ));

    let first = ForecastingHorizon::relative([1, 2]).unwrap();
    slot.set_for_fit(Some(&first));
    assert_eq!(slot.set_for_predict(None).unwrap(), &first);

    let second = ForecastingHorizon::relative([1, 2, 3]).unwrap();
    assert_eq!(slot.set_for_predict(Some(&second)).unwrap(), &second);
    assert_eq!(slot.get(), Some(&second));

    // A fit without a horizon keeps the stored one
    slot.set_for_fit(None);
    assert_eq!(slot.get(), Some(&second));
}
