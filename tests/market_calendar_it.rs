use epoch_ndframe::prelude::*;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs a test-scoped tracing subscriber once per process so the
/// `tracing::debug!`/`trace!` calls emitted by calendar construction and
/// schedule materialization surface under `cargo test -- --nocapture`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().with_env_filter("debug").try_init();
    });
}

/// NYSE skips Independence Day but trades the surrounding business days.
#[test]
fn nyse_valid_days_skip_independence_day() {
    init_tracing();
    let nyse = exchanges::nyse().unwrap();
    let days = nyse
        .valid_days(Date::new(2024, 7, 1).unwrap(), Date::new(2024, 7, 8).unwrap())
        .unwrap();

    let dates: Vec<Date> = days
        .labels()
        .iter()
        .map(|label| match label {
            Label::Timestamp(dt) => dt.date(),
            _ => unreachable!(),
        })
        .collect();

    assert!(dates.contains(&Date::new(2024, 7, 3).unwrap()));
    assert!(!dates.contains(&Date::new(2024, 7, 4).unwrap()));
    assert!(dates.contains(&Date::new(2024, 7, 5).unwrap()));
}

/// CME Globex Crypto trades through the weekend, opening Sunday evening.
#[test]
fn cme_globex_crypto_opens_on_sunday() {
    let crypto = exchanges::cme_globex_crypto().unwrap();
    // 2024-01-07 is a Sunday, 2024-01-06 a Saturday.
    let days = crypto
        .valid_days(Date::new(2024, 1, 5).unwrap(), Date::new(2024, 1, 8).unwrap())
        .unwrap();
    let dates: Vec<Date> = days
        .labels()
        .iter()
        .map(|label| match label {
            Label::Timestamp(dt) => dt.date(),
            _ => unreachable!(),
        })
        .collect();
    assert!(dates.contains(&Date::new(2024, 1, 7).unwrap()));
    assert!(!dates.contains(&Date::new(2024, 1, 6).unwrap()));
}

/// CME Bond trades a shortened Good Friday session starting in 2021 but
/// closes fully on Good Friday in and before 2020.
#[test]
fn cme_bond_good_friday_rule_splits_across_2020_and_2021() {
    let bond = exchanges::cme_bond().unwrap();

    let days_2020 = bond
        .valid_days(Date::new(2020, 4, 8).unwrap(), Date::new(2020, 4, 13).unwrap())
        .unwrap();
    let good_friday_2020 = Date::new(2020, 4, 10).unwrap();
    assert!(!days_2020.labels().iter().any(|label| matches!(label, Label::Timestamp(dt) if dt.date() == good_friday_2020)));

    let days_2021 = bond
        .valid_days(Date::new(2021, 3, 30).unwrap(), Date::new(2021, 4, 3).unwrap())
        .unwrap();
    let good_friday_2021 = Date::new(2021, 4, 2).unwrap();
    assert!(days_2021.labels().iter().any(|label| matches!(label, Label::Timestamp(dt) if dt.date() == good_friday_2021)));
}

/// CME Bond's shortened Good Friday session (2021 onward) closes at exactly
/// 10:00 America/Chicago.
#[test]
fn cme_bond_good_friday_half_day_closes_at_ten_am_chicago() {
    init_tracing();
    let bond = exchanges::cme_bond().unwrap();
    let good_friday_2021 = Date::new(2021, 4, 2).unwrap();
    let schedule = bond
        .schedule(
            good_friday_2021,
            good_friday_2021,
            &[MarketTimeType::MarketClose],
            ForceSpecialTimes::Independent,
        )
        .unwrap();
    let close = schedule.column("market_close").unwrap();
    let Scalar::Timestamp(close_dt) = close.iloc(0).unwrap() else {
        panic!("expected a timestamp column");
    };
    let expected = DateTime::localize(
        good_friday_2021,
        Time::new(10, 0, 0).unwrap(),
        chrono_tz::Tz::America__Chicago,
    );
    assert_eq!(close_dt, expected);
}

/// `force_special_times` clamps BreakStart/BreakEnd onto a special-close
/// override, but only when requested.
#[test]
fn force_special_times_clamps_break_columns() {
    let options = MarketCalendarOptions {
        name: "HALFDAY".into(),
        tz: chrono_tz::America::New_York,
        weekmask: [true, true, true, true, true, false, false],
        regular_holidays: HolidayCalendar::empty(),
        adhoc_holidays: vec![],
        market_times: vec![
            (MarketTimeType::MarketOpen, MarketTime::new(Time::new(9, 30, 0).unwrap())),
            (MarketTimeType::BreakStart, MarketTime::new(Time::new(12, 0, 0).unwrap())),
            (MarketTimeType::BreakEnd, MarketTime::new(Time::new(13, 0, 0).unwrap())),
            (MarketTimeType::MarketClose, MarketTime::new(Time::new(16, 0, 0).unwrap())),
        ],
        special_opens: vec![],
        special_opens_adhoc: vec![],
        special_closes: vec![],
        special_closes_adhoc: vec![SpecialTimeAdHoc {
            time: Time::new(11, 0, 0).unwrap(),
            dates: vec![Date::new(2024, 7, 3).unwrap()],
            day_offset: 0,
        }],
        interruptions: vec![],
    };

    let calendar = MarketCalendar::new(options).unwrap();
    let schedule = calendar
        .schedule(
            Date::new(2024, 7, 3).unwrap(),
            Date::new(2024, 7, 3).unwrap(),
            &[
                MarketTimeType::MarketOpen,
                MarketTimeType::BreakStart,
                MarketTimeType::BreakEnd,
                MarketTimeType::MarketClose,
            ],
            ForceSpecialTimes::Clamp,
        )
        .unwrap();

    let break_end = schedule.column("break_end").unwrap();
    let close = schedule.column("market_close").unwrap();
    let (Scalar::Timestamp(break_end_dt), Scalar::Timestamp(close_dt)) =
        (break_end.iloc(0).unwrap(), close.iloc(0).unwrap())
    else {
        panic!("expected timestamp columns");
    };
    assert!(break_end_dt <= close_dt);
}

/// `sum(axis=Row)` on `a=[1,2], b=[3,4]` reduces across rows within each
/// column and returns a Series indexed by column name: `[a, b] -> [3, 7]`.
#[test]
fn dataframe_sum_axis_row_reduces_each_column_indexed_by_name() {
    let table = polars::prelude::df!["a" => [1.0f64, 2.0], "b" => [3.0f64, 4.0]].unwrap();
    let frame = DataFrame::new(from_range(0, 2), Table::from_dataframe(table)).unwrap();
    let totals = frame.aggregate(AggKernel::Sum, Axis::Row).unwrap();
    assert_eq!(totals.index().labels(), &[Label::Str("a".into()), Label::Str("b".into())]);
    assert_eq!(totals.iloc(0).unwrap(), Scalar::Float64(3.0));
    assert_eq!(totals.iloc(1).unwrap(), Scalar::Float64(7.0));
}

/// `sum(axis=Column)` on the same frame reduces across columns within each
/// row and returns a Series indexed by the DataFrame's own row index.
#[test]
fn dataframe_sum_axis_column_reduces_each_row_indexed_by_row_label() {
    let table = polars::prelude::df!["a" => [1.0f64, 2.0], "b" => [3.0f64, 4.0]].unwrap();
    let frame = DataFrame::new(from_range(0, 2), Table::from_dataframe(table)).unwrap();
    let totals = frame.aggregate(AggKernel::Sum, Axis::Column).unwrap();
    assert!(totals.index().equals(frame.index()));
    assert_eq!(totals.iloc(0).unwrap(), Scalar::Float64(4.0));
    assert_eq!(totals.iloc(1).unwrap(), Scalar::Float64(6.0));
}
