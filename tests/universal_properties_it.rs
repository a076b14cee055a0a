use epoch_ndframe::prelude::*;
use polars::prelude::Series as PSeries;

fn series(labels: Vec<Label>, name: &str, values: &[f64]) -> Series {
    Series::new(
        Index::new(labels),
        ChunkedArray::from_series(PSeries::new(name.into(), values)),
    )
    .unwrap()
}

/// Sorting an already-sorted index is idempotent.
#[test]
fn sort_values_is_idempotent() {
    let idx = Index::new(vec![Label::Int(3), Label::Int(1), Label::Int(2)]);
    let (once, _) = idx.sort_values();
    let (twice, _) = once.sort_values();
    assert!(once.equals(&twice));
}

/// Cumulative sum starts at the first element and is monotonically
/// non-decreasing for non-negative input, regardless of index order.
#[test]
fn cumsum_matches_running_total() {
    let s = series(
        vec![Label::Int(0), Label::Int(1), Label::Int(2)],
        "v",
        &[1.0, 2.0, 3.0],
    );
    let cum = s.cumsum().unwrap();
    assert_eq!(cum.values().get(0).unwrap(), Scalar::Float64(1.0));
    assert_eq!(cum.values().get(1).unwrap(), Scalar::Float64(3.0));
    assert_eq!(cum.values().get(2).unwrap(), Scalar::Float64(6.0));
}

/// `a.sub(&b)` and `b.sub(&a)` are sign-reversed after alignment, even when
/// the two sides don't share an index.
#[test]
fn subtraction_is_antisymmetric_after_alignment() {
    let a = series(vec![Label::Int(0), Label::Int(1)], "a", &[5.0, 7.0]);
    let b = series(vec![Label::Int(1), Label::Int(2)], "b", &[2.0, 9.0]);

    let forward = a.sub(&b).unwrap();
    let backward = b.sub(&a).unwrap();

    assert!(forward.index().equals(backward.index()));
    for i in 0..forward.len() {
        let (Scalar::Float64(f), Scalar::Float64(r)) = (
            forward.values().get(i).unwrap(),
            backward.values().get(i).unwrap(),
        ) else {
            assert!(forward.values().get(i).unwrap().is_null());
            assert!(backward.values().get(i).unwrap().is_null());
            continue;
        };
        assert!((f + r).abs() < 1e-9);
    }
}

/// `head(n)` and `tail(n)` return the requested number of rows from either
/// end of the index and agree on overlap when `2n >= len`.
#[test]
fn head_and_tail_cover_the_whole_series_when_overlapping() {
    let s = series(
        vec![Label::Int(0), Label::Int(1), Label::Int(2)],
        "v",
        &[10.0, 20.0, 30.0],
    );
    let head = s.head(2);
    let tail = s.tail(2);
    assert_eq!(head.len(), 2);
    assert_eq!(tail.len(), 2);
    assert_eq!(head.values().get(0).unwrap(), Scalar::Float64(10.0));
    assert_eq!(tail.values().get(1).unwrap(), Scalar::Float64(30.0));
}

/// Every valid trading day reported by a market calendar is also a business
/// day under its own weekmask/holiday set.
#[test]
fn valid_days_are_a_subset_of_business_days() {
    let nyse = exchanges::nyse().unwrap();
    let days = nyse
        .valid_days(Date::new(2024, 1, 1).unwrap(), Date::new(2024, 1, 31).unwrap())
        .unwrap();
    let business = nyse.holidays();
    for label in days.labels() {
        let Label::Timestamp(dt) = label else {
            unreachable!()
        };
        assert!(business.is_business_day(dt.date().into()));
    }
}

/// A schedule's session columns are always ordered open <= close for every
/// row, matching how the calendar is configured.
#[test]
fn schedule_open_never_exceeds_close() {
    let nyse = exchanges::nyse().unwrap();
    let schedule = nyse
        .schedule(
            Date::new(2024, 1, 1).unwrap(),
            Date::new(2024, 1, 31).unwrap(),
            &[MarketTimeType::MarketOpen, MarketTimeType::MarketClose],
            ForceSpecialTimes::Clamp,
        )
        .unwrap();
    let open = schedule.column("market_open").unwrap();
    let close = schedule.column("market_close").unwrap();
    for i in 0..schedule.height() {
        let (Scalar::Timestamp(o), Scalar::Timestamp(c)) = (open.iloc(i).unwrap(), close.iloc(i).unwrap())
        else {
            panic!("expected timestamp columns");
        };
        assert!(o <= c);
    }
}

/// A schedule's row index matches the valid trading days over the same
/// window one-for-one.
#[test]
fn schedule_index_matches_valid_days() {
    let nyse = exchanges::nyse().unwrap();
    let start = Date::new(2024, 3, 1).unwrap();
    let end = Date::new(2024, 3, 31).unwrap();
    let days = nyse.valid_days(start, end).unwrap();
    let schedule = nyse
        .schedule(start, end, &[MarketTimeType::MarketOpen], ForceSpecialTimes::Clamp)
        .unwrap();
    assert_eq!(days.len(), schedule.height());
}
