//! `MarketCalendar`: session times, special opens/closes, interruptions,
//! and `schedule()` materialization.

use chrono_tz::Tz;
use strum_macros::{Display, EnumString};

use super::business_day::BusinessDayCalendar;
use super::holiday_calendar::HolidayCalendar;
use crate::columnar::{ChunkedArray, Scalar, Table};
use crate::error::CalendarError;
use crate::index::{make_datetime_index, Index, Label};
use crate::ndframe::{DataFrame, Series};
use crate::temporal::{Date, DateTime, Time};

/// The named session boundaries a [`MarketCalendar`] can carry a time for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MarketTimeType {
    Pre,
    MarketOpen,
    BreakStart,
    BreakEnd,
    MarketClose,
    Post,
}

/// A single regular session time, optionally superseded by a later one as of
/// `effective_from`.
#[derive(Debug, Clone, Copy)]
pub struct MarketTime {
    pub time: Time,
    pub day_offset: i64,
    pub effective_from: Option<Date>,
}

impl MarketTime {
    pub fn new(time: Time) -> Self {
        Self {
            time,
            day_offset: 0,
            effective_from: None,
        }
    }

    pub fn with_day_offset(mut self, offset: i64) -> Self {
        self.day_offset = offset;
        self
    }
}

/// A rule-based early-open/early-close override, active on every date covered
/// by `subcalendar`.
#[derive(Debug, Clone)]
pub struct SpecialTime {
    pub time: Time,
    pub subcalendar: HolidayCalendar,
    pub day_offset: i64,
}

/// An ad-hoc early-open/early-close override active on an explicit set of dates.
#[derive(Debug, Clone)]
pub struct SpecialTimeAdHoc {
    pub time: Time,
    pub dates: Vec<Date>,
    pub day_offset: i64,
}

/// A single day's intraday trading interruption (e.g. a circuit breaker halt).
#[derive(Debug, Clone, Copy)]
pub struct Interruption {
    pub date: Date,
    pub start: Time,
    pub end: Time,
}

/// Whether `force_special_times` clamps dependent columns to a special
/// override, leaves them alone, or ignores overrides entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForceSpecialTimes {
    Clamp,
    Independent,
    Ignore,
}

/// Immutable configuration for one named market/exchange.
#[derive(Debug, Clone)]
pub struct MarketCalendarOptions {
    pub name: String,
    pub tz: Tz,
    pub weekmask: [bool; 7],
    pub regular_holidays: HolidayCalendar,
    pub adhoc_holidays: Vec<Date>,
    pub market_times: Vec<(MarketTimeType, MarketTime)>,
    pub special_opens: Vec<SpecialTime>,
    pub special_opens_adhoc: Vec<SpecialTimeAdHoc>,
    pub special_closes: Vec<SpecialTime>,
    pub special_closes_adhoc: Vec<SpecialTimeAdHoc>,
    pub interruptions: Vec<Interruption>,
}

type ScheduleCacheKey = (Date, Date, Vec<MarketTimeType>, ForceSpecialTimes);

/// A constructed trading calendar: session times, holiday rules, and special
/// overrides bound together. Immutable after construction.
#[derive(Debug, Clone)]
pub struct MarketCalendar {
    options: MarketCalendarOptions,
    business_days: BusinessDayCalendar,
    schedule_cache: std::sync::Arc<std::sync::Mutex<lru::LruCache<ScheduleCacheKey, DataFrame>>>,
}

impl MarketCalendar {
    #[tracing::instrument(skip(options), fields(name = %options.name, tz = %options.tz))]
    pub fn new(options: MarketCalendarOptions) -> Result<Self, CalendarError> {
        // `regular_holidays` is combined with a wide epoch window up front so the
        // business-day calendar's holiday list is available for `valid_days`.
        let wide_start = chrono::NaiveDate::from_ymd_opt(1950, 1, 1).unwrap();
        let wide_end = chrono::NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();
        let mut holidays = options.regular_holidays.dates(wide_start, wide_end)?;
        holidays.extend(options.adhoc_holidays.iter().map(|d| (*d).into()));
        tracing::debug!(holiday_count = holidays.len(), "constructed market calendar holiday set");
        let business_days = BusinessDayCalendar::new(options.weekmask, holidays);
        let capacity = std::num::NonZeroUsize::new(crate::config::config().schedule_cache_capacity)
            .unwrap_or(std::num::NonZeroUsize::new(1).unwrap());
        Ok(Self {
            options,
            business_days,
            schedule_cache: std::sync::Arc::new(std::sync::Mutex::new(lru::LruCache::new(capacity))),
        })
    }

    /// Memoized wrapper around [`MarketCalendar::schedule`]: repeated requests
    /// for the same `(start, end, market_times, force_special_times)` window
    /// skip recomputation, keyed by an LRU cache sized by
    /// [`crate::config::ComputeConfig::schedule_cache_capacity`].
    pub fn schedule_cached(
        &self,
        start: Date,
        end: Date,
        market_times: &[MarketTimeType],
        force_special_times: ForceSpecialTimes,
    ) -> Result<DataFrame, CalendarError> {
        let key = (start, end, market_times.to_vec(), force_special_times);
        if let Some(cached) = self
            .schedule_cache
            .lock()
            .expect("schedule cache mutex is not poisoned")
            .get(&key)
        {
            return Ok(cached.clone());
        }
        let computed = self.schedule(start, end, market_times, force_special_times)?;
        self.schedule_cache
            .lock()
            .expect("schedule cache mutex is not poisoned")
            .put(key, computed.clone());
        Ok(computed)
    }

    pub fn name(&self) -> &str {
        &self.options.name
    }

    pub fn tz(&self) -> Tz {
        self.options.tz
    }

    pub fn holidays(&self) -> &BusinessDayCalendar {
        &self.business_days
    }

    fn active_market_time(&self, kind: MarketTimeType, day: Date) -> Option<MarketTime> {
        self.options
            .market_times
            .iter()
            .filter(|(t, mt)| *t == kind && mt.effective_from.map(|eff| eff <= day).unwrap_or(true))
            .max_by_key(|(_, mt)| mt.effective_from)
            .map(|(_, mt)| *mt)
    }

    /// The regular open time in effect on `day`, ignoring special overrides.
    pub fn open_time(&self, day: Date) -> Option<Time> {
        self.active_market_time(MarketTimeType::MarketOpen, day).map(|mt| mt.time)
    }

    /// The regular close time in effect on `day`, ignoring special overrides.
    pub fn close_time(&self, day: Date) -> Option<Time> {
        self.active_market_time(MarketTimeType::MarketClose, day).map(|mt| mt.time)
    }

    /// The regular break-start time in effect on `day`, if this calendar has one.
    pub fn break_start(&self, day: Date) -> Option<Time> {
        self.active_market_time(MarketTimeType::BreakStart, day).map(|mt| mt.time)
    }

    /// The regular break-end time in effect on `day`, if this calendar has one.
    pub fn break_end(&self, day: Date) -> Option<Time> {
        self.active_market_time(MarketTimeType::BreakEnd, day).map(|mt| mt.time)
    }

    /// Dates in `[start, end]` where `kind` (MarketOpen/MarketClose) is
    /// superseded by a special (rule-based or ad-hoc) override.
    pub fn special_dates(
        &self,
        kind: MarketTimeType,
        start: Date,
        end: Date,
    ) -> Result<Vec<Date>, CalendarError> {
        let (rule_based, adhoc) = match kind {
            MarketTimeType::MarketOpen | MarketTimeType::Pre => {
                (&self.options.special_opens, &self.options.special_opens_adhoc)
            }
            MarketTimeType::MarketClose | MarketTimeType::Post => {
                (&self.options.special_closes, &self.options.special_closes_adhoc)
            }
            _ => return Ok(Vec::new()),
        };
        let mut dates = Vec::new();
        for special in rule_based {
            for d in special.subcalendar.dates(start.to_naive(), end.to_naive())? {
                dates.push(Date::from(d));
            }
        }
        for special in adhoc {
            dates.extend(special.dates.iter().copied().filter(|d| *d >= start && *d <= end));
        }
        dates.sort_unstable();
        dates.dedup();
        Ok(dates)
    }

    /// Ordered `Index` of business-day dates (as midnight instants in `tz`)
    /// within `[start, end]`.
    pub fn valid_days(&self, start: Date, end: Date) -> Result<Index, CalendarError> {
        if end < start {
            return Err(CalendarError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        let days = self
            .business_days
            .business_days_between(start.to_naive(), end.to_naive());
        Ok(make_datetime_index(
            days.into_iter()
                .map(|d| DateTime::localize(d.into(), Time::new(0, 0, 0).unwrap(), self.options.tz))
                .collect(),
        ))
    }

    /// Historical trading-day range reconstruction predating this calendar's
    /// rule set (e.g. NYSE before 1952, when session times and holiday
    /// observance differ from what `regular_holidays`/`market_times` encode).
    /// Not implemented: no rule table for that era is carried here.
    pub fn date_range_htf(&self, _start: Date, _end: Date) -> Result<Index, CalendarError> {
        Err(CalendarError::PreHistoricalNotSupported)
    }

    /// Projects `days` onto absolute timestamps at `market_time`, honoring any
    /// effective-dated session-time changes.
    pub fn days_at_time(&self, days: &Index, market_time: MarketTimeType) -> Result<Series, CalendarError> {
        let mut out = Vec::with_capacity(days.len());
        for label in days.labels() {
            let Label::Timestamp(dt) = label else {
                return Err(CalendarError::UnknownMarketTime(market_time.to_string()));
            };
            let date = dt.date();
            let mt = self
                .active_market_time(market_time, date)
                .ok_or_else(|| CalendarError::UnknownMarketTime(market_time.to_string()))?;
            let shifted_date = date.plus_days(mt.day_offset);
            out.push(DateTime::localize(shifted_date, mt.time, self.options.tz));
        }
        let series = ChunkedArray::from_series(polars::prelude::Series::new(
            market_time.to_string().into(),
            out.iter().map(|dt| dt.utc_nanos()).collect::<Vec<_>>(),
        ));
        Ok(Series::new(days.clone(), series)?)
    }

    fn special_override(
        &self,
        kind: MarketTimeType,
        date: Date,
    ) -> Result<Option<DateTime>, CalendarError> {
        let (rule_based, adhoc) = match kind {
            MarketTimeType::MarketOpen | MarketTimeType::Pre => {
                (&self.options.special_opens, &self.options.special_opens_adhoc)
            }
            MarketTimeType::MarketClose | MarketTimeType::Post => {
                (&self.options.special_closes, &self.options.special_closes_adhoc)
            }
            _ => return Ok(None),
        };

        let mut resolved = None;
        for special in rule_based {
            let window_start = date.minus_days(1).to_naive();
            let window_end = date.to_naive();
            if special
                .subcalendar
                .dates(window_start, window_end)?
                .contains(&date.to_naive())
            {
                resolved = Some((special.time, special.day_offset));
            }
        }
        for special in adhoc {
            if special.dates.contains(&date) {
                resolved = Some((special.time, special.day_offset));
            }
        }
        Ok(resolved.map(|(time, offset)| DateTime::localize(date.plus_days(offset), time, self.options.tz)))
    }

    /// Materializes a full schedule DataFrame over `[start, end]`.
    ///
    /// Column order is `market_times` declaration order; `force_special_times`
    /// controls whether BreakStart/BreakEnd are clamped to a special
    /// MarketOpen/MarketClose override, left independent, or ignored.
    pub fn schedule(
        &self,
        start: Date,
        end: Date,
        market_times: &[MarketTimeType],
        force_special_times: ForceSpecialTimes,
    ) -> Result<DataFrame, CalendarError> {
        let days = self.valid_days(start, end)?;
        self.schedule_from_days(&days, market_times, force_special_times)
    }

    /// Materializes a schedule DataFrame over an explicit set of business
    /// days rather than deriving them from a `[start, end]` range — useful
    /// when the caller already holds a filtered or previously computed
    /// `valid_days` index.
    pub fn schedule_from_days(
        &self,
        days: &Index,
        market_times: &[MarketTimeType],
        force_special_times: ForceSpecialTimes,
    ) -> Result<DataFrame, CalendarError> {
        let mut table = Table::empty();
        let mut resolved_open: Vec<Option<DateTime>> = Vec::new();
        let mut resolved_close: Vec<Option<DateTime>> = Vec::new();

        for &kind in market_times {
            let default_series = self.days_at_time(days, kind)?;
            let mut values = Vec::with_capacity(days.len());
            for (i, label) in days.labels().iter().enumerate() {
                let Label::Timestamp(default_dt) = label else {
                    unreachable!("valid_days only produces Timestamp labels")
                };
                let date = default_dt.date();
                let default_value = match default_series.iloc(i)? {
                    Scalar::Int64(ns) => DateTime::from_utc_nanos(ns),
                    _ => default_dt,
                };
                let overridden = if force_special_times != ForceSpecialTimes::Ignore {
                    self.special_override(kind, date)?
                } else {
                    None
                };
                let value = overridden.unwrap_or(default_value);
                values.push(Scalar::Timestamp(value));
                match kind {
                    MarketTimeType::MarketOpen => resolved_open.push(Some(value)),
                    MarketTimeType::MarketClose => resolved_close.push(Some(value)),
                    _ => {}
                }
            }
            table.with_column(crate::ndframe::scalars_to_named_array(&kind.to_string(), &values))?;
        }

        if force_special_times == ForceSpecialTimes::Clamp {
            clamp_breaks_in_place(&mut table, &resolved_open, &resolved_close)?;
        }

        let max_interruptions = max_interruptions_per_day(&self.options.interruptions, days);
        for k in 1..=max_interruptions {
            let mut starts = Vec::with_capacity(days.len());
            let mut ends = Vec::with_capacity(days.len());
            for label in days.labels() {
                let Label::Timestamp(dt) = label else { unreachable!() };
                let date = dt.date();
                let mut matching = self
                    .options
                    .interruptions
                    .iter()
                    .filter(|i| i.date == date);
                match matching.nth(k - 1) {
                    Some(interruption) => {
                        starts.push(Scalar::Timestamp(DateTime::localize(
                            date,
                            interruption.start,
                            self.options.tz,
                        )));
                        ends.push(Scalar::Timestamp(DateTime::localize(
                            date,
                            interruption.end,
                            self.options.tz,
                        )));
                    }
                    None => {
                        starts.push(Scalar::Null);
                        ends.push(Scalar::Null);
                    }
                }
            }
            table.with_column(crate::ndframe::scalars_to_named_array(
                &format!("interruption_start_{k}"),
                &starts,
            ))?;
            table.with_column(crate::ndframe::scalars_to_named_array(
                &format!("interruption_end_{k}"),
                &ends,
            ))?;
        }

        Ok(DataFrame::new(days.clone(), table)?)
    }

    /// Returns true iff `timestamp` falls within `[MarketOpen, MarketClose]`
    /// (or `[MarketOpen, MarketClose)` when `include_close` is false) on its
    /// calendar date, per `schedule`.
    pub fn open_at_time(
        &self,
        schedule: &DataFrame,
        timestamp: DateTime,
        include_close: bool,
    ) -> Result<bool, CalendarError> {
        let date_label = Label::Timestamp(DateTime::localize(
            timestamp.date(),
            Time::new(0, 0, 0).unwrap(),
            self.options.tz,
        ));
        let Ok(row) = schedule.loc(&date_label) else {
            return Ok(false);
        };
        let open = row.column("market_open")?;
        let close = row.column("market_close")?;
        let open_scalar = open.values().get(0)?;
        let close_scalar = close.values().get(0)?;
        let (Scalar::Timestamp(open_dt), Scalar::Timestamp(close_dt)) = (open_scalar, close_scalar) else {
            return Ok(false);
        };
        Ok(if include_close {
            timestamp >= open_dt && timestamp <= close_dt
        } else {
            timestamp >= open_dt && timestamp < close_dt
        })
    }
}

fn clamp_breaks_in_place(
    table: &mut Table,
    opens: &[Option<DateTime>],
    closes: &[Option<DateTime>],
) -> Result<(), CalendarError> {
    for name in ["break_start", "break_end"] {
        let Ok(col) = table.column(name) else {
            continue;
        };
        let mut clamped = Vec::with_capacity(col.len());
        for i in 0..col.len() {
            let value = col.get(i)?;
            let Scalar::Timestamp(dt) = value else {
                clamped.push(value);
                continue;
            };
            let open = opens.get(i).copied().flatten();
            let close = closes.get(i).copied().flatten();
            let clamped_dt = match (open, close) {
                (Some(o), Some(c)) => dt.clamp(o, c),
                _ => dt,
            };
            clamped.push(Scalar::Timestamp(clamped_dt));
        }
        let arr = crate::ndframe::scalars_to_named_array(name, &clamped);
        table.with_column(arr)?;
    }
    Ok(())
}

fn max_interruptions_per_day(interruptions: &[Interruption], days: &Index) -> usize {
    days.labels()
        .iter()
        .map(|label| {
            let Label::Timestamp(dt) = label else { return 0 };
            interruptions.iter().filter(|i| i.date == dt.date()).count()
        })
        .max()
        .unwrap_or(0)
}
