//! `HolidayRule`: a data-driven holiday DSL.
//!
//! Each rule anchors on a month/day or an Easter offset, applies a stack of
//! offsets, then resolves a weekend/holiday observance policy — enough to
//! express the US federal holiday calendar declaratively rather than as a
//! hardcoded date table.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::CalendarError;

/// A nth-weekday-of-month anchor, e.g. "3rd Monday" (`nth = 3`) or "last
/// Monday" (`nth = -1`), mirroring the original's `MO(n)`/`TH(n)` offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NthWeekday {
    pub weekday: Weekday,
    pub nth: i32,
}

/// How a rule's anchor date is adjusted to its final observance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    /// Replace the (month, day) anchor with the nth weekday of that month.
    NthWeekdayOfMonth(NthWeekday),
    /// Replace the anchor with that year's Easter Sunday.
    Easter,
    /// Shift the resolved date by a fixed number of calendar days.
    Days(i64),
}

/// A named function that nudges a holiday observance off a weekend, mirroring
/// the original's `next_monday`/`nearest_workday`/etc. lambdas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observance {
    None,
    NextMonday,
    NextMondayOrTuesday,
    PreviousFriday,
    SundayToMonday,
    WeekendToMonday,
    NearestWorkday,
    NextWorkday,
    PreviousWorkday,
    BeforeNearestWorkday,
    AfterNearestWorkday,
}

impl Observance {
    fn apply(self, date: NaiveDate) -> NaiveDate {
        match self {
            Observance::None => date,
            Observance::NextMonday => match date.weekday() {
                Weekday::Sat => date + Duration::days(2),
                Weekday::Sun => date + Duration::days(1),
                _ => date,
            },
            Observance::NextMondayOrTuesday => match date.weekday() {
                Weekday::Sat | Weekday::Sun => date + Duration::days(2),
                Weekday::Mon => date + Duration::days(1),
                _ => date,
            },
            Observance::PreviousFriday => match date.weekday() {
                Weekday::Sat => date - Duration::days(1),
                Weekday::Sun => date - Duration::days(2),
                _ => date,
            },
            Observance::SundayToMonday => {
                if date.weekday() == Weekday::Sun {
                    date + Duration::days(1)
                } else {
                    date
                }
            }
            Observance::WeekendToMonday => match date.weekday() {
                Weekday::Sun => date + Duration::days(1),
                Weekday::Sat => date + Duration::days(2),
                _ => date,
            },
            Observance::NearestWorkday => match date.weekday() {
                Weekday::Sat => date - Duration::days(1),
                Weekday::Sun => date + Duration::days(1),
                _ => date,
            },
            Observance::NextWorkday => next_workday(date),
            Observance::PreviousWorkday => previous_workday(date),
            Observance::BeforeNearestWorkday => {
                previous_workday(Observance::NearestWorkday.apply(date))
            }
            Observance::AfterNearestWorkday => next_workday(Observance::NearestWorkday.apply(date)),
        }
    }
}

fn next_workday(date: NaiveDate) -> NaiveDate {
    let mut next = date + Duration::days(1);
    while matches!(next.weekday(), Weekday::Sat | Weekday::Sun) {
        next += Duration::days(1);
    }
    next
}

fn previous_workday(date: NaiveDate) -> NaiveDate {
    let mut prev = date - Duration::days(1);
    while matches!(prev.weekday(), Weekday::Sat | Weekday::Sun) {
        prev -= Duration::days(1);
    }
    prev
}

/// A single named holiday, resolved to a concrete date per year.
#[derive(Debug, Clone)]
pub struct HolidayRule {
    pub name: String,
    pub month: u32,
    pub day: u32,
    pub offsets: Vec<Offset>,
    pub observance: Observance,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    /// If present, the rule emits nothing for a resolved date whose weekday
    /// is not in this set.
    pub allowed_weekdays: Option<Vec<Weekday>>,
}

impl HolidayRule {
    pub fn new(name: impl Into<String>, month: u32, day: u32) -> Self {
        Self {
            name: name.into(),
            month,
            day,
            offsets: Vec::new(),
            observance: Observance::None,
            start_year: None,
            end_year: None,
            allowed_weekdays: None,
        }
    }

    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offsets.push(offset);
        self
    }

    pub fn with_observance(mut self, observance: Observance) -> Self {
        self.observance = observance;
        self
    }

    pub fn starting(mut self, year: i32) -> Self {
        self.start_year = Some(year);
        self
    }

    pub fn ending(mut self, year: i32) -> Self {
        self.end_year = Some(year);
        self
    }

    pub fn with_allowed_weekdays(mut self, weekdays: Vec<Weekday>) -> Self {
        self.allowed_weekdays = Some(weekdays);
        self
    }

    /// Resolves this rule's observed date for `year`, or `None` if `year` is
    /// outside the rule's effective window, or if the resolved date's weekday
    /// is excluded by `allowed_weekdays`.
    pub fn date_for_year(&self, year: i32) -> Result<Option<NaiveDate>, CalendarError> {
        if self.start_year.is_some_and(|s| year < s) || self.end_year.is_some_and(|e| year > e) {
            return Ok(None);
        }
        let mut date = NaiveDate::from_ymd_opt(year, self.month, self.day)
            .ok_or_else(|| CalendarError::NotABusinessDay(format!("{year}-{}-{}", self.month, self.day)))?;
        for offset in &self.offsets {
            date = match offset {
                Offset::Easter => easter_sunday(year)?,
                Offset::NthWeekdayOfMonth(nth) => nth_weekday_of_month(year, date.month(), *nth)?,
                Offset::Days(n) => date + Duration::days(*n),
            };
        }
        let observed = self.observance.apply(date);
        if let Some(allowed) = &self.allowed_weekdays {
            if !allowed.contains(&observed.weekday()) {
                return Ok(None);
            }
        }
        Ok(Some(observed))
    }

    /// All observed dates in `[start, end]` inclusive, one per year touched.
    pub fn dates_between(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, CalendarError> {
        let mut out = Vec::new();
        for year in start.year()..=end.year() {
            if let Some(date) = self.date_for_year(year)? {
                if date >= start && date <= end {
                    out.push(date);
                }
            }
        }
        Ok(out)
    }
}

fn nth_weekday_of_month(year: i32, month: u32, nth: NthWeekday) -> Result<NaiveDate, CalendarError> {
    let err = || CalendarError::NotABusinessDay(format!("{year}-{month}"));
    if nth.nth > 0 {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(err)?;
        let offset = (7 + nth.weekday.num_days_from_monday() as i64
            - first.weekday().num_days_from_monday() as i64)
            % 7;
        let first_occurrence = first + Duration::days(offset);
        Ok(first_occurrence + Duration::days(7 * (nth.nth as i64 - 1)))
    } else {
        let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
        let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1).ok_or_else(err)?;
        let last_of_month = first_of_next - Duration::days(1);
        let offset = (7 + last_of_month.weekday().num_days_from_monday() as i64
            - nth.weekday.num_days_from_monday() as i64)
            % 7;
        Ok(last_of_month - Duration::days(offset + 7 * (nth.nth.unsigned_abs() as i64 - 1)))
    }
}

/// Easter Sunday via the Anonymous Gregorian (Meeus/Jones/Butcher) algorithm.
pub fn easter_sunday(year: i32) -> Result<NaiveDate, CalendarError> {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
        .ok_or_else(|| CalendarError::NotABusinessDay(format!("easter {year}")))
}

pub fn good_friday() -> HolidayRule {
    HolidayRule::new("Good Friday", 1, 1)
        .with_offset(Offset::Easter)
        .with_offset(Offset::Days(-2))
}

pub fn easter_monday() -> HolidayRule {
    HolidayRule::new("Easter Monday", 1, 1)
        .with_offset(Offset::Easter)
        .with_offset(Offset::Days(1))
}

pub fn us_memorial_day() -> HolidayRule {
    HolidayRule::new("Memorial Day", 5, 31).with_offset(Offset::NthWeekdayOfMonth(NthWeekday {
        weekday: Weekday::Mon,
        nth: -1,
    }))
}

pub fn us_labor_day() -> HolidayRule {
    HolidayRule::new("Labor Day", 9, 1).with_offset(Offset::NthWeekdayOfMonth(NthWeekday {
        weekday: Weekday::Mon,
        nth: 1,
    }))
}

pub fn us_thanksgiving_day() -> HolidayRule {
    HolidayRule::new("Thanksgiving Day", 11, 1).with_offset(Offset::NthWeekdayOfMonth(NthWeekday {
        weekday: Weekday::Thu,
        nth: 4,
    }))
}

pub fn us_martin_luther_king_jr() -> HolidayRule {
    HolidayRule::new("Martin Luther King Jr. Day", 1, 1)
        .with_offset(Offset::NthWeekdayOfMonth(NthWeekday {
            weekday: Weekday::Mon,
            nth: 3,
        }))
        .starting(1986)
}

pub fn us_presidents_day() -> HolidayRule {
    HolidayRule::new("Presidents Day", 2, 1).with_offset(Offset::NthWeekdayOfMonth(NthWeekday {
        weekday: Weekday::Mon,
        nth: 3,
    }))
}

pub fn us_independence_day() -> HolidayRule {
    HolidayRule::new("Independence Day", 7, 4).with_observance(Observance::WeekendToMonday)
}

pub fn us_juneteenth() -> HolidayRule {
    HolidayRule::new("Juneteenth National Independence Day", 6, 19)
        .with_observance(Observance::WeekendToMonday)
        .starting(2021)
}

pub fn us_christmas_day() -> HolidayRule {
    HolidayRule::new("Christmas Day", 12, 25).with_observance(Observance::NearestWorkday)
}

pub fn us_new_years_day() -> HolidayRule {
    HolidayRule::new("New Year's Day", 1, 1).with_observance(Observance::SundayToMonday)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn easter_matches_known_dates() {
        assert_eq!(easter_sunday(2024).unwrap(), NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(easter_sunday(2025).unwrap(), NaiveDate::from_ymd_opt(2025, 4, 20).unwrap());
    }

    #[test]
    fn good_friday_is_two_days_before_easter() {
        let gf = good_friday().date_for_year(2025).unwrap().unwrap();
        assert_eq!(gf, NaiveDate::from_ymd_opt(2025, 4, 18).unwrap());
    }

    #[test]
    fn thanksgiving_is_fourth_thursday_of_november() {
        let t = us_thanksgiving_day().date_for_year(2024).unwrap().unwrap();
        assert_eq!(t, NaiveDate::from_ymd_opt(2024, 11, 28).unwrap());
    }

    #[test]
    fn memorial_day_is_last_monday_of_may() {
        let m = us_memorial_day().date_for_year(2024).unwrap().unwrap();
        assert_eq!(m, NaiveDate::from_ymd_opt(2024, 5, 27).unwrap());
    }

    #[test]
    fn juneteenth_is_unobserved_before_2021() {
        assert_eq!(us_juneteenth().date_for_year(2020).unwrap(), None);
        assert!(us_juneteenth().date_for_year(2022).unwrap().is_some());
    }

    #[test]
    fn independence_day_observed_on_nearest_weekday() {
        // 2026-07-04 is a Saturday -> observed Friday 2026-07-03.
        let d = us_independence_day().date_for_year(2026).unwrap().unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2026, 7, 3).unwrap());
    }

    #[test]
    fn allowed_weekdays_suppresses_excluded_observances() {
        // Christmas Day's nearest-workday observance can land on a Monday
        // (e.g. 2023, where Dec 25 is a Monday already); restrict to Friday
        // only and years not landing on that weekday emit nothing.
        let friday_only = us_christmas_day().with_allowed_weekdays(vec![Weekday::Fri]);
        assert_eq!(
            us_christmas_day().date_for_year(2023).unwrap(),
            Some(NaiveDate::from_ymd_opt(2023, 12, 25).unwrap())
        );
        assert_eq!(friday_only.date_for_year(2023).unwrap(), None);

        // 2020-12-25 is a Friday, so the restricted rule still emits it.
        assert_eq!(
            friday_only.date_for_year(2020).unwrap(),
            Some(NaiveDate::from_ymd_opt(2020, 12, 25).unwrap())
        );
    }
}
