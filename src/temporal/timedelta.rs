use super::DateTime;

const NANOS_PER_DAY: i64 = 86_400_000_000_000;

/// A signed duration with both calendar fields (years, months, days) and a pure
/// nanosecond remainder.
///
/// Years/months are not nanosecond-pure: `apply_to` resolves them against the
/// target `DateTime`'s calendar date before folding in the remaining fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeDelta {
    pub years: i32,
    pub months: i32,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub nanos: i64,
}

impl TimeDelta {
    pub fn days(days: i64) -> Self {
        Self {
            days,
            ..Default::default()
        }
    }

    pub fn hours(hours: i64) -> Self {
        Self {
            hours,
            ..Default::default()
        }
    }

    /// The non-calendar part of this delta, in nanoseconds.
    fn pure_nanos(self) -> i64 {
        self.days * NANOS_PER_DAY
            + self.hours * 3_600_000_000_000
            + self.minutes * 60_000_000_000
            + self.seconds * 1_000_000_000
            + self.nanos
    }

    /// Applies this delta to `dt`, resolving calendar fields first and the pure
    /// nanosecond remainder second.
    pub fn apply_to(self, dt: DateTime) -> DateTime {
        let calendar_shifted = if self.years != 0 || self.months != 0 {
            let date = dt.date();
            let total_months = date.month as i32 - 1 + self.months + self.years * 12;
            let year = date.year + total_months.div_euclid(12);
            let month = total_months.rem_euclid(12) as u32 + 1;
            let day = clamp_day_to_month(year, month, date.day);
            let shifted_date = super::Date::new(year, month, day).expect("clamped day is valid");
            DateTime::naive(shifted_date, dt.time_of_day())
        } else {
            dt
        };
        DateTime::from_utc_nanos(calendar_shifted.utc_nanos() + self.pure_nanos()).with_tz_of(dt)
    }
}

impl DateTime {
    fn with_tz_of(self, other: DateTime) -> DateTime {
        match other.tz() {
            Some(tz) => self.with_tz(tz),
            None => self,
        }
    }
}

fn clamp_day_to_month(year: i32, month: u32, day: u32) -> u32 {
    day.min(days_in_month_of(year, month))
}

fn days_in_month_of(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = chrono::NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap();
    let first_of_this = chrono::NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    (first_of_next - first_of_this).num_days() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::{Date, Time};

    #[test]
    fn pure_day_delta_shifts_instant() {
        let start = DateTime::naive(Date::new(2024, 1, 1).unwrap(), Time::new(0, 0, 0).unwrap());
        let shifted = TimeDelta::days(1).apply_to(start);
        assert_eq!(shifted.date(), Date::new(2024, 1, 2).unwrap());
    }

    #[test]
    fn month_delta_clamps_to_shorter_month() {
        let start = DateTime::naive(Date::new(2024, 1, 31).unwrap(), Time::new(0, 0, 0).unwrap());
        let shifted = TimeDelta {
            months: 1,
            ..Default::default()
        }
        .apply_to(start);
        assert_eq!(shifted.date(), Date::new(2024, 2, 29).unwrap());
    }
}
