use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;

/// A calendar day with no timezone, no time-of-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Date {
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(|_| Self { year, month, day })
    }

    pub fn today_naive_from(naive: NaiveDate) -> Self {
        Self {
            year: naive.year(),
            month: naive.month(),
            day: naive.day(),
        }
    }

    pub fn to_naive(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .expect("Date was constructed from a valid NaiveDate")
    }

    pub fn weekday(self) -> Weekday {
        self.to_naive().weekday()
    }

    pub fn plus_days(self, days: i64) -> Self {
        Self::today_naive_from(self.to_naive() + chrono::Duration::days(days))
    }

    pub fn minus_days(self, days: i64) -> Self {
        self.plus_days(-days)
    }

    /// Number of days between `self` and `other` (positive when `other` is later).
    pub fn days_until(self, other: Self) -> i64 {
        (other.to_naive() - self.to_naive()).num_days()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for Date {
    fn from(naive: NaiveDate) -> Self {
        Self::today_naive_from(naive)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.to_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_naive_date() {
        let naive = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        let date: Date = naive.into();
        assert_eq!(NaiveDate::from(date), naive);
    }

    #[test]
    fn weekday_matches_chrono() {
        let date = Date::new(2024, 7, 4).unwrap();
        assert_eq!(date.weekday(), Weekday::Thu);
    }

    #[test]
    fn plus_days_crosses_month_boundary() {
        let date = Date::new(2024, 6, 29).unwrap();
        assert_eq!(date.plus_days(3), Date::new(2024, 7, 2).unwrap());
    }
}
