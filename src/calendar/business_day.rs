//! `BusinessDayCalendar`: a weekmask plus a holiday list, with roll
//! policies for snapping an arbitrary date onto the nearest business day.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use strum_macros::{Display, EnumString};

use crate::error::CalendarError;

/// How [`BusinessDayCalendar::roll`] should resolve a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum RollPolicy {
    Following,
    Preceding,
    ModifiedFollowing,
    ModifiedPreceding,
    Raise,
    Nat,
}

/// A business-day calendar: a weekmask (which weekdays count as business
/// days) plus a sorted list of additional holidays to exclude.
#[derive(Debug, Clone)]
pub struct BusinessDayCalendar {
    weekmask: [bool; 7],
    holidays: Vec<NaiveDate>,
}

impl BusinessDayCalendar {
    pub fn new(weekmask: [bool; 7], mut holidays: Vec<NaiveDate>) -> Self {
        holidays.sort_unstable();
        holidays.dedup();
        Self { weekmask, holidays }
    }

    pub fn five_day_week(holidays: Vec<NaiveDate>) -> Self {
        Self::new([true, true, true, true, true, false, false], holidays)
    }

    fn is_weekmask_day(&self, date: NaiveDate) -> bool {
        self.weekmask[date.weekday().num_days_from_monday() as usize]
    }

    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        self.is_weekmask_day(date) && self.holidays.binary_search(&date).is_err()
    }

    pub fn holidays(&self) -> &[NaiveDate] {
        &self.holidays
    }

    /// Resolves `date` to a business day per `policy`.
    pub fn roll(&self, date: NaiveDate, policy: RollPolicy) -> Result<Option<NaiveDate>, CalendarError> {
        if self.is_business_day(date) {
            return Ok(Some(date));
        }
        match policy {
            RollPolicy::Following => Ok(Some(self.next_business_day(date))),
            RollPolicy::Preceding => Ok(Some(self.previous_business_day(date))),
            RollPolicy::ModifiedFollowing => {
                let rolled = self.next_business_day(date);
                Ok(Some(if rolled.month() != date.month() {
                    self.previous_business_day(date)
                } else {
                    rolled
                }))
            }
            RollPolicy::ModifiedPreceding => {
                let rolled = self.previous_business_day(date);
                Ok(Some(if rolled.month() != date.month() {
                    self.next_business_day(date)
                } else {
                    rolled
                }))
            }
            RollPolicy::Raise => Err(CalendarError::NotABusinessDay(date.to_string())),
            RollPolicy::Nat => Ok(None),
        }
    }

    fn next_business_day(&self, date: NaiveDate) -> NaiveDate {
        let mut probe = date + Duration::days(1);
        while !self.is_business_day(probe) {
            probe += Duration::days(1);
        }
        probe
    }

    fn previous_business_day(&self, date: NaiveDate) -> NaiveDate {
        let mut probe = date - Duration::days(1);
        while !self.is_business_day(probe) {
            probe -= Duration::days(1);
        }
        probe
    }

    /// Counts business days in `[start, end)`, matching numpy's `busday_count`
    /// half-open convention.
    pub fn count_business_days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        if start >= end {
            return -self.count_business_days(end, start);
        }
        let mut count = 0i64;
        let mut probe = start;
        while probe < end {
            if self.is_business_day(probe) {
                count += 1;
            }
            probe += Duration::days(1);
        }
        count
    }

    pub fn business_days_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        let mut out = Vec::new();
        let mut probe = start;
        while probe <= end {
            if self.is_business_day(probe) {
                out.push(probe);
            }
            probe += Duration::days(1);
        }
        out
    }
}

pub fn weekday_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekend_is_not_a_business_day() {
        let cal = BusinessDayCalendar::five_day_week(vec![]);
        assert!(!cal.is_business_day(NaiveDate::from_ymd_opt(2024, 1, 6).unwrap())); // Saturday
    }

    #[test]
    fn following_rolls_forward_over_a_holiday() {
        let holiday = NaiveDate::from_ymd_opt(2024, 7, 4).unwrap();
        let cal = BusinessDayCalendar::five_day_week(vec![holiday]);
        let rolled = cal.roll(holiday, RollPolicy::Following).unwrap().unwrap();
        assert_eq!(rolled, NaiveDate::from_ymd_opt(2024, 7, 5).unwrap());
    }

    #[test]
    fn modified_following_falls_back_when_month_changes() {
        // 2024-06-30 is a Sunday and the last day of June.
        let cal = BusinessDayCalendar::five_day_week(vec![]);
        let date = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let rolled = cal.roll(date, RollPolicy::ModifiedFollowing).unwrap().unwrap();
        assert_eq!(rolled.month(), 6);
    }

    #[test]
    fn count_business_days_is_half_open() {
        let cal = BusinessDayCalendar::five_day_week(vec![]);
        let count = cal.count_business_days(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
        );
        assert_eq!(count, 5);
    }
}
