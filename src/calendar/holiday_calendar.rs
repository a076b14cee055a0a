use chrono::NaiveDate;
use dashmap::DashMap;
use std::sync::Arc;

use super::holiday_rule::HolidayRule;
use crate::error::CalendarError;
use crate::index::{make_datetime_index, Index};
use crate::temporal::{Date, DateTime, Time};

/// An ordered collection of [`HolidayRule`]s. `dates` materializes the union
/// of every rule's observances in a window, memoized per `(start, end)` since
/// [`super::market_calendar::MarketCalendar::schedule`] re-requests the same
/// window repeatedly.
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    rules: Arc<Vec<HolidayRule>>,
    cache: Arc<DashMap<(NaiveDate, NaiveDate), Vec<NaiveDate>>>,
}

impl HolidayCalendar {
    pub fn new(rules: Vec<HolidayRule>) -> Self {
        Self {
            rules: Arc::new(rules),
            cache: Arc::new(DashMap::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn rules(&self) -> &[HolidayRule] {
        &self.rules
    }

    /// All observed dates in `[start, end]`, ascending and deduplicated.
    pub fn dates(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>, CalendarError> {
        let key = (start, end);
        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached.clone());
        }
        let mut all = Vec::new();
        for rule in self.rules.iter() {
            all.extend(rule.dates_between(start, end)?);
        }
        all.sort_unstable();
        all.dedup();
        self.cache.insert(key, all.clone());
        Ok(all)
    }

    pub fn dates_index(&self, start: NaiveDate, end: NaiveDate) -> Result<Index, CalendarError> {
        let dates = self.dates(start, end)?;
        Ok(make_datetime_index(
            dates
                .into_iter()
                .map(|d| DateTime::naive(Date::from(d), Time::new(0, 0, 0).unwrap()))
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::holiday_rule::us_independence_day;

    #[test]
    fn dates_memoizes_repeated_windows() {
        let cal = HolidayCalendar::new(vec![us_independence_day()]);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let first = cal.dates(start, end).unwrap();
        let second = cal.dates(start, end).unwrap();
        assert_eq!(first, second);
        assert_eq!(first, vec![NaiveDate::from_ymd_opt(2024, 7, 4).unwrap()]);
    }
}
