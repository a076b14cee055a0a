use chrono::{LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

use super::{Date, Time};

/// A point in time, canonicalized to an absolute instant (UTC nanoseconds since the
/// epoch) plus an optional presentation timezone.
///
/// `tz` never participates in equality, ordering, or hashing: two `DateTime`s
/// that name the same instant are equal regardless of which timezone they
/// are displayed in.
#[derive(Debug, Clone, Copy)]
pub struct DateTime {
    utc_nanos: i64,
    tz: Option<Tz>,
}

impl DateTime {
    /// Treats `(date, time)` as naive wall-clock values with no timezone attached.
    /// The instant is the same wall-clock value interpreted as UTC.
    pub fn naive(date: Date, time: Time) -> Self {
        let naive = NaiveDateTime::new(date.to_naive(), time.to_naive());
        Self {
            utc_nanos: naive.and_utc().timestamp_nanos_opt().unwrap_or(i64::MIN),
            tz: None,
        }
    }

    /// Localizes `(date, time)` in `tz`. Ambiguous times (a fall-back DST
    /// transition) resolve to the earlier instant; non-existent times (a
    /// spring-forward gap) are shifted to the first valid instant.
    pub fn localize(date: Date, time: Time, tz: Tz) -> Self {
        let naive = NaiveDateTime::new(date.to_naive(), time.to_naive());
        let utc = match tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earliest, _latest) => earliest.with_timezone(&Utc),
            LocalResult::None => {
                // Walk forward in one-minute steps until we land in a valid offset.
                let mut probe = naive;
                loop {
                    probe += chrono::Duration::minutes(1);
                    if let LocalResult::Single(dt) = tz.from_local_datetime(&probe) {
                        break dt.with_timezone(&Utc);
                    }
                }
            }
        };
        Self {
            utc_nanos: utc.timestamp_nanos_opt().unwrap_or(i64::MIN),
            tz: Some(tz),
        }
    }

    pub fn from_utc_nanos(utc_nanos: i64) -> Self {
        Self {
            utc_nanos,
            tz: None,
        }
    }

    pub fn utc_nanos(self) -> i64 {
        self.utc_nanos
    }

    pub fn tz(self) -> Option<Tz> {
        self.tz
    }

    /// Relabels the presentation timezone without changing the instant.
    pub fn with_tz(self, tz: Tz) -> Self {
        Self {
            tz: Some(tz),
            ..self
        }
    }

    fn to_utc_chrono(self) -> chrono::DateTime<Utc> {
        Utc.timestamp_nanos(self.utc_nanos)
    }

    /// The calendar date of this instant, in the presentation timezone (UTC if none).
    pub fn date(self) -> Date {
        match self.tz {
            Some(tz) => Date::today_naive_from(self.to_utc_chrono().with_timezone(&tz).date_naive()),
            None => Date::today_naive_from(self.to_utc_chrono().date_naive()),
        }
    }

    pub fn time_of_day(self) -> Time {
        let naive = match self.tz {
            Some(tz) => self.to_utc_chrono().with_timezone(&tz).time(),
            None => self.to_utc_chrono().time(),
        };
        Time {
            hour: naive.format("%H").to_string().parse().unwrap_or(0),
            minute: naive.format("%M").to_string().parse().unwrap_or(0),
            second: naive.format("%S").to_string().parse().unwrap_or(0),
            nanosecond: 0,
            tz: self.tz,
        }
    }

    pub fn plus_days(self, days: i64) -> Self {
        Self {
            utc_nanos: self.utc_nanos + days * 86_400_000_000_000,
            tz: self.tz,
        }
    }
}

impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        self.utc_nanos == other.utc_nanos
    }
}
impl Eq for DateTime {}

impl PartialOrd for DateTime {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for DateTime {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.utc_nanos.cmp(&other.utc_nanos)
    }
}
impl std::hash::Hash for DateTime {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.utc_nanos.hash(state);
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.tz {
            Some(tz) => write!(f, "{}", self.to_utc_chrono().with_timezone(&tz)),
            None => write!(f, "{}", self.to_utc_chrono()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::America::Chicago;

    #[test]
    fn localize_ignores_presentation_tz_for_equality() {
        let naive = DateTime::naive(Date::new(2020, 1, 12).unwrap(), Time::new(17, 0, 0).unwrap());
        let same_instant = DateTime::from_utc_nanos(naive.utc_nanos()).with_tz(Chicago);
        assert_eq!(naive, same_instant);
    }

    #[test]
    fn localize_handles_dst_spring_forward_gap() {
        // 2024-03-10 02:30 America/Chicago does not exist (clocks jump 02:00 -> 03:00).
        let dt = DateTime::localize(
            Date::new(2024, 3, 10).unwrap(),
            Time::new(2, 30, 0).unwrap(),
            Chicago,
        );
        assert!(dt.utc_nanos() > 0);
    }

    #[test]
    fn ordering_is_by_instant() {
        let a = DateTime::localize(Date::new(2020, 1, 12).unwrap(), Time::new(17, 0, 0).unwrap(), Chicago);
        let b = DateTime::localize(Date::new(2020, 1, 12).unwrap(), Time::new(18, 0, 0).unwrap(), Chicago);
        assert!(a < b);
    }
}
