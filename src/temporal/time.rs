use chrono::NaiveTime;
use chrono_tz::Tz;
use std::fmt;

/// A time-of-day, optionally carrying a timezone name as metadata.
///
/// The tz is not applied until the `Time` is combined with a [`super::Date`]
/// to form a [`super::DateTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub nanosecond: u32,
    pub tz: Option<Tz>,
}

impl Time {
    pub fn new(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(|_| Self {
            hour,
            minute,
            second,
            nanosecond: 0,
            tz: None,
        })
    }

    pub fn with_tz(self, tz: Tz) -> Self {
        Self {
            tz: Some(tz),
            ..self
        }
    }

    pub fn to_naive(self) -> NaiveTime {
        NaiveTime::from_hms_nano_opt(self.hour, self.minute, self.second, self.nanosecond)
            .expect("Time was constructed from a valid NaiveTime")
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}
