//! Temporal primitives: `Date`, `Time`, `DateTime`, `TimeDelta`.
//!
//! Built atop `chrono`/`chrono-tz` for calendar dates and timezone-aware
//! session times.

mod date;
mod datetime;
mod time;
mod timedelta;

pub use date::Date;
pub use datetime::DateTime;
pub use time::Time;
pub use timedelta::TimeDelta;
