//! The holiday rule DSL, business-day calendar, market-calendar engine, and
//! pre-built exchange configurations.

pub mod business_day;
pub mod exchanges;
pub mod holiday_calendar;
pub mod holiday_rule;
pub mod market_calendar;

pub use business_day::{BusinessDayCalendar, RollPolicy};
pub use holiday_calendar::HolidayCalendar;
pub use holiday_rule::{HolidayRule, Observance, Offset};
pub use market_calendar::{
    ForceSpecialTimes, Interruption, MarketCalendar, MarketCalendarOptions, MarketTime,
    MarketTimeType, SpecialTime, SpecialTimeAdHoc,
};
