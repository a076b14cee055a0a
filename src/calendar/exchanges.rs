//! Pre-built exchange configurations.
//!
//! NYSE covers the standard five-day equity session with federal holidays;
//! CME Globex Crypto trades through the weekend with a Sunday open; CME
//! Bond carries a Good Friday rule that closes fully through 2020 and
//! shortens to a half-day session from 2021 onward.

use chrono_tz::Tz;

use super::holiday_calendar::HolidayCalendar;
use super::holiday_rule::{
    good_friday, us_christmas_day, us_independence_day, us_juneteenth, us_labor_day,
    us_martin_luther_king_jr, us_memorial_day, us_new_years_day, us_presidents_day,
    us_thanksgiving_day, HolidayRule,
};
use super::market_calendar::{
    MarketCalendar, MarketCalendarOptions, MarketTime, MarketTimeType, SpecialTime,
};
use crate::error::CalendarError;
use crate::temporal::Time;

fn nyse_holidays() -> Vec<HolidayRule> {
    vec![
        us_new_years_day(),
        us_martin_luther_king_jr(),
        us_presidents_day(),
        good_friday(),
        us_memorial_day(),
        us_juneteenth(),
        us_independence_day(),
        us_labor_day(),
        us_thanksgiving_day(),
        us_christmas_day(),
    ]
}

pub fn nyse() -> Result<MarketCalendar, CalendarError> {
    MarketCalendar::new(MarketCalendarOptions {
        name: "NYSE".into(),
        tz: Tz::America__New_York,
        weekmask: [true, true, true, true, true, false, false],
        regular_holidays: HolidayCalendar::new(nyse_holidays()),
        adhoc_holidays: vec![],
        market_times: vec![
            (
                MarketTimeType::MarketOpen,
                MarketTime::new(Time::new(9, 30, 0).unwrap()),
            ),
            (
                MarketTimeType::MarketClose,
                MarketTime::new(Time::new(16, 0, 0).unwrap()),
            ),
        ],
        special_opens: vec![],
        special_opens_adhoc: vec![],
        special_closes: vec![],
        special_closes_adhoc: vec![],
        interruptions: vec![],
    })
}

/// CME Globex Crypto trades nearly round-the-clock, opening Sunday evening
/// and closing Friday evening with a short daily maintenance break.
pub fn cme_globex_crypto() -> Result<MarketCalendar, CalendarError> {
    MarketCalendar::new(MarketCalendarOptions {
        name: "CME Globex Crypto".into(),
        tz: Tz::America__Chicago,
        // Open Sun-Fri; weekmask marks Sunday a trading day, Saturday excluded.
        weekmask: [true, true, true, true, true, false, true],
        regular_holidays: HolidayCalendar::empty(),
        adhoc_holidays: vec![],
        market_times: vec![
            (
                MarketTimeType::MarketOpen,
                MarketTime::new(Time::new(17, 0, 0).unwrap()).with_day_offset(-1),
            ),
            (
                MarketTimeType::MarketClose,
                MarketTime::new(Time::new(16, 0, 0).unwrap()),
            ),
        ],
        special_opens: vec![],
        special_opens_adhoc: vec![],
        special_closes: vec![],
        special_closes_adhoc: vec![],
        interruptions: vec![],
    })
}

/// CME Bond (U.S. Treasury futures) closes fully on most NYSE holidays but
/// trades a shortened Good Friday session in most years — 2020 being the
/// recorded exception, modeled here as a rule-effective-window boundary.
pub fn cme_bond() -> Result<MarketCalendar, CalendarError> {
    let mut full_closure_good_friday = good_friday();
    full_closure_good_friday = full_closure_good_friday.ending(2020);

    let half_day_good_friday_subcalendar = {
        let mut rule = good_friday();
        rule = rule.starting(2021);
        HolidayCalendar::new(vec![rule])
    };

    MarketCalendar::new(MarketCalendarOptions {
        name: "CME Bond".into(),
        tz: Tz::America__Chicago,
        weekmask: [true, true, true, true, true, false, true],
        regular_holidays: HolidayCalendar::new(vec![
            us_new_years_day(),
            us_independence_day(),
            us_thanksgiving_day(),
            us_christmas_day(),
            full_closure_good_friday,
        ]),
        adhoc_holidays: vec![],
        market_times: vec![
            (
                MarketTimeType::MarketOpen,
                MarketTime::new(Time::new(17, 0, 0).unwrap()).with_day_offset(-1),
            ),
            (
                MarketTimeType::MarketClose,
                MarketTime::new(Time::new(16, 0, 0).unwrap()),
            ),
        ],
        special_opens: vec![],
        special_opens_adhoc: vec![],
        special_closes: vec![SpecialTime {
            time: Time::new(10, 0, 0).unwrap(),
            subcalendar: half_day_good_friday_subcalendar,
            day_offset: 0,
        }],
        special_closes_adhoc: vec![],
        interruptions: vec![],
    })
}
