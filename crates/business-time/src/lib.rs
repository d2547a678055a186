//! # business-time
//!
//! Deterministic business-time computation.
//!
//! Given a calendar of business weekdays, daily business hours and an
//! optional holiday source, computes how much of the wall-clock time between
//! two timestamps falls inside business hours. Typical use is SLA
//! accounting: "how much business time passed between ticket creation and
//! resolution".
//!
//! ## Modules
//!
//! - [`calendar`] — business-day classification and day iteration
//! - [`delta`] — business time elapsed between two timestamps
//! - [`holidays`] — holiday providers (fixed sets, generators, US federal)
//! - [`error`] — Error types
//!
//! ## Example
//!
//! ```
//! use business_time::{BusinessCalendar, CalendarOptions, UsFederalHolidays};
//! use chrono::{NaiveDate, TimeDelta};
//!
//! let cal = BusinessCalendar::with_holidays(CalendarOptions::default(), UsFederalHolidays)?;
//! let start = NaiveDate::from_ymd_opt(2014, 1, 16).unwrap().and_hms_opt(18, 30, 0).unwrap();
//! let end = NaiveDate::from_ymd_opt(2014, 1, 22).unwrap().and_hms_opt(10, 0, 0).unwrap();
//!
//! // Friday, then Tuesday (Monday is MLK Day), then one hour on Wednesday.
//! assert_eq!(cal.business_time_delta(start, end), cal.open_hours() * 2 + TimeDelta::hours(1));
//! # Ok::<(), business_time::BusinessTimeError>(())
//! ```

pub mod calendar;
pub mod delta;
pub mod error;
pub mod holidays;

pub use calendar::{
    parse_business_days, BusinessCalendar, BusinessHours, BusinessWindow, CalendarOptions, Days,
};
pub use delta::BusinessTimeInfo;
pub use error::{BusinessTimeError, Result};
pub use holidays::{
    last_weekday_of_month, nth_weekday_of_month, HolidayFn, HolidayProvider, HolidaySet,
    UsFederalHolidays,
};
