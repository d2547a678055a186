//! Business time elapsed between two timestamps.
//!
//! The delta is the sum, over every business day touched by `[start, end)`,
//! of the overlap between that day's business hours and the range. It is a
//! plain [`TimeDelta`] of business time; one "business day" of it equals
//! [`BusinessCalendar::open_hours`].

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use tracing::trace;

use crate::calendar::BusinessCalendar;

impl BusinessCalendar {
    /// Business time elapsed from `start` to `end`.
    ///
    /// Returns zero when `end <= start`; an inverted range is not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use business_time::BusinessCalendar;
    /// use chrono::{NaiveDate, TimeDelta};
    ///
    /// let cal = BusinessCalendar::default();
    /// let day = |d| NaiveDate::from_ymd_opt(2014, 1, d).unwrap();
    /// // Tuesday 10:00 to Wednesday 10:00 is one full business day.
    /// let delta = cal.business_time_delta(
    ///     day(7).and_hms_opt(10, 0, 0).unwrap(),
    ///     day(8).and_hms_opt(10, 0, 0).unwrap(),
    /// );
    /// assert_eq!(delta, cal.open_hours());
    /// assert_eq!(delta, TimeDelta::hours(8));
    /// ```
    pub fn business_time_delta(&self, start: NaiveDateTime, end: NaiveDateTime) -> TimeDelta {
        if end <= start {
            return TimeDelta::zero();
        }
        self.business_windows(start, end)
            .map(|window| {
                trace!(
                    date = %window.date,
                    from = %window.start.time(),
                    to = %window.end.time(),
                    "business window"
                );
                window.duration()
            })
            .fold(TimeDelta::zero(), |total, part| total + part)
    }

    /// [`business_time_delta`](Self::business_time_delta), decomposed into
    /// whole business days and a remainder.
    pub fn business_time_info(&self, start: NaiveDateTime, end: NaiveDateTime) -> BusinessTimeInfo {
        BusinessTimeInfo::from_delta(self.business_time_delta(start, end), self.open_hours())
    }
}

// ── BusinessTimeInfo ────────────────────────────────────────────────────────

/// A business-time delta split into business days and hours/minutes/seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusinessTimeInfo {
    /// Total business time in seconds.
    pub total_seconds: i64,
    /// Whole business days (each one business-hours window long).
    pub business_days: i64,
    /// Hours component of the remainder.
    pub hours: i64,
    /// Minutes component (0-59).
    pub minutes: i64,
    /// Seconds component (0-59).
    pub seconds: i64,
    /// e.g. "2 business days, 1 hour".
    pub human_readable: String,
}

impl BusinessTimeInfo {
    /// Decompose `delta` using `open_hours` as the length of a business day.
    pub fn from_delta(delta: TimeDelta, open_hours: TimeDelta) -> Self {
        let total_seconds = delta.num_seconds().max(0);
        let day_seconds = open_hours.num_seconds().max(1);

        let business_days = total_seconds / day_seconds;
        let remainder = total_seconds % day_seconds;
        let hours = remainder / 3600;
        let remainder = remainder % 3600;
        let minutes = remainder / 60;
        let seconds = remainder % 60;

        Self {
            total_seconds,
            business_days,
            hours,
            minutes,
            seconds,
            human_readable: format_business_time(business_days, hours, minutes, seconds),
        }
    }
}

fn format_business_time(days: i64, hours: i64, minutes: i64, seconds: i64) -> String {
    let plural = |n: i64| if n == 1 { "" } else { "s" };

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days} business day{}", plural(days)));
    }
    if hours > 0 {
        parts.push(format!("{hours} hour{}", plural(hours)));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} minute{}", plural(minutes)));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{seconds} second{}", plural(seconds)));
    }
    parts.join(", ")
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{BusinessHours, CalendarOptions};
    use crate::holidays::UsFederalHolidays;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn calendar() -> BusinessCalendar {
        BusinessCalendar::with_holidays(CalendarOptions::default(), UsFederalHolidays).unwrap()
    }

    // ── business_time_delta tests ───────────────────────────────────────

    #[test]
    fn test_inverted_range_is_zero() {
        let cal = calendar();
        assert_eq!(
            cal.business_time_delta(at(2014, 1, 22, 10, 0), at(2014, 1, 16, 18, 30)),
            TimeDelta::zero()
        );
    }

    #[test]
    fn test_empty_range_is_zero() {
        let cal = calendar();
        let t = at(2014, 1, 15, 12, 0);
        assert_eq!(cal.business_time_delta(t, t), TimeDelta::zero());
    }

    #[test]
    fn test_same_day_within_hours_is_clock_difference() {
        let cal = calendar();
        assert_eq!(
            cal.business_time_delta(at(2014, 1, 15, 9, 30), at(2014, 1, 15, 16, 5)),
            TimeDelta::hours(6) + TimeDelta::minutes(35)
        );
    }

    #[test]
    fn test_end_at_midnight_adds_nothing_for_its_day() {
        let cal = calendar();
        assert_eq!(
            cal.business_time_delta(at(2014, 1, 14, 12, 0), at(2014, 1, 15, 0, 0)),
            TimeDelta::hours(5)
        );
    }

    #[test]
    fn test_custom_hours() {
        let options = CalendarOptions {
            business_hours: "07:00-19:00".parse::<BusinessHours>().unwrap(),
            ..Default::default()
        };
        let cal = BusinessCalendar::new(options).unwrap();
        // Friday 18:00 to Monday 08:00: one hour each side of the weekend.
        assert_eq!(
            cal.business_time_delta(at(2014, 1, 17, 18, 0), at(2014, 1, 20, 8, 0)),
            TimeDelta::hours(2)
        );
    }

    // ── BusinessTimeInfo tests ──────────────────────────────────────────

    #[test]
    fn test_info_after_during() {
        let cal = calendar();
        let info = cal.business_time_info(at(2014, 1, 16, 18, 30), at(2014, 1, 22, 10, 0));
        assert_eq!(info.business_days, 2);
        assert_eq!(info.hours, 1);
        assert_eq!(info.minutes, 0);
        assert_eq!(info.total_seconds, 17 * 3600);
        assert_eq!(info.human_readable, "2 business days, 1 hour");
    }

    #[test]
    fn test_info_zero() {
        let info = BusinessTimeInfo::from_delta(TimeDelta::zero(), TimeDelta::hours(8));
        assert_eq!(info.business_days, 0);
        assert_eq!(info.human_readable, "0 seconds");
    }

    #[test]
    fn test_info_singular_units() {
        let delta = TimeDelta::hours(9) + TimeDelta::minutes(1) + TimeDelta::seconds(1);
        let info = BusinessTimeInfo::from_delta(delta, TimeDelta::hours(8));
        assert_eq!(
            info.human_readable,
            "1 business day, 1 hour, 1 minute, 1 second"
        );
    }

    #[test]
    fn test_info_serializes() {
        let info = BusinessTimeInfo::from_delta(TimeDelta::minutes(45), TimeDelta::hours(8));
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["total_seconds"], 2700);
        assert_eq!(json["minutes"], 45);
        assert_eq!(json["human_readable"], "45 minutes");
    }
}
