//! Business calendar: which days are open, during which hours, and how to
//! walk the dates spanned by a timestamp range.
//!
//! All timestamps are [`NaiveDateTime`] values in one implicit zone. A date is
//! a business day iff its weekday is configured as a business weekday and the
//! holiday provider does not list it. Business hours are the half-open
//! window `[start, end)` on every business day.

use std::iter::FusedIterator;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BusinessTimeError, Result};
use crate::holidays::HolidayProvider;

// ── Configuration ───────────────────────────────────────────────────────────

/// The daily open window, `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl BusinessHours {
    /// Create a window, rejecting `start >= end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        let hours = Self { start, end };
        hours.validate()?;
        Ok(hours)
    }

    /// Length of one window.
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Whether `time` lies inside `[start, end)`.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time < self.end
    }

    fn validate(&self) -> Result<()> {
        if self.start >= self.end {
            return Err(BusinessTimeError::InvalidBusinessHours(format!(
                "start {} is not before end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

impl Default for BusinessHours {
    /// 09:00–17:00.
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or(NaiveTime::MIN),
        }
    }
}

impl FromStr for BusinessHours {
    type Err = BusinessTimeError;

    /// Parse `"HH:MM-HH:MM"` (seconds optional on either side).
    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| BusinessTimeError::InvalidBusinessHours(format!("'{s}'")))?;
        Self::new(parse_time_of_day(start)?, parse_time_of_day(end)?)
    }
}

fn parse_time_of_day(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| BusinessTimeError::InvalidBusinessHours(format!("'{s}': {e}")))
}

/// Construction options for a [`BusinessCalendar`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarOptions {
    pub business_hours: BusinessHours,
    pub business_days: Vec<Weekday>,
}

impl Default for CalendarOptions {
    /// 09:00–17:00, Monday through Friday.
    fn default() -> Self {
        Self {
            business_hours: BusinessHours::default(),
            business_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
        }
    }
}

/// Parse a business-day list such as `"mon-fri"`, `"mon,wed,fri"` or
/// `"sun-thu"`. Ranges may wrap around the end of the week.
pub fn parse_business_days(s: &str) -> Result<Vec<Weekday>> {
    let mut days = Vec::new();
    for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((from, to)) => {
                let (from, to) = (parse_weekday(from)?, parse_weekday(to)?);
                let mut day = from;
                loop {
                    days.push(day);
                    if day == to {
                        break;
                    }
                    day = day.succ();
                }
            }
            None => days.push(parse_weekday(part)?),
        }
    }
    if days.is_empty() {
        return Err(BusinessTimeError::NoBusinessDays);
    }
    Ok(days)
}

fn parse_weekday(s: &str) -> Result<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| BusinessTimeError::InvalidWeekday(format!("'{}'", s.trim())))
}

// ── BusinessCalendar ────────────────────────────────────────────────────────

/// Immutable business-day and business-hours configuration.
///
/// Every query is a pure function of the calendar and its arguments, so a
/// calendar can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct BusinessCalendar {
    hours: BusinessHours,
    /// Indexed by `Weekday::num_days_from_monday`.
    open_weekdays: [bool; 7],
    holidays: Option<Arc<dyn HolidayProvider>>,
}

impl BusinessCalendar {
    /// Build a calendar without holidays.
    ///
    /// # Errors
    ///
    /// Returns [`BusinessTimeError::InvalidBusinessHours`] if the hours are
    /// inverted or empty, or [`BusinessTimeError::NoBusinessDays`] if no
    /// weekday is open.
    pub fn new(options: CalendarOptions) -> Result<Self> {
        Self::build(options, None)
    }

    /// Build a calendar whose business days also exclude `holidays`.
    ///
    /// # Errors
    ///
    /// Same as [`BusinessCalendar::new`].
    pub fn with_holidays(
        options: CalendarOptions,
        holidays: impl HolidayProvider + 'static,
    ) -> Result<Self> {
        Self::build(options, Some(Arc::new(holidays)))
    }

    /// Build a calendar from an already shared provider (or none).
    pub fn with_shared_holidays(
        options: CalendarOptions,
        holidays: Option<Arc<dyn HolidayProvider>>,
    ) -> Result<Self> {
        Self::build(options, holidays)
    }

    fn build(options: CalendarOptions, holidays: Option<Arc<dyn HolidayProvider>>) -> Result<Self> {
        options.business_hours.validate()?;
        if options.business_days.is_empty() {
            return Err(BusinessTimeError::NoBusinessDays);
        }

        let mut open_weekdays = [false; 7];
        for day in &options.business_days {
            open_weekdays[day.num_days_from_monday() as usize] = true;
        }

        debug!(
            start = %options.business_hours.start,
            end = %options.business_hours.end,
            business_days = open_weekdays.iter().filter(|open| **open).count(),
            holidays = holidays.is_some(),
            "built business calendar"
        );

        Ok(Self {
            hours: options.business_hours,
            open_weekdays,
            holidays,
        })
    }

    pub fn business_hours(&self) -> BusinessHours {
        self.hours
    }

    /// Configured business weekdays, Monday first.
    pub fn business_days(&self) -> Vec<Weekday> {
        std::iter::successors(Some(Weekday::Mon), |day| Some(day.succ()))
            .take(7)
            .filter(|day| !self.is_weekday_closed(*day))
            .collect()
    }

    /// Length of one business-hours window: the unit of a "business day" of
    /// elapsed business time.
    pub fn open_hours(&self) -> TimeDelta {
        self.hours.duration()
    }

    // ── Day classification ──────────────────────────────────────────────

    /// Whether `date` falls on a weekday that is not a business weekday.
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.is_weekday_closed(date.weekday())
    }

    fn is_weekday_closed(&self, day: Weekday) -> bool {
        !self.open_weekdays[day.num_days_from_monday() as usize]
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays
            .as_ref()
            .is_some_and(|provider| provider.is_holiday(date))
    }

    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        !self.is_weekend(date) && !self.is_holiday(date)
    }

    /// Whether `timestamp` is on a business day and inside `[start, end)` of
    /// the business hours.
    pub fn is_during_business_hours(&self, timestamp: NaiveDateTime) -> bool {
        self.is_business_day(timestamp.date()) && self.hours.contains(timestamp.time())
    }

    // ── Day iteration ───────────────────────────────────────────────────

    /// Every date from `start`'s date up to, but excluding, `end`'s date.
    ///
    /// Time of day is ignored. When both fall on the same date that date is
    /// produced once; when `end`'s date precedes `start`'s nothing is.
    pub fn iter_days(&self, start: NaiveDateTime, end: NaiveDateTime) -> Days {
        Days::between(start.date(), end.date())
    }

    /// [`iter_days`](Self::iter_days) restricted to business weekdays,
    /// holidays included.
    pub fn iter_weekdays(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Iterator<Item = NaiveDate> + '_ {
        self.iter_days(start, end).filter(move |d| !self.is_weekend(*d))
    }

    /// [`iter_days`](Self::iter_days) restricted to business days.
    pub fn iter_business_days(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Iterator<Item = NaiveDate> + '_ {
        self.iter_days(start, end)
            .filter(move |d| self.is_business_day(*d))
    }

    /// The non-empty pieces of `[start, end)` that fall inside business
    /// hours, one per business day, in order.
    ///
    /// Unlike [`iter_business_days`](Self::iter_business_days) the date of
    /// `end` is considered too, and days whose window does not overlap the
    /// range (a `start` after closing, an `end` before opening) are skipped.
    pub fn business_windows(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Iterator<Item = BusinessWindow> + '_ {
        let end_day = (end.date() > start.date()).then(|| end.date());
        self.iter_days(start, end)
            .chain(end_day)
            .filter(move |d| self.is_business_day(*d))
            .filter_map(move |d| self.window_on(d, start, end))
    }

    /// Clip `[start, end)` to the business hours of `date`.
    ///
    /// The hours lie inside the day, so clipping to them also clips to the
    /// day's own bounds.
    fn window_on(
        &self,
        date: NaiveDate,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Option<BusinessWindow> {
        let lo = start.max(date.and_time(self.hours.start));
        let hi = end.min(date.and_time(self.hours.end));
        (lo < hi).then_some(BusinessWindow {
            date,
            start: lo,
            end: hi,
        })
    }
}

impl Default for BusinessCalendar {
    /// 09:00–17:00, Monday through Friday, no holidays.
    fn default() -> Self {
        Self {
            hours: BusinessHours::default(),
            open_weekdays: [true, true, true, true, true, false, false],
            holidays: None,
        }
    }
}

/// The part of a timestamp range that falls inside one business day's hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessWindow {
    pub date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl BusinessWindow {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

// ── Days iterator ───────────────────────────────────────────────────────────

/// Ascending run of consecutive dates, see [`BusinessCalendar::iter_days`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<NaiveDate>,
    last: NaiveDate,
}

impl Days {
    fn between(first: NaiveDate, end: NaiveDate) -> Self {
        if end == first {
            return Self {
                next: Some(first),
                last: first,
            };
        }
        match end.pred_opt() {
            Some(last) if first < end => Self {
                next: Some(first),
                last,
            },
            _ => Self {
                next: None,
                last: first,
            },
        }
    }
}

impl Iterator for Days {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next?;
        self.next = if current < self.last {
            current.succ_opt()
        } else {
            None
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next
            .map_or(0, |next| (self.last - next).num_days() as usize + 1);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Days {}

impl FusedIterator for Days {}

// ── Tests ───────────────────────────────────────────────────────────────────
