//! Holiday providers.
//!
//! A [`BusinessCalendar`](crate::BusinessCalendar) consults a
//! [`HolidayProvider`] to decide whether a date that falls on a business
//! weekday is nevertheless closed. Two shapes are supported behind the same
//! trait:
//!
//! - [`HolidaySet`] — a finite, precomputed set of dates (direct lookup)
//! - range generators — anything that can list the holidays inside an
//!   inclusive date range: [`UsFederalHolidays`] or an arbitrary closure
//!   wrapped in [`HolidayFn`]

use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// A source of holiday dates.
///
/// Implementations must be pure: the same range always produces the same
/// dates, so calendars built on top of them stay deterministic.
pub trait HolidayProvider: Send + Sync + fmt::Debug {
    /// All holidays in `[start, end]` (inclusive), ascending, without
    /// duplicates. Returns an empty list when `end < start`.
    fn holidays_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate>;

    /// Whether `date` is a holiday.
    ///
    /// The provided implementation generates the single-day range
    /// `[date, date]`; providers with cheap lookups override it.
    fn is_holiday(&self, date: NaiveDate) -> bool {
        !self.holidays_between(date, date).is_empty()
    }
}

// ── HolidaySet ──────────────────────────────────────────────────────────────

/// A fixed set of holiday dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidaySet {
    dates: BTreeSet<NaiveDate>,
}

impl HolidaySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a date; returns `false` if it was already present.
    pub fn insert(&mut self, date: NaiveDate) -> bool {
        self.dates.insert(date)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().copied()
    }
}

impl FromIterator<NaiveDate> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

impl HolidayProvider for HolidaySet {
    fn holidays_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        if end < start {
            return Vec::new();
        }
        self.dates.range(start..=end).copied().collect()
    }

    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }
}

// ── HolidayFn ───────────────────────────────────────────────────────────────

/// Adapts a range-generating closure into a [`HolidayProvider`].
///
/// The closure's output is clipped to the queried range, sorted and
/// deduplicated, so a loosely written generator still honours the provider
/// contract.
pub struct HolidayFn<F> {
    generate: F,
}

impl<F> HolidayFn<F>
where
    F: Fn(NaiveDate, NaiveDate) -> Vec<NaiveDate> + Send + Sync,
{
    pub fn new(generate: F) -> Self {
        Self { generate }
    }
}

impl<F> fmt::Debug for HolidayFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HolidayFn").finish_non_exhaustive()
    }
}

impl<F> HolidayProvider for HolidayFn<F>
where
    F: Fn(NaiveDate, NaiveDate) -> Vec<NaiveDate> + Send + Sync,
{
    fn holidays_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        if end < start {
            return Vec::new();
        }
        let mut dates: Vec<NaiveDate> = (self.generate)(start, end)
            .into_iter()
            .filter(|d| (start..=end).contains(d))
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }
}

// ── UsFederalHolidays ───────────────────────────────────────────────────────

/// United States federal holidays, as observed.
///
/// A holiday falling on Saturday is observed on the preceding Friday; one
/// falling on Sunday is observed on the following Monday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsFederalHolidays;

impl UsFederalHolidays {
    pub fn new() -> Self {
        Self
    }

    /// Observed dates for the ten federal holidays of `year`, ascending.
    ///
    /// A Saturday New Year's Day is observed on December 31 of the previous
    /// year, so the first date is not always inside `year`.
    pub fn observed_for_year(year: i32) -> Vec<NaiveDate> {
        let fixed = |month: u32, day: u32| NaiveDate::from_ymd_opt(year, month, day).map(observed);
        let nth = |month: u32, weekday: Weekday, n: u32| nth_weekday_of_month(year, month, weekday, n);

        [
            fixed(1, 1),                                   // New Year's Day
            nth(1, Weekday::Mon, 3),                       // Martin Luther King Jr. Day
            nth(2, Weekday::Mon, 3),                       // Presidents Day
            last_weekday_of_month(year, 5, Weekday::Mon),  // Memorial Day
            fixed(7, 4),                                   // Independence Day
            nth(9, Weekday::Mon, 1),                       // Labor Day
            nth(10, Weekday::Mon, 2),                      // Columbus Day
            fixed(11, 11),                                 // Veterans Day
            nth(11, Weekday::Thu, 4),                      // Thanksgiving
            fixed(12, 25),                                 // Christmas
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl HolidayProvider for UsFederalHolidays {
    fn holidays_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
        if end < start {
            return Vec::new();
        }
        // Observance shifts can cross a year boundary in either direction.
        let mut dates: Vec<NaiveDate> = ((start.year() - 1)..=(end.year() + 1))
            .flat_map(Self::observed_for_year)
            .filter(|d| (start..=end).contains(d))
            .collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }
}

/// Weekend substitution: Saturday moves back to Friday, Sunday forward to Monday.
fn observed(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Duration::days(1),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

/// The `n`th (1-based) `weekday` of a month, or `None` if the month has
/// fewer than `n` of them.
pub fn nth_weekday_of_month(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let diff = (weekday.num_days_from_monday() + 7 - first.weekday().num_days_from_monday()) % 7;
    let target = first + Duration::days(diff as i64) + Duration::weeks((n - 1) as i64);
    (target.month() == month).then_some(target)
}

/// The last `weekday` of a month.
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let (ny, nm) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = NaiveDate::from_ymd_opt(ny, nm, 1)?.pred_opt()?;
    let diff = (last.weekday().num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
    Some(last - Duration::days(diff as i64))
}

// ── Tests ───────────────────────────────────────────────────────────────────
