//! Week calendar and period models.
//!
//! Defines the teaching grid: an ordered list of days, each split into the
//! same ordered list of periods.
//!
//! # Time Model
//! Periods are half-open windows `[start, end)` in minutes after midnight.
//! Grid coordinates are plain indices: `(day index, period index)`.
//! The generator only ever looks at indices; the clock times are used to
//! label blocks for presentation.

use serde::{Deserialize, Serialize};

/// Default teaching days.
pub const DEFAULT_DAYS: [&str; 6] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Default first period start (09:00).
pub const DEFAULT_FIRST_PERIOD_MIN: u32 = 9 * 60;

/// Default number of periods per day.
pub const DEFAULT_PERIODS_PER_DAY: usize = 7;

/// A teaching period [start, end), in minutes after midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Period start (minutes, inclusive).
    pub start_min: u32,
    /// Period end (minutes, exclusive).
    pub end_min: u32,
}

impl Period {
    /// Creates a new period.
    pub fn new(start_min: u32, end_min: u32) -> Self {
        Self { start_min, end_min }
    }

    /// Length in minutes.
    #[inline]
    pub fn duration_min(&self) -> u32 {
        self.end_min.saturating_sub(self.start_min)
    }

    /// Label such as `"09:00-10:00"`.
    pub fn label(&self) -> String {
        format!("{}-{}", clock(self.start_min), clock(self.end_min))
    }
}

/// The weekly teaching grid.
///
/// Every day has the same periods. An empty day or period list yields a
/// grid with no legal placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekCalendar {
    /// Ordered day labels.
    pub days: Vec<String>,
    /// Ordered periods, identical for every day.
    pub periods: Vec<Period>,
}

impl WeekCalendar {
    /// Creates a calendar with no days and no periods.
    pub fn new() -> Self {
        Self {
            days: Vec::new(),
            periods: Vec::new(),
        }
    }

    /// Creates a calendar of `days` days and `periods` one-hour
    /// periods starting at 09:00.
    ///
    /// Day labels are taken from [`DEFAULT_DAYS`] and fall back to
    /// `"Day N"` past Saturday.
    pub fn uniform(days: usize, periods: usize) -> Self {
        let day_labels: Vec<String> = (0..days)
            .map(|d| {
                DEFAULT_DAYS
                    .get(d)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| format!("Day {}", d + 1))
            })
            .collect();
        Self::new()
            .with_days(day_labels)
            .with_hourly_periods(DEFAULT_FIRST_PERIOD_MIN, periods)
    }

    /// Replaces the day labels.
    pub fn with_days<I, S>(mut self, days: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.days = days.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a period.
    pub fn with_period(mut self, start_min: u32, end_min: u32) -> Self {
        self.periods.push(Period::new(start_min, end_min));
        self
    }

    /// Replaces the periods with `count` back-to-back one-hour periods.
    pub fn with_hourly_periods(mut self, first_start_min: u32, count: usize) -> Self {
        self.periods = (0..count as u32)
            .map(|i| Period::new(first_start_min + i * 60, first_start_min + (i + 1) * 60))
            .collect();
        self
    }

    /// Number of days.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Number of periods per day (the grid width).
    #[inline]
    pub fn periods_per_day(&self) -> usize {
        self.periods.len()
    }

    /// Total (day, period) slots.
    pub fn slot_count(&self) -> usize {
        self.day_count() * self.periods_per_day()
    }

    /// Whether the calendar has no slot at all.
    pub fn is_empty(&self) -> bool {
        self.slot_count() == 0
    }

    /// Last legal start period for a block of `duration` periods.
    ///
    /// Returns `None` if the block cannot fit in a day.
    pub fn last_start(&self, duration: usize) -> Option<usize> {
        self.periods_per_day().checked_sub(duration)
    }

    /// Day label by index.
    pub fn day_label(&self, day: usize) -> Option<&str> {
        self.days.get(day).map(String::as_str)
    }

    /// Time range covered by a block, e.g. `"09:00-11:00"`.
    ///
    /// Returns `None` if the block is empty or leaves the day.
    pub fn time_range(&self, start_period: usize, duration: usize) -> Option<String> {
        if duration == 0 {
            return None;
        }
        let first = self.periods.get(start_period)?;
        let last = self.periods.get(start_period + duration - 1)?;
        Some(format!("{}-{}", clock(first.start_min), clock(last.end_min)))
    }
}

impl Default for WeekCalendar {
    /// Monday to Saturday, seven one-hour periods from 09:00 to 16:00.
    fn default() -> Self {
        Self::uniform(DEFAULT_DAYS.len(), DEFAULT_PERIODS_PER_DAY)
    }
}

fn clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
