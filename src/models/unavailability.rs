//! Unavailability periods.
//!
//! Members declare the days they cannot stand watch. Periods are closed
//! calendar-day intervals: both `start` and `end` are excused, and the
//! time of day never matters.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A closed date interval `[start, end]` during which a member is excused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unavailability {
    /// First excused day (inclusive).
    pub start: NaiveDate,
    /// Last excused day (inclusive).
    pub end: NaiveDate,
}

impl Unavailability {
    /// Creates a new period.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A period covering exactly one day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    /// Whether `end` is before `start`. Such a period excuses nothing.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    /// Whether a calendar day falls inside the period.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Whether the calendar day of a timestamp falls inside the period.
    pub fn covers_datetime(&self, at: NaiveDateTime) -> bool {
        self.contains(at.date())
    }
}
