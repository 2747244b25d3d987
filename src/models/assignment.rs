//! Weekly assignment (solution) model.
//!
//! A weekly assignment binds one family to the week starting on a Monday
//! and holds the duty slots filled so far. Slots present before a run are
//! left untouched; the scheduler only adds slots for empty keys.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::NightHour;

/// A (day, hour) position in the weekly grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SlotKey {
    /// Calendar day.
    pub date: NaiveDate,
    /// Night hour on that day.
    pub hour: NightHour,
}

impl SlotKey {
    /// Creates a new key.
    pub fn new(date: NaiveDate, hour: NightHour) -> Self {
        Self { date, hour }
    }
}

/// How a slot came to be filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotOrigin {
    /// Entered by a leader outside the scheduler.
    Manual,
    /// Written by the scheduler.
    Automatic,
}

/// A night-watch slot, possibly without a member yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutySlot {
    /// Calendar day.
    pub date: NaiveDate,
    /// Night hour.
    pub hour: NightHour,
    /// Member on watch, if any.
    pub member_id: Option<String>,
    /// Who filled the slot.
    pub origin: SlotOrigin,
}

impl DutySlot {
    /// A slot filled by hand.
    pub fn manual(date: NaiveDate, hour: NightHour, member_id: impl Into<String>) -> Self {
        Self {
            date,
            hour,
            member_id: Some(member_id.into()),
            origin: SlotOrigin::Manual,
        }
    }

    /// A slot filled by the scheduler.
    pub fn automatic(key: SlotKey, member_id: impl Into<String>) -> Self {
        Self {
            date: key.date,
            hour: key.hour,
            member_id: Some(member_id.into()),
            origin: SlotOrigin::Automatic,
        }
    }

    /// An empty slot placeholder.
    pub fn empty(date: NaiveDate, hour: NightHour) -> Self {
        Self {
            date,
            hour,
            member_id: None,
            origin: SlotOrigin::Manual,
        }
    }

    /// Grid position of this slot.
    #[inline]
    pub fn key(&self) -> SlotKey {
        SlotKey::new(self.date, self.hour)
    }

    /// Whether a member is on watch.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.member_id.is_some()
    }
}

/// The binding of one family to one week of night watch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyAssignment {
    /// Unique assignment identifier.
    pub id: String,
    /// Family on duty.
    pub family_id: String,
    /// Monday of the week.
    pub week_start: NaiveDate,
    /// Slots recorded so far.
    pub slots: Vec<DutySlot>,
}

impl WeeklyAssignment {
    /// Creates an assignment with no slots.
    pub fn new(
        id: impl Into<String>,
        family_id: impl Into<String>,
        week_start: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            family_id: family_id.into(),
            week_start,
            slots: Vec::new(),
        }
    }

    /// Adds a slot.
    pub fn with_slot(mut self, slot: DutySlot) -> Self {
        self.slots.push(slot);
        self
    }

    /// Last day of the week (Sunday).
    pub fn week_end(&self) -> NaiveDate {
        self.week_start + Duration::days(6)
    }

    /// Whether a date belongs to this week.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.week_start && date <= self.week_end()
    }

    /// Finds the slot at a grid position.
    pub fn slot_at(&self, key: SlotKey) -> Option<&DutySlot> {
        self.slots.iter().find(|s| s.key() == key)
    }

    /// Whether the grid position already has a member.
    pub fn is_filled(&self, key: SlotKey) -> bool {
        self.slot_at(key).is_some_and(DutySlot::is_filled)
    }

    /// Records a slot, replacing an empty placeholder at the same key.
    ///
    /// Returns `false` and leaves the assignment unchanged if the key
    /// already has a member.
    pub fn fill(&mut self, slot: DutySlot) -> bool {
        match self.slots.iter_mut().find(|s| s.key() == slot.key()) {
            Some(existing) if existing.is_filled() => false,
            Some(existing) => {
                *existing = slot;
                true
            }
            None => {
                self.slots.push(slot);
                true
            }
        }
    }
}

/// A request to tell a member about a new watch.
///
/// The scheduler only produces these; delivery belongs to a
/// [`Notifier`](crate::store::Notifier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationIntent {
    /// Member to notify.
    pub member_id: String,
    /// Member display name.
    pub member_name: String,
    /// Contact address, if known.
    pub contact: Option<String>,
    /// Day of the watch.
    pub date: NaiveDate,
    /// Hour of the watch.
    pub hour: NightHour,
}
