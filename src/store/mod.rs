//! Collaborators a scheduling run talks to.
//!
//! The scheduler performs no I/O of its own. It reads snapshots and writes
//! slots through a [`DutyStore`], and the caller hands the resulting
//! notification intents to a [`Notifier`] once the run is over.
//!
//! [`MemoryStore`] and [`RecordingNotifier`] are in-process implementations
//! for previews and tests.

mod memory;

pub use memory::{MemoryStore, RecordingNotifier};

use crate::error::{NotifyError, StoreError};
use crate::models::{DutySlot, Family, NotificationIntent, SlotKey, WeeklyAssignment};

/// Data access for weekly assignments and families.
pub trait DutyStore {
    /// Loads a weekly assignment with its current slots.
    fn weekly_assignment(&self, id: &str) -> Result<Option<WeeklyAssignment>, StoreError>;

    /// Loads a family with each member's unavailability and full history.
    fn family(&self, id: &str) -> Result<Option<Family>, StoreError>;

    /// Whether the slot currently carries a member.
    ///
    /// Reads the live state, not the snapshot loaded at the start of a run.
    fn is_slot_filled(&self, assignment_id: &str, key: SlotKey) -> Result<bool, StoreError>;

    /// Persists a new slot.
    ///
    /// Implementations must refuse to overwrite a slot that already has a
    /// member and report [`StoreError::Conflict`] instead.
    fn write_slot(&mut self, assignment_id: &str, slot: &DutySlot) -> Result<(), StoreError>;
}

/// Delivery channel for watch notifications (SMS, email, ...).
pub trait Notifier {
    /// Delivers one notification.
    fn notify(&self, intent: &NotificationIntent) -> Result<(), NotifyError>;
}
