//! In-memory store and notifier.

use std::cell::RefCell;
use std::collections::HashMap;

use super::{DutyStore, Notifier};
use crate::error::{NotifyError, StoreError};
use crate::models::{DutySlot, Family, NotificationIntent, SlotKey, WeeklyAssignment};

/// A [`DutyStore`] backed by hash maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    assignments: HashMap<String, WeeklyAssignment>,
    families: HashMap<String, Family>,
    writes: usize,
    fail_after: Option<usize>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a weekly assignment.
    pub fn with_assignment(mut self, assignment: WeeklyAssignment) -> Self {
        self.assignments.insert(assignment.id.clone(), assignment);
        self
    }

    /// Adds (or replaces) a family.
    pub fn with_family(mut self, family: Family) -> Self {
        self.families.insert(family.id.clone(), family);
        self
    }

    /// Makes every write after the first `writes` fail with a backend error.
    pub fn failing_after(mut self, writes: usize) -> Self {
        self.fail_after = Some(writes);
        self
    }

    /// Current state of an assignment.
    pub fn assignment(&self, id: &str) -> Option<&WeeklyAssignment> {
        self.assignments.get(id)
    }

    /// Mutable access, for simulating edits made outside a run.
    pub fn assignment_mut(&mut self, id: &str) -> Option<&mut WeeklyAssignment> {
        self.assignments.get_mut(id)
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl DutyStore for MemoryStore {
    fn weekly_assignment(&self, id: &str) -> Result<Option<WeeklyAssignment>, StoreError> {
        Ok(self.assignments.get(id).cloned())
    }

    fn family(&self, id: &str) -> Result<Option<Family>, StoreError> {
        Ok(self.families.get(id).cloned())
    }

    fn is_slot_filled(&self, assignment_id: &str, key: SlotKey) -> Result<bool, StoreError> {
        Ok(self
            .assignments
            .get(assignment_id)
            .is_some_and(|a| a.is_filled(key)))
    }

    fn write_slot(&mut self, assignment_id: &str, slot: &DutySlot) -> Result<(), StoreError> {
        if self.fail_after.is_some_and(|limit| self.writes >= limit) {
            return Err(StoreError::Backend("write limit reached".into()));
        }
        let assignment = self
            .assignments
            .get_mut(assignment_id)
            .ok_or_else(|| StoreError::Backend(format!("unknown assignment {assignment_id}")))?;
        if !assignment.fill(slot.clone()) {
            return Err(StoreError::Conflict {
                assignment_id: assignment_id.to_string(),
                key: slot.key(),
            });
        }
        self.writes += 1;
        Ok(())
    }
}

/// A [`Notifier`] that keeps delivered intents in memory.
///
/// Members listed with [`failing_for`](Self::failing_for) get a delivery
/// error; members without a contact address get [`NotifyError::NoContact`].
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: RefCell<Vec<NotificationIntent>>,
    failing: Vec<String>,
}

impl RecordingNotifier {
    /// Creates a notifier that accepts everything with a contact.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes delivery to a member fail.
    pub fn failing_for(mut self, member_id: impl Into<String>) -> Self {
        self.failing.push(member_id.into());
        self
    }

    /// Intents delivered so far.
    pub fn sent(&self) -> Vec<NotificationIntent> {
        self.sent.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, intent: &NotificationIntent) -> Result<(), NotifyError> {
        if intent.contact.is_none() {
            return Err(NotifyError::NoContact(intent.member_id.clone()));
        }
        if self.failing.contains(&intent.member_id) {
            return Err(NotifyError::Delivery(format!(
                "channel rejected message for {}",
                intent.member_id
            )));
        }
        self.sent.borrow_mut().push(intent.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Member, NightHour};
    use chrono::NaiveDate;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_assignment(
                WeeklyAssignment::new("W1", "F1", monday())
                    .with_slot(DutySlot::manual(monday(), NightHour::H00, "M1")),
            )
            .with_family(Family::new("F1", "North").with_member(Member::new("M1", "Ana")))
    }

    #[test]
    fn test_reads() {
        let s = store();
        assert!(s.weekly_assignment("W1").unwrap().is_some());
        assert!(s.weekly_assignment("W9").unwrap().is_none());
        assert_eq!(s.family("F1").unwrap().map(|f| f.len()), Some(1));
        assert!(s
            .is_slot_filled("W1", SlotKey::new(monday(), NightHour::H00))
            .unwrap());
        assert!(!s
            .is_slot_filled("W1", SlotKey::new(monday(), NightHour::H01))
            .unwrap());
    }

    #[test]
    fn test_write_refuses_filled_slot() {
        let mut s = store();
        let key = SlotKey::new(monday(), NightHour::H00);
        let err = s.write_slot("W1", &DutySlot::automatic(key, "M2")).unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));
        assert_eq!(s.write_count(), 0);

        let free = SlotKey::new(monday(), NightHour::H01);
        s.write_slot("W1", &DutySlot::automatic(free, "M2")).unwrap();
        assert_eq!(s.write_count(), 1);
        assert!(s.is_slot_filled("W1", free).unwrap());
    }

    #[test]
    fn test_failing_after() {
        let mut s = store().failing_after(1);
        let k1 = SlotKey::new(monday(), NightHour::H01);
        let k2 = SlotKey::new(monday(), NightHour::H02);
        assert!(s.write_slot("W1", &DutySlot::automatic(k1, "M1")).is_ok());
        assert!(matches!(
            s.write_slot("W1", &DutySlot::automatic(k2, "M1")),
            Err(StoreError::Backend(_))
        ));
    }

    #[test]
    fn test_recording_notifier() {
        let n = RecordingNotifier::new().failing_for("M2");
        let intent = |id: &str, contact: Option<&str>| NotificationIntent {
            member_id: id.into(),
            member_name: id.into(),
            contact: contact.map(String::from),
            date: monday(),
            hour: NightHour::H00,
        };

        assert!(n.notify(&intent("M1", Some("a@b.c"))).is_ok());
        assert_eq!(
            n.notify(&intent("M2", Some("x@y.z"))),
            Err(NotifyError::Delivery("channel rejected message for M2".into()))
        );
        assert_eq!(
            n.notify(&intent("M3", None)),
            Err(NotifyError::NoContact("M3".into()))
        );
        assert_eq!(n.sent().len(), 1);
    }
}
