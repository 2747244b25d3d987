//! Run results.
//!
//! A run yields the new slots to persist, the notifications to send, and a
//! summary a leader can act on: how many slots were filled and which ones
//! are still open.
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `filled` | Slots the run assigned |
//! | `open` | Grid slots nobody could take |
//! | `skipped` | Grid slots already carrying a member |
//! | `loads` | Watches handed out per member this run |

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DutySlot, NotificationIntent, SlotKey};

/// Counts and gaps of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Weekly assignment the run worked on.
    pub assignment_id: String,
    /// Number of slots assigned.
    pub filled: usize,
    /// Slots left without a member, in grid order.
    pub open: Vec<SlotKey>,
    /// Slots skipped because a member was already on watch.
    pub skipped: usize,
    /// Watches assigned per member during the run.
    pub loads: BTreeMap<String, u32>,
}

impl RunSummary {
    /// Creates an empty summary.
    pub fn new(assignment_id: impl Into<String>) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            ..Default::default()
        }
    }

    /// Number of slots assigned.
    pub fn filled_count(&self) -> usize {
        self.filled
    }

    /// Number of slots left open.
    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Open slots on one day.
    pub fn open_on(&self, date: NaiveDate) -> Vec<SlotKey> {
        self.open.iter().copied().filter(|k| k.date == date).collect()
    }

    /// Whether every visited slot got a member.
    pub fn is_complete(&self) -> bool {
        self.open.is_empty()
    }

    /// Largest minus smallest per-member load (0 with no members).
    pub fn load_spread(&self) -> u32 {
        let max = self.loads.values().copied().max().unwrap_or(0);
        let min = self.loads.values().copied().min().unwrap_or(0);
        max - min
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Slots created by the run, in grid order.
    pub new_slots: Vec<DutySlot>,
    /// Notifications for the members on the new slots.
    pub notifications: Vec<NotificationIntent>,
    /// Counts and gaps.
    pub summary: RunSummary,
}

impl RunReport {
    /// New slots held by one member.
    pub fn slots_for_member(&self, member_id: &str) -> Vec<&DutySlot> {
        self.new_slots
            .iter()
            .filter(|s| s.member_id.as_deref() == Some(member_id))
            .collect()
    }

    /// New slots on one day.
    pub fn slots_on(&self, date: NaiveDate) -> Vec<&DutySlot> {
        self.new_slots.iter().filter(|s| s.date == date).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NightHour;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_summary_counts() {
        let mut s = RunSummary::new("W1");
        assert!(s.is_complete());
        assert_eq!(s.load_spread(), 0);

        s.filled = 2;
        s.open.push(SlotKey::new(d(4), NightHour::H03));
        s.open.push(SlotKey::new(d(5), NightHour::H00));
        s.loads.insert("M1".into(), 2);
        s.loads.insert("M2".into(), 0);

        assert_eq!(s.filled_count(), 2);
        assert_eq!(s.open_count(), 2);
        assert_eq!(s.open_on(d(5)), vec![SlotKey::new(d(5), NightHour::H00)]);
        assert!(!s.is_complete());
        assert_eq!(s.load_spread(), 2);
    }

    #[test]
    fn test_report_lookup_and_json() {
        let report = RunReport {
            new_slots: vec![
                DutySlot::automatic(SlotKey::new(d(4), NightHour::H00), "M1"),
                DutySlot::automatic(SlotKey::new(d(5), NightHour::H00), "M2"),
            ],
            notifications: Vec::new(),
            summary: RunSummary::new("W1"),
        };
        assert_eq!(report.slots_for_member("M1").len(), 1);
        assert_eq!(report.slots_on(d(5))[0].member_id.as_deref(), Some("M2"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["summary"]["assignment_id"], "W1");
        assert_eq!(json["new_slots"][0]["hour"], "H00");
        assert_eq!(json["new_slots"][0]["origin"], "Automatic");
    }
}
