//! Rotation cycle tracking.
//!
//! A member must cover all four night hours before repeating any of them.
//! [`RotationState`] holds the hours used in the member's current,
//! incomplete cycle plus the number of watches handed out in the running
//! schedule. The cycle resets to empty in the same step that records its
//! fourth distinct hour, so `cycle_len()` is always in `0..=3`.
//!
//! The same reset rule is applied twice: once when replaying past duties
//! ([`replay_history`]) and once live while a run assigns new watches
//! ([`RotationState::record`]).

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{DutyRecord, Member, NightHour};

/// Per-member rotation state for one scheduling run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    used_hours: BTreeSet<NightHour>,
    load: u32,
}

impl RotationState {
    /// A fresh state: empty cycle, no watches this run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `hour` was already covered in the current cycle.
    #[inline]
    pub fn is_forbidden(&self, hour: NightHour) -> bool {
        self.used_hours.contains(&hour)
    }

    /// Hours covered in the current cycle.
    pub fn used_hours(&self) -> impl Iterator<Item = NightHour> + '_ {
        self.used_hours.iter().copied()
    }

    /// Number of hours covered in the current cycle (0..=3).
    #[inline]
    pub fn cycle_len(&self) -> usize {
        self.used_hours.len()
    }

    /// Watches assigned during this run.
    #[inline]
    pub fn load(&self) -> u32 {
        self.load
    }

    /// Adds an hour to the cycle without touching the run load.
    ///
    /// A repeated hour is ignored. Returns `true` if this hour completed
    /// the cycle and the state was wiped.
    pub fn absorb(&mut self, hour: NightHour) -> bool {
        if !self.used_hours.insert(hour) {
            return false;
        }
        if self.used_hours.len() == NightHour::CYCLE_LEN {
            self.used_hours.clear();
            return true;
        }
        false
    }

    /// Records a watch assigned in this run.
    ///
    /// Increments the load and applies the cycle rule. Returns `true` if
    /// the cycle completed.
    pub fn record(&mut self, hour: NightHour) -> bool {
        debug_assert!(
            !self.is_forbidden(hour),
            "hour {hour} recorded twice within one cycle"
        );
        self.load += 1;
        self.absorb(hour)
    }
}

/// Rebuilds a member's cycle from their past duties.
///
/// `records` must be in chronological order. Duties that are not night
/// watches are skipped. The returned state has a load of zero.
pub fn replay_history<'a, I>(records: I) -> RotationState
where
    I: IntoIterator<Item = &'a DutyRecord>,
{
    let mut state = RotationState::new();
    for hour in records.into_iter().filter_map(DutyRecord::night_hour) {
        state.absorb(hour);
    }
    state
}

/// A member's night watches strictly before `before`, oldest first.
///
/// Ties on the same day are ordered by hour.
pub fn ordered_history(member: &Member, before: NaiveDate) -> Vec<DutyRecord> {
    let mut records: Vec<DutyRecord> = member
        .history
        .iter()
        .filter(|r| r.date < before && r.night_hour().is_some())
        .copied()
        .collect();
    records.sort_by_key(|r| (r.date, r.start));
    records
}

/// Replays a member's history up to the start of a week.
pub fn state_at(member: &Member, week_start: NaiveDate) -> RotationState {
    replay_history(&ordered_history(member, week_start))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, day).unwrap()
    }

    fn night(day: u32, hour: NightHour) -> DutyRecord {
        DutyRecord::night(d(day), hour)
    }

    fn hours(state: &RotationState) -> Vec<NightHour> {
        state.used_hours().collect()
    }

    #[test]
    fn test_replay_empty() {
        let empty: [DutyRecord; 0] = [];
        let state = replay_history(&empty);
        assert_eq!(state.cycle_len(), 0);
        assert_eq!(state.load(), 0);
    }

    #[test]
    fn test_replay_partial_cycle() {
        let history = [night(1, NightHour::H00), night(8, NightHour::H01)];
        let state = replay_history(&history);
        assert_eq!(hours(&state), vec![NightHour::H00, NightHour::H01]);
        assert!(state.is_forbidden(NightHour::H00));
        assert!(!state.is_forbidden(NightHour::H02));
    }

    #[test]
    fn test_replay_full_cycle_resets() {
        let history = [
            night(1, NightHour::H03),
            night(2, NightHour::H00),
            night(3, NightHour::H02),
            night(4, NightHour::H01),
            night(5, NightHour::H02),
        ];
        let state = replay_history(&history);
        assert_eq!(hours(&state), vec![NightHour::H02]);
    }

    #[test]
    fn test_replay_ignores_duplicates() {
        let history = [
            night(1, NightHour::H00),
            night(2, NightHour::H00),
            night(3, NightHour::H01),
        ];
        let state = replay_history(&history);
        assert_eq!(hours(&state), vec![NightHour::H00, NightHour::H01]);
    }

    #[test]
    fn test_replay_skips_non_night_duties() {
        let evening = DutyRecord::new(d(2), NaiveTime::from_hms_opt(22, 0, 0).unwrap());
        let history = [night(1, NightHour::H00), evening];
        let state = replay_history(&history);
        assert_eq!(hours(&state), vec![NightHour::H00]);
    }

    #[test]
    fn test_record_counts_load_and_resets() {
        let mut state = RotationState::new();
        assert!(!state.record(NightHour::H00));
        assert!(!state.record(NightHour::H01));
        assert!(!state.record(NightHour::H02));
        assert_eq!(state.cycle_len(), 3);
        assert!(state.record(NightHour::H03));
        assert_eq!(state.cycle_len(), 0);
        assert_eq!(state.load(), 4);

        // Wiped: the hour just done is allowed again.
        assert!(!state.is_forbidden(NightHour::H03));
    }

    #[test]
    fn test_ordered_history_cutoff_and_sort() {
        let member = Member::new("M1", "Ana")
            .with_duty(d(20), NightHour::H01)
            .with_duty(d(5), NightHour::H03)
            .with_duty(d(5), NightHour::H00)
            .with_duty(d(26), NightHour::H02);

        let records = ordered_history(&member, d(26));
        let seen: Vec<_> = records.iter().filter_map(DutyRecord::night_hour).collect();
        assert_eq!(seen, vec![NightHour::H00, NightHour::H03, NightHour::H01]);

        let state = state_at(&member, d(26));
        assert_eq!(state.cycle_len(), 3);
        assert!(!state.is_forbidden(NightHour::H02));
    }
}
