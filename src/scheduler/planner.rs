//! Per-run rotation bookkeeping.
//!
//! [`WeekPlanner`] owns the rotation state of every family member for the
//! duration of one run. It is seeded by replaying each member's history up
//! to the week's Monday and is dropped with the run; only the slots it
//! produces outlive it.

use std::collections::HashMap;

use chrono::NaiveDate;
use rand::Rng;

use super::selection::{select_member, Candidate};
use crate::models::{DutySlot, Family, Member, NightHour, NotificationIntent, SlotKey};
use crate::rotation::{state_at, RotationState};

/// Why a member was left out of a slot's candidate set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Declared unavailable that day.
    Excused,
    /// Already covered that hour in the current cycle.
    RotationUsed,
}

/// What committing a slot produced.
#[derive(Debug, Clone)]
pub struct Commit {
    /// The new slot.
    pub slot: DutySlot,
    /// Notification for the member on watch.
    pub notification: NotificationIntent,
    /// Whether this watch completed the member's rotation cycle.
    pub cycle_completed: bool,
}

/// Rotation and load state for one scheduling run.
#[derive(Debug, Clone)]
pub struct WeekPlanner<'a> {
    members: &'a [Member],
    states: HashMap<&'a str, RotationState>,
}

impl<'a> WeekPlanner<'a> {
    /// Seeds every member's state from their history before `week_start`.
    pub fn new(family: &'a Family, week_start: NaiveDate) -> Self {
        let states = family
            .members
            .iter()
            .map(|m| (m.id.as_str(), state_at(m, week_start)))
            .collect();
        Self {
            members: &family.members,
            states,
        }
    }

    /// Current state of a member.
    pub fn state(&self, member_id: &str) -> Option<&RotationState> {
        self.states.get(member_id)
    }

    /// Checks one member against a slot.
    pub fn exclusion(&self, member: &Member, key: SlotKey) -> Option<Exclusion> {
        if member.is_excused_on(key.date) {
            return Some(Exclusion::Excused);
        }
        if self
            .states
            .get(member.id.as_str())
            .is_some_and(|s| s.is_forbidden(key.hour))
        {
            return Some(Exclusion::RotationUsed);
        }
        None
    }

    /// Members eligible for a slot, in roster order.
    pub fn candidates(&self, key: SlotKey) -> Vec<Candidate<'a>> {
        self.members
            .iter()
            .filter(|m| self.exclusion(m, key).is_none())
            .map(|m| Candidate {
                member_id: m.id.as_str(),
                load: self.states.get(m.id.as_str()).map_or(0, RotationState::load),
            })
            .collect()
    }

    /// Chooses the member for a slot, or `None` if nobody is eligible.
    pub fn choose<R: Rng + ?Sized>(&self, key: SlotKey, rng: &mut R) -> Option<&'a Member> {
        let winner = select_member(self.candidates(key), rng)?;
        self.member(winner.member_id)
    }

    /// Folds a watch that already exists in the week into a member's cycle.
    ///
    /// The run load is unchanged. Unknown members are ignored. Returns
    /// `true` if the hour completed the cycle.
    pub fn observe(&mut self, member_id: &str, hour: NightHour) -> bool {
        self.states
            .get_mut(member_id)
            .is_some_and(|state| state.absorb(hour))
    }

    /// Records `member` on watch at `key`.
    ///
    /// The state change is visible to every later call in the same run.
    pub fn commit(&mut self, member: &'a Member, key: SlotKey) -> Commit {
        let cycle_completed = self
            .states
            .entry(member.id.as_str())
            .or_default()
            .record(key.hour);
        Commit {
            slot: DutySlot::automatic(key, member.id.clone()),
            notification: NotificationIntent {
                member_id: member.id.clone(),
                member_name: member.name.clone(),
                contact: member.contact.clone(),
                date: key.date,
                hour: key.hour,
            },
            cycle_completed,
        }
    }

    /// Watches handed out so far, per member.
    pub fn loads(&self) -> impl Iterator<Item = (&'a str, u32)> + '_ {
        self.members
            .iter()
            .map(|m| (m.id.as_str(), self.states.get(m.id.as_str()).map_or(0, RotationState::load)))
    }

    fn member(&self, id: &str) -> Option<&'a Member> {
        self.members.iter().find(|m| m.id == id)
    }
}
