//! Family and member models.
//!
//! A family shares night-watch duty for the weeks it is bound to. Each
//! member carries the data the scheduler needs: declared unavailability
//! and the record of duties already performed.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{NightHour, Unavailability};

/// One duty a member has already performed.
///
/// `start` is the wall-clock start; only the four night hours count
/// towards rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyRecord {
    /// Calendar day of the duty.
    pub date: NaiveDate,
    /// Start time of the duty.
    pub start: NaiveTime,
}

impl DutyRecord {
    /// Creates a history record.
    pub fn new(date: NaiveDate, start: NaiveTime) -> Self {
        Self { date, start }
    }

    /// Creates a record for a night watch.
    pub fn night(date: NaiveDate, hour: NightHour) -> Self {
        Self::new(date, hour.start_time())
    }

    /// The night hour of this duty, if it was one.
    #[inline]
    pub fn night_hour(&self) -> Option<NightHour> {
        NightHour::from_time(self.start)
    }
}

/// A person who can be put on watch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Unique member identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact address used for notifications (phone or email).
    pub contact: Option<String>,
    /// Declared unavailability periods.
    pub unavailability: Vec<Unavailability>,
    /// Past duties, any order.
    pub history: Vec<DutyRecord>,
}

impl Member {
    /// Creates a member with no contact, unavailability or history.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            contact: None,
            unavailability: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Sets the contact address.
    pub fn with_contact(mut self, contact: impl Into<String>) -> Self {
        self.contact = Some(contact.into());
        self
    }

    /// Adds an unavailability period.
    pub fn with_unavailability(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.unavailability.push(Unavailability::new(start, end));
        self
    }

    /// Adds a past night watch.
    pub fn with_duty(mut self, date: NaiveDate, hour: NightHour) -> Self {
        self.history.push(DutyRecord::night(date, hour));
        self
    }

    /// Adds a past duty of any kind.
    pub fn with_record(mut self, record: DutyRecord) -> Self {
        self.history.push(record);
        self
    }

    /// Whether the member is excused on a calendar day.
    pub fn is_excused_on(&self, date: NaiveDate) -> bool {
        self.unavailability.iter().any(|u| u.contains(date))
    }
}

/// A group of members sharing watch duty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Family {
    /// Unique family identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Members, in roster order.
    pub members: Vec<Member>,
}

impl Family {
    /// Creates an empty family.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            members: Vec::new(),
        }
    }

    /// Adds a member.
    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Finds a member by ID.
    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the family has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    #[test]
    fn test_member_builder() {
        let m = Member::new("M1", "Ana")
            .with_contact("+33600000000")
            .with_unavailability(d(6), d(6))
            .with_duty(d(1), NightHour::H02);

        assert_eq!(m.id, "M1");
        assert_eq!(m.contact.as_deref(), Some("+33600000000"));
        assert_eq!(m.history.len(), 1);
        assert_eq!(m.history[0].night_hour(), Some(NightHour::H02));
    }

    #[test]
    fn test_is_excused_on() {
        let m = Member::new("M1", "Ana")
            .with_unavailability(d(6), d(6))
            .with_unavailability(d(10), d(12));

        assert!(m.is_excused_on(d(6)));
        assert!(m.is_excused_on(d(11)));
        assert!(!m.is_excused_on(d(7)));
        assert!(!Member::new("M2", "Ben").is_excused_on(d(6)));
    }

    #[test]
    fn test_non_night_record() {
        let evening = DutyRecord::new(d(1), NaiveTime::from_hms_opt(21, 0, 0).unwrap());
        assert_eq!(evening.night_hour(), None);
    }

    #[test]
    fn test_family_lookup() {
        let f = Family::new("F1", "North")
            .with_member(Member::new("M1", "Ana"))
            .with_member(Member::new("M2", "Ben"));

        assert_eq!(f.len(), 2);
        assert!(!f.is_empty());
        assert_eq!(f.member("M2").map(|m| m.name.as_str()), Some("Ben"));
        assert!(f.member("M9").is_none());
    }
}
