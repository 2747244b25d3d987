//! Night-watch domain models.
//!
//! Read-only snapshots of the data a scheduling run works on, and the
//! records it produces.
//!
//! | Type | Role |
//! |------|------|
//! | `Family` | Group sharing a week of watch |
//! | `Member` | Person on watch, with unavailability and history |
//! | `WeeklyAssignment` | Family bound to one week, with its slots |
//! | `DutySlot` | One (day, hour, member) watch |
//! | `NotificationIntent` | "Tell this member" request |

mod assignment;
mod hour;
mod member;
mod unavailability;

pub use assignment::{DutySlot, NotificationIntent, SlotKey, SlotOrigin, WeeklyAssignment};
pub use hour::NightHour;
pub use member::{DutyRecord, Family, Member};
pub use unavailability::Unavailability;
