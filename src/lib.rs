//! Night-watch rotation scheduling.
//!
//! Fills the weekly night-watch grid of a family (Monday to Friday, four
//! one-hour watches from 00:00 to 04:00) while enforcing a rotation rule and
//! balancing workload.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Family`, `Member`, `Unavailability`,
//!   `WeeklyAssignment`, `DutySlot`, `NightHour`, `NotificationIntent`
//! - **`rotation`**: Rotation cycle state and history replay
//! - **`scheduler`**: Slot grid, candidate filtering, load-balanced
//!   selection, and the run driver
//! - **`store`**: Data-access and notification traits, with in-memory
//!   implementations
//! - **`validation`**: Input integrity checks (week start, duplicate IDs and
//!   slots, inverted periods)
//!
//! # Rotation rule
//!
//! A member may not repeat a night hour until they have covered all four.
//! The cycle wipes the moment the fourth distinct hour is recorded, both when
//! replaying history and while a run assigns watches.
//!
//! # Side effects
//!
//! The crate never sends messages. A run returns notification intents as
//! data; [`scheduler::dispatch_notifications`] hands them to a
//! [`store::Notifier`] after the slots are written.

pub mod config;
pub mod error;
pub mod models;
pub mod rotation;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use config::SchedulerConfig;
pub use error::{NotifyError, ScheduleError, ScheduleResult, StoreError};
