//! Error types for scheduling runs and their collaborators.

use thiserror::Error;

use crate::models::SlotKey;
use crate::scheduler::RunReport;
use crate::validation::ValidationError;

/// Errors raised by a [`DutyStore`](crate::store::DutyStore).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The slot already carries a member.
    #[error("slot {date} {hour} of assignment {assignment_id} is already filled", date = .key.date, hour = .key.hour)]
    Conflict { assignment_id: String, key: SlotKey },

    /// The backend could not be reached or refused the operation.
    #[error("store backend error: {0}")]
    Backend(String),
}

/// Errors raised by a [`Notifier`](crate::store::Notifier).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NotifyError {
    /// The member has no contact address.
    #[error("member {0} has no contact address")]
    NoContact(String),

    /// The delivery channel failed.
    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Errors that abort a scheduling run.
///
/// An empty candidate set is not an error; the slot stays open and is
/// reported in the run summary.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The weekly assignment (or its family) does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The snapshot failed validation; nothing was written.
    #[error("invalid scheduling input ({} problem(s))", .0.len())]
    InvalidInput(Vec<ValidationError>),

    /// Reading from the store failed.
    #[error("store read failed")]
    Store(#[source] StoreError),

    /// Writing a slot failed. Slots written before the failure are kept
    /// and `partial` lists them with their notifications.
    #[error("persisting slot failed after {} slot(s) were written", .partial.new_slots.len())]
    Persistence {
        partial: Box<RunReport>,
        #[source]
        source: StoreError,
    },
}

impl ScheduleError {
    /// Shorthand for a missing weekly assignment.
    pub fn assignment_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "weekly assignment",
            id: id.into(),
        }
    }

    /// Shorthand for a missing family.
    pub fn family_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: "family",
            id: id.into(),
        }
    }
}

/// Result alias for scheduling runs.
pub type ScheduleResult<T> = Result<T, ScheduleError>;
