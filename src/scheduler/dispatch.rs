//! Notification dispatch after a run.
//!
//! Runs once the slots are decided and written. A failed delivery is
//! logged and counted; it never reverses the slot it belongs to.

use tracing::{debug, warn};

use crate::error::NotifyError;
use crate::models::NotificationIntent;
use crate::store::Notifier;

/// Outcome of dispatching a batch of notifications.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Number of notifications delivered.
    pub sent: usize,
    /// Intents that could not be delivered, with the reason.
    pub failed: Vec<(NotificationIntent, NotifyError)>,
}

impl DispatchReport {
    /// Whether every notification was delivered.
    pub fn all_sent(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Sends every intent through `notifier`, continuing past failures.
pub fn dispatch_notifications<N: Notifier + ?Sized>(
    notifier: &N,
    intents: &[NotificationIntent],
) -> DispatchReport {
    let mut report = DispatchReport::default();
    for intent in intents {
        match notifier.notify(intent) {
            Ok(()) => {
                debug!(member_id = %intent.member_id, date = %intent.date, hour = %intent.hour, "watch notification sent");
                report.sent += 1;
            }
            Err(e) => {
                warn!(error = %e, member_id = %intent.member_id, date = %intent.date, hour = %intent.hour, "watch notification failed");
                report.failed.push((intent.clone(), e));
            }
        }
    }
    report
}
