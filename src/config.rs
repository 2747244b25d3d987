//! Scheduler configuration.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Configuration for [`NightWatchScheduler`](crate::scheduler::NightWatchScheduler).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Days filled per week, counted from Monday (default: 5 = Mon–Fri).
    pub duty_days: u8,
    /// Seed for the tie-break source. `None` seeds from the OS.
    pub tie_break_seed: Option<u64>,
    /// Ask the store whether a slot is filled right before writing it
    /// (default: true). Guards against concurrent manual edits.
    pub recheck_before_write: bool,
    /// Emit a notification intent per new slot (default: true).
    pub notify_assigned: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            duty_days: 5,
            tie_break_seed: None,
            recheck_before_write: true,
            notify_assigned: true,
        }
    }
}

impl SchedulerConfig {
    /// Largest accepted `duty_days`.
    pub const MAX_DUTY_DAYS: u8 = 7;

    /// Sets the number of duty days.
    pub fn with_duty_days(mut self, days: u8) -> Self {
        self.duty_days = days;
        self
    }

    /// Fixes the tie-break seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.tie_break_seed = Some(seed);
        self
    }

    /// Enables or disables the pre-write recheck.
    pub fn with_recheck(mut self, recheck: bool) -> Self {
        self.recheck_before_write = recheck;
        self
    }

    /// Enables or disables notification intents.
    pub fn with_notifications(mut self, notify: bool) -> Self {
        self.notify_assigned = notify;
        self
    }

    /// Whether `duty_days` is in `1..=7`.
    pub fn is_valid(&self) -> bool {
        (1..=Self::MAX_DUTY_DAYS).contains(&self.duty_days)
    }

    /// Builds the configured tie-break source.
    pub fn rng(&self) -> StdRng {
        match self.tie_break_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults() {
        let c = SchedulerConfig::default();
        assert_eq!(c.duty_days, 5);
        assert!(c.tie_break_seed.is_none());
        assert!(c.recheck_before_write);
        assert!(c.notify_assigned);
        assert!(c.is_valid());
    }

    #[test]
    fn test_validity() {
        assert!(!SchedulerConfig::default().with_duty_days(0).is_valid());
        assert!(SchedulerConfig::default().with_duty_days(7).is_valid());
        assert!(!SchedulerConfig::default().with_duty_days(8).is_valid());
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let c = SchedulerConfig::default().with_seed(7);
        let a: u64 = c.rng().random();
        let b: u64 = c.rng().random();
        assert_eq!(a, b);
    }

    #[test]
    fn test_deserialize_partial() {
        let c: SchedulerConfig =
            serde_json::from_str(r#"{"duty_days": 7, "tie_break_seed": 42}"#).unwrap();
        assert_eq!(c.duty_days, 7);
        assert_eq!(c.tie_break_seed, Some(42));
        assert!(c.recheck_before_write);
    }
}
