//! Night-watch rotation scheduler.
//!
//! # Algorithm
//!
//! 1. Replay each member's past watches to seed their rotation cycle.
//! 2. Walk the grid Monday..Friday, 00:00..03:00.
//! 3. Skip slots that already carry a member, counting their hour towards
//!    that member's cycle.
//! 4. Keep members who are not excused that day and have not covered that
//!    hour in their current cycle.
//! 5. Pick the least-loaded of them, ties broken at random.
//! 6. Write the slot and update the winner's cycle and load before moving on.
//!
//! A slot with no eligible member stays open. The pass is greedy and
//! single-threaded: every decision reads the loads left by the previous one.
//!
//! # Complexity
//! O(s * m) where s = grid slots (at most 28) and m = family members.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::{debug, info, info_span, warn};

use super::dispatch::{dispatch_notifications, DispatchReport};
use super::grid::slot_grid;
use super::planner::WeekPlanner;
use super::report::{RunReport, RunSummary};
use crate::config::SchedulerConfig;
use crate::error::{ScheduleError, ScheduleResult, StoreError};
use crate::models::{DutySlot, Family, SlotKey, WeeklyAssignment};
use crate::store::{DutyStore, Notifier};
use crate::validation::{validate_config, validate_snapshot};

/// Where a run sends its decisions.
trait SlotSink {
    /// Whether the slot was filled since the snapshot was taken.
    fn filled_since_snapshot(&mut self, key: SlotKey) -> Result<bool, StoreError>;

    /// Persists a slot.
    fn write(&mut self, slot: &DutySlot) -> Result<(), StoreError>;
}

/// Keeps everything in memory.
struct DryRun;

impl SlotSink for DryRun {
    fn filled_since_snapshot(&mut self, _key: SlotKey) -> Result<bool, StoreError> {
        Ok(false)
    }

    fn write(&mut self, _slot: &DutySlot) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Writes through a [`DutyStore`].
struct StoreSink<'s, S: ?Sized> {
    store: &'s mut S,
    assignment_id: &'s str,
    recheck: bool,
}

impl<S: DutyStore + ?Sized> SlotSink for StoreSink<'_, S> {
    fn filled_since_snapshot(&mut self, key: SlotKey) -> Result<bool, StoreError> {
        if !self.recheck {
            return Ok(false);
        }
        self.store.is_slot_filled(self.assignment_id, key)
    }

    fn write(&mut self, slot: &DutySlot) -> Result<(), StoreError> {
        self.store.write_slot(self.assignment_id, slot)
    }
}

/// Greedy night-watch scheduler.
///
/// Fills the empty slots of one weekly assignment, enforcing the rotation
/// rule (all four hours before any repeat) and balancing load across the
/// family. Existing slots are never modified.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use night_watch::models::{Family, Member, WeeklyAssignment};
/// use night_watch::scheduler::NightWatchScheduler;
/// use night_watch::SchedulerConfig;
///
/// let monday = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let family = Family::new("F1", "North").with_member(Member::new("M1", "Ana"));
/// let week = WeeklyAssignment::new("W1", "F1", monday);
///
/// let scheduler = NightWatchScheduler::new(SchedulerConfig::default().with_seed(1));
/// let mut rng = scheduler.config().rng();
/// let report = scheduler.plan(&week, &family, &mut rng).unwrap();
/// assert_eq!(report.summary.filled_count(), 20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NightWatchScheduler {
    config: SchedulerConfig,
}

impl NightWatchScheduler {
    /// Creates a scheduler.
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Plans a week without touching any store.
    ///
    /// Useful for previews: the returned slots are what [`run`](Self::run)
    /// would write given the same snapshot and random source.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        assignment: &WeeklyAssignment,
        family: &Family,
        rng: &mut R,
    ) -> ScheduleResult<RunReport> {
        self.fill(assignment, family, &mut DryRun, rng)
    }

    /// Loads a weekly assignment, fills its empty slots and writes them.
    ///
    /// # Errors
    /// - [`ScheduleError::NotFound`] if the assignment or its family is
    ///   missing. Nothing is written.
    /// - [`ScheduleError::InvalidInput`] if the snapshot or configuration
    ///   fails validation. Nothing is written.
    /// - [`ScheduleError::Persistence`] if a write fails. Earlier writes
    ///   stay in place and are returned in the error's partial report.
    pub fn run<S, R>(&self, store: &mut S, assignment_id: &str, rng: &mut R) -> ScheduleResult<RunReport>
    where
        S: DutyStore + ?Sized,
        R: Rng + ?Sized,
    {
        let assignment = store
            .weekly_assignment(assignment_id)
            .map_err(ScheduleError::Store)?
            .ok_or_else(|| ScheduleError::assignment_not_found(assignment_id))?;
        let family = store
            .family(&assignment.family_id)
            .map_err(ScheduleError::Store)?
            .ok_or_else(|| ScheduleError::family_not_found(&assignment.family_id))?;

        let mut sink = StoreSink {
            store,
            assignment_id,
            recheck: self.config.recheck_before_write,
        };
        self.fill(&assignment, &family, &mut sink, rng)
    }

    /// Runs with the random source built from the configuration.
    pub fn run_configured<S>(&self, store: &mut S, assignment_id: &str) -> ScheduleResult<RunReport>
    where
        S: DutyStore + ?Sized,
    {
        let mut rng = self.config.rng();
        self.run(store, assignment_id, &mut rng)
    }

    /// Runs, then hands the notifications to `notifier`.
    ///
    /// Delivery failures are reported in the [`DispatchReport`] and never
    /// undo the written slots. If a write fails mid-run, members on the
    /// slots written before it are still notified and the error is returned.
    pub fn run_and_notify<S, N, R>(
        &self,
        store: &mut S,
        notifier: &N,
        assignment_id: &str,
        rng: &mut R,
    ) -> ScheduleResult<(RunReport, DispatchReport)>
    where
        S: DutyStore + ?Sized,
        N: Notifier + ?Sized,
        R: Rng + ?Sized,
    {
        let report = match self.run(store, assignment_id, rng) {
            Ok(report) => report,
            Err(ScheduleError::Persistence { partial, source }) => {
                let dispatch = dispatch_notifications(notifier, &partial.notifications);
                warn!(
                    sent = dispatch.sent,
                    failed = dispatch.failed.len(),
                    "run aborted, notified members of slots already written"
                );
                return Err(ScheduleError::Persistence { partial, source });
            }
            Err(e) => return Err(e),
        };
        let dispatch = dispatch_notifications(notifier, &report.notifications);
        Ok((report, dispatch))
    }

    fn fill<K, R>(
        &self,
        assignment: &WeeklyAssignment,
        family: &Family,
        sink: &mut K,
        rng: &mut R,
    ) -> ScheduleResult<RunReport>
    where
        K: SlotSink,
        R: Rng + ?Sized,
    {
        let _span = info_span!("night_watch", assignment_id = %assignment.id).entered();

        validate_config(&self.config).map_err(ScheduleError::InvalidInput)?;
        validate_snapshot(assignment, family).map_err(ScheduleError::InvalidInput)?;

        let mut planner = WeekPlanner::new(family, assignment.week_start);
        let mut report = RunReport {
            summary: RunSummary::new(assignment.id.clone()),
            ..Default::default()
        };

        for key in slot_grid(assignment.week_start, self.config.duty_days) {
            if let Some(existing) = assignment.slot_at(key).and_then(|s| s.member_id.as_deref()) {
                planner.observe(existing, key.hour);
                report.summary.skipped += 1;
                continue;
            }
            if sink.filled_since_snapshot(key).map_err(ScheduleError::Store)? {
                warn!(date = %key.date, hour = %key.hour, "slot filled during run, skipping");
                report.summary.skipped += 1;
                continue;
            }

            let Some(member) = planner.choose(key, rng) else {
                warn!(date = %key.date, hour = %key.hour, "no eligible member, slot left open");
                report.summary.open.push(key);
                continue;
            };

            match sink.write(&DutySlot::automatic(key, member.id.clone())) {
                Ok(()) => {}
                Err(StoreError::Conflict { .. }) => {
                    warn!(date = %key.date, hour = %key.hour, "slot taken before write, skipping");
                    report.summary.skipped += 1;
                    continue;
                }
                Err(source) => {
                    report.summary.loads = loads_of(&planner);
                    return Err(ScheduleError::Persistence {
                        partial: Box::new(report),
                        source,
                    });
                }
            }

            let commit = planner.commit(member, key);
            debug!(
                date = %key.date,
                hour = %key.hour,
                member_id = %member.id,
                cycle_completed = commit.cycle_completed,
                "watch assigned"
            );
            report.summary.filled += 1;
            report.new_slots.push(commit.slot);
            if self.config.notify_assigned {
                report.notifications.push(commit.notification);
            }
        }

        report.summary.loads = loads_of(&planner);

        info!(
            filled = report.summary.filled,
            open = report.summary.open_count(),
            skipped = report.summary.skipped,
            load_spread = report.summary.load_spread(),
            "night watch run complete"
        );
        Ok(report)
    }
}

fn loads_of(planner: &WeekPlanner<'_>) -> BTreeMap<String, u32> {
    planner.loads().map(|(id, load)| (id.to_string(), load)).collect()
}
