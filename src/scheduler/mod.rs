//! Night-watch scheduling.
//!
//! Fills a week's night-watch grid for one family in a single greedy pass.
//!
//! # Pipeline
//!
//! | Step | Item |
//! |------|------|
//! | Seed rotation from history | [`WeekPlanner::new`] |
//! | Enumerate slots | [`slot_grid`] |
//! | Filter candidates | [`WeekPlanner::candidates`] |
//! | Pick by load, random ties | [`select_member`] |
//! | Record slot and update state | [`WeekPlanner::commit`] |
//! | Deliver notifications | [`dispatch_notifications`] |
//!
//! [`NightWatchScheduler`] drives the pipeline either as a dry run over a
//! snapshot or against a [`DutyStore`](crate::store::DutyStore).

mod dispatch;
mod grid;
mod night_watch;
mod planner;
mod report;
mod selection;

pub use dispatch::{dispatch_notifications, DispatchReport};
pub use grid::slot_grid;
pub use night_watch::NightWatchScheduler;
pub use planner::{Commit, Exclusion, WeekPlanner};
pub use report::{RunReport, RunSummary};
pub use selection::{select_member, Candidate};
