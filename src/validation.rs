//! Input validation for scheduling runs.
//!
//! Checks structural integrity of a weekly assignment and its family
//! before any slot is written. Detects:
//! - A week that does not start on Monday
//! - A slot dated outside the week
//! - Two slots at the same (day, hour)
//! - Duplicate member IDs
//! - Unavailability periods ending before they start
//! - A configuration with a duty-day count outside `1..=7`
//!
//! All problems are collected; validation does not stop at the first one.

use std::collections::HashSet;

use chrono::{Datelike, Weekday};

use crate::config::SchedulerConfig;
use crate::models::{Family, WeeklyAssignment};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// `week_start` is not a Monday.
    WeekStartNotMonday,
    /// A slot's date falls outside the assignment's week.
    SlotOutsideWeek,
    /// Two slots share a (day, hour) key.
    DuplicateSlot,
    /// Two members share an ID.
    DuplicateMember,
    /// An unavailability period ends before it starts.
    InvertedUnavailability,
    /// `duty_days` is outside `1..=7`.
    InvalidDutyDays,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates a weekly assignment and the family bound to it.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(assignment: &WeeklyAssignment, family: &Family) -> ValidationResult {
    let mut errors = Vec::new();

    if assignment.week_start.weekday() != Weekday::Mon {
        errors.push(ValidationError::new(
            ValidationErrorKind::WeekStartNotMonday,
            format!(
                "Assignment '{}' starts on {} ({}), not a Monday",
                assignment.id,
                assignment.week_start,
                assignment.week_start.weekday()
            ),
        ));
    }

    let mut keys = HashSet::new();
    for slot in &assignment.slots {
        if !assignment.contains_date(slot.date) {
            errors.push(ValidationError::new(
                ValidationErrorKind::SlotOutsideWeek,
                format!(
                    "Slot {} {} lies outside week starting {}",
                    slot.date, slot.hour, assignment.week_start
                ),
            ));
        }
        if !keys.insert(slot.key()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSlot,
                format!("Duplicate slot: {} {}", slot.date, slot.hour),
            ));
        }
    }

    let mut member_ids = HashSet::new();
    for member in &family.members {
        if !member_ids.insert(member.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateMember,
                format!("Duplicate member ID: {}", member.id),
            ));
        }
        for period in member.unavailability.iter().filter(|u| u.is_inverted()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedUnavailability,
                format!(
                    "Member '{}' has unavailability ending {} before it starts {}",
                    member.id, period.end, period.start
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a scheduler configuration.
pub fn validate_config(config: &SchedulerConfig) -> ValidationResult {
    if config.is_valid() {
        return Ok(());
    }
    Err(vec![ValidationError::new(
        ValidationErrorKind::InvalidDutyDays,
        format!(
            "duty_days must be between 1 and {}, got {}",
            SchedulerConfig::MAX_DUTY_DAYS,
            config.duty_days
        ),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DutySlot, Member, NightHour};
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn family() -> Family {
        Family::new("F1", "North")
            .with_member(Member::new("M1", "Ana"))
            .with_member(Member::new("M2", "Ben"))
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result
            .unwrap_err()
            .into_iter()
            .map(|e| e.kind)
            .collect()
    }

    #[test]
    fn test_valid_snapshot() {
        let a = WeeklyAssignment::new("W1", "F1", d(4))
            .with_slot(DutySlot::manual(d(4), NightHour::H00, "M1"));
        assert!(validate_snapshot(&a, &family()).is_ok());
    }

    #[test]
    fn test_week_start_not_monday() {
        let a = WeeklyAssignment::new("W1", "F1", d(5));
        assert_eq!(
            kinds(validate_snapshot(&a, &family())),
            vec![ValidationErrorKind::WeekStartNotMonday]
        );
    }

    #[test]
    fn test_slot_problems() {
        let a = WeeklyAssignment::new("W1", "F1", d(4))
            .with_slot(DutySlot::manual(d(4), NightHour::H01, "M1"))
            .with_slot(DutySlot::manual(d(4), NightHour::H01, "M2"))
            .with_slot(DutySlot::manual(d(12), NightHour::H00, "M2"));

        assert_eq!(
            kinds(validate_snapshot(&a, &family())),
            vec![
                ValidationErrorKind::DuplicateSlot,
                ValidationErrorKind::SlotOutsideWeek
            ]
        );
    }

    #[test]
    fn test_member_problems() {
        let f = family()
            .with_member(Member::new("M1", "Ana again"))
            .with_member(Member::new("M3", "Cy").with_unavailability(d(9), d(7)));
        let a = WeeklyAssignment::new("W1", "F1", d(4));

        let errors = validate_snapshot(&a, &f).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateMember);
        assert_eq!(errors[1].kind, ValidationErrorKind::InvertedUnavailability);
        assert!(errors[1].to_string().contains("M3"));
    }

    #[test]
    fn test_validate_config() {
        assert!(validate_config(&SchedulerConfig::default()).is_ok());
        assert_eq!(
            kinds(validate_config(&SchedulerConfig::default().with_duty_days(0))),
            vec![ValidationErrorKind::InvalidDutyDays]
        );
    }
}
