//! Input validation for schedules and training history.
//!
//! Model types validate their invariants at construction, but data
//! arriving from serde or an external store bypasses the
//! constructors. These checks restore the guarantees in bulk before
//! planning:
//! - Duplicate entry IDs
//! - Inverted intervals (end before start, completion before order)
//! - Zero durations
//! - Empty categories
//!
//! All problems are collected and reported together, not fail-fast.

use std::collections::HashSet;

use crate::models::{ScheduleEntry, TrainingRecord};

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
    /// Two schedule entries share the same ID.
    DuplicateId,
    /// An interval ends before it starts.
    InvalidInterval,
    /// A duration of zero days.
    ZeroDuration,
    /// A record without a category.
    EmptyCategory,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a schedule snapshot.
///
/// Checks:
/// 1. No duplicate entry IDs
/// 2. Every entry's end is on or after its start
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_entries(entries: &[ScheduleEntry]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut ids = HashSet::new();
    for entry in entries {
        if !ids.insert(entry.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate entry ID: {}", entry.id),
            ));
        }
        if entry.end < entry.start {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!(
                    "Entry '{}' ends {} before it starts {}",
                    entry.id, entry.end, entry.start
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

/// Validates training history.
///
/// Checks:
/// 1. Every record names a category
/// 2. Completion is on or after the order date
/// 3. Actual duration is at least one day
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_history(records: &[TrainingRecord]) -> ValidationResult {
    let mut errors = Vec::new();

    for (index, record) in records.iter().enumerate() {
        if record.category.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCategory,
                format!("Record #{index} has no category"),
            ));
        }
        if record.completion_date < record.order_date {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInterval,
                format!(
                    "Record #{index} ({}) completed {} before its order date {}",
                    record.category, record.completion_date, record.order_date
                ),
            ));
        }
        if record.actual_days == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroDuration,
                format!("Record #{index} ({}) has a zero-day duration", record.category),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
