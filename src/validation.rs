//! Input validation for job-shop instances.
//!
//! Checks structural integrity of the job list before an [`Instance`] is
//! built. Detects:
//! - Instances without jobs
//! - Jobs without operations
//! - Jobs of differing lengths
//! - Non-positive durations
//! - Machine indices that cannot all be in use
//! - Durations whose total does not fit in [`Time`]
//!
//! All problems are collected, not just the first one.
//!
//! [`Instance`]: crate::models::Instance

use crate::models::{Operation, Time};
use std::fmt;

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
    /// The instance has no jobs.
    EmptyInstance,
    /// A job has no operations.
    EmptyJob,
    /// A job's length differs from the first job's.
    RaggedJob,
    /// An operation has a zero or negative duration.
    NonPositiveDuration,
    /// A machine index is not below the number of operations, so some
    /// machine would have nothing to process.
    MachineOutOfRange,
    /// The sum of all durations overflows [`Time`].
    DurationOverflow,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates per-job operation lists.
///
/// Checks:
/// 1. At least one job
/// 2. Every job has at least one operation
/// 3. Every job has as many operations as job 0
/// 4. Every duration is strictly positive
/// 5. Every machine index is below the total operation count
/// 6. The positive durations sum to at most `Time::MAX`
///
/// Check 6 bounds every job length, machine load and decoded end time.
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_jobs(jobs: &[Vec<Operation>]) -> ValidationResult {
    let mut errors = Vec::new();

    let Some(first) = jobs.first() else {
        return Err(vec![ValidationError::new(
            ValidationErrorKind::EmptyInstance,
            "Instance has no jobs",
        )]);
    };
    let expected_len = first.len();
    let num_operations: usize = jobs.iter().map(Vec::len).sum();

    for (j, ops) in jobs.iter().enumerate() {
        if ops.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyJob,
                format!("Job {j} has no operations"),
            ));
        } else if ops.len() != expected_len {
            errors.push(ValidationError::new(
                ValidationErrorKind::RaggedJob,
                format!(
                    "Job {j} has {} operations, expected {expected_len}",
                    ops.len()
                ),
            ));
        }

        for (t, op) in ops.iter().enumerate() {
            if op.duration <= 0 {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonPositiveDuration,
                    format!("Operation ({j},{t}) has duration {}", op.duration),
                ));
            }
            if op.machine >= num_operations {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MachineOutOfRange,
                    format!(
                        "Operation ({j},{t}) uses machine {} but the instance has {num_operations} operations",
                        op.machine
                    ),
                ));
            }
        }
    }

    let total = jobs
        .iter()
        .flatten()
        .filter(|op| op.duration > 0)
        .try_fold(0 as Time, |acc, op| acc.checked_add(op.duration));
    if total.is_none() {
        errors.push(ValidationError::new(
            ValidationErrorKind::DurationOverflow,
            "Total duration exceeds the time range",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
