//! Error types.
//!
//! Local-search loops never surface these: a probe that fails to decode is
//! treated as a non-improving neighbor. Errors reach the caller only from
//! constructors, parsers and explicit validation.

use thiserror::Error;

use crate::models::Violation;
use crate::validation::ValidationError;

/// Errors produced by instance construction, encodings and schedule checks.
#[derive(Debug, Error)]
pub enum JobShopError {
    /// A candidate encoding breaks its multiplicity or shape invariants.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// A schedule violates job precedence or machine exclusion.
    ///
    /// Decoders never produce such schedules, so this signals a solver bug.
    #[error("invalid schedule: {0}")]
    ScheduleInvalid(Violation),

    /// A per-machine order whose queues wait on each other forever.
    #[error("dispatch deadlock: {remaining} operations can never start")]
    Deadlock {
        /// Operations left unscheduled when the simulation stalled.
        remaining: usize,
    },

    /// Structural problems in an instance definition.
    #[error("invalid instance: {}", join_messages(.0))]
    InvalidInstance(Vec<ValidationError>),

    /// Malformed instance text.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong.
        message: String,
    },

    /// A rule or solver name that does not exist.
    #[error("unknown {kind} `{name}`")]
    UnknownName {
        /// What was being looked up ("priority rule", "solver").
        kind: &'static str,
        /// The name as given.
        name: String,
    },

    /// Reading an instance file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<Vec<ValidationError>> for JobShopError {
    fn from(errors: Vec<ValidationError>) -> Self {
        JobShopError::InvalidInstance(errors)
    }
}
