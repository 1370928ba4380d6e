//! Round-robin baseline.
//!
//! Decodes the job list `0, 1, .., n-1, 0, 1, ..`: every job advances one
//! operation per round. Used as the reference the other solvers must beat.

use std::time::Instant;

use super::{completion_cause, Solver, SolverResult};
use crate::encoding::{Encoding, JobNumbers};
use crate::models::Instance;

/// Round-robin job-list solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicSolver;

impl BasicSolver {
    /// Creates the solver.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for BasicSolver {
    fn name(&self) -> String {
        "basic".into()
    }

    #[tracing::instrument(level = "debug", name = "Basic", skip_all, fields(instance = instance.name()))]
    fn solve<'a>(&self, instance: &'a Instance, deadline: Instant) -> SolverResult<'a> {
        match JobNumbers::round_robin(instance).to_schedule() {
            Ok(schedule) => {
                tracing::debug!("Basic: makespan {}", schedule.makespan());
                SolverResult::new(schedule, completion_cause(deadline))
            }
            Err(err) => {
                tracing::warn!("Basic: {}", err);
                SolverResult::blocked(instance)
            }
        }
    }
}
