//! Solvers and KPI evaluation.
//!
//! Every solver implements [`Solver`]: given an instance and an absolute
//! deadline, it returns a [`SolverResult`] holding the best schedule found
//! and why the search stopped.
//!
//! # Solvers
//!
//! | Solver | Strategy |
//! |--------|----------|
//! | [`BasicSolver`] | Round-robin job list |
//! | [`RandomSolver`] | Best of random job lists |
//! | [`GreedySolver`] | Priority-rule list scheduling |
//! | [`DescentSolver`] | Greedy + critical-block swap descent |
//! | [`TabuSolver`] | Greedy + tabu search over block swaps |
//!
//! [`SolverKind`] names every configuration and builds it.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3-4
//! - Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the
//!   Job Shop Problem"

mod basic;
mod descent;
mod greedy;
mod kind;
mod kpi;
pub mod neighborhood;
mod random;
mod tabu;

pub use basic::BasicSolver;
pub use descent::DescentSolver;
pub use greedy::GreedySolver;
pub use kind::SolverKind;
pub use kpi::ScheduleKpi;
pub use random::{RandomConfig, RandomSolver};
pub use tabu::{TabuConfig, TabuSolver};

use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::time::Instant;

use crate::models::{Instance, Schedule, Time};

/// Why a solver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitCause {
    /// The deadline passed; the schedule is the best found so far.
    Timeout,
    /// The schedule is optimal. No solver in this crate proves optimality.
    ProvedOptimal,
    /// No feasible dispatch exists.
    Blocked,
    /// The search ran to completion without an optimality proof.
    NotProvedOptimal,
}

impl fmt::Display for ExitCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExitCause::Timeout => "timeout",
            ExitCause::ProvedOptimal => "proved optimal",
            ExitCause::Blocked => "blocked",
            ExitCause::NotProvedOptimal => "not proved optimal",
        };
        f.write_str(s)
    }
}

/// Outcome of a solve call.
#[derive(Debug, Clone)]
pub struct SolverResult<'a> {
    /// The solved instance.
    pub instance: &'a Instance,
    /// Best schedule found. `None` only when `cause` is `Blocked`.
    pub schedule: Option<Schedule<'a>>,
    /// Why the search stopped.
    pub cause: ExitCause,
}

impl<'a> SolverResult<'a> {
    /// Creates a result carrying a schedule.
    pub fn new(schedule: Schedule<'a>, cause: ExitCause) -> Self {
        Self {
            instance: schedule.instance(),
            schedule: Some(schedule),
            cause,
        }
    }

    /// Creates a result for a search that found no feasible dispatch.
    pub fn blocked(instance: &'a Instance) -> Self {
        Self {
            instance,
            schedule: None,
            cause: ExitCause::Blocked,
        }
    }

    /// Whether a schedule was found.
    pub fn is_feasible(&self) -> bool {
        self.schedule.is_some()
    }

    /// Makespan of the schedule, if any.
    pub fn makespan(&self) -> Option<Time> {
        self.schedule.as_ref().map(Schedule::makespan)
    }
}

/// A job-shop solving strategy.
///
/// Implementations hold configuration only; every call builds its own
/// working state, so one solver value can serve concurrent callers.
pub trait Solver: Send + Sync + Debug {
    /// Short identifier, e.g. `greedy_spt`.
    fn name(&self) -> String;

    /// Solves `instance`, treating `deadline` as a soft budget.
    fn solve<'a>(&self, instance: &'a Instance, deadline: Instant) -> SolverResult<'a>;
}

/// `Timeout` if `deadline` has passed, else `NotProvedOptimal`.
pub(crate) fn completion_cause(deadline: Instant) -> ExitCause {
    if Instant::now() > deadline {
        ExitCause::Timeout
    } else {
        ExitCause::NotProvedOptimal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::{Encoding, JobNumbers};
    use crate::test_utils::aaa1;
    use std::time::Duration;

    #[test]
    fn test_result_accessors() {
        let inst = aaa1();
        let schedule = JobNumbers::round_robin(&inst).to_schedule().unwrap();
        let result = SolverResult::new(schedule, ExitCause::NotProvedOptimal);
        assert!(result.is_feasible());
        assert_eq!(result.makespan(), Some(12));

        let blocked = SolverResult::blocked(&inst);
        assert!(!blocked.is_feasible());
        assert_eq!(blocked.makespan(), None);
        assert_eq!(blocked.cause, ExitCause::Blocked);
    }

    #[test]
    fn test_completion_cause() {
        let future = Instant::now() + Duration::from_secs(60);
        assert_eq!(completion_cause(future), ExitCause::NotProvedOptimal);
        let past = Instant::now() - Duration::from_millis(1);
        assert_eq!(completion_cause(past), ExitCause::Timeout);
    }

    #[test]
    fn test_exit_cause_display() {
        assert_eq!(ExitCause::NotProvedOptimal.to_string(), "not proved optimal");
        assert_eq!(ExitCause::Timeout.to_string(), "timeout");
    }
}
