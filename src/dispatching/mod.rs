//! Dispatching rules for list scheduling.
//!
//! Provides the priority rules used by the greedy solver (SPT, LPT, SRPT,
//! LRPT) and a candidate queue that orders eligible operations by rule.
//!
//! # Usage
//!
//! ```
//! use u_jobshop::dispatching::{Candidate, CandidateQueue, PriorityRule};
//! use u_jobshop::models::Task;
//!
//! let mut queue = CandidateQueue::new(PriorityRule::Spt);
//! queue.push(&Candidate::new(Task::new(0, 0), 0, 5, 12));
//! queue.push(&Candidate::new(Task::new(1, 0), 1, 2, 9));
//! assert_eq!(queue.pop(), Some(Task::new(1, 0)));
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

mod queue;
pub mod rules;

pub use queue::CandidateQueue;
pub use rules::PriorityRule;

use crate::models::{Task, Time};
use std::fmt::Debug;

/// Score returned by a dispatching rule.
///
/// Lower scores = higher priority (dispatched first).
pub type RuleScore = Time;

/// An operation whose job predecessor has finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// The operation.
    pub task: Task,
    /// Machine it needs.
    pub machine: usize,
    /// Its processing time.
    pub duration: Time,
    /// Processing time left on its machine, this operation included.
    pub remaining_work: Time,
}

impl Candidate {
    /// Creates a candidate.
    pub const fn new(task: Task, machine: usize, duration: Time, remaining_work: Time) -> Self {
        Self {
            task,
            machine,
            duration,
            remaining_work,
        }
    }
}

/// A dispatching rule that evaluates candidate priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for operations that should be dispatched first.
///
/// # Reference
/// Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SPT", "SRPT").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a candidate.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, candidate: &Candidate) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
