//! Rule-ordered queue of dispatch candidates.
//!
//! Candidates are scored once, when pushed, and popped lowest score first.
//! Equal scores fall back to `(job, task)` ascending, so the dispatch order
//! never depends on insertion order.
//!
//! # Reference
//! Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use super::{Candidate, DispatchingRule, PriorityRule, RuleScore};
use crate::models::Task;

/// Min-heap of candidates keyed by `(rule score, task)`.
#[derive(Debug, Clone)]
pub struct CandidateQueue {
    rule: PriorityRule,
    heap: BinaryHeap<Reverse<(RuleScore, Task)>>,
}

impl CandidateQueue {
    /// Creates an empty queue ordered by `rule`.
    pub fn new(rule: PriorityRule) -> Self {
        Self {
            rule,
            heap: BinaryHeap::new(),
        }
    }

    /// The ordering rule.
    pub fn rule(&self) -> PriorityRule {
        self.rule
    }

    /// Scores and inserts a candidate.
    pub fn push(&mut self, candidate: &Candidate) {
        let score = self.rule.evaluate(candidate);
        self.heap.push(Reverse((score, candidate.task)));
    }

    /// Removes the highest-priority task.
    pub fn pop(&mut self) -> Option<Task> {
        self.heap.pop().map(|Reverse((_, task))| task)
    }

    /// Number of queued candidates.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_candidate(job: usize, duration: i64, remaining_work: i64) -> Candidate {
        Candidate::new(Task::new(job, 0), 0, duration, remaining_work)
    }

    #[test]
    fn test_spt_ordering() {
        let mut queue = CandidateQueue::new(PriorityRule::Spt);
        queue.push(&make_candidate(0, 5, 5));
        queue.push(&make_candidate(1, 1, 9));
        queue.push(&make_candidate(2, 3, 3));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(Task::new(1, 0)));
        assert_eq!(queue.pop(), Some(Task::new(2, 0)));
        assert_eq!(queue.pop(), Some(Task::new(0, 0)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_lrpt_ordering() {
        let mut queue = CandidateQueue::new(PriorityRule::Lrpt);
        queue.push(&make_candidate(0, 5, 5));
        queue.push(&make_candidate(1, 1, 9));
        assert_eq!(queue.pop(), Some(Task::new(1, 0)));
    }

    #[test]
    fn test_ties_break_by_task() {
        let mut queue = CandidateQueue::new(PriorityRule::Spt);
        queue.push(&make_candidate(2, 4, 4));
        queue.push(&make_candidate(0, 4, 8));
        queue.push(&make_candidate(1, 4, 6));
        assert_eq!(queue.pop(), Some(Task::new(0, 0)));
        assert_eq!(queue.pop(), Some(Task::new(1, 0)));
        assert_eq!(queue.pop(), Some(Task::new(2, 0)));
    }

    #[test]
    fn test_empty_queue() {
        let mut queue = CandidateQueue::new(PriorityRule::Srpt);
        assert!(queue.is_empty());
        assert_eq!(queue.pop(), None);
        assert_eq!(queue.rule(), PriorityRule::Srpt);
    }
}
