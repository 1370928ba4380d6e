//! Task (operation reference) model.
//!
//! A task identifies one operation of the instance by its job and its
//! position within that job. It carries no data of its own: machine and
//! duration are looked up in the [`Instance`](super::Instance).
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 1

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reference to the `task`-th operation of job `job` (both 0-indexed).
///
/// Ordered by job, then task, which is the deterministic tie-break used
/// throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Task {
    /// Job index.
    pub job: usize,
    /// Position within the job.
    pub task: usize,
}

impl Task {
    /// Creates a task reference.
    pub const fn new(job: usize, task: usize) -> Self {
        Self { job, task }
    }

    /// The preceding operation of the same job, if any.
    pub fn previous(&self) -> Option<Task> {
        self.task.checked_sub(1).map(|t| Task::new(self.job, t))
    }

    /// The following operation of the same job, if `num_tasks` allows one.
    pub fn next(&self, num_tasks: usize) -> Option<Task> {
        (self.task + 1 < num_tasks).then(|| Task::new(self.job, self.task + 1))
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.job, self.task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_neighbours() {
        let t = Task::new(2, 0);
        assert_eq!(t.previous(), None);
        assert_eq!(t.next(3), Some(Task::new(2, 1)));
        assert_eq!(Task::new(2, 2).next(3), None);
        assert_eq!(Task::new(2, 2).previous(), Some(Task::new(2, 1)));
    }

    #[test]
    fn test_task_ordering() {
        let mut tasks = vec![Task::new(1, 0), Task::new(0, 2), Task::new(0, 1)];
        tasks.sort();
        assert_eq!(tasks, vec![Task::new(0, 1), Task::new(0, 2), Task::new(1, 0)]);
    }

    #[test]
    fn test_task_display_and_serde() {
        let t = Task::new(3, 4);
        assert_eq!(t.to_string(), "(3,4)");
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, r#"{"job":3,"task":4}"#);
        let back: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
