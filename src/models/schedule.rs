//! Schedule (solution) model.
//!
//! A schedule assigns a start time to every operation of an instance.
//! Everything else (end times, makespan, validity, critical path) is
//! derived on demand.
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;

use super::{Instance, Task, Time};
use crate::error::JobShopError;

/// A timed schedule for an [`Instance`].
///
/// Immutable after construction. Borrowing the instance keeps durations and
/// machine assignments in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule<'a> {
    instance: &'a Instance,
    /// `start[job][task]`.
    start: Vec<Vec<Time>>,
}

/// A constraint violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Operation that breaks the constraint.
    pub task: Task,
    /// Human-readable description.
    pub message: String,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Operation started before its job predecessor finished.
    PrecedenceViolation,
    /// Operation overlaps another operation on the same machine.
    MachineOverlap,
    /// Operation starts before time zero.
    NegativeStart,
}

impl Violation {
    /// Creates a precedence violation.
    pub fn precedence_violation(task: Task, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::PrecedenceViolation,
            task,
            message: message.into(),
        }
    }

    /// Creates a machine overlap violation.
    pub fn machine_overlap(task: Task, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::MachineOverlap,
            task,
            message: message.into(),
        }
    }

    /// Creates a negative start violation.
    pub fn negative_start(task: Task, message: impl Into<String>) -> Self {
        Self {
            violation_type: ViolationType::NegativeStart,
            task,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} at {}: {}", self.violation_type, self.task, self.message)
    }
}

impl<'a> Schedule<'a> {
    /// Creates a schedule from a `start[job][task]` matrix.
    ///
    /// # Errors
    /// `InvalidEncoding` if the matrix shape does not match the instance.
    /// The schedule itself is not checked; use [`Schedule::validate`].
    pub fn new(instance: &'a Instance, start: Vec<Vec<Time>>) -> Result<Self, JobShopError> {
        if start.len() != instance.num_jobs()
            || start.iter().any(|row| row.len() != instance.num_tasks())
        {
            return Err(JobShopError::InvalidEncoding(format!(
                "start matrix must be {}x{}",
                instance.num_jobs(),
                instance.num_tasks()
            )));
        }
        Ok(Self::from_start_times(instance, start))
    }

    /// Shape-trusted constructor for decoders.
    pub(crate) fn from_start_times(instance: &'a Instance, start: Vec<Vec<Time>>) -> Self {
        Self { instance, start }
    }

    /// The scheduled instance.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Start time of `task`.
    #[inline]
    pub fn start_time(&self, task: Task) -> Time {
        self.start[task.job][task.task]
    }

    /// End time of `task`, saturating for start times supplied through
    /// [`Schedule::new`].
    #[inline]
    pub fn end_time(&self, task: Task) -> Time {
        self.start_time(task)
            .saturating_add(self.instance.duration_of(task))
    }

    /// The `start[job][task]` matrix.
    pub fn start_times(&self) -> &[Vec<Time>] {
        &self.start
    }

    /// Makespan: latest end time over the last operation of every job.
    pub fn makespan(&self) -> Time {
        let last = self.instance.num_tasks() - 1;
        (0..self.instance.num_jobs())
            .map(|j| self.end_time(Task::new(j, last)))
            .max()
            .unwrap_or(0)
    }

    /// Operations on `machine`, in start order.
    pub fn machine_sequence(&self, machine: usize) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .instance
            .tasks()
            .filter(|&t| self.instance.machine_of(t) == machine)
            .collect();
        tasks.sort_by_key(|&t| (self.start_time(t), t));
        tasks
    }

    /// All operations ordered by start time (ties by job, then task).
    pub fn ordered_tasks(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.instance.tasks().collect();
        tasks.sort_by_key(|&t| (self.start_time(t), t));
        tasks
    }

    /// Every violated constraint.
    ///
    /// Checks non-negative starts, job precedence, and machine exclusion.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        let inst = self.instance;

        for task in inst.tasks() {
            let start = self.start_time(task);
            if start < 0 {
                violations.push(Violation::negative_start(
                    task,
                    format!("starts at {start}"),
                ));
            }
            if let Some(prev) = task.previous() {
                if start < self.end_time(prev) {
                    violations.push(Violation::precedence_violation(
                        task,
                        format!(
                            "starts at {start} before {prev} ends at {}",
                            self.end_time(prev)
                        ),
                    ));
                }
            }
        }

        for machine in 0..inst.num_machines() {
            let mut busiest: Option<Task> = None;
            for task in self.machine_sequence(machine) {
                if let Some(holder) = busiest {
                    if self.start_time(task) < self.end_time(holder) {
                        violations.push(Violation::machine_overlap(
                            task,
                            format!(
                                "overlaps {holder} on machine {machine} ({} < {})",
                                self.start_time(task),
                                self.end_time(holder)
                            ),
                        ));
                    }
                }
                if busiest.map_or(true, |h| self.end_time(task) > self.end_time(h)) {
                    busiest = Some(task);
                }
            }
        }

        violations
    }

    /// Whether the schedule satisfies job precedence and machine exclusion.
    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }

    /// Returns the first violation as an error.
    pub fn validate(&self) -> Result<(), JobShopError> {
        match self.violations().into_iter().next() {
            Some(v) => Err(JobShopError::ScheduleInvalid(v)),
            None => Ok(()),
        }
    }

    /// One longest chain of operations, from a start at time 0 to the
    /// operation that finishes last.
    ///
    /// Traces backward from the last task with the latest end (lowest job on
    /// ties). Each step follows the machine predecessor if it ends exactly
    /// when the current operation starts, else the job predecessor under the
    /// same condition. Tracing stops at time 0, or early if neither edge is
    /// tight (only possible for schedules that are not semi-active).
    pub fn critical_path(&self) -> Vec<Task> {
        let inst = self.instance;
        let last = inst.num_tasks() - 1;
        let Some(mut current) = (0..inst.num_jobs())
            .map(|j| Task::new(j, last))
            .max_by_key(|&t| (self.end_time(t), Reverse(t.job)))
        else {
            return Vec::new();
        };

        let machine_pred = self.machine_predecessors();
        let mut path = vec![current];
        while self.start_time(current) > 0 {
            let start = self.start_time(current);
            let tight = |p: &Task| self.end_time(*p) == start;
            let via_machine = machine_pred[current.job][current.task].filter(tight);
            let via_job = current.previous().filter(tight);
            match via_machine.or(via_job) {
                Some(prev) => {
                    path.push(prev);
                    current = prev;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Busy time of `machine` divided by the makespan.
    ///
    /// Returns `None` if the makespan is zero.
    pub fn machine_utilization(&self, machine: usize) -> Option<f64> {
        let horizon = self.makespan();
        if horizon <= 0 {
            return None;
        }
        Some(self.instance.machine_load(machine) as f64 / horizon as f64)
    }

    /// For every task, the operation right before it on its machine.
    fn machine_predecessors(&self) -> Vec<Vec<Option<Task>>> {
        let inst = self.instance;
        let mut pred = vec![vec![None; inst.num_tasks()]; inst.num_jobs()];
        for machine in 0..inst.num_machines() {
            let sequence = self.machine_sequence(machine);
            for pair in sequence.windows(2) {
                pred[pair[1].job][pair[1].task] = Some(pair[0]);
            }
        }
        pred
    }
}

impl fmt::Display for Schedule<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inst = self.instance;
        for job in 0..inst.num_jobs() {
            write!(f, "job {job}:")?;
            for task in 0..inst.num_tasks() {
                let t = Task::new(job, task);
                write!(
                    f,
                    " m{}[{}-{})",
                    inst.machine_of(t),
                    self.start_time(t),
                    self.end_time(t)
                )?;
            }
            writeln!(f)?;
        }
        write!(f, "makespan: {}", self.makespan())
    }
}
