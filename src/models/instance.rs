//! Job-shop instance model.
//!
//! An instance is a set of jobs; each job is a fixed sequence of
//! operations, and each operation needs one machine for a fixed duration.
//! Instances are validated on construction and immutable afterwards, so
//! every other component can index into them without re-checking.
//!
//! # Text Format
//!
//! ```text
//! # comment
//! 2 3            # num_jobs num_tasks
//! 0 3 1 3 2 2    # job 0: (machine duration) x num_tasks
//! 1 2 0 2 2 4    # job 1
//! ```
//!
//! # Reference
//! Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 2

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use super::Task;
use crate::error::JobShopError;
use crate::validation::validate_jobs;

/// Time unit for start times, durations and makespans.
pub type Time = i64;

/// One operation: the machine it needs and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Machine index.
    pub machine: usize,
    /// Processing time (strictly positive).
    pub duration: Time,
}

impl Operation {
    /// Creates an operation.
    pub const fn new(machine: usize, duration: Time) -> Self {
        Self { machine, duration }
    }
}

/// A validated job-shop instance.
///
/// All jobs have the same number of operations (`num_tasks`).
/// `num_machines` is one past the largest machine index used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InstanceData", into = "InstanceData")]
pub struct Instance {
    name: String,
    jobs: Vec<Vec<Operation>>,
    num_tasks: usize,
    num_machines: usize,
}

/// Serialized shape of an [`Instance`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct InstanceData {
    #[serde(default)]
    name: String,
    jobs: Vec<Vec<Operation>>,
}

impl Instance {
    /// Builds an instance from per-job operation lists.
    ///
    /// # Errors
    /// `InvalidInstance` if there are no jobs, a job is empty, jobs differ
    /// in length, a duration is not positive, a machine index is not below
    /// the operation count, or the durations sum past `Time::MAX`.
    pub fn from_jobs(jobs: Vec<Vec<Operation>>) -> Result<Self, JobShopError> {
        validate_jobs(&jobs)?;
        let num_tasks = jobs[0].len();
        let num_machines = jobs
            .iter()
            .flatten()
            .map(|op| op.machine + 1)
            .max()
            .unwrap_or(0);
        Ok(Self {
            name: String::new(),
            jobs,
            num_tasks,
            num_machines,
        })
    }

    /// Sets the instance name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Reads an instance in the text format from a file.
    ///
    /// The file stem becomes the instance name.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, JobShopError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let instance: Instance = text.parse()?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(instance.with_name(name))
    }

    /// Instance name (empty if unnamed).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of jobs.
    #[inline]
    pub fn num_jobs(&self) -> usize {
        self.jobs.len()
    }

    /// Number of operations in every job.
    #[inline]
    pub fn num_tasks(&self) -> usize {
        self.num_tasks
    }

    /// Number of machines.
    #[inline]
    pub fn num_machines(&self) -> usize {
        self.num_machines
    }

    /// Total number of operations.
    #[inline]
    pub fn num_operations(&self) -> usize {
        self.num_jobs() * self.num_tasks
    }

    /// Machine required by operation `(job, task)`.
    #[inline]
    pub fn machine(&self, job: usize, task: usize) -> usize {
        self.jobs[job][task].machine
    }

    /// Duration of operation `(job, task)`.
    #[inline]
    pub fn duration(&self, job: usize, task: usize) -> Time {
        self.jobs[job][task].duration
    }

    /// Machine required by `task`.
    #[inline]
    pub fn machine_of(&self, task: Task) -> usize {
        self.machine(task.job, task.task)
    }

    /// Duration of `task`.
    #[inline]
    pub fn duration_of(&self, task: Task) -> Time {
        self.duration(task.job, task.task)
    }

    /// Operations of one job, in order.
    pub fn job(&self, job: usize) -> &[Operation] {
        &self.jobs[job]
    }

    /// Sum of a job's durations.
    pub fn job_duration(&self, job: usize) -> Time {
        self.jobs[job].iter().map(|op| op.duration).sum()
    }

    /// Sum of durations of all operations on `machine`.
    pub fn machine_load(&self, machine: usize) -> Time {
        self.jobs
            .iter()
            .flatten()
            .filter(|op| op.machine == machine)
            .map(|op| op.duration)
            .sum()
    }

    /// Number of operations that require `machine`.
    pub fn operations_on(&self, machine: usize) -> usize {
        self.jobs
            .iter()
            .flatten()
            .filter(|op| op.machine == machine)
            .count()
    }

    /// All tasks, job-major.
    pub fn tasks(&self) -> impl Iterator<Item = Task> + '_ {
        (0..self.num_jobs()).flat_map(move |j| (0..self.num_tasks).map(move |t| Task::new(j, t)))
    }

    /// Trivial makespan lower bound: longest job or busiest machine.
    pub fn lower_bound(&self) -> Time {
        let longest_job = (0..self.num_jobs())
            .map(|j| self.job_duration(j))
            .max()
            .unwrap_or(0);
        let busiest_machine = (0..self.num_machines)
            .map(|m| self.machine_load(m))
            .max()
            .unwrap_or(0);
        longest_job.max(busiest_machine)
    }
}

impl TryFrom<InstanceData> for Instance {
    type Error = JobShopError;

    fn try_from(data: InstanceData) -> Result<Self, Self::Error> {
        Ok(Instance::from_jobs(data.jobs)?.with_name(data.name))
    }
}

impl From<Instance> for InstanceData {
    fn from(instance: Instance) -> Self {
        Self {
            name: instance.name,
            jobs: instance.jobs,
        }
    }
}

// ======================== Text format ========================

impl FromStr for Instance {
    type Err = JobShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or("").trim()))
            .filter(|(_, line)| !line.is_empty());

        let (header_line, header) = lines.next().ok_or(JobShopError::Parse {
            line: 1,
            message: "missing `num_jobs num_tasks` header".into(),
        })?;
        let header = parse_numbers(header_line, header)?;
        let (num_jobs, num_tasks) = match header.as_slice() {
            [j, t] => (*j as usize, *t as usize),
            _ => {
                return Err(JobShopError::Parse {
                    line: header_line,
                    message: format!("expected 2 numbers in header, found {}", header.len()),
                })
            }
        };

        // Sized by the lines actually read, not by the header.
        let mut jobs = Vec::new();
        let mut last_line = header_line;
        for job in 0..num_jobs {
            let (line_no, line) = lines.next().ok_or_else(|| JobShopError::Parse {
                line: last_line + 1,
                message: format!("missing line for job {job}"),
            })?;
            last_line = line_no;
            let values = parse_numbers(line_no, line)?;
            if values.len() % 2 != 0 || values.len() / 2 != num_tasks {
                return Err(JobShopError::Parse {
                    line: line_no,
                    message: format!(
                        "expected {num_tasks} machine/duration pairs for job {job}, found {} numbers",
                        values.len()
                    ),
                });
            }
            jobs.push(
                values
                    .chunks_exact(2)
                    .map(|pair| Operation::new(pair[0] as usize, pair[1]))
                    .collect(),
            );
        }

        Instance::from_jobs(jobs)
    }
}

fn parse_numbers(line_no: usize, line: &str) -> Result<Vec<Time>, JobShopError> {
    line.split_whitespace()
        .map(|tok| {
            tok.parse::<Time>()
                .ok()
                .filter(|v| *v >= 0)
                .ok_or_else(|| JobShopError::Parse {
                    line: line_no,
                    message: format!("`{tok}` is not a non-negative integer"),
                })
        })
        .collect()
}
