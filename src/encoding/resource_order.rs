//! Per-machine order encoding.
//!
//! # Encoding
//!
//! For each machine, the sequence in which its operations are dispatched.
//! Every operation appears exactly once, on the machine it requires.
//!
//! # Decoding
//!
//! Event-driven simulation. A machine starts its next queued operation as
//! soon as it is free and the operation's job predecessor has finished.
//! Completions sit in a min-heap keyed by end time; the clock jumps from
//! one completion to the next until nothing is running.
//!
//! A well-formed order can still be infeasible when machine queues wait on
//! each other in a cycle; decoding then reports [`JobShopError::Deadlock`].
//!
//! # Reference
//! Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the
//! Job Shop Problem"

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use super::{Encoding, JobNumbers};
use crate::error::JobShopError;
use crate::models::{Instance, Schedule, Task};

/// Per-machine order encoding.
///
/// Cloning is a deep copy; search loops clone a live solution into a probe
/// before applying moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceOrder<'a> {
    instance: &'a Instance,
    machines: Vec<Vec<Task>>,
}

/// Exchange of two positions in one machine's sequence.
///
/// A transposition: applying it twice restores the original order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Swap {
    /// Machine whose sequence is modified.
    pub machine: usize,
    /// First position.
    pub a: usize,
    /// Second position.
    pub b: usize,
}

impl Swap {
    /// Creates a swap.
    pub const fn new(machine: usize, a: usize, b: usize) -> Self {
        Self { machine, a, b }
    }

    /// Applies the swap to `order`.
    pub fn apply_on(&self, order: &mut ResourceOrder<'_>) {
        order.machines[self.machine].swap(self.a, self.b);
    }
}

impl<'a> ResourceOrder<'a> {
    /// Creates an order from one task sequence per machine.
    ///
    /// # Errors
    /// `InvalidEncoding` if the number of sequences differs from the number
    /// of machines, a task is out of range, a task is listed on the wrong
    /// machine, or an operation is missing or repeated.
    pub fn from_machine_orders(
        instance: &'a Instance,
        machines: Vec<Vec<Task>>,
    ) -> Result<Self, JobShopError> {
        if machines.len() != instance.num_machines() {
            return Err(JobShopError::InvalidEncoding(format!(
                "{} machine sequences for {} machines",
                machines.len(),
                instance.num_machines()
            )));
        }

        let mut seen = vec![vec![false; instance.num_tasks()]; instance.num_jobs()];
        for (m, sequence) in machines.iter().enumerate() {
            for &task in sequence {
                if task.job >= instance.num_jobs() || task.task >= instance.num_tasks() {
                    return Err(JobShopError::InvalidEncoding(format!(
                        "task {task} out of range"
                    )));
                }
                if instance.machine_of(task) != m {
                    return Err(JobShopError::InvalidEncoding(format!(
                        "task {task} listed on machine {m}, requires machine {}",
                        instance.machine_of(task)
                    )));
                }
                if std::mem::replace(&mut seen[task.job][task.task], true) {
                    return Err(JobShopError::InvalidEncoding(format!(
                        "task {task} listed twice"
                    )));
                }
            }
        }
        if let Some(missing) = instance.tasks().find(|t| !seen[t.job][t.task]) {
            return Err(JobShopError::InvalidEncoding(format!(
                "task {missing} missing"
            )));
        }

        Ok(Self { instance, machines })
    }

    /// Shape-trusted constructor for solvers that build orders by dispatch.
    pub(crate) fn from_machine_orders_unchecked(
        instance: &'a Instance,
        machines: Vec<Vec<Task>>,
    ) -> Self {
        Self { instance, machines }
    }

    /// Per-machine start order of a schedule.
    pub fn from_schedule(schedule: &Schedule<'a>) -> Self {
        let instance = schedule.instance();
        let machines = (0..instance.num_machines())
            .map(|m| schedule.machine_sequence(m))
            .collect();
        Self { instance, machines }
    }

    /// Converts through the schedule `enc` decodes to.
    pub fn from_job_numbers(enc: &JobNumbers<'a>) -> Result<Self, JobShopError> {
        Ok(Self::from_schedule(&enc.to_schedule()?))
    }

    /// Sequence of `machine`.
    pub fn machine_order(&self, machine: usize) -> &[Task] {
        &self.machines[machine]
    }

    /// All machine sequences.
    pub fn machines(&self) -> &[Vec<Task>] {
        &self.machines
    }

    /// Position of `task` in its machine's sequence.
    pub fn position(&self, task: Task) -> Option<usize> {
        let machine = self.instance.machine_of(task);
        self.machines[machine].iter().position(|&t| t == task)
    }

    /// Exchanges positions `a` and `b` on `machine`.
    pub fn swap(&mut self, machine: usize, a: usize, b: usize) {
        Swap::new(machine, a, b).apply_on(self);
    }
}

impl<'a> Encoding<'a> for ResourceOrder<'a> {
    fn instance(&self) -> &'a Instance {
        self.instance
    }

    fn to_schedule(&self) -> Result<Schedule<'a>, JobShopError> {
        let inst = self.instance;
        let mut start = vec![vec![0; inst.num_tasks()]; inst.num_jobs()];
        // For each job, the first task not yet finished.
        let mut job_progress = vec![0usize; inst.num_jobs()];
        // For each machine, the number of tasks finished.
        let mut machine_progress = vec![0usize; inst.num_machines()];
        let mut machine_busy = vec![false; inst.num_machines()];
        let mut running = BinaryHeap::new();
        let mut time = 0;
        let mut started = 0usize;

        loop {
            for (m, sequence) in self.machines.iter().enumerate() {
                if machine_busy[m] {
                    continue;
                }
                let Some(&next) = sequence.get(machine_progress[m]) else {
                    continue;
                };
                if job_progress[next.job] == next.task {
                    start[next.job][next.task] = time;
                    machine_busy[m] = true;
                    running.push(Reverse((time + inst.duration_of(next), m, next.job)));
                    started += 1;
                }
            }

            let Some(Reverse((end, m, job))) = running.pop() else {
                break;
            };
            time = end;
            machine_progress[m] += 1;
            job_progress[job] += 1;
            machine_busy[m] = false;
        }

        if started < inst.num_operations() {
            return Err(JobShopError::Deadlock {
                remaining: inst.num_operations() - started,
            });
        }
        Ok(Schedule::from_start_times(inst, start))
    }
}
