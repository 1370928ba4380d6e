//! Priority-rule list scheduler.
//!
//! # Algorithm
//!
//! Event-driven simulation that builds a [`ResourceOrder`] as it dispatches:
//!
//! 1. Every job's first operation starts out as a candidate.
//! 2. A dispatch phase drains the candidate queue in rule order. A candidate
//!    whose machine is free starts now and is appended to that machine's
//!    sequence; otherwise it is deferred to the next phase.
//! 3. The clock advances to the next completion. Each completing operation
//!    frees its machine, which releases the operations buffered as pending
//!    on it, and makes its job's next operation eligible: a candidate if
//!    that machine is free, pending otherwise.
//! 4. The simulation stops once nothing is running.
//!
//! SRPT and LRPT score a candidate by the work still to be processed on its
//! destination machine. That load starts at the machine's total and drops as
//! each of its operations completes.
//!
//! Every operation eventually runs, so construction always completes.
//!
//! # Complexity
//! O(n log n) heap operations per phase, n = number of operations.
//!
//! # Reference
//! Pinedo (2016), "Scheduling", Ch. 4: Priority Dispatching

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::mem;
use std::time::Instant;

use super::{completion_cause, ExitCause, Solver, SolverResult};
use crate::dispatching::{Candidate, CandidateQueue, PriorityRule};
use crate::encoding::{Encoding, ResourceOrder};
use crate::models::{Instance, Task, Time};

/// Priority-rule list scheduler.
///
/// # Example
///
/// ```
/// use std::time::{Duration, Instant};
/// use u_jobshop::dispatching::PriorityRule;
/// use u_jobshop::models::Instance;
/// use u_jobshop::scheduler::{GreedySolver, Solver};
///
/// let instance: Instance = "2 3\n0 3 1 3 2 2\n1 2 0 2 2 4".parse().unwrap();
/// let solver = GreedySolver::new(PriorityRule::Spt);
/// let result = solver.solve(&instance, Instant::now() + Duration::from_secs(1));
/// assert_eq!(result.makespan(), Some(11));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedySolver {
    rule: PriorityRule,
}

impl GreedySolver {
    /// Creates a scheduler dispatching by `rule`.
    pub fn new(rule: PriorityRule) -> Self {
        Self { rule }
    }

    /// The dispatch rule.
    pub fn rule(&self) -> PriorityRule {
        self.rule
    }

    /// Runs the dispatch simulation and returns the machine sequences it
    /// produced.
    pub fn build_order<'a>(&self, instance: &'a Instance) -> ResourceOrder<'a> {
        let mut sim = Dispatch::new(instance, self.rule);
        sim.run();
        ResourceOrder::from_machine_orders_unchecked(instance, sim.sequences)
    }
}

impl Solver for GreedySolver {
    fn name(&self) -> String {
        format!("greedy_{}", self.rule.to_string().to_lowercase())
    }

    #[tracing::instrument(
        level = "debug",
        name = "Greedy",
        skip_all,
        fields(instance = instance.name(), rule = %self.rule)
    )]
    fn solve<'a>(&self, instance: &'a Instance, deadline: Instant) -> SolverResult<'a> {
        let order = self.build_order(instance);
        match order.to_schedule() {
            Ok(schedule) => {
                tracing::debug!("Greedy: makespan {}", schedule.makespan());
                let cause = completion_cause(deadline);
                if cause == ExitCause::Timeout {
                    tracing::warn!("Greedy: finished after the deadline");
                }
                SolverResult::new(schedule, cause)
            }
            Err(err) => {
                tracing::warn!("Greedy: {}", err);
                SolverResult::blocked(instance)
            }
        }
    }
}

/// State of one dispatch simulation.
struct Dispatch<'a> {
    instance: &'a Instance,
    time: Time,
    /// Work left per machine, running operations included.
    remaining: Vec<Time>,
    machine_busy: Vec<bool>,
    /// Eligible operations waiting for their machine to free up.
    pending: Vec<Vec<Task>>,
    current: CandidateQueue,
    next: CandidateQueue,
    /// Running operations keyed by completion time.
    running: BinaryHeap<Reverse<(Time, Task)>>,
    sequences: Vec<Vec<Task>>,
}

impl<'a> Dispatch<'a> {
    fn new(instance: &'a Instance, rule: PriorityRule) -> Self {
        let remaining = (0..instance.num_machines())
            .map(|m| instance.machine_load(m))
            .collect();
        let sequences = (0..instance.num_machines())
            .map(|m| Vec::with_capacity(instance.operations_on(m)))
            .collect();
        Self {
            instance,
            time: 0,
            remaining,
            machine_busy: vec![false; instance.num_machines()],
            pending: vec![Vec::new(); instance.num_machines()],
            current: CandidateQueue::new(rule),
            next: CandidateQueue::new(rule),
            running: BinaryHeap::new(),
            sequences,
        }
    }

    fn candidate(&self, task: Task) -> Candidate {
        let machine = self.instance.machine_of(task);
        Candidate::new(
            task,
            machine,
            self.instance.duration_of(task),
            self.remaining[machine],
        )
    }

    fn run(&mut self) {
        for job in 0..self.instance.num_jobs() {
            let c = self.candidate(Task::new(job, 0));
            self.current.push(&c);
        }

        loop {
            self.dispatch_phase();
            mem::swap(&mut self.current, &mut self.next);

            let Some(&Reverse((end, _))) = self.running.peek() else {
                break;
            };
            self.time = end;
            while let Some(&Reverse((end, task))) = self.running.peek() {
                if end != self.time {
                    break;
                }
                self.running.pop();
                self.complete(task);
            }
        }
    }

    fn dispatch_phase(&mut self) {
        while let Some(task) = self.current.pop() {
            let c = self.candidate(task);
            if self.machine_busy[c.machine] {
                self.next.push(&c);
                continue;
            }
            tracing::trace!("Greedy: start {} on m{} at {}", task, c.machine, self.time);
            self.machine_busy[c.machine] = true;
            self.sequences[c.machine].push(task);
            self.running.push(Reverse((self.time + c.duration, task)));
        }
    }

    fn complete(&mut self, task: Task) {
        let machine = self.instance.machine_of(task);
        self.machine_busy[machine] = false;
        for released in mem::take(&mut self.pending[machine]) {
            let c = self.candidate(released);
            self.current.push(&c);
        }
        self.remaining[machine] -= self.instance.duration_of(task);

        if let Some(next) = task.next(self.instance.num_tasks()) {
            let next_machine = self.instance.machine_of(next);
            if self.machine_busy[next_machine] {
                self.pending[next_machine].push(next);
            } else {
                let c = self.candidate(next);
                self.current.push(&c);
            }
        }
    }
}
