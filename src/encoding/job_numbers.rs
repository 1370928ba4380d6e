//! Job-priority-list encoding.
//!
//! # Encoding
//!
//! A sequence of job ids of length `num_jobs * num_tasks`. Each job id
//! appears exactly `num_tasks` times; its k-th occurrence stands for the
//! job's k-th operation.
//!
//! # Decoding
//!
//! Entries are scanned in order. Each places the next unscheduled operation
//! of its job at `max(job ready, machine ready)`, so list order breaks ties
//! between jobs competing for a machine.
//!
//! # Reference
//! Bierwirth (1995), "A generalized permutation approach to JSSP"

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Encoding, ResourceOrder};
use crate::error::JobShopError;
use crate::models::{Instance, Schedule, Task, Time};

/// Job-priority-list encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobNumbers<'a> {
    instance: &'a Instance,
    jobs: Vec<usize>,
    /// Occurrences of each job in `jobs`.
    listed: Vec<usize>,
}

impl<'a> JobNumbers<'a> {
    /// Creates an empty encoding to be filled with [`JobNumbers::push`].
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            jobs: Vec::with_capacity(instance.num_operations()),
            listed: vec![0; instance.num_jobs()],
        }
    }

    /// Creates a complete encoding from a job sequence.
    ///
    /// # Errors
    /// `InvalidEncoding` if a job id is out of range or does not appear
    /// exactly `num_tasks` times.
    pub fn from_jobs(instance: &'a Instance, jobs: Vec<usize>) -> Result<Self, JobShopError> {
        let mut counts = vec![0usize; instance.num_jobs()];
        for &job in &jobs {
            match counts.get_mut(job) {
                Some(c) => *c += 1,
                None => {
                    return Err(JobShopError::InvalidEncoding(format!(
                        "job {job} out of range (num_jobs = {})",
                        instance.num_jobs()
                    )))
                }
            }
        }
        if let Some((job, &count)) = counts
            .iter()
            .enumerate()
            .find(|(_, c)| **c != instance.num_tasks())
        {
            return Err(JobShopError::InvalidEncoding(format!(
                "job {job} appears {count} times, expected {}",
                instance.num_tasks()
            )));
        }
        Ok(Self {
            instance,
            jobs,
            listed: counts,
        })
    }

    /// Round-robin order `0, 1, .., n-1, 0, 1, ..`.
    pub fn round_robin(instance: &'a Instance) -> Self {
        let jobs = (0..instance.num_tasks())
            .flat_map(|_| 0..instance.num_jobs())
            .collect();
        Self {
            instance,
            jobs,
            listed: vec![instance.num_tasks(); instance.num_jobs()],
        }
    }

    /// Uniformly shuffled order.
    pub fn random<R: Rng>(instance: &'a Instance, rng: &mut R) -> Self {
        let mut enc = Self::round_robin(instance);
        enc.jobs.shuffle(rng);
        enc
    }

    /// Lists operations by start time (ties by job, then task).
    ///
    /// For a semi-active schedule, decoding the result reproduces it.
    pub fn from_schedule(schedule: &Schedule<'a>) -> Self {
        Self {
            instance: schedule.instance(),
            jobs: schedule.ordered_tasks().iter().map(|t| t.job).collect(),
            listed: vec![schedule.instance().num_tasks(); schedule.instance().num_jobs()],
        }
    }

    /// Converts through the schedule `order` decodes to.
    pub fn from_resource_order(order: &ResourceOrder<'a>) -> Result<Self, JobShopError> {
        Ok(Self::from_schedule(&order.to_schedule()?))
    }

    /// Appends a job id.
    ///
    /// # Errors
    /// `InvalidEncoding` if the job id is out of range or the job already
    /// has all its operations listed.
    pub fn push(&mut self, job: usize) -> Result<(), JobShopError> {
        if job >= self.instance.num_jobs() {
            return Err(JobShopError::InvalidEncoding(format!(
                "job {job} out of range (num_jobs = {})",
                self.instance.num_jobs()
            )));
        }
        let listed = self.listed[job];
        if listed >= self.instance.num_tasks() {
            return Err(JobShopError::InvalidEncoding(format!(
                "job {job} already listed {listed} times"
            )));
        }
        self.jobs.push(job);
        self.listed[job] += 1;
        Ok(())
    }

    /// The job sequence.
    pub fn jobs(&self) -> &[usize] {
        &self.jobs
    }

    /// Whether every operation has been listed.
    pub fn is_complete(&self) -> bool {
        self.jobs.len() == self.instance.num_operations()
    }

    /// Resolves occurrences into tasks: the k-th `j` becomes `(j, k)`.
    pub fn decode_tasks(&self) -> Vec<Task> {
        let mut next = vec![0usize; self.instance.num_jobs()];
        self.jobs
            .iter()
            .map(|&job| {
                let task = Task::new(job, next[job]);
                next[job] += 1;
                task
            })
            .collect()
    }
}

impl<'a> Encoding<'a> for JobNumbers<'a> {
    fn instance(&self) -> &'a Instance {
        self.instance
    }

    fn to_schedule(&self) -> Result<Schedule<'a>, JobShopError> {
        if !self.is_complete() {
            return Err(JobShopError::InvalidEncoding(format!(
                "{} of {} operations listed",
                self.jobs.len(),
                self.instance.num_operations()
            )));
        }

        let inst = self.instance;
        let mut start = vec![vec![0; inst.num_tasks()]; inst.num_jobs()];
        let mut job_ready: Vec<Time> = vec![0; inst.num_jobs()];
        let mut machine_ready: Vec<Time> = vec![0; inst.num_machines()];

        for task in self.decode_tasks() {
            let machine = inst.machine_of(task);
            let begin = job_ready[task.job].max(machine_ready[machine]);
            let end = begin + inst.duration_of(task);
            start[task.job][task.task] = begin;
            job_ready[task.job] = end;
            machine_ready[machine] = end;
        }

        Ok(Schedule::from_start_times(inst, start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{aaa1, ft06};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_aaa1_makespan_12() {
        let inst = aaa1();
        let mut enc = JobNumbers::new(&inst);
        for job in [0, 1, 1, 0, 0, 1] {
            enc.push(job).unwrap();
        }
        let sched = enc.to_schedule().unwrap();
        assert!(sched.is_valid());
        assert_eq!(sched.makespan(), 12);
    }

    #[test]
    fn test_aaa1_makespan_14() {
        let inst = aaa1();
        let enc = JobNumbers::from_jobs(&inst, vec![0, 0, 1, 1, 0, 1]).unwrap();
        let sched = enc.to_schedule().unwrap();
        assert!(sched.is_valid());
        assert_eq!(sched.makespan(), 14);
    }

    #[test]
    fn test_round_robin() {
        let inst = aaa1();
        let enc = JobNumbers::round_robin(&inst);
        assert_eq!(enc.jobs(), &[0, 1, 0, 1, 0, 1]);
        assert_eq!(enc.makespan().unwrap(), 12);
    }

    #[test]
    fn test_decode_tasks() {
        let inst = aaa1();
        let enc = JobNumbers::from_jobs(&inst, vec![1, 0, 1, 1, 0, 0]).unwrap();
        assert_eq!(
            enc.decode_tasks(),
            vec![
                Task::new(1, 0),
                Task::new(0, 0),
                Task::new(1, 1),
                Task::new(1, 2),
                Task::new(0, 1),
                Task::new(0, 2),
            ]
        );
    }

    #[test]
    fn test_invalid_multiplicities() {
        let inst = aaa1();
        assert!(matches!(
            JobNumbers::from_jobs(&inst, vec![0, 0, 0, 0, 1, 1]),
            Err(JobShopError::InvalidEncoding(_))
        ));
        assert!(matches!(
            JobNumbers::from_jobs(&inst, vec![0, 1, 2, 0, 1, 0]),
            Err(JobShopError::InvalidEncoding(_))
        ));

        let mut enc = JobNumbers::new(&inst);
        for _ in 0..3 {
            enc.push(0).unwrap();
        }
        assert!(enc.push(0).is_err());
        assert!(enc.push(5).is_err());
        assert_eq!(enc.jobs(), &[0, 0, 0]);
    }

    #[test]
    fn test_push_fills_to_the_same_encoding() {
        let inst = aaa1();
        let mut enc = JobNumbers::new(&inst);
        for job in [1, 0, 1, 1, 0, 0] {
            enc.push(job).unwrap();
        }
        assert!(enc.is_complete());
        assert!(enc.push(1).is_err());
        assert_eq!(enc, JobNumbers::from_jobs(&inst, vec![1, 0, 1, 1, 0, 0]).unwrap());
    }

    #[test]
    fn test_incomplete_encoding_does_not_decode() {
        let inst = aaa1();
        let mut enc = JobNumbers::new(&inst);
        enc.push(1).unwrap();
        assert!(!enc.is_complete());
        assert!(matches!(
            enc.to_schedule(),
            Err(JobShopError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_random_is_well_formed() {
        let inst = ft06();
        let mut rng = SmallRng::seed_from_u64(42);
        let enc = JobNumbers::random(&inst, &mut rng);
        assert!(JobNumbers::from_jobs(&inst, enc.jobs().to_vec()).is_ok());
        assert!(enc.to_schedule().unwrap().is_valid());
    }

    #[test]
    fn test_from_schedule_reproduces_schedule() {
        let inst = ft06();
        let mut rng = SmallRng::seed_from_u64(7);
        let enc = JobNumbers::random(&inst, &mut rng);
        let sched = enc.to_schedule().unwrap();
        let replay = JobNumbers::from_schedule(&sched);
        assert_eq!(replay.to_schedule().unwrap(), sched);
    }

    #[test]
    fn test_from_resource_order() {
        let inst = aaa1();
        let order = ResourceOrder::from_machine_orders(
            &inst,
            vec![
                vec![Task::new(0, 0), Task::new(1, 1)],
                vec![Task::new(1, 0), Task::new(0, 1)],
                vec![Task::new(0, 2), Task::new(1, 2)],
            ],
        )
        .unwrap();
        let enc = JobNumbers::from_resource_order(&order).unwrap();
        let sched = enc.to_schedule().unwrap();
        assert!(sched.is_valid());
        assert_eq!(sched.makespan(), 12);
    }
}
