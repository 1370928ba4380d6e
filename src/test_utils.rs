//! Shared test fixtures.

use rand::Rng;
use std::time::{Duration, Instant};

use crate::encoding::ResourceOrder;
use crate::models::{Instance, Operation, Task};

/// Two jobs on three machines. Optimal makespan 11.
pub(crate) const AAA1: &str = "2 3\n0 3 1 3 2 2\n1 2 0 2 2 4";

/// Fisher & Thompson 6x6. Optimal makespan 55.
pub(crate) const FT06: &str = "\
6 6
2 1 0 3 1 6 3 7 5 3 4 6
1 8 2 5 4 10 5 10 0 10 3 4
2 5 3 4 5 8 0 9 1 1 4 7
1 5 0 5 2 5 3 3 4 8 5 9
2 9 1 3 4 5 5 4 0 3 3 1
1 3 3 3 5 9 0 10 4 4 2 1";

pub(crate) fn aaa1() -> Instance {
    AAA1.parse().unwrap()
}

pub(crate) fn ft06() -> Instance {
    FT06.parse::<Instance>().unwrap().with_name("ft06")
}

/// Hand-built order for [`aaa1`] decoding to makespan 12.
pub(crate) fn aaa1_resource_order(instance: &Instance) -> ResourceOrder<'_> {
    ResourceOrder::from_machine_orders(
        instance,
        vec![
            vec![Task::new(0, 0), Task::new(1, 1)],
            vec![Task::new(1, 0), Task::new(0, 1)],
            vec![Task::new(0, 2), Task::new(1, 2)],
        ],
    )
    .unwrap()
}

/// Random instance where every job visits every machine once, in a
/// shuffled order, with durations in `1..=10`.
pub(crate) fn random_instance<R: Rng>(rng: &mut R, num_jobs: usize, num_machines: usize) -> Instance {
    use rand::seq::SliceRandom;

    let mut jobs = Vec::with_capacity(num_jobs);
    for _ in 0..num_jobs {
        let mut machines: Vec<usize> = (0..num_machines).collect();
        machines.shuffle(rng);
        jobs.push(
            machines
                .into_iter()
                .map(|m| Operation::new(m, rng.random_range(1..=10)))
                .collect(),
        );
    }
    Instance::from_jobs(jobs).unwrap()
}

pub(crate) fn far_deadline() -> Instant {
    Instant::now() + Duration::from_secs(600)
}
