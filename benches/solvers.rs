//! Benchmarks for decoding and solving.
//!
//! Benchmark dimensions:
//! - Encoding: JobNumbers, ResourceOrder
//! - Solver: greedy, descent, tabu (fast)
//! - Instance size: ft06 (6x6), random 10x10, random 20x10

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};
use u_jobshop::dispatching::PriorityRule;
use u_jobshop::encoding::{Encoding, JobNumbers, ResourceOrder};
use u_jobshop::models::{Instance, Operation};
use u_jobshop::scheduler::{DescentSolver, GreedySolver, Solver, TabuConfig, TabuSolver};

const FT06: &str = "\
6 6
2 1 0 3 1 6 3 7 5 3 4 6
1 8 2 5 4 10 5 10 0 10 3 4
2 5 3 4 5 8 0 9 1 1 4 7
1 5 0 5 2 5 3 3 4 8 5 9
2 9 1 3 4 5 5 4 0 3 3 1
1 3 3 3 5 9 0 10 4 4 2 1";

fn random_instance(seed: u64, num_jobs: usize, num_machines: usize) -> Instance {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut jobs = Vec::with_capacity(num_jobs);
    for _ in 0..num_jobs {
        let mut machines: Vec<usize> = (0..num_machines).collect();
        machines.shuffle(&mut rng);
        jobs.push(
            machines
                .into_iter()
                .map(|m| Operation::new(m, rng.random_range(1..=99)))
                .collect(),
        );
    }
    Instance::from_jobs(jobs).expect("generated instance is well-formed")
}

fn instances() -> Vec<(&'static str, Instance)> {
    vec![
        ("ft06", FT06.parse().expect("ft06 parses")),
        ("rand_10x10", random_instance(1, 10, 10)),
        ("rand_20x10", random_instance(2, 20, 10)),
    ]
}

fn deadline() -> Instant {
    Instant::now() + Duration::from_secs(60)
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for (name, inst) in instances() {
        let mut rng = SmallRng::seed_from_u64(42);
        let jobs = JobNumbers::random(&inst, &mut rng);
        let order = ResourceOrder::from_job_numbers(&jobs).expect("job list decodes");

        group.bench_with_input(BenchmarkId::new("job_numbers", name), &jobs, |b, jobs| {
            b.iter(|| black_box(jobs.to_schedule()))
        });
        group.bench_with_input(BenchmarkId::new("resource_order", name), &order, |b, order| {
            b.iter(|| black_box(order.to_schedule()))
        });
    }
    group.finish();
}

fn bench_solvers(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    group.sample_size(20);
    for (name, inst) in instances() {
        group.bench_with_input(BenchmarkId::new("greedy_spt", name), &inst, |b, inst| {
            let solver = GreedySolver::new(PriorityRule::Spt);
            b.iter(|| black_box(solver.solve(inst, deadline()).makespan()))
        });
        group.bench_with_input(BenchmarkId::new("descent_spt", name), &inst, |b, inst| {
            let solver = DescentSolver::new(PriorityRule::Spt);
            b.iter(|| black_box(solver.solve(inst, deadline()).makespan()))
        });
        group.bench_with_input(BenchmarkId::new("tabu_fast_spt", name), &inst, |b, inst| {
            let solver = TabuSolver::new(TabuConfig::fast(PriorityRule::Spt));
            b.iter(|| black_box(solver.solve(inst, deadline()).makespan()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_decode, bench_solvers);
criterion_main!(benches);
