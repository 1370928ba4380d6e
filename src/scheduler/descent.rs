//! Steepest-descent local search over critical-block swaps.
//!
//! # Algorithm
//!
//! 1. Start from the greedy order for the configured rule.
//! 2. Each pass computes the block swaps of the current best and applies
//!    them one at a time to a probe copy of the pass baseline. A probe that
//!    beats the best makespan so far becomes the new best; the swap is undone
//!    on the probe either way.
//! 3. A pass without improvement is a local optimum and ends the search.
//!
//! The deadline is checked before every pass.
//!
//! # Reference
//! Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the
//! Job Shop Problem"

use std::time::Instant;

use super::neighborhood::neighbors;
use super::{ExitCause, GreedySolver, Solver, SolverResult};
use crate::dispatching::PriorityRule;
use crate::encoding::Encoding;
use crate::models::Instance;

/// Greedy construction followed by descent.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescentSolver {
    rule: PriorityRule,
}

impl DescentSolver {
    /// Creates a solver whose starting point is built with `rule`.
    pub fn new(rule: PriorityRule) -> Self {
        Self { rule }
    }

    /// The construction rule.
    pub fn rule(&self) -> PriorityRule {
        self.rule
    }
}

impl Solver for DescentSolver {
    fn name(&self) -> String {
        format!("descent_{}", self.rule.to_string().to_lowercase())
    }

    #[tracing::instrument(
        level = "debug",
        name = "Descent",
        skip_all,
        fields(instance = instance.name(), rule = %self.rule)
    )]
    fn solve<'a>(&self, instance: &'a Instance, deadline: Instant) -> SolverResult<'a> {
        let mut best = GreedySolver::new(self.rule).build_order(instance);
        let mut best_schedule = match best.to_schedule() {
            Ok(schedule) => schedule,
            Err(err) => {
                tracing::warn!("Descent: initial order does not decode: {}", err);
                return SolverResult::blocked(instance);
            }
        };
        let mut best_makespan = best_schedule.makespan();
        tracing::debug!("Descent: start at {}", best_makespan);

        let mut pass = 0usize;
        loop {
            if Instant::now() > deadline {
                tracing::debug!("Descent: deadline reached after {} passes", pass);
                return SolverResult::new(best_schedule, ExitCause::Timeout);
            }
            pass += 1;

            let swaps = neighbors(&best, &best_schedule);
            let mut probe = best.clone();
            let mut improved = false;

            for swap in swaps {
                swap.apply_on(&mut probe);
                match probe.to_schedule() {
                    Ok(schedule) if schedule.makespan() < best_makespan => {
                        tracing::debug!(
                            "Descent: pass {} improves {} -> {}",
                            pass,
                            best_makespan,
                            schedule.makespan()
                        );
                        best_makespan = schedule.makespan();
                        best = probe.clone();
                        best_schedule = schedule;
                        improved = true;
                    }
                    Ok(schedule) => {
                        tracing::trace!("Descent: {:?} gives {}", swap, schedule.makespan());
                    }
                    Err(err) => {
                        tracing::warn!("Descent: {:?} skipped: {}", swap, err);
                    }
                }
                swap.apply_on(&mut probe);
            }

            if !improved {
                break;
            }
        }

        tracing::debug!("Descent: local optimum {} after {} passes", best_makespan, pass);
        SolverResult::new(best_schedule, ExitCause::NotProvedOptimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{aaa1, far_deadline, ft06, random_instance};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::time::Duration;

    #[test]
    fn test_descent_aaa1_optimal() {
        let inst = aaa1();
        let result = DescentSolver::new(PriorityRule::Spt).solve(&inst, far_deadline());
        assert_eq!(result.cause, ExitCause::NotProvedOptimal);
        assert_eq!(result.makespan(), Some(11));
    }

    #[test]
    fn test_descent_never_worse_than_greedy() {
        let inst = ft06();
        for rule in PriorityRule::ALL {
            let greedy = GreedySolver::new(rule).solve(&inst, far_deadline());
            let descent = DescentSolver::new(rule).solve(&inst, far_deadline());
            let schedule = descent.schedule.unwrap();
            assert!(schedule.is_valid());
            assert!(schedule.makespan() >= 55);
            assert!(schedule.makespan() <= greedy.makespan().unwrap(), "rule {rule}");
        }
    }

    #[test]
    fn test_descent_result_is_local_optimum() {
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..5 {
            let inst = random_instance(&mut rng, 6, 4);
            let result = DescentSolver::new(PriorityRule::Lrpt).solve(&inst, far_deadline());
            let schedule = result.schedule.unwrap();
            assert!(schedule.is_valid());

            let order = crate::encoding::ResourceOrder::from_schedule(&schedule);
            for swap in neighbors(&order, &schedule) {
                let mut probe = order.clone();
                swap.apply_on(&mut probe);
                if let Ok(makespan) = probe.makespan() {
                    assert!(makespan >= schedule.makespan());
                }
            }
        }
    }

    #[test]
    fn test_descent_expired_deadline_returns_greedy() {
        let inst = ft06();
        let past = Instant::now() - Duration::from_millis(1);
        let result = DescentSolver::new(PriorityRule::Spt).solve(&inst, past);
        let greedy = GreedySolver::new(PriorityRule::Spt).solve(&inst, far_deadline());
        assert_eq!(result.cause, ExitCause::Timeout);
        assert_eq!(result.makespan(), greedy.makespan());
    }

    #[test]
    fn test_name() {
        assert_eq!(DescentSolver::new(PriorityRule::Lpt).name(), "descent_lpt");
    }
}
