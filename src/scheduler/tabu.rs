//! Tabu search over critical-block swaps.
//!
//! # Algorithm
//!
//! Keeps a global best and a walking local base, both starting from the
//! greedy order. Each iteration:
//!
//! 1. Evaluates every block swap of the local base whose resulting order is
//!    not taboo, and keeps the best one even if it is worse than the base.
//! 2. Moves the base there (or stays put when every neighbor is taboo) and
//!    marks the new base taboo, forgetting the oldest entry once more than
//!    `tenure` are held.
//! 3. Updates the global best on strict improvement.
//!
//! Taboo entries are [`OrderFingerprint`]s, so a neighbor is checked for
//! membership before it is decoded. The deadline is checked before every
//! iteration.
//!
//! # Reference
//! Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the
//! Job Shop Problem"

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::time::Instant;

use super::neighborhood::neighbors;
use super::{ExitCause, GreedySolver, Solver, SolverResult};
use crate::dispatching::PriorityRule;
use crate::encoding::{Encoding, OrderFingerprint, ResourceOrder};
use crate::models::{Instance, Schedule};

/// Tabu search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabuConfig {
    /// Iteration budget.
    pub max_iterations: usize,
    /// Maximum number of recent solutions kept taboo. 0 disables the memory.
    pub tenure: usize,
    /// Construction rule for the starting point.
    pub rule: PriorityRule,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self::quality(PriorityRule::default())
    }
}

impl TabuConfig {
    /// Short run: 10 iterations, tenure 5.
    pub fn fast(rule: PriorityRule) -> Self {
        Self {
            max_iterations: 10,
            tenure: 5,
            rule,
        }
    }

    /// Long run: 100 iterations, tenure 100.
    pub fn quality(rule: PriorityRule) -> Self {
        Self {
            max_iterations: 100,
            tenure: 100,
            rule,
        }
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the tenure.
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = tenure;
        self
    }

    /// Sets the construction rule.
    pub fn with_rule(mut self, rule: PriorityRule) -> Self {
        self.rule = rule;
        self
    }
}

/// Greedy construction followed by tabu search.
#[derive(Debug, Clone, Default)]
pub struct TabuSolver {
    config: TabuConfig,
}

/// FIFO of at most `tenure` taboo fingerprints with O(1) membership.
#[derive(Debug)]
struct TabuList {
    tenure: usize,
    queue: VecDeque<OrderFingerprint>,
    members: HashSet<OrderFingerprint>,
}

impl TabuList {
    fn new(tenure: usize) -> Self {
        Self {
            tenure,
            queue: VecDeque::with_capacity(tenure),
            members: HashSet::with_capacity(tenure),
        }
    }

    fn contains(&self, fp: &OrderFingerprint) -> bool {
        self.members.contains(fp)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    /// Records `fp`, evicting the oldest entry when the list is full.
    fn insert(&mut self, fp: OrderFingerprint) {
        if self.tenure == 0 || !self.members.insert(fp.clone()) {
            return;
        }
        self.queue.push_back(fp);
        while self.queue.len() > self.tenure {
            if let Some(old) = self.queue.pop_front() {
                self.members.remove(&old);
            }
        }
    }
}

impl TabuSolver {
    /// Creates a solver with `config`.
    pub fn new(config: TabuConfig) -> Self {
        Self { config }
    }

    /// The configuration.
    pub fn config(&self) -> &TabuConfig {
        &self.config
    }
}

impl Solver for TabuSolver {
    fn name(&self) -> String {
        let rule = self.config.rule.to_string().to_lowercase();
        if self.config == TabuConfig::fast(self.config.rule) {
            format!("tabu_fast_{rule}")
        } else if self.config == TabuConfig::quality(self.config.rule) {
            format!("tabu_quality_{rule}")
        } else {
            format!(
                "tabu_{}_{}_{rule}",
                self.config.max_iterations, self.config.tenure
            )
        }
    }

    #[tracing::instrument(
        level = "debug",
        name = "Tabu Search",
        skip_all,
        fields(
            instance = instance.name(),
            rule = %self.config.rule,
            max_iterations = self.config.max_iterations,
            tenure = self.config.tenure
        )
    )]
    fn solve<'a>(&self, instance: &'a Instance, deadline: Instant) -> SolverResult<'a> {
        let start = GreedySolver::new(self.config.rule).build_order(instance);
        let start_schedule = match start.to_schedule() {
            Ok(schedule) => schedule,
            Err(err) => {
                tracing::warn!("Tabu: initial order does not decode: {}", err);
                return SolverResult::blocked(instance);
            }
        };
        tracing::debug!("Tabu: start at {}", start_schedule.makespan());

        let mut best_schedule = start_schedule.clone();
        let mut base = start;
        let mut base_schedule = start_schedule;
        let mut taboo = TabuList::new(self.config.tenure);

        for iteration in 0..self.config.max_iterations {
            if Instant::now() > deadline {
                tracing::debug!("Tabu: deadline reached after {} iterations", iteration);
                return SolverResult::new(best_schedule, ExitCause::Timeout);
            }
            let base_fp = OrderFingerprint::new(&base);
            let mut probe = base.clone();
            let mut chosen: Option<(ResourceOrder<'a>, Schedule<'a>, OrderFingerprint)> = None;

            for swap in neighbors(&base, &base_schedule) {
                let mut fp = base_fp.clone();
                fp.apply_swap(&swap);
                if taboo.contains(&fp) {
                    tracing::trace!("Tabu: {:?} is taboo", swap);
                    continue;
                }

                swap.apply_on(&mut probe);
                match probe.to_schedule() {
                    Ok(schedule) => {
                        tracing::trace!("Tabu: {:?} gives {}", swap, schedule.makespan());
                        if chosen
                            .as_ref()
                            .map_or(true, |(_, s, _)| schedule.makespan() < s.makespan())
                        {
                            chosen = Some((probe.clone(), schedule, fp));
                        }
                    }
                    Err(err) => tracing::warn!("Tabu: {:?} skipped: {}", swap, err),
                }
                swap.apply_on(&mut probe);
            }

            let fp = match chosen {
                Some((order, schedule, fp)) => {
                    base = order;
                    base_schedule = schedule;
                    fp
                }
                None => {
                    tracing::trace!("Tabu: no admissible neighbor at iteration {}", iteration);
                    base_fp
                }
            };
            taboo.insert(fp);

            if base_schedule.makespan() < best_schedule.makespan() {
                tracing::debug!(
                    "Tabu: iteration {} improves {} -> {}",
                    iteration,
                    best_schedule.makespan(),
                    base_schedule.makespan()
                );
                best_schedule = base_schedule.clone();
            }
        }

        tracing::debug!(
            "Tabu: best {} with {} taboo entries",
            best_schedule.makespan(),
            taboo.len()
        );
        SolverResult::new(best_schedule, ExitCause::NotProvedOptimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::DescentSolver;
    use crate::test_utils::{aaa1, far_deadline, ft06, random_instance};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::time::Duration;

    #[test]
    fn test_tabu_aaa1_optimal() {
        let inst = aaa1();
        for config in [TabuConfig::fast(PriorityRule::Spt), TabuConfig::quality(PriorityRule::Lrpt)] {
            let result = TabuSolver::new(config).solve(&inst, far_deadline());
            assert_eq!(result.cause, ExitCause::NotProvedOptimal);
            assert_eq!(result.makespan(), Some(11));
        }
    }

    #[test]
    fn test_tabu_ft06_never_worse_than_greedy() {
        let inst = ft06();
        for rule in PriorityRule::ALL {
            let greedy = GreedySolver::new(rule).solve(&inst, far_deadline());
            let tabu = TabuSolver::new(TabuConfig::quality(rule)).solve(&inst, far_deadline());
            let schedule = tabu.schedule.unwrap();
            assert!(schedule.is_valid());
            assert!(schedule.makespan() >= 55);
            assert!(schedule.makespan() <= greedy.makespan().unwrap(), "rule {rule}");
        }
    }

    #[test]
    fn test_more_iterations_never_worse() {
        let inst = ft06();
        let mut previous = None;
        for max_iterations in [0, 1, 5, 20, 50] {
            let config = TabuConfig::quality(PriorityRule::Spt).with_max_iterations(max_iterations);
            let makespan = TabuSolver::new(config)
                .solve(&inst, far_deadline())
                .makespan()
                .unwrap();
            if let Some(prev) = previous {
                assert!(makespan <= prev);
            }
            previous = Some(makespan);
        }
    }

    #[test]
    fn test_tenure_zero_no_worse_than_descent() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut tabu_total = 0;
        let mut descent_total = 0;
        for _ in 0..10 {
            let inst = random_instance(&mut rng, 6, 6);
            let config = TabuConfig::quality(PriorityRule::Spt)
                .with_tenure(0)
                .with_max_iterations(200);
            let tabu = TabuSolver::new(config).solve(&inst, far_deadline());
            let descent = DescentSolver::new(PriorityRule::Spt).solve(&inst, far_deadline());
            tabu_total += tabu.makespan().unwrap();
            descent_total += descent.makespan().unwrap();
        }
        assert!(tabu_total <= descent_total);
    }

    #[test]
    fn test_tabu_list_fifo() {
        let inst = aaa1();
        let mut order = crate::test_utils::aaa1_resource_order(&inst);
        let a = OrderFingerprint::new(&order);
        order.swap(2, 0, 1);
        let b = OrderFingerprint::new(&order);

        order.swap(0, 0, 1);
        let c = OrderFingerprint::new(&order);

        let mut list = TabuList::new(2);
        list.insert(a.clone());
        list.insert(b.clone());
        list.insert(a.clone());
        assert_eq!(list.len(), 2);

        list.insert(c.clone());
        assert_eq!(list.len(), 2);
        assert!(!list.contains(&a));
        assert!(list.contains(&b));
        assert!(list.contains(&c));
    }

    #[test]
    fn test_tabu_list_never_exceeds_tenure() {
        let inst = ft06();
        let mut order = GreedySolver::new(PriorityRule::Spt).build_order(&inst);
        let mut list = TabuList::new(3);
        for pos in 0..5 {
            order.swap(0, pos, pos + 1);
            list.insert(OrderFingerprint::new(&order));
            assert!(list.len() <= 3);
        }
        assert_eq!(list.len(), 3);

        let mut empty = TabuList::new(0);
        empty.insert(OrderFingerprint::new(&order));
        assert_eq!(empty.len(), 0);
        assert!(!empty.contains(&OrderFingerprint::new(&order)));
    }

    #[test]
    fn test_tabu_expired_deadline_returns_greedy() {
        let inst = ft06();
        let past = Instant::now() - Duration::from_millis(1);
        let result = TabuSolver::default().solve(&inst, past);
        let greedy = GreedySolver::new(PriorityRule::Spt).solve(&inst, far_deadline());
        assert_eq!(result.cause, ExitCause::Timeout);
        assert_eq!(result.makespan(), greedy.makespan());
    }

    #[test]
    fn test_name() {
        assert_eq!(
            TabuSolver::new(TabuConfig::fast(PriorityRule::Srpt)).name(),
            "tabu_fast_srpt"
        );
        assert_eq!(TabuSolver::default().name(), "tabu_quality_spt");
        let custom = TabuConfig::fast(PriorityRule::Lpt).with_tenure(7);
        assert_eq!(TabuSolver::new(custom).name(), "tabu_10_7_lpt");
    }

    #[test]
    fn test_config_serde() {
        let config: TabuConfig =
            serde_json::from_str(r#"{"tenure": 3, "rule": "lrpt"}"#).unwrap();
        assert_eq!(config.tenure, 3);
        assert_eq!(config.max_iterations, 100);
        assert_eq!(config.rule, PriorityRule::Lrpt);
    }
}
