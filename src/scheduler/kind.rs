//! Named solver configurations.
//!
//! | Name | Solver |
//! |------|--------|
//! | `basic` | [`BasicSolver`] |
//! | `random` | [`RandomSolver`] with default sampling |
//! | `greedy_<rule>` | [`GreedySolver`] |
//! | `descent_<rule>` | [`DescentSolver`] |
//! | `tabu_fast_<rule>` | [`TabuSolver`], 10 iterations, tenure 5 |
//! | `tabu_quality_<rule>` | [`TabuSolver`], 100 iterations, tenure 100 |
//!
//! `<rule>` is one of `spt`, `lpt`, `srpt`, `lrpt`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{
    BasicSolver, DescentSolver, GreedySolver, RandomSolver, Solver, TabuConfig, TabuSolver,
};
use crate::dispatching::PriorityRule;
use crate::error::JobShopError;

/// Closed registry of solver configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SolverKind {
    /// Round-robin baseline.
    Basic,
    /// Random sampling.
    Random,
    /// Greedy list scheduling.
    Greedy(PriorityRule),
    /// Greedy + descent.
    Descent(PriorityRule),
    /// Greedy + short tabu search.
    TabuFast(PriorityRule),
    /// Greedy + long tabu search.
    TabuQuality(PriorityRule),
}

impl SolverKind {
    /// Every registered configuration.
    pub fn all() -> Vec<SolverKind> {
        let mut kinds = vec![SolverKind::Basic, SolverKind::Random];
        for rule in PriorityRule::ALL {
            kinds.extend([
                SolverKind::Greedy(rule),
                SolverKind::Descent(rule),
                SolverKind::TabuFast(rule),
                SolverKind::TabuQuality(rule),
            ]);
        }
        kinds
    }

    /// Registry name, e.g. `tabu_fast_spt`.
    pub fn name(&self) -> String {
        let with_rule = |prefix: &str, rule: &PriorityRule| {
            format!("{prefix}_{}", rule.to_string().to_lowercase())
        };
        match self {
            SolverKind::Basic => "basic".into(),
            SolverKind::Random => "random".into(),
            SolverKind::Greedy(rule) => with_rule("greedy", rule),
            SolverKind::Descent(rule) => with_rule("descent", rule),
            SolverKind::TabuFast(rule) => with_rule("tabu_fast", rule),
            SolverKind::TabuQuality(rule) => with_rule("tabu_quality", rule),
        }
    }

    /// Builds the configured solver.
    pub fn build(&self) -> Box<dyn Solver> {
        match *self {
            SolverKind::Basic => Box::new(BasicSolver::new()),
            SolverKind::Random => Box::new(RandomSolver::new()),
            SolverKind::Greedy(rule) => Box::new(GreedySolver::new(rule)),
            SolverKind::Descent(rule) => Box::new(DescentSolver::new(rule)),
            SolverKind::TabuFast(rule) => Box::new(TabuSolver::new(TabuConfig::fast(rule))),
            SolverKind::TabuQuality(rule) => Box::new(TabuSolver::new(TabuConfig::quality(rule))),
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for SolverKind {
    type Err = JobShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        SolverKind::all()
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| JobShopError::UnknownName {
                kind: "solver",
                name: s.to_string(),
            })
    }
}

impl TryFrom<String> for SolverKind {
    type Error = JobShopError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SolverKind> for String {
    fn from(kind: SolverKind) -> Self {
        kind.name()
    }
}
