//! Built-in dispatching rules.
//!
//! # Categories
//!
//! - **Operation time**: SPT, LPT
//! - **Remaining machine work**: SRPT, LRPT
//!
//! # Score Convention
//! All rules return lower scores for higher priority candidates.
//!
//! # References
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Candidate, DispatchingRule, RuleScore};
use crate::error::JobShopError;

// ======================== Operation-time rules ========================

/// Shortest Processing Time.
///
/// Prioritizes the candidate with the shortest operation.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on single machine.
#[derive(Debug, Clone, Copy)]
pub struct Spt;

impl DispatchingRule for Spt {
    fn name(&self) -> &'static str {
        "SPT"
    }

    fn evaluate(&self, candidate: &Candidate) -> RuleScore {
        candidate.duration
    }

    fn description(&self) -> &'static str {
        "Shortest Processing Time"
    }
}

/// Longest Processing Time.
#[derive(Debug, Clone, Copy)]
pub struct Lpt;

impl DispatchingRule for Lpt {
    fn name(&self) -> &'static str {
        "LPT"
    }

    fn evaluate(&self, candidate: &Candidate) -> RuleScore {
        -candidate.duration
    }

    fn description(&self) -> &'static str {
        "Longest Processing Time"
    }
}

// ======================== Remaining-work rules ========================

/// Shortest Remaining Processing Time.
///
/// Prioritizes candidates whose machine has the least work left.
#[derive(Debug, Clone, Copy)]
pub struct Srpt;

impl DispatchingRule for Srpt {
    fn name(&self) -> &'static str {
        "SRPT"
    }

    fn evaluate(&self, candidate: &Candidate) -> RuleScore {
        candidate.remaining_work
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Processing Time"
    }
}

/// Longest Remaining Processing Time.
///
/// Prioritizes candidates whose machine has the most work left.
#[derive(Debug, Clone, Copy)]
pub struct Lrpt;

impl DispatchingRule for Lrpt {
    fn name(&self) -> &'static str {
        "LRPT"
    }

    fn evaluate(&self, candidate: &Candidate) -> RuleScore {
        -candidate.remaining_work
    }

    fn description(&self) -> &'static str {
        "Longest Remaining Processing Time"
    }
}

// ======================== Rule selector ========================

/// Closed set of rules accepted by the greedy solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityRule {
    /// See [`Spt`].
    #[default]
    Spt,
    /// See [`Lpt`].
    Lpt,
    /// See [`Srpt`].
    Srpt,
    /// See [`Lrpt`].
    Lrpt,
}

impl PriorityRule {
    /// Every rule, in declaration order.
    pub const ALL: [PriorityRule; 4] = [
        PriorityRule::Spt,
        PriorityRule::Lpt,
        PriorityRule::Srpt,
        PriorityRule::Lrpt,
    ];

    /// The rule implementation.
    pub fn as_rule(&self) -> &'static dyn DispatchingRule {
        match self {
            PriorityRule::Spt => &Spt,
            PriorityRule::Lpt => &Lpt,
            PriorityRule::Srpt => &Srpt,
            PriorityRule::Lrpt => &Lrpt,
        }
    }
}

impl DispatchingRule for PriorityRule {
    fn name(&self) -> &'static str {
        self.as_rule().name()
    }

    fn evaluate(&self, candidate: &Candidate) -> RuleScore {
        self.as_rule().evaluate(candidate)
    }

    fn description(&self) -> &'static str {
        self.as_rule().description()
    }
}

impl fmt::Display for PriorityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PriorityRule {
    type Err = JobShopError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PriorityRule::ALL
            .into_iter()
            .find(|rule| rule.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| JobShopError::UnknownName {
                kind: "priority rule",
                name: s.to_string(),
            })
    }
}
