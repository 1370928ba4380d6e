//! Random-restart sampling over job lists.
//!
//! Draws uniformly shuffled job lists, decodes each and keeps the best,
//! until the sample budget is spent or the deadline passes.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::{ExitCause, Solver, SolverResult};
use crate::encoding::{Encoding, JobNumbers};
use crate::models::{Instance, Schedule};

/// Random sampling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    /// RNG seed; equal seeds give equal results.
    pub seed: u64,
    /// Number of job lists to decode.
    pub max_samples: usize,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_samples: 1000,
        }
    }
}

impl RandomConfig {
    /// Sets the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the sample budget.
    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }
}

/// Best-of-N random job lists.
#[derive(Debug, Clone, Default)]
pub struct RandomSolver {
    config: RandomConfig,
}

impl RandomSolver {
    /// Creates a solver with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: RandomConfig) -> Self {
        self.config = config;
        self
    }

    /// The configuration.
    pub fn config(&self) -> &RandomConfig {
        &self.config
    }
}

impl Solver for RandomSolver {
    fn name(&self) -> String {
        "random".into()
    }

    #[tracing::instrument(
        level = "debug",
        name = "Random",
        skip_all,
        fields(instance = instance.name(), seed = self.config.seed)
    )]
    fn solve<'a>(&self, instance: &'a Instance, deadline: Instant) -> SolverResult<'a> {
        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let mut best: Option<Schedule<'a>> = None;

        for sample in 0..self.config.max_samples.max(1) {
            // At least one sample is always drawn, even past the deadline.
            if sample > 0 && Instant::now() > deadline {
                tracing::debug!("Random: deadline reached after {} samples", sample);
                return match best {
                    Some(schedule) => SolverResult::new(schedule, ExitCause::Timeout),
                    None => SolverResult::blocked(instance),
                };
            }
            let schedule = match JobNumbers::random(instance, &mut rng).to_schedule() {
                Ok(schedule) => schedule,
                Err(err) => {
                    tracing::warn!("Random: sample {} failed to decode: {}", sample, err);
                    continue;
                }
            };
            if best
                .as_ref()
                .map_or(true, |b| schedule.makespan() < b.makespan())
            {
                tracing::trace!("Random: sample {} improves to {}", sample, schedule.makespan());
                best = Some(schedule);
            }
        }

        match best {
            Some(schedule) => {
                tracing::debug!("Random: best makespan {}", schedule.makespan());
                SolverResult::new(schedule, ExitCause::NotProvedOptimal)
            }
            None => SolverResult::blocked(instance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{far_deadline, ft06};
    use std::time::Duration;

    #[test]
    fn test_random_is_valid_and_bounded() {
        let inst = ft06();
        let solver = RandomSolver::new().with_config(RandomConfig::default().with_max_samples(50));
        let result = solver.solve(&inst, far_deadline());
        assert_eq!(result.cause, ExitCause::NotProvedOptimal);
        let schedule = result.schedule.unwrap();
        assert!(schedule.is_valid());
        assert!(schedule.makespan() >= 55);
    }

    #[test]
    fn test_random_is_reproducible() {
        let inst = ft06();
        let config = RandomConfig::default().with_seed(7).with_max_samples(20);
        let a = RandomSolver::new().with_config(config).solve(&inst, far_deadline());
        let b = RandomSolver::new().with_config(config).solve(&inst, far_deadline());
        assert_eq!(a.makespan(), b.makespan());
    }

    #[test]
    fn test_more_samples_never_worse() {
        let inst = ft06();
        let few = RandomSolver::new()
            .with_config(RandomConfig::default().with_max_samples(5))
            .solve(&inst, far_deadline());
        let many = RandomSolver::new()
            .with_config(RandomConfig::default().with_max_samples(200))
            .solve(&inst, far_deadline());
        assert!(many.makespan().unwrap() <= few.makespan().unwrap());
    }

    #[test]
    fn test_expired_deadline_still_returns_a_schedule() {
        let inst = ft06();
        let past = Instant::now() - Duration::from_millis(1);
        let result = RandomSolver::new().solve(&inst, past);
        assert_eq!(result.cause, ExitCause::Timeout);
        assert!(result.schedule.unwrap().is_valid());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: RandomConfig = serde_json::from_str(r#"{"seed": 3}"#).unwrap();
        assert_eq!(config.seed, 3);
        assert_eq!(config.max_samples, 1000);
    }
}
