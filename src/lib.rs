//! Job-shop scheduling for the U-Engine ecosystem.
//!
//! Provides the job-shop problem model, two solution encodings with
//! deterministic decoding, schedule validation and critical-path analysis,
//! and a family of solvers from dispatching-rule construction to tabu search.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Instance`, `Task`, `Schedule`, `Violation`
//! - **`validation`**: Instance integrity checks (empty or ragged jobs, durations)
//! - **`encoding`**: `JobNumbers` and `ResourceOrder` encodings, `Swap` moves,
//!   `OrderFingerprint` hashing
//! - **`dispatching`**: Priority rules (SPT, LPT, SRPT, LRPT) and the candidate queue
//! - **`scheduler`**: `Solver` implementations, `SolverKind` registry, KPIs
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use u_jobshop::models::Instance;
//! use u_jobshop::scheduler::SolverKind;
//!
//! let instance: Instance = "2 3\n0 3 1 3 2 2\n1 2 0 2 2 4".parse().unwrap();
//! let solver = "tabu_fast_spt".parse::<SolverKind>().unwrap().build();
//! let result = solver.solve(&instance, Instant::now() + Duration::from_secs(1));
//! assert_eq!(result.makespan(), Some(11));
//! ```
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"
//! - Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the
//!   Job Shop Problem"
//! - Bierwirth (1995), "A generalized permutation approach to JSSP"

pub mod dispatching;
pub mod encoding;
pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use error::JobShopError;
