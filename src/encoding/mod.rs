//! Candidate-solution encodings.
//!
//! An encoding is an abstract, mutable description of a solution that
//! decodes deterministically into a [`Schedule`] by discrete-event
//! simulation.
//!
//! # Encodings
//!
//! - **[`JobNumbers`]**: flat sequence of job ids used as a global dispatch
//!   priority. The k-th occurrence of job J denotes J's k-th operation.
//! - **[`ResourceOrder`]**: per machine, the order in which its operations
//!   are dispatched. All local-search moves ([`Swap`]) act on this one.
//!
//! Both convert into each other by replaying the decoded schedule.
//! [`OrderFingerprint`] is a rolling hash over a `ResourceOrder` used as the
//! tabu memory key.
//!
//! # Reference
//! - Cheng et al. (1996), "A Tutorial Survey of JSSP using GA"
//! - Bierwirth (1995), "A generalized permutation approach to JSSP"

mod fingerprint;
mod job_numbers;
mod resource_order;

pub use fingerprint::OrderFingerprint;
pub use job_numbers::JobNumbers;
pub use resource_order::{ResourceOrder, Swap};

use crate::error::JobShopError;
use crate::models::{Instance, Schedule, Time};

/// A candidate solution that decodes into a timed schedule.
///
/// Decoding is a pure function of the encoding: no state survives between
/// calls, and decoding the same encoding twice gives identical start times.
pub trait Encoding<'a> {
    /// The instance this encoding belongs to.
    fn instance(&self) -> &'a Instance;

    /// Simulates dispatch and returns the resulting schedule.
    fn to_schedule(&self) -> Result<Schedule<'a>, JobShopError>;

    /// Makespan of the decoded schedule.
    fn makespan(&self) -> Result<Time, JobShopError> {
        Ok(self.to_schedule()?.makespan())
    }
}
