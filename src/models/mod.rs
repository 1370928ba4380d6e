//! Job-shop domain models.
//!
//! Provides the problem definition and the timed solution. Encodings of
//! candidate solutions live in [`crate::encoding`].
//!
//! # Domain Mappings
//!
//! | u-jobshop | Manufacturing | Computing |
//! |-----------|---------------|-----------|
//! | Instance | Shop order book | Batch of pipelines |
//! | Task | Operation | Pipeline stage |
//! | machine | Machine | Worker / executor |
//! | Schedule | Production plan | Execution timeline |

mod instance;
mod schedule;
mod task;

pub use instance::{Instance, Operation, Time};
pub use schedule::{Schedule, Violation, ViolationType};
pub use task::Task;
