//! Critical-block neighborhood.
//!
//! A block is a maximal run of at least two consecutive critical-path
//! operations that share a machine and sit next to each other in that
//! machine's sequence. Swapping operations strictly inside a block cannot
//! shorten the path, so only swaps at block ends are generated:
//!
//! - 2 operations: swap them.
//! - longer: swap the first pair and the last pair.
//!
//! Both local-search solvers draw their moves from here.
//!
//! # Reference
//! Nowicki & Smutnicki (1996), "A Fast Taboo Search Algorithm for the
//! Job Shop Problem"

use serde::{Deserialize, Serialize};

use crate::encoding::{Encoding, ResourceOrder, Swap};
use crate::models::{Schedule, Task};

/// Positions `first..=last` of one machine's sequence, all on the critical
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Machine the block lives on.
    pub machine: usize,
    /// Position of the first operation.
    pub first: usize,
    /// Position of the last operation.
    pub last: usize,
}

impl Block {
    /// Creates a block.
    pub const fn new(machine: usize, first: usize, last: usize) -> Self {
        Self {
            machine,
            first,
            last,
        }
    }

    /// Number of operations, at least two.
    pub(crate) fn len(&self) -> usize {
        self.last - self.first + 1
    }

    /// End swaps of this block.
    pub fn swaps(&self) -> Vec<Swap> {
        if self.len() == 2 {
            vec![Swap::new(self.machine, self.first, self.last)]
        } else {
            vec![
                Swap::new(self.machine, self.first, self.first + 1),
                Swap::new(self.machine, self.last - 1, self.last),
            ]
        }
    }
}

/// Blocks along `critical_path`, in path order.
///
/// `critical_path` must come from the schedule `order` decodes to.
pub fn blocks_of_critical_path(order: &ResourceOrder<'_>, critical_path: &[Task]) -> Vec<Block> {
    let mut blocks = Vec::new();
    // (machine, first position, last position) of the run being extended
    let mut run: Option<(usize, usize, usize)> = None;

    for &task in critical_path {
        let Some(pos) = order.position(task) else {
            continue;
        };
        let machine = order.instance().machine_of(task);

        run = match run {
            Some((m, first, last)) if m == machine && pos == last + 1 => Some((m, first, pos)),
            Some((m, first, last)) => {
                if last > first {
                    blocks.push(Block::new(m, first, last));
                }
                Some((machine, pos, pos))
            }
            None => Some((machine, pos, pos)),
        };
    }
    if let Some((m, first, last)) = run {
        if last > first {
            blocks.push(Block::new(m, first, last));
        }
    }
    blocks
}

/// Nowicki–Smutnicki swaps for `order`, whose decoding is `schedule`.
///
/// Swaps exchanging two operations of the same job are dropped: they
/// reverse job precedence on the machine and can never decode.
pub fn neighbors(order: &ResourceOrder<'_>, schedule: &Schedule<'_>) -> Vec<Swap> {
    let path = schedule.critical_path();
    blocks_of_critical_path(order, &path)
        .iter()
        .flat_map(Block::swaps)
        .filter(|s| {
            let sequence = order.machine_order(s.machine);
            sequence[s.a].job != sequence[s.b].job
        })
        .collect()
}
