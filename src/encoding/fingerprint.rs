//! Rolling hash over a per-machine order.
//!
//! Every cell of the order (machine-major, then position) is mapped to
//! `job * num_tasks + task + 1` and folded as a base-31 polynomial with
//! wrapping arithmetic. A [`Swap`] changes exactly two cells, so the hash is
//! updated in O(1) plus one modular power instead of being recomputed.
//!
//! Equality compares the cells, never the hash alone, so collisions cannot
//! make two different orders look equal.

use std::hash::{Hash, Hasher};

use super::{Encoding, ResourceOrder, Swap};
use crate::models::Task;

const BASE: u64 = 31;

/// Hashable snapshot of a [`ResourceOrder`] with cheap swap updates.
#[derive(Debug, Clone)]
pub struct OrderFingerprint {
    cells: Vec<u64>,
    /// Index of each machine's first cell.
    offsets: Vec<usize>,
    hash: u64,
}

impl OrderFingerprint {
    /// Snapshots `order`.
    pub fn new(order: &ResourceOrder<'_>) -> Self {
        let num_tasks = order.instance().num_tasks();
        let mut cells = Vec::new();
        let mut offsets = Vec::with_capacity(order.machines().len());
        for sequence in order.machines() {
            offsets.push(cells.len());
            cells.extend(sequence.iter().map(|&t| cell_value(t, num_tasks)));
        }
        let hash = polynomial(&cells);
        Self {
            cells,
            offsets,
            hash,
        }
    }

    /// Applies `swap` to the snapshot and updates the hash.
    pub fn apply_swap(&mut self, swap: &Swap) {
        let offset = self.offsets[swap.machine];
        let (ia, ib) = (offset + swap.a, offset + swap.b);
        let (va, vb) = (self.cells[ia], self.cells[ib]);
        if va == vb {
            return;
        }
        let len = self.cells.len();
        // Cell i carries weight BASE^(len - 1 - i).
        let delta_a = vb.wrapping_sub(va).wrapping_mul(weight(len, ia));
        let delta_b = va.wrapping_sub(vb).wrapping_mul(weight(len, ib));
        self.hash = self.hash.wrapping_add(delta_a).wrapping_add(delta_b);
        self.cells.swap(ia, ib);
    }

    /// Cached hash value.
    pub fn value(&self) -> u64 {
        self.hash
    }
}

impl PartialEq for OrderFingerprint {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.cells == other.cells
    }
}

impl Eq for OrderFingerprint {}

impl Hash for OrderFingerprint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<'a> From<&ResourceOrder<'a>> for OrderFingerprint {
    fn from(order: &ResourceOrder<'a>) -> Self {
        Self::new(order)
    }
}

fn cell_value(task: Task, num_tasks: usize) -> u64 {
    (task.job * num_tasks + task.task + 1) as u64
}

fn polynomial(cells: &[u64]) -> u64 {
    cells
        .iter()
        .fold(1u64, |h, &v| h.wrapping_mul(BASE).wrapping_add(v))
}

fn weight(len: usize, index: usize) -> u64 {
    BASE.wrapping_pow((len - 1 - index) as u32)
}
