//! Block view over the unit array
//!
//! A block view is a transient decomposition of the unit array into maximal
//! runs of equal owner tag. It is rebuilt on demand and never stored.

use crate::core::memory::FREE;
use serde::{Deserialize, Serialize};

/// A maximal run of contiguous units sharing one owner tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    /// Index of the first unit
    pub start: usize,
    /// Number of contiguous units
    pub length: usize,
    /// Owner tag (0 = free)
    pub owner: u32,
}

impl Run {
    pub fn new(start: usize, length: usize, owner: u32) -> Self {
        Run {
            start,
            length,
            owner,
        }
    }

    pub fn is_free(&self) -> bool {
        self.owner == FREE
    }

    /// One past the last unit of the run
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// Check if this run contains a unit index
    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }
}

/// Decompose `units` into maximal runs, left to right
pub fn block_view(units: &[u32]) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut iter = units.iter().copied().enumerate();

    let Some((_, first)) = iter.next() else {
        return runs;
    };

    let mut current = Run::new(0, 1, first);
    for (index, tag) in iter {
        if tag == current.owner {
            current.length += 1;
        } else {
            runs.push(current);
            current = Run::new(index, 1, tag);
        }
    }
    runs.push(current);

    runs
}

/// Free runs of `units` in index order
pub fn free_runs(units: &[u32]) -> impl Iterator<Item = Run> {
    block_view(units).into_iter().filter(Run::is_free)
}
