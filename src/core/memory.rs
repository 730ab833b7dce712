//! Unit array backing the simulated memory region
//!
//! Each unit holds an owner tag:
//! - 0 = free unit
//! - >0 = unit held by the process with that id

use crate::core::blocks::{self, Run};
use crate::error::{MemfitError, Result};
use std::fmt;

/// Default number of units in the simulated region
pub const DEFAULT_MEMORY_SIZE: usize = 100;

/// Default number of cells per row when rendering the grid
pub const DEFAULT_DISPLAY_COLUMNS: usize = 20;

/// Tag stored in a free unit
pub const FREE: u32 = 0;

/// Fixed-length sequence of owner tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryMap {
    units: Vec<u32>,
    columns: usize,
}

impl MemoryMap {
    /// Create an all-free map with `size` units
    pub fn new(size: usize) -> Self {
        MemoryMap {
            units: vec![FREE; size],
            columns: DEFAULT_DISPLAY_COLUMNS,
        }
    }

    /// Build a map from existing tags
    pub fn from_units(units: Vec<u32>) -> Self {
        MemoryMap {
            units,
            columns: DEFAULT_DISPLAY_COLUMNS,
        }
    }

    /// Set how many cells the text grid shows per row
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Total number of units
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn units(&self) -> &[u32] {
        &self.units
    }

    /// Owner tag at `index`, or `None` past the end
    pub fn get(&self, index: usize) -> Option<u32> {
        self.units.get(index).copied()
    }

    /// Number of free units
    pub fn free_units(&self) -> usize {
        self.units.iter().filter(|&&tag| tag == FREE).count()
    }

    /// Check whether any unit is held by `owner`
    pub fn holds(&self, owner: u32) -> bool {
        owner != FREE && self.units.contains(&owner)
    }

    /// Tag the range `[start, start + length)` with `owner`
    pub(crate) fn fill(&mut self, start: usize, length: usize, owner: u32) -> Result<()> {
        let end = start
            .checked_add(length)
            .filter(|&end| end <= self.units.len())
            .ok_or_else(|| {
                MemfitError::InvalidInput(format!(
                    "range {}+{} outside memory of {} units",
                    start,
                    length,
                    self.units.len()
                ))
            })?;

        self.units[start..end].fill(owner);
        Ok(())
    }

    /// Reset every unit held by `owner`; returns the number of units released
    pub(crate) fn release(&mut self, owner: u32) -> usize {
        let mut released = 0;
        for tag in self.units.iter_mut().filter(|tag| **tag == owner) {
            *tag = FREE;
            released += 1;
        }
        released
    }

    /// Decompose into maximal runs of equal tag
    pub fn runs(&self) -> Vec<Run> {
        blocks::block_view(&self.units)
    }

    /// Owned runs in index order
    pub fn owners(&self) -> Vec<Run> {
        self.runs().into_iter().filter(|run| !run.is_free()).collect()
    }

    /// Copy of the current tags
    pub fn snapshot(&self) -> Vec<u32> {
        self.units.clone()
    }
}

impl Default for MemoryMap {
    fn default() -> Self {
        MemoryMap::new(DEFAULT_MEMORY_SIZE)
    }
}

/// Grid of `columns` cells per row, each tag right-aligned to width 2
impl fmt::Display for MemoryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.units.chunks(self.columns) {
            for tag in row {
                write!(f, "{:>2} ", tag)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
