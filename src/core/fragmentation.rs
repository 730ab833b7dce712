//! External fragmentation analysis
//!
//! Free space is fragmented whenever it is split across more than one free
//! region, whether or not a pending request would actually fail.

use crate::core::blocks;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-space statistics for a unit array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FragmentationReport {
    /// Number of free units
    pub free_units: usize,
    /// Number of maximal free runs
    pub free_region_count: usize,
    /// Length of the largest free run (0 if none)
    pub largest_region: usize,
    /// Length of the smallest free run (0 if none)
    pub smallest_region: usize,
    /// More than one free region exists
    pub is_fragmented: bool,
}

impl FragmentationReport {
    /// Analyze `units` without modifying them
    pub fn analyze(units: &[u32]) -> Self {
        let lengths: Vec<usize> = blocks::free_runs(units).map(|run| run.length).collect();

        let free_region_count = lengths.len();

        FragmentationReport {
            free_units: lengths.iter().sum(),
            free_region_count,
            largest_region: lengths.iter().copied().max().unwrap_or(0),
            smallest_region: lengths.iter().copied().min().unwrap_or(0),
            is_fragmented: free_region_count > 1,
        }
    }

    /// Share of free space outside the largest region
    ///
    /// 0.0 = all free space contiguous (or nothing free); approaches 1.0 as
    /// free space scatters into many small regions.
    pub fn fragmentation_ratio(&self) -> f64 {
        if self.free_units == 0 {
            return 0.0;
        }

        1.0 - (self.largest_region as f64 / self.free_units as f64)
    }

    /// Check whether a request of `size` units can be placed without compaction
    pub fn can_fit(&self, size: usize) -> bool {
        size > 0 && size <= self.largest_region
    }

    /// JSON form of the report
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Five-line panel in the front end's wording
impl fmt::Display for FragmentationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Blocos Livres: {}", self.free_units)?;
        writeln!(f, "Regiões Livres: {}", self.free_region_count)?;
        writeln!(f, "Maior Região: {} blocos", self.largest_region)?;
        writeln!(f, "Menor Região: {} blocos", self.smallest_region)?;
        write!(
            f,
            "Fragmentação Externa: {}",
            if self.is_fragmented { "SIM" } else { "NÃO" }
        )
    }
}
