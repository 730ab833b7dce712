//! Free-run selection policies

use crate::core::blocks::Run;
use crate::error::MemfitError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Policy used to pick a free run for an allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Lowest-indexed run that fits
    #[serde(rename = "first")]
    FirstFit,
    /// Smallest run that fits
    #[serde(rename = "best")]
    BestFit,
    /// Largest run that fits
    #[serde(rename = "worst")]
    WorstFit,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::FirstFit, Strategy::BestFit, Strategy::WorstFit];

    /// Keyword used on the command line (`first`, `best`, `worst`)
    pub fn keyword(&self) -> &'static str {
        match self {
            Strategy::FirstFit => "first",
            Strategy::BestFit => "best",
            Strategy::WorstFit => "worst",
        }
    }

    /// Human-readable name used in the failure log
    pub fn display_name(&self) -> &'static str {
        match self {
            Strategy::FirstFit => "First Fit",
            Strategy::BestFit => "Best Fit",
            Strategy::WorstFit => "Worst Fit",
        }
    }

    /// Pick a run able to hold `size` units
    ///
    /// `runs` must be in index order. Only free runs are considered; ties on
    /// length are broken by the lowest start index.
    pub fn select<'a, I>(&self, runs: I, size: usize) -> Option<Run>
    where
        I: IntoIterator<Item = &'a Run>,
    {
        let mut candidates = runs
            .into_iter()
            .filter(|run| run.is_free() && run.length >= size)
            .copied();

        match self {
            Strategy::FirstFit => candidates.next(),
            // min_by_key keeps the first minimum, which is the lowest start
            Strategy::BestFit => candidates.min_by_key(|run| run.length),
            // max_by_key keeps the last maximum, so compare reversed starts
            Strategy::WorstFit => {
                candidates.max_by_key(|run| (run.length, std::cmp::Reverse(run.start)))
            }
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for Strategy {
    type Err = MemfitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Strategy::FirstFit),
            "best" => Ok(Strategy::BestFit),
            "worst" => Ok(Strategy::WorstFit),
            _ => Err(MemfitError::InvalidInput(format!(
                "algoritmo '{}' desconhecido (use first, best ou worst)",
                s
            ))),
        }
    }
}
