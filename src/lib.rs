//! # memfit - Contiguous Memory Allocation Simulator
//!
//! `memfit` simulates a single contiguous memory region split into fixed-size
//! units and shows how placement strategies shape external fragmentation:
//!
//! - **First fit**: lowest-indexed free run that fits
//! - **Best fit**: smallest free run that fits
//! - **Worst fit**: largest free run that fits
//! - **Fragmentation analysis**: free units, region count, largest and
//!   smallest free region
//! - **Command processor**: `alocar`/`liberar` requests applied to a text
//!   state file, as driven by the `memfit-processor` binary
//!
//! ## Quick Start
//!
//! ```rust
//! use memfit::{AllocationEngine, Strategy, Result};
//!
//! # fn main() -> Result<()> {
//! let mut engine = AllocationEngine::new(10);
//!
//! engine.allocate(1, 4, Strategy::FirstFit)?;
//! engine.allocate(2, 3, Strategy::BestFit)?;
//! engine.free(1)?;
//!
//! assert_eq!(engine.memory().units(), &[0, 0, 0, 0, 2, 2, 2, 0, 0, 0]);
//!
//! let report = engine.fragmentation();
//! assert_eq!(report.free_region_count, 2);
//! assert_eq!(report.largest_region, 4);
//! assert!(report.is_fragmented);
//! # Ok(())
//! # }
//! ```
//!
//! ## Command Files
//!
//! ```rust,no_run
//! use memfit::{Processor, SimConfig};
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! std::fs::write("comando.txt", "alocar 3 12 best\n")?;
//!
//! let processor = Processor::new(SimConfig::default())?;
//! let (engine, _outcome) = processor.process_files("comando.txt", "estado.txt")?;
//! println!("{}", engine.memory());
//! # Ok(())
//! # }
//! ```

pub mod core;

#[allow(unused_imports)]
pub(crate) use crate::core::error;

pub use crate::core::{
    audit::{FailureLog, FailureRecord},
    blocks::{block_view, free_runs, Run},
    command::Command,
    config::SimConfig,
    engine::{AllocationEngine, SharedEngine},
    error::{MemfitError, Result},
    fragmentation::FragmentationReport,
    memory::{MemoryMap, DEFAULT_DISPLAY_COLUMNS, DEFAULT_MEMORY_SIZE, FREE},
    processor::{Outcome, Processor},
    strategy::Strategy,
};

/// Fragmentation statistics for a raw tag slice
pub fn analyze_fragmentation(units: &[u32]) -> FragmentationReport {
    FragmentationReport::analyze(units)
}
