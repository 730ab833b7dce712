//! Allocation engine
//!
//! Owns the unit array and executes allocate/free requests against it.
//! Every request either completes fully or leaves the array untouched.

use crate::core::blocks::Run;
use crate::core::fragmentation::FragmentationReport;
use crate::core::memory::{MemoryMap, FREE};
use crate::core::strategy::Strategy;
use crate::error::{MemfitError, Result};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Engine executing allocation requests over a single memory region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationEngine {
    memory: MemoryMap,
}

impl AllocationEngine {
    /// Create an engine over an all-free region of `size` units
    pub fn new(size: usize) -> Self {
        AllocationEngine {
            memory: MemoryMap::new(size),
        }
    }

    /// Create an engine over an existing region
    pub fn with_memory(memory: MemoryMap) -> Self {
        AllocationEngine { memory }
    }

    pub fn memory(&self) -> &MemoryMap {
        &self.memory
    }

    pub fn into_memory(self) -> MemoryMap {
        self.memory
    }

    /// Total number of units managed
    pub fn capacity(&self) -> usize {
        self.memory.len()
    }

    /// Allocate `size` contiguous units for `owner`
    ///
    /// The chosen free run is split: its first `size` units go to `owner`
    /// and the remainder stays free. Returns the placed run.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `owner` is 0, `size` is 0 or `size` exceeds capacity
    /// - `OwnerAlreadyAllocated` if `owner` already holds units
    /// - `InsufficientSpace` if no single free run can hold `size` units
    pub fn allocate(&mut self, owner: u32, size: usize, strategy: Strategy) -> Result<Run> {
        self.check_owner(owner)?;
        if size == 0 || size > self.capacity() {
            return Err(MemfitError::InvalidInput(format!(
                "tamanho {} fora do intervalo 1..={}",
                size,
                self.capacity()
            )));
        }

        if self.memory.holds(owner) {
            warn!(owner, "allocation rejected: owner already holds units");
            return Err(MemfitError::OwnerAlreadyAllocated(owner));
        }

        let runs = self.memory.runs();
        let chosen = match strategy.select(&runs, size) {
            Some(run) => run,
            None => {
                warn!(
                    owner,
                    size,
                    %strategy,
                    free_units = self.memory.free_units(),
                    "allocation rejected: no free run large enough"
                );
                return Err(MemfitError::InsufficientSpace {
                    owner,
                    size,
                    strategy,
                });
            }
        };

        debug!(
            %strategy,
            run_start = chosen.start,
            run_length = chosen.length,
            "selected free run"
        );

        self.memory.fill(chosen.start, size, owner)?;
        let placed = Run::new(chosen.start, size, owner);

        info!(owner, start = placed.start, size, %strategy, "allocated");
        Ok(placed)
    }

    /// Release every unit held by `owner`
    ///
    /// Returns the number of units released. Freed units merge with their
    /// free neighbours on the next block view since adjacency is positional.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `owner` is 0
    /// - `OwnerNotFound` if `owner` holds no units
    pub fn free(&mut self, owner: u32) -> Result<usize> {
        self.check_owner(owner)?;

        let released = self.memory.release(owner);
        if released == 0 {
            warn!(owner, "free rejected: owner holds no units");
            return Err(MemfitError::OwnerNotFound(owner));
        }

        info!(owner, released, "freed");
        Ok(released)
    }

    /// Fragmentation statistics for the current state
    pub fn fragmentation(&self) -> FragmentationReport {
        FragmentationReport::analyze(self.memory.units())
    }

    fn check_owner(&self, owner: u32) -> Result<()> {
        if owner == FREE {
            return Err(MemfitError::InvalidInput(
                "PID deve ser um inteiro positivo".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AllocationEngine {
    fn default() -> Self {
        AllocationEngine::with_memory(MemoryMap::default())
    }
}

/// Engine handle for multi-threaded hosts
///
/// Every operation takes the same exclusive lock, so allocate and free never
/// interleave. Readers get a copy of the tags taken under that lock.
#[derive(Debug, Clone, Default)]
pub struct SharedEngine {
    inner: Arc<Mutex<AllocationEngine>>,
}

impl SharedEngine {
    pub fn new(engine: AllocationEngine) -> Self {
        SharedEngine {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn allocate(&self, owner: u32, size: usize, strategy: Strategy) -> Result<Run> {
        self.inner.lock().allocate(owner, size, strategy)
    }

    pub fn free(&self, owner: u32) -> Result<usize> {
        self.inner.lock().free(owner)
    }

    /// Copy of the unit tags at this instant
    pub fn snapshot(&self) -> Vec<u32> {
        self.inner.lock().memory().snapshot()
    }

    pub fn fragmentation(&self) -> FragmentationReport {
        self.inner.lock().fragmentation()
    }

    /// Run `f` with exclusive access to the engine
    pub fn with_engine<R>(&self, f: impl FnOnce(&mut AllocationEngine) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_creation() {
        let engine = AllocationEngine::new(100);
        assert_eq!(engine.capacity(), 100);
        assert_eq!(engine.memory().free_units(), 100);
    }

    #[test]
    fn test_allocate_splits_run() {
        let mut engine = AllocationEngine::new(10);
        let placed = engine.allocate(1, 4, Strategy::FirstFit).unwrap();
        assert_eq!(placed, Run::new(0, 4, 1));
        assert_eq!(engine.memory().units(), &[1, 1, 1, 1, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_allocate_rejects_invalid_input() {
        let mut engine = AllocationEngine::new(10);
        assert!(matches!(
            engine.allocate(0, 3, Strategy::FirstFit),
            Err(MemfitError::InvalidInput(_))
        ));
        assert!(matches!(
            engine.allocate(1, 0, Strategy::FirstFit),
            Err(MemfitError::InvalidInput(_))
        ));
        assert!(matches!(
            engine.allocate(1, 11, Strategy::FirstFit),
            Err(MemfitError::InvalidInput(_))
        ));
        assert_eq!(engine.memory().free_units(), 10);
    }

    #[test]
    fn test_allocate_whole_region() {
        let mut engine = AllocationEngine::new(10);
        engine.allocate(3, 10, Strategy::WorstFit).unwrap();
        assert_eq!(engine.memory().free_units(), 0);

        let result = engine.allocate(4, 1, Strategy::FirstFit);
        assert!(matches!(result, Err(MemfitError::InsufficientSpace { .. })));
    }

    #[test]
    fn test_reallocating_owner_is_rejected() {
        let mut engine = AllocationEngine::new(10);
        engine.allocate(1, 2, Strategy::FirstFit).unwrap();
        let before = engine.memory().snapshot();

        let result = engine.allocate(1, 2, Strategy::BestFit);
        assert!(matches!(result, Err(MemfitError::OwnerAlreadyAllocated(1))));
        assert_eq!(engine.memory().units(), before.as_slice());
    }

    #[test]
    fn test_free_unknown_owner_is_rejected() {
        let mut engine = AllocationEngine::new(10);
        engine.allocate(1, 2, Strategy::FirstFit).unwrap();
        let before = engine.memory().snapshot();

        assert!(matches!(engine.free(5), Err(MemfitError::OwnerNotFound(5))));
        assert!(matches!(engine.free(0), Err(MemfitError::InvalidInput(_))));
        assert_eq!(engine.memory().units(), before.as_slice());
    }

    #[test]
    fn test_free_returns_released_count() {
        let mut engine = AllocationEngine::new(10);
        engine.allocate(2, 6, Strategy::FirstFit).unwrap();
        assert_eq!(engine.free(2).unwrap(), 6);
        assert_eq!(engine.memory().free_units(), 10);
    }

    #[test]
    fn test_free_releases_units_loaded_from_state() {
        // Loaded state may hold disjoint runs for one owner
        let mut engine =
            AllocationEngine::with_memory(MemoryMap::from_units(vec![7, 0, 7, 7, 0]));
        assert_eq!(engine.free(7).unwrap(), 3);
        assert_eq!(engine.memory().units(), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_shared_engine_serializes_requests() {
        let shared = SharedEngine::new(AllocationEngine::new(100));

        let handles: Vec<_> = (1..=10u32)
            .map(|owner| {
                let shared = shared.clone();
                std::thread::spawn(move || shared.allocate(owner, 10, Strategy::FirstFit))
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let snapshot = shared.snapshot();
        assert!(snapshot.iter().all(|&tag| tag != FREE));
        for owner in 1..=10u32 {
            assert_eq!(snapshot.iter().filter(|&&tag| tag == owner).count(), 10);
        }
        assert_eq!(shared.fragmentation().free_units, 0);
    }

    #[test]
    fn test_shared_engine_with_engine() {
        let shared = SharedEngine::default();
        let capacity = shared.with_engine(|engine| engine.capacity());
        assert_eq!(capacity, 100);
    }
}
