//! Command processing against a persisted state file
//!
//! One invocation: load the state, read one command, apply it, write the
//! state back. A rejected command leaves the state file untouched and is
//! appended to the failure log.

use crate::core::audit::{FailureLog, FailureRecord};
use crate::core::blocks::Run;
use crate::core::command::Command;
use crate::core::config::SimConfig;
use crate::core::engine::AllocationEngine;
use crate::core::memory::MemoryMap;
use crate::core::state;
use crate::core::strategy::Strategy;
use crate::error::{MemfitError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Result of a successfully applied command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Units placed for an allocation
    Allocated(Run),
    /// Number of units released
    Freed(usize),
}

/// Applies commands using the settings of a [`SimConfig`]
#[derive(Debug, Clone)]
pub struct Processor {
    config: SimConfig,
    failure_log: Option<FailureLog>,
}

impl Processor {
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let failure_log = FailureLog::from_optional(config.failure_log.as_deref());
        Ok(Processor {
            config,
            failure_log,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Apply `command` to `engine`, logging a rejection
    pub fn execute(&self, engine: &mut AllocationEngine, command: &Command) -> Result<Outcome> {
        debug!(%command, "executing");

        let result = match *command {
            Command::Allocate {
                owner,
                size,
                strategy,
            } => engine
                .allocate(owner, size, strategy)
                .map(Outcome::Allocated),
            Command::Free { owner } => engine.free(owner).map(Outcome::Freed),
        };

        if let Err(e) = &result {
            self.record_failure(FailureRecord::for_command(command, e));
        }

        result
    }

    /// Load `state_path`, apply the command in `command_path`, save on success
    ///
    /// Returns the engine in its final state along with the outcome.
    pub fn process_files<C, S>(
        &self,
        command_path: C,
        state_path: S,
    ) -> Result<(AllocationEngine, Outcome)>
    where
        C: AsRef<Path>,
        S: AsRef<Path>,
    {
        let state_path = state_path.as_ref();
        let memory = state::load(state_path, self.config.memory_size)?
            .with_columns(self.config.display_columns);
        let mut engine = AllocationEngine::with_memory(memory);

        let command = Command::read_from(command_path)?;
        let outcome = self.execute(&mut engine, &command)?;

        state::save(state_path, engine.memory())?;
        info!(%command, state = %state_path.display(), "command applied");

        Ok((engine, outcome))
    }

    /// Run the scripted demonstration on a fresh region
    ///
    /// Failed steps are logged and skipped; the returned list holds them in
    /// order.
    pub fn run_demo(&self) -> (AllocationEngine, Vec<(Command, MemfitError)>) {
        let memory = MemoryMap::new(self.config.memory_size)
            .with_columns(self.config.display_columns);
        let mut engine = AllocationEngine::with_memory(memory);
        let mut failures = Vec::new();

        for command in demo_script() {
            if let Err(e) = self.execute(&mut engine, &command) {
                failures.push((command, e));
            }
        }

        (engine, failures)
    }

    fn record_failure(&self, record: FailureRecord) {
        if let Some(log) = &self.failure_log {
            log.append_quietly(&record);
        }
    }
}

/// Demonstration sequence: three first-fit placements around a free, then
/// a best-fit and a worst-fit request
pub fn demo_script() -> Vec<Command> {
    vec![
        Command::Allocate {
            owner: 1,
            size: 10,
            strategy: Strategy::FirstFit,
        },
        Command::Allocate {
            owner: 2,
            size: 15,
            strategy: Strategy::FirstFit,
        },
        Command::Free { owner: 1 },
        Command::Allocate {
            owner: 3,
            size: 5,
            strategy: Strategy::FirstFit,
        },
        Command::Allocate {
            owner: 1,
            size: 10,
            strategy: Strategy::BestFit,
        },
        Command::Allocate {
            owner: 6,
            size: 8,
            strategy: Strategy::WorstFit,
        },
    ]
}
