//! Cross-module tests
//!
//! Exercise the interaction between:
//! - Engine placement
//! - Fragmentation analysis
//! - State file persistence

#[cfg(test)]
mod tests {
    use crate::core::command::Command;
    use crate::core::config::SimConfig;
    use crate::core::engine::AllocationEngine;
    use crate::core::fragmentation::FragmentationReport;
    use crate::core::memory::MemoryMap;
    use crate::core::processor::{Outcome, Processor};
    use crate::core::state;
    use crate::core::strategy::Strategy;
    use crate::error::MemfitError;
    use tempfile::TempDir;

    #[test]
    fn test_scenario_from_free_region() {
        let mut engine = AllocationEngine::new(10);

        engine.allocate(1, 4, Strategy::FirstFit).unwrap();
        assert_eq!(engine.memory().units(), &[1, 1, 1, 1, 0, 0, 0, 0, 0, 0]);

        engine.allocate(2, 3, Strategy::BestFit).unwrap();
        assert_eq!(engine.memory().units(), &[1, 1, 1, 1, 2, 2, 2, 0, 0, 0]);

        engine.free(1).unwrap();
        assert_eq!(engine.memory().units(), &[0, 0, 0, 0, 2, 2, 2, 0, 0, 0]);

        let report = engine.fragmentation();
        assert_eq!(report.free_region_count, 2);
        assert_eq!(report.largest_region, 4);
        assert_eq!(report.smallest_region, 3);
        assert!(report.is_fragmented);
    }

    #[test]
    fn test_persisted_state_survives_cycle() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("estado.txt");

        let mut engine = AllocationEngine::new(20);
        engine.allocate(4, 5, Strategy::FirstFit).unwrap();
        engine.allocate(9, 2, Strategy::WorstFit).unwrap();
        state::save(&path, engine.memory()).unwrap();

        let reloaded = AllocationEngine::with_memory(state::load(&path, 20).unwrap());
        assert_eq!(reloaded, engine);
        assert_eq!(reloaded.fragmentation(), engine.fragmentation());
    }

    #[test]
    fn test_failed_command_keeps_state_file() {
        let temp_dir = TempDir::new().unwrap();
        let command_path = temp_dir.path().join("comando.txt");
        let state_path = temp_dir.path().join("estado.txt");

        let processor = Processor::new(SimConfig {
            memory_size: 6,
            failure_log: None,
            ..SimConfig::default()
        })
        .unwrap();

        state::save(&state_path, &MemoryMap::from_units(vec![1, 1, 0, 0, 0, 2])).unwrap();
        let before = std::fs::read_to_string(&state_path).unwrap();

        std::fs::write(&command_path, "alocar 3 4 first\n").unwrap();
        let result = processor.process_files(&command_path, &state_path);
        assert!(matches!(result, Err(MemfitError::InsufficientSpace { .. })));
        assert_eq!(std::fs::read_to_string(&state_path).unwrap(), before);

        std::fs::write(&command_path, "alocar 3 3 first\n").unwrap();
        let (engine, outcome) = processor.process_files(&command_path, &state_path).unwrap();
        assert!(matches!(outcome, Outcome::Allocated(run) if run.start == 2));
        assert_eq!(
            FragmentationReport::analyze(engine.memory().units()).free_units,
            0
        );
    }

    #[test]
    fn test_commands_replayed_through_display_form() {
        let commands = [
            Command::Allocate {
                owner: 1,
                size: 3,
                strategy: Strategy::WorstFit,
            },
            Command::Free { owner: 1 },
        ];

        let processor = Processor::new(SimConfig {
            failure_log: None,
            ..SimConfig::default()
        })
        .unwrap();
        let mut engine = AllocationEngine::new(100);

        for command in commands {
            let parsed: Command = command.to_string().parse().unwrap();
            processor.execute(&mut engine, &parsed).unwrap();
        }

        assert_eq!(engine.memory().free_units(), 100);
    }
}
