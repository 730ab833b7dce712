//! Text state file for the unit array
//!
//! Format: whitespace-separated non-negative integers, one tag per unit in
//! index order. Missing trailing entries read back as free units; the
//! writer always emits exactly one value per unit.

use crate::core::memory::MemoryMap;
use crate::error::{MemfitError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// Parse state text into a map of `size` units
///
/// # Errors
///
/// Returns `Persistence` on any token that is not a non-negative integer,
/// or when the text holds more than `size` values.
pub fn parse_state(text: &str, size: usize) -> Result<MemoryMap> {
    let mut units = Vec::with_capacity(size);

    for (position, token) in text.split_whitespace().enumerate() {
        if position >= size {
            return Err(MemfitError::Persistence(format!(
                "mais de {} valores no estado",
                size
            )));
        }

        let tag = token.parse::<u32>().map_err(|_| {
            MemfitError::Persistence(format!(
                "valor '{}' na posição {} não é um inteiro não negativo",
                token, position
            ))
        })?;
        units.push(tag);
    }

    units.resize(size, 0);
    Ok(MemoryMap::from_units(units))
}

/// Render a map in state-file form
pub fn render_state(memory: &MemoryMap) -> String {
    let mut out = memory
        .units()
        .iter()
        .map(|tag| tag.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    out.push('\n');
    out
}

/// Load a map of `size` units from `path`
///
/// A missing file yields an all-free map.
pub fn load<P: AsRef<Path>>(path: P, size: usize) -> Result<MemoryMap> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(text) => {
            let memory = parse_state(&text, size)?;
            debug!(path = %path.display(), units = size, "state loaded");
            Ok(memory)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no state file, starting with free memory");
            Ok(MemoryMap::new(size))
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => Err(MemfitError::Persistence(format!(
            "{}: {}",
            path.display(),
            e
        ))),
        Err(e) => Err(MemfitError::io(path, e)),
    }
}

/// Write `memory` to `path`, replacing previous contents
pub fn save<P: AsRef<Path>>(path: P, memory: &MemoryMap) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, render_state(memory)).map_err(|e| MemfitError::io(path, e))?;
    debug!(path = %path.display(), units = memory.len(), "state saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_state() {
        let map = parse_state("1 1 0 2\n", 4).unwrap();
        assert_eq!(map.units(), &[1, 1, 0, 2]);
    }

    #[test]
    fn test_parse_pads_missing_trailing_units() {
        let map = parse_state("3 3", 6).unwrap();
        assert_eq!(map.units(), &[3, 3, 0, 0, 0, 0]);

        let empty = parse_state("", 3).unwrap();
        assert_eq!(empty.units(), &[0, 0, 0]);
    }

    #[test]
    fn test_parse_accepts_trailing_space() {
        let map = parse_state("0 4 4 ", 3).unwrap();
        assert_eq!(map.units(), &[0, 4, 4]);
    }

    #[test]
    fn test_parse_rejects_bad_tokens() {
        for text in ["1 x 0", "1 -2 0", "1 2.5", "9999999999"] {
            assert!(
                matches!(parse_state(text, 4), Err(MemfitError::Persistence(_))),
                "accepted {:?}",
                text
            );
        }
    }

    #[test]
    fn test_parse_rejects_excess_values() {
        let result = parse_state("0 0 0 0 0", 4);
        assert!(matches!(result, Err(MemfitError::Persistence(_))));
    }

    #[test]
    fn test_render_writes_every_unit() {
        let map = MemoryMap::from_units(vec![0, 2, 2, 0]);
        assert_eq!(render_state(&map), "0 2 2 0\n");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("estado.txt");

        let map = MemoryMap::from_units(vec![5, 5, 0, 0, 1]);
        save(&path, &map).unwrap();

        let loaded = load(&path, 5).unwrap();
        assert_eq!(loaded.units(), map.units());
    }

    #[test]
    fn test_load_missing_file_is_free() {
        let temp_dir = TempDir::new().unwrap();
        let map = load(temp_dir.path().join("absent.txt"), 8).unwrap();
        assert_eq!(map.free_units(), 8);
    }

    #[test]
    fn test_load_non_utf8_is_persistence_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("estado.txt");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(load(&path, 4), Err(MemfitError::Persistence(_))));
    }
}
