//! Simulator configuration
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file is valid.
//!
//! ```toml
//! memory_size = 100
//! display_columns = 20
//! failure_log = "log.txt"
//! command_file = "comando.txt"
//! state_file = "estado.txt"
//! ```

use crate::core::memory::{DEFAULT_DISPLAY_COLUMNS, DEFAULT_MEMORY_SIZE};
use crate::error::{MemfitError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings shared by the processor binary and library callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Number of units in the simulated region
    pub memory_size: usize,

    /// Cells per row in the text grid
    pub display_columns: usize,

    /// File receiving failed-request records (`None` disables it, written
    /// as an empty string)
    #[serde(with = "optional_path")]
    pub failure_log: Option<PathBuf>,

    /// Command file read when none is given on the command line
    pub command_file: PathBuf,

    /// State file used when none is given on the command line
    pub state_file: PathBuf,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            memory_size: DEFAULT_MEMORY_SIZE,
            display_columns: DEFAULT_DISPLAY_COLUMNS,
            failure_log: Some(PathBuf::from("log.txt")),
            command_file: PathBuf::from("comando.txt"),
            state_file: PathBuf::from("estado.txt"),
        }
    }
}

impl SimConfig {
    /// Parse and validate TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: SimConfig =
            toml::from_str(text).map_err(|e| MemfitError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| MemfitError::io(path, e))?;
        Self::from_toml(&text).map_err(|e| match e {
            MemfitError::Config(msg) => MemfitError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Serialize to TOML text
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| MemfitError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.memory_size == 0 {
            return Err(MemfitError::Config(
                "memory_size deve ser maior que zero".to_string(),
            ));
        }

        if self.display_columns == 0 {
            return Err(MemfitError::Config(
                "display_columns deve ser maior que zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// `Option<PathBuf>` stored as a plain string, empty meaning `None`
mod optional_path {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::path::PathBuf;

    pub fn serialize<S: Serializer>(
        path: &Option<PathBuf>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match path {
            Some(path) => path.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<PathBuf>, D::Error> {
        let path = PathBuf::deserialize(deserializer)?;
        Ok(if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        })
    }
}
