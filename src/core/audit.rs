//! Failure log for rejected requests
//!
//! Appends one line per failed request:
//!
//! ```text
//! [2025-06-01 14:03:22] ERRO: Processo 4 | Best Fit | Motivo: memória insuficiente
//! ```

use crate::core::command::Command;
use crate::error::{MemfitError, Result};
use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Timestamp layout of a log line
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One failed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    pub timestamp: DateTime<Local>,
    /// Process id named in the request
    pub owner: u32,
    /// Operation label, e.g. "First Fit" or "Liberar"
    pub method: String,
    /// Short reason text
    pub reason: String,
}

impl FailureRecord {
    /// Record stamped with the current local time
    pub fn new(owner: u32, method: impl Into<String>, reason: impl Into<String>) -> Self {
        FailureRecord {
            timestamp: Local::now(),
            owner,
            method: method.into(),
            reason: reason.into(),
        }
    }

    /// Record describing why `command` failed with `error`
    pub fn for_command(command: &Command, error: &MemfitError) -> Self {
        let method = match command {
            Command::Allocate { strategy, .. } => strategy.display_name(),
            Command::Free { .. } => "Liberar",
        };
        FailureRecord::new(command.owner(), method, error.reason())
    }

    /// Log line without trailing newline
    pub fn to_line(&self) -> String {
        format!(
            "[{}] ERRO: Processo {} | {} | Motivo: {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.owner,
            self.method,
            self.reason
        )
    }
}

/// Append-only failure log file
#[derive(Debug, Clone)]
pub struct FailureLog {
    path: PathBuf,
}

impl FailureLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FailureLog { path: path.into() }
    }

    /// Log at `path`, or `None` when the path is empty
    pub fn from_optional(path: Option<&Path>) -> Option<Self> {
        path.filter(|p| !p.as_os_str().is_empty()).map(FailureLog::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `record` as one line
    pub fn append(&self, record: &FailureRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| MemfitError::io(&self.path, e))?;
        writeln!(file, "{}", record.to_line()).map_err(|e| MemfitError::io(&self.path, e))
    }

    /// Append `record`, reporting write failures through tracing only
    pub fn append_quietly(&self, record: &FailureRecord) {
        if let Err(e) = self.append(record) {
            warn!(path = %self.path.display(), error = %e, "could not write failure log");
        }
    }
}
