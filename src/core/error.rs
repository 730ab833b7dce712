use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::strategy::Strategy;

/// Errors produced by the simulator.
///
/// Every message starts with `Erro:` so that a front end can detect a
/// failed request by looking for that marker on the output line.
#[derive(Error, Debug)]
pub enum MemfitError {
    #[error("Erro: entrada inválida: {0}")]
    InvalidInput(String),

    #[error("Erro: Falha na alocação PID {owner} ({strategy} fit): nenhum bloco livre com {size} unidades")]
    InsufficientSpace {
        owner: u32,
        size: usize,
        strategy: Strategy,
    },

    #[error("Erro: processo {0} já está alocado.")]
    OwnerAlreadyAllocated(u32),

    #[error("Erro: processo {0} não está alocado.")]
    OwnerNotFound(u32),

    #[error("Erro: estado inválido: {0}")]
    Persistence(String),

    #[error("Erro: configuração inválida: {0}")]
    Config(String),

    #[error("Erro de I/O em {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MemfitError {
    /// I/O failure on `path`
    pub fn io<P: AsRef<Path>>(path: P, source: io::Error) -> Self {
        MemfitError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Short reason used in the failure log
    pub fn reason(&self) -> &'static str {
        match self {
            MemfitError::InvalidInput(_) => "entrada inválida",
            MemfitError::InsufficientSpace { .. } => "memória insuficiente",
            MemfitError::OwnerAlreadyAllocated(_) => "processo já alocado",
            MemfitError::OwnerNotFound(_) => "processo não encontrado",
            MemfitError::Persistence(_) => "estado inválido",
            MemfitError::Config(_) => "configuração inválida",
            MemfitError::Io { .. } => "falha de I/O",
        }
    }
}

pub type Result<T> = std::result::Result<T, MemfitError>;
