//! Typed requests read from the command file
//!
//! Supported forms:
//! - `alocar <pid> <tamanho> <first|best|worst>`
//! - `liberar <pid>`
//!
//! Arguments are parsed and validated before anything reaches the engine.

use crate::core::strategy::Strategy;
use crate::error::{MemfitError, Result};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// A single request for the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Allocate {
        owner: u32,
        size: usize,
        strategy: Strategy,
    },
    Free {
        owner: u32,
    },
}

impl Command {
    /// Owner the request refers to
    pub fn owner(&self) -> u32 {
        match *self {
            Command::Allocate { owner, .. } | Command::Free { owner } => owner,
        }
    }

    /// Read the first command from `path`
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| MemfitError::io(path, e))?;
        text.parse()
    }
}

fn parse_owner(token: Option<&str>) -> Result<u32> {
    let token = token.ok_or_else(|| MemfitError::InvalidInput("PID ausente".to_string()))?;
    match token.parse::<u32>() {
        Ok(owner) if owner > 0 => Ok(owner),
        _ => Err(MemfitError::InvalidInput(format!(
            "PID '{}' deve ser um inteiro positivo",
            token
        ))),
    }
}

fn parse_size(token: Option<&str>) -> Result<usize> {
    let token = token.ok_or_else(|| MemfitError::InvalidInput("tamanho ausente".to_string()))?;
    match token.parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(MemfitError::InvalidInput(format!(
            "tamanho '{}' deve ser um inteiro positivo",
            token
        ))),
    }
}

impl FromStr for Command {
    type Err = MemfitError;

    /// Parse the first non-empty line; anything after it is ignored
    fn from_str(s: &str) -> Result<Self> {
        let line = s
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .ok_or_else(|| MemfitError::InvalidInput("comando vazio".to_string()))?;

        let mut tokens = line.split_whitespace();
        let verb = tokens.next().unwrap_or_default();

        let command = match verb {
            "alocar" => {
                let owner = parse_owner(tokens.next())?;
                let size = parse_size(tokens.next())?;
                let strategy = tokens
                    .next()
                    .ok_or_else(|| MemfitError::InvalidInput("algoritmo ausente".to_string()))?
                    .parse::<Strategy>()?;
                Command::Allocate {
                    owner,
                    size,
                    strategy,
                }
            }
            "liberar" => Command::Free {
                owner: parse_owner(tokens.next())?,
            },
            other => {
                return Err(MemfitError::InvalidInput(format!(
                    "comando '{}' desconhecido",
                    other
                )))
            }
        };

        if let Some(extra) = tokens.next() {
            return Err(MemfitError::InvalidInput(format!(
                "argumento inesperado '{}'",
                extra
            )));
        }

        Ok(command)
    }
}

/// Command-file form of the request
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Allocate {
                owner,
                size,
                strategy,
            } => write!(f, "alocar {} {} {}", owner, size, strategy),
            Command::Free { owner } => write!(f, "liberar {}", owner),
        }
    }
}
