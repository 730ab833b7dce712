//! Simulator core
//!
//! - [`memory`] - Unit array holding one owner tag per unit
//! - [`blocks`] - Block view: maximal runs of equal tag
//! - [`strategy`] - First/best/worst-fit run selection
//! - [`engine`] - Allocate/free requests over the unit array
//! - [`fragmentation`] - Free-space statistics
//! - [`state`] - Text state file adapter
//! - [`command`] - Typed command-file requests
//! - [`processor`] - Load, apply, save cycle for one command
//! - [`audit`] - Failure log
//! - [`config`] - TOML configuration

pub mod audit;
pub mod blocks;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod fragmentation;
pub mod memory;
pub mod processor;
pub mod state;
pub mod strategy;

#[cfg(test)]
mod integration_tests;
