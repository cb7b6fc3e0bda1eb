//! Command-Line Interface
//!
//! This crate provides the `settle` command for recording shared bills and
//! planning their settlement.
//!
//! # Architecture
//!
//! - **Commands**: clap argument definitions and command execution
//! - **Config**: `SETTLE_*` environment configuration
//! - **Render**: text and JSON output
//! - **Error Handling**: one error type for every failing command
//!
//! # Example
//!
//! ```bash
//! settle new --name trip --workspace work_dir --user A --user B
//! settle --state work_dir/trip.json add-bill --id dinner --payment A=100
//! settle --state work_dir/trip.json flow
//! # B ⯈ 50.00 ⯈ A
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod render;

pub use commands::{run, Cli, Command};
pub use config::CliConfig;
pub use error::CliError;
