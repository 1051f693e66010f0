//! magexport - partial Magento database exports with `mysqldump`
//!
//! This library provides the `db:export` command: it expands table
//! selectors into table names, builds the `mysqldump` flags, assembles one
//! shell command line and runs it.
//!
//! ## Module Organization
//!
//! - [`tables`] - Table selector resolution (`*`, `?` and `@group`) and live table listings
//! - [`dump`] - Dump flags, connection strings, compression and command assembly
//! - [`execution`] - Running command lines through the platform shell
//! - [`config`] - Configuration loading and Magento `local.xml` detection
//! - [`models`] - Data structures (ExportRequest, TableGroup, DumpJob)
//! - [`cli`] - Argument parsing, console output and the `db:export` command
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Pipeline
//!
//! ```text
//! CLI flags -> TableResolver -> DumpOptions::build_flags -> CommandAssembler -> ShellExecutor
//! ```
//!
//! Everything is created per invocation; nothing is shared between exports.

#[macro_use]
extern crate tracing;

pub mod cli;
pub mod config;
pub mod dump;
pub mod error;
pub mod execution;
pub mod models;
pub mod platform;
pub mod tables;

// Re-exports for core functionality
pub use config::Config;
pub use error::{Error, Result};

pub use cli::{ExportCommand, ExportOutcome};
pub use config::loader::ConfigLoader;
pub use dump::{CommandAssembler, CompressionCodec, ConnectionSettings, DumpOptions};
pub use execution::{CommandRunner, ExecutionMode, ExecutionOutcome, ShellExecutor};
pub use tables::{resolve, TableResolver};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
