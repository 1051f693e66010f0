//! Command line interface
//!
//! Argument definitions, console output and the `db:export` command.

pub mod args;
pub mod export;
pub mod output;
pub mod prompt;

pub use args::{Cli, Commands, ExportArgs};
pub use export::{ExportCommand, ExportOutcome};
pub use output::Console;
pub use prompt::{FilenamePrompt, StdinPrompt};
