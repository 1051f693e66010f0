//! Platform-specific operation traits
//!
//! These traits define the interface for platform-specific operations,
//! allowing for clean abstraction and easier testing.

use crate::error::Result;
use std::path::PathBuf;

/// Platform-specific filesystem operations
pub trait FilesystemOps: Send + Sync {
    /// Find a command in PATH
    fn find_command(&self, command: &str) -> Result<Option<PathBuf>>;
}

/// Platform-specific path operations
pub trait PathOps: Send + Sync {
    /// Get configuration directory
    fn config_dir(&self) -> Result<PathBuf>;

    /// Get the user's home directory
    fn home_dir(&self) -> Option<PathBuf>;
}

/// Platform-specific shell operations
pub trait ShellOps: Send + Sync {
    /// Shell used to run assembled command lines
    fn command_shell(&self) -> PathBuf;

    /// Flag that makes the shell run the next argument as a command
    fn command_flag(&self) -> &'static str;

    /// Statement run before each command line so a failing pipeline stage
    /// fails the whole pipeline
    fn pipefail_prelude(&self) -> Option<&'static str>;
}
