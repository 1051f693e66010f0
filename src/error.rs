//! Error types and Result aliases for magexport

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for magexport operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for magexport
#[derive(Debug, Error)]
pub enum Error {
    // === Table resolution errors ===
    /// `@group` reference to a group that is not defined
    #[error("Table group '@{group}' is not defined")]
    TableGroupNotFound { group: String },

    /// Selector matched no table (strict mode only)
    #[error("Selector '{selector}' does not match any table")]
    NoTablesMatched { selector: String },

    /// Table group references itself, directly or through other groups
    #[error("Table group '@{group}' references itself")]
    TableGroupCycle { group: String },

    // === Option errors ===
    /// Option value failed validation
    #[error("Invalid value for option '--{option}': {reason}")]
    InvalidOption { option: String, reason: String },

    /// Compression codec is not supported
    #[error("Unknown compression '{codec}' (supported: none, gzip, bzip2, zstd)")]
    UnknownCompression { codec: String },

    // === Process errors ===
    /// Failed to spawn the shell running the command
    #[error("Failed to spawn command '{command}': {reason}")]
    CommandSpawnFailed { command: String, reason: String },

    /// Command exited with a non-zero status
    #[error("Command '{command}' failed with return code {exit_code}")]
    ChildProcessFailed {
        command: String,
        exit_code: i32,
        output: Vec<String>,
    },

    /// Required client binary is not installed
    #[error("Command '{command}' not found in PATH")]
    CommandNotFound { command: String },

    // === Configuration errors ===
    /// Failed to load configuration file
    #[error("Failed to load config from '{}': {reason}", path.display())]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Failed to parse configuration
    #[error("Failed to parse {format} config: {reason}")]
    ConfigParseFailed { format: String, reason: String },

    /// Configuration validation failed
    #[error("Configuration validation failed for '{field}': {reason}")]
    ConfigValidationFailed { field: String, reason: String },

    /// Explicitly requested configuration file does not exist
    #[error("Configuration file not found")]
    ConfigNotFound,

    /// Magento database settings file is missing
    #[error("Magento database settings not found at '{}'", path.display())]
    DbSettingsNotFound { path: PathBuf },

    /// Magento database settings lack a required value
    #[error("Magento database settings are missing '{field}'")]
    DbSettingsIncomplete { field: String },

    // === I/O and serialization errors ===
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Regex compilation errors
    #[error("Regex compilation error: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Exit code the process should terminate with for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ChildProcessFailed { exit_code, .. } if *exit_code > 0 => *exit_code,
            _ => 1,
        }
    }
}
