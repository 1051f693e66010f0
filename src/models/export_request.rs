//! Export Request Model
//!
//! The validated, strongly-typed form of one `db:export` invocation.

use std::str::FromStr;

use crate::dump::{CompressionCodec, DumpOptions};
use crate::error::{Error, Result};

/// Where the timestamp goes in a generated file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddTime {
    /// No timestamp
    #[default]
    No,
    /// `<timestamp>_<name>.sql`
    Prefix,
    /// `<name>_<timestamp>.sql`
    Suffix,
}

impl FromStr for AddTime {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "true" | "yes" | "1" | "prefix" => Ok(AddTime::Prefix),
            "suffix" => Ok(AddTime::Suffix),
            "false" | "no" | "0" => Ok(AddTime::No),
            other => Err(Error::InvalidOption {
                option: "add-time".to_string(),
                reason: format!("expected a boolean, 'prefix' or 'suffix', got '{}'", other),
            }),
        }
    }
}

/// Output destination of the dump
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Stream the dump to standard output
    Stdout,
    /// Append the dump to a file
    File(String),
}

impl Destination {
    pub fn path(&self) -> Option<&str> {
        match self {
            Destination::Stdout => None,
            Destination::File(path) => Some(path),
        }
    }
}

/// One `db:export` invocation, immutable once built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportRequest {
    /// Explicit dump file name
    pub filename: Option<String>,
    /// Timestamp placement for the file name
    pub add_time: AddTime,
    /// Table names, wildcards and `@group` references
    pub table_selectors: Vec<String>,
    /// mysqldump flags
    pub dump_options: DumpOptions,
    /// Compression applied to the dump stream
    pub compression: CompressionCodec,
    /// Dump to stdout instead of a file
    pub stdout: bool,
    /// Print the command instead of running it
    pub only_command: bool,
    /// Run, then print nothing but the file name
    pub print_only_filename: bool,
    /// Never prompt
    pub force: bool,
    /// Fail on selectors that match nothing
    pub strict: bool,
}

impl ExportRequest {
    /// Split a `--tables` value into selectors
    pub fn parse_selectors(value: &str) -> Vec<String> {
        value.split_whitespace().map(str::to_string).collect()
    }

    /// Whether progress messages are suppressed
    pub fn is_quiet(&self) -> bool {
        self.stdout || self.only_command || self.print_only_filename
    }
}
