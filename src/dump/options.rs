//! mysqldump flag builder

use crate::error::{Error, Result};

/// Recognized dump options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// Skip `--single-transaction --quick` (blocking dump)
    pub no_single_transaction: bool,
    /// One complete INSERT per row
    pub human_readable: bool,
    /// Include stored procedures and functions
    pub add_routines: bool,
    /// Skip CREATE TABLE statements
    pub data_only: bool,
    /// Do not wrap inserts in LOCK TABLES
    pub skip_add_locks: bool,
    /// Maximum number of rows per table
    pub row_limit: Option<u64>,
}

impl DumpOptions {
    /// Parse a `--where-limit` value.
    pub fn parse_row_limit(value: &str) -> Result<u64> {
        let trimmed = value.trim();
        if let Ok(limit) = trimmed.parse::<u64>() {
            return Ok(limit);
        }

        let reason = match trimmed.parse::<i128>() {
            Ok(limit) if limit < 0 => format!("row limit must not be negative, got {}", limit),
            Ok(limit) => format!("row limit {} is too large", limit),
            Err(_) => format!("'{}' is not an integer", trimmed),
        };
        Err(Error::InvalidOption {
            option: "where-limit".to_string(),
            reason,
        })
    }

    /// Flags in canonical order, independent of how the options were set
    pub fn build_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();

        if !self.no_single_transaction {
            flags.push("--single-transaction".to_string());
            flags.push("--quick".to_string());
        }

        if self.human_readable {
            flags.push("--complete-insert".to_string());
            flags.push("--skip-extended-insert".to_string());
        }

        if self.add_routines {
            flags.push("--routines".to_string());
        }

        if self.data_only {
            flags.push("--no-create-info".to_string());
        }

        if self.skip_add_locks {
            flags.push("--skip-add-locks".to_string());
        }

        if let Some(limit) = self.row_limit {
            flags.push(format!("--where=\"true LIMIT {}\"", limit));
        }

        trace!("Built dump flags: {:?}", flags);
        flags
    }
}
