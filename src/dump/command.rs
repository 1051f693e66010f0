//! Dump command assembly
//!
//! Builds the single shell command line of an export:
//!
//! ```text
//! mysqldump <flags> <connection> <tables> [| post-dump stages] [| compressor] [>> 'file']
//! ```

use chrono::Local;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use super::compression::CompressionCodec;
use super::connection::ConnectionSettings;
use crate::config::DumpConfig;
use crate::models::{AddTime, AssembledCommand, Destination};

/// sed expression removing `DEFINER=` clauses from views, triggers and routines
const STRIP_DEFINERS_EXPRESSION: &str = r"s/DEFINER=[^*]*\*/\*/";

static BARE_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("static regex is valid"));

/// Quote a value for a POSIX shell
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Quote a table name only when it is not a plain identifier
fn quote_table(table: &str) -> String {
    if BARE_WORD.is_match(table) {
        table.to_string()
    } else {
        shell_quote(table)
    }
}

/// Post-dump stage stripping DEFINER clauses
pub fn strip_definers_stage() -> String {
    format!(
        "LANG=C LC_CTYPE=C LC_ALL=C sed -e {}",
        shell_quote(STRIP_DEFINERS_EXPRESSION)
    )
}

/// Assembles dump command lines
#[derive(Debug, Clone)]
pub struct CommandAssembler {
    /// mysqldump binary
    mysqldump: String,
    /// Stages piped after mysqldump, before compression
    pipe_stages: Vec<String>,
}

impl CommandAssembler {
    pub fn new(mysqldump: impl Into<String>) -> Self {
        Self {
            mysqldump: mysqldump.into(),
            pipe_stages: Vec::new(),
        }
    }

    /// Assembler configured from the `[dump]` section
    pub fn from_config(config: &DumpConfig) -> Self {
        let mut assembler = Self::new(config.mysqldump.clone());
        if config.strip_definers {
            assembler = assembler.with_pipe_stage(strip_definers_stage());
        }
        for stage in &config.post_dump_pipe {
            assembler = assembler.with_pipe_stage(stage.clone());
        }
        assembler
    }

    /// mysqldump binary the command lines start with
    pub fn program(&self) -> &str {
        &self.mysqldump
    }

    /// Append a post-dump pipe stage
    pub fn with_pipe_stage(mut self, stage: impl Into<String>) -> Self {
        self.pipe_stages.push(stage.into());
        self
    }

    /// Pipe suffix appended to the bare mysqldump invocation
    pub fn post_dump_pipe(&self) -> String {
        self.pipe_stages
            .iter()
            .map(|stage| format!(" | {}", stage))
            .collect()
    }

    /// Build the complete command line
    pub fn assemble(
        &self,
        connection: &ConnectionSettings,
        flags: &[String],
        tables: &[String],
        compression: CompressionCodec,
        destination: &Destination,
    ) -> AssembledCommand {
        let mut command = format!("{} ", self.mysqldump);
        for flag in flags {
            command.push_str(flag);
            command.push(' ');
        }
        command.push_str(&connection.client_tool_connection_string());
        command.push(' ');
        for table in tables {
            command.push_str(&quote_table(table));
            command.push(' ');
        }

        command.push_str(&self.post_dump_pipe());
        let mut command = compression.compressing_command(&command);

        if let Destination::File(path) = destination {
            command.push_str(" >> ");
            command.push_str(&shell_quote(path));
        }

        debug!("Assembled dump command for {} table(s)", tables.len());

        AssembledCommand {
            command_line: command,
            output_path: destination.path().map(str::to_string),
        }
    }
}

/// Current local time formatted for file names
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%d_%H%M%S").to_string()
}

/// Derive the dump file name.
///
/// Without an explicit name the database name is used. A name ending in `/`
/// (or naming an existing directory) receives the default name inside it.
/// The timestamp is applied to the default name, or to the stem of an
/// explicit name. The codec finally fixes the extension.
pub fn dump_file_name(
    dbname: &str,
    filename: Option<&str>,
    add_time: AddTime,
    timestamp: &str,
    compression: CompressionCodec,
) -> String {
    let (prefix, suffix) = match add_time {
        AddTime::No => (String::new(), String::new()),
        AddTime::Prefix => (format!("{}_", timestamp), String::new()),
        AddTime::Suffix => (String::new(), format!("_{}", timestamp)),
    };
    let default_name = format!("{}{}{}.sql", prefix, dbname, suffix);

    let name = match filename.filter(|name| !name.is_empty()) {
        None => default_name,
        Some(dir) if dir.ends_with('/') || Path::new(dir).is_dir() => {
            format!("{}/{}", dir.trim_end_matches('/'), default_name)
        }
        Some(name) if add_time == AddTime::No => name.to_string(),
        Some(name) => {
            let path = Path::new(name);
            let stem = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_default();
            let extension = path
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default();
            let file = format!("{}{}{}{}", prefix, stem, suffix, extension);

            match path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
                Some(parent) => parent.join(file).to_string_lossy().into_owned(),
                None => file,
            }
        }
    };

    compression.file_name(&name)
}
