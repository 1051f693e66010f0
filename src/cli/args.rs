//! Command line arguments

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::dump::{CompressionCodec, DumpOptions};
use crate::error::Result;
use crate::models::{AddTime, ExportRequest};

const EXPORT_HELP: &str = "\
Exports a specified set of tables from a Magento database with `mysqldump`.
You must have installed the MySQL client tools.

On debian systems run `apt-get install mysql-client` to do that.

The command reads app/etc/local.xml to find the correct settings.

Exports table(s) from your database with the option to limit the number of
rows. This is useful for creating SQL files used in automated tests.

   $ magexport db:export --tables=\"@customers\"

If you like to prepend a timestamp to the dump name the --add-time option can
be used, --add-time=suffix appends it instead.";

/// magexport command line
#[derive(Debug, Parser)]
#[command(name = "magexport", version, about = "Partial Magento database exports with mysqldump")]
pub struct Cli {
    /// Magento root directory
    #[arg(long, global = true, value_name = "PATH")]
    pub root_dir: Option<PathBuf>,

    /// Configuration file
    #[arg(long, global = true, value_name = "PATH", env = "MAGEXPORT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Dumps a partial database with the mysqldump cli client according to the settings in local.xml
    #[command(name = "db:export", long_about = EXPORT_HELP)]
    Export(ExportArgs),
}

/// Arguments of `db:export`
#[derive(Debug, Clone, Default, Args)]
pub struct ExportArgs {
    /// Dump filename
    pub filename: Option<String>,

    /// Adds time to filename (only if filename was not provided): prefix, suffix or a boolean
    #[arg(
        short = 't',
        long,
        value_name = "WHEN",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "prefix"
    )]
    pub add_time: Option<String>,

    /// Compress the dump file using one of the supported algorithms (none, gzip, bzip2, zstd)
    #[arg(short = 'c', long, value_name = "CODEC")]
    pub compression: Option<String>,

    /// Tables to include in the export
    #[arg(short = 'l', long, value_name = "SELECTORS")]
    pub tables: Option<String>,

    /// Limit the number of rows dumped
    #[arg(short = 'w', long, value_name = "N", allow_hyphen_values = true)]
    pub where_limit: Option<String>,

    /// Print only mysqldump command. Do not execute
    #[arg(long)]
    pub only_command: bool,

    /// Execute and prints no output except the dump filename
    #[arg(long)]
    pub print_only_filename: bool,

    /// Do not use single-transaction (not recommended, this is blocking)
    #[arg(long)]
    pub no_single_transaction: bool,

    /// Dump to stdout
    #[arg(long)]
    pub stdout: bool,

    /// Do not prompt if all options are defined
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Use a single insert with column names per row. Useful to track database differences
    #[arg(long)]
    pub human_readable: bool,

    /// Include stored routines in dump (procedures & functions)
    #[arg(long)]
    pub add_routines: bool,

    /// Dump only the data. Do not dump the table information
    #[arg(long)]
    pub data_only: bool,

    /// Do not add table locks to the dump
    #[arg(long)]
    pub skip_add_locks: bool,

    /// Fail when a table selector matches no table
    #[arg(long)]
    pub strict: bool,
}

impl ExportArgs {
    /// Validate the raw arguments into an export request
    pub fn into_request(self) -> Result<ExportRequest> {
        let add_time = match self.add_time.as_deref() {
            Some(value) => value.parse()?,
            None => AddTime::No,
        };

        let compression = match self.compression.as_deref() {
            Some(value) => value.parse()?,
            None => CompressionCodec::None,
        };

        let row_limit = self
            .where_limit
            .as_deref()
            .map(DumpOptions::parse_row_limit)
            .transpose()?;

        Ok(ExportRequest {
            filename: self.filename,
            add_time,
            table_selectors: self
                .tables
                .as_deref()
                .map(ExportRequest::parse_selectors)
                .unwrap_or_default(),
            dump_options: DumpOptions {
                no_single_transaction: self.no_single_transaction,
                human_readable: self.human_readable,
                add_routines: self.add_routines,
                data_only: self.data_only,
                skip_add_locks: self.skip_add_locks,
                row_limit,
            },
            compression,
            stdout: self.stdout,
            only_command: self.only_command,
            print_only_filename: self.print_only_filename,
            force: self.force,
            strict: self.strict,
        })
    }
}
