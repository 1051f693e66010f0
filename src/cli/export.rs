//! `db:export` command
//!
//! Wires the table resolver, flag builder, command assembler and executor
//! together and reports progress on the console.

use std::io::Write;
use std::sync::Arc;

use super::output::Console;
use super::prompt::FilenamePrompt;
use crate::dump::{dump_file_name, timestamp, CommandAssembler, ConnectionSettings};
use crate::error::{Error, Result};
use crate::execution::{execute_job, CommandRunner, ExecutionMode};
use crate::models::{AssembledCommand, Destination, DumpJob, ExportRequest, TableGroupCatalog};
use crate::tables::{TableCatalog, TableResolver};

/// What an export ended with
#[derive(Debug)]
pub enum ExportOutcome {
    /// No table selected, nothing was run
    NoTables,
    /// `--only-command`: the command was printed, not run
    CommandPrinted(AssembledCommand),
    /// The dump ran successfully
    Dumped(DumpJob),
}

/// The `db:export` command
pub struct ExportCommand {
    connection: ConnectionSettings,
    groups: TableGroupCatalog,
    assembler: CommandAssembler,
    tables: Box<dyn TableCatalog>,
    runner: Arc<dyn CommandRunner>,
    prompt: Option<Box<dyn FilenamePrompt>>,
    strict: bool,
    timestamp: Option<String>,
}

impl ExportCommand {
    pub fn new(
        connection: ConnectionSettings,
        groups: TableGroupCatalog,
        assembler: CommandAssembler,
        tables: Box<dyn TableCatalog>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            connection,
            groups,
            assembler,
            tables,
            runner,
            prompt: None,
            strict: false,
            timestamp: None,
        }
    }

    /// Ask for the file name unless `--force` is given
    pub fn with_prompt(mut self, prompt: Box<dyn FilenamePrompt>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Fail on selectors that match nothing, regardless of `--strict`
    pub fn with_strict_selectors(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Use a fixed timestamp for generated file names
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Run the export.
    ///
    /// A failing dump prints its output and return code, then fails with
    /// [`Error::ChildProcessFailed`].
    pub async fn run<W: Write>(
        &self,
        request: &ExportRequest,
        console: &mut Console<W>,
    ) -> Result<ExportOutcome> {
        if !request.is_quiet() {
            console.section("Dump MySQL Database")?;
        }

        let destination = self.destination(request)?;
        let flags = request.dump_options.build_flags();

        let tables = match self.resolve_tables(request).await {
            Err(err @ Error::ChildProcessFailed { .. }) => {
                report_child_failure(&err, console)?;
                return Err(err);
            }
            result => result?,
        };
        if tables.is_empty() {
            console.line("No tables for export.")?;
            return Ok(ExportOutcome::NoTables);
        }
        if !request.is_quiet() {
            console.line(&format!(
                "Exporting data and structure for: {}",
                tables.join(" ")
            ))?;
        }

        let command = self.assembler.assemble(
            &self.connection,
            &flags,
            &tables,
            request.compression,
            &destination,
        );

        if request.only_command && !request.print_only_filename {
            console.line(&command.command_line)?;
            return Ok(ExportOutcome::CommandPrinted(command));
        }

        let job = self.execute(request, command, console).await?;

        if request.print_only_filename {
            if let Some(path) = &job.command.output_path {
                console.line(path)?;
            }
        }

        Ok(ExportOutcome::Dumped(job))
    }

    /// Dump destination, asking for the file name when allowed
    fn destination(&self, request: &ExportRequest) -> Result<Destination> {
        if request.stdout {
            return Ok(Destination::Stdout);
        }

        let stamp = self.timestamp.clone().unwrap_or_else(timestamp);
        let name = dump_file_name(
            &self.connection.dbname,
            request.filename.as_deref(),
            request.add_time,
            &stamp,
            request.compression,
        );

        let name = match (&self.prompt, &request.filename, request.force) {
            (Some(prompt), None, false) => {
                let answer = prompt.ask("Filename for SQL dump", &name)?;
                request.compression.file_name(&answer)
            }
            _ => name,
        };

        Ok(Destination::File(name))
    }

    async fn resolve_tables(&self, request: &ExportRequest) -> Result<Vec<String>> {
        if request.table_selectors.is_empty() {
            return Ok(Vec::new());
        }

        let actual_tables = self.tables.list_tables().await?;
        TableResolver::new(&self.groups)
            .with_prefix(self.connection.table_prefix.clone())
            .strict(self.strict || request.strict)
            .resolve(&request.table_selectors, &actual_tables)
    }

    async fn execute<W: Write>(
        &self,
        request: &ExportRequest,
        command: AssembledCommand,
        console: &mut Console<W>,
    ) -> Result<DumpJob> {
        if !request.is_quiet() {
            console.line(&format!(
                "Start dumping database {} to file {}",
                self.connection.dbname,
                command.output_path.as_deref().unwrap_or_default()
            ))?;
        }

        let mode = if request.stdout {
            ExecutionMode::Passthrough
        } else {
            ExecutionMode::Captured
        };

        let mut job = DumpJob::new(command);
        execute_job(self.runner.as_ref(), &mut job, mode).await?;

        if job.failed() {
            let err = Error::ChildProcessFailed {
                command: self.assembler.program().to_string(),
                exit_code: job.exit_code.unwrap_or(-1),
                output: job.output,
            };
            report_child_failure(&err, console)?;
            return Err(err);
        }

        if !request.stdout && !request.print_only_filename {
            console.line("Finished")?;
        }

        Ok(job)
    }
}

/// Print a failed child's output and return code
fn report_child_failure<W: Write>(err: &Error, console: &mut Console<W>) -> Result<()> {
    if let Error::ChildProcessFailed {
        exit_code, output, ..
    } = err
    {
        if !output.is_empty() {
            console.error(&output.join("\n"))?;
        }
        console.error(&format!("Return Code: {}. ABORTED.", exit_code))?;
    }
    Ok(())
}
