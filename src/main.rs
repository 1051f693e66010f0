//! magexport - partial Magento database exports with mysqldump
//!
//! Parses the command line, loads configuration and the shop's database
//! settings, then runs the `db:export` command.

use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::{CommandFactory, FromArgMatches};
use tracing::{debug, info};

use magexport::cli::{Cli, Commands, Console, ExportArgs, StdinPrompt};
use magexport::config::local_xml::detect_db_settings;
use magexport::execution::ensure_command_available;
use magexport::models::TableGroupCatalog;
use magexport::tables::{table_definition_help, MysqlTableCatalog};
use magexport::{CommandAssembler, Config, ConfigLoader, Error, ExportCommand, ShellExecutor};

fn main() {
    let cli = match parse_cli() {
        Ok(cli) => cli,
        Err(e) => e.exit(),
    };

    init_logging(cli.debug);

    if let Err(e) = run(cli) {
        process::exit(report(&e));
    }
}

/// Parse arguments, listing the built-in table groups in `db:export --help`
fn parse_cli() -> Result<Cli, clap::Error> {
    let help = table_definition_help(&TableGroupCatalog::builtin());
    let matches = Cli::command()
        .mut_subcommand("db:export", |command| command.after_long_help(help))
        .try_get_matches()?;
    Cli::from_arg_matches(&matches)
}

fn init_logging(debug: bool) {
    let debug = debug
        || env::var("MAGEXPORT_DEBUG").map_or(false, |v| v == "1" || v.to_lowercase() == "true");
    let log_level = if debug { "debug" } else { "info" };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

/// Print an error and return the process exit code for it
fn report(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<Error>() {
        // The export already printed the child's output and return code
        Some(e @ Error::ChildProcessFailed { .. }) => e.exit_code(),
        Some(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
        None => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    info!("Starting magexport v{}", magexport::VERSION);

    let start_dir = match &cli.root_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("Failed to read the current directory")?,
    };
    let config = ConfigLoader::new(&start_dir).load(cli.config.as_deref())?;
    let root_dir = resolve_root_dir(&cli, &config, start_dir);
    debug!("Magento root directory: {}", root_dir.display());

    match cli.command {
        Commands::Export(args) => export(args, &config, root_dir),
    }
}

/// `--root-dir`, then the configured root, then the current directory
fn resolve_root_dir(cli: &Cli, config: &Config, current: PathBuf) -> PathBuf {
    cli.root_dir
        .clone()
        .or_else(|| config.magento.root_dir.clone())
        .unwrap_or(current)
}

fn export(args: ExportArgs, config: &Config, root_dir: PathBuf) -> anyhow::Result<()> {
    let request = args.into_request()?;
    let connection = detect_db_settings(&root_dir, &config.magento.local_xml, &config.database)?;
    debug!("Database connection: {:?}", connection);

    if !request.table_selectors.is_empty() {
        ensure_command_available(&config.dump.mysql)?;
    }
    if !request.only_command || request.print_only_filename {
        ensure_command_available(&config.dump.mysqldump)?;
        if let Some(program) = request.compression.program() {
            ensure_command_available(program)?;
        }
    }

    let mut executor = ShellExecutor::new();
    executor.set_working_dir(root_dir);
    let runner = Arc::new(executor);

    let tables = MysqlTableCatalog::new(runner.clone(), config.dump.mysql.clone(), connection.clone());
    let mut command = ExportCommand::new(
        connection,
        config.table_group_catalog(),
        CommandAssembler::from_config(&config.dump),
        Box::new(tables),
        runner,
    )
    .with_strict_selectors(config.dump.strict_selectors);

    if std::io::stdin().is_terminal() && !request.is_quiet() {
        command = command.with_prompt(Box::new(StdinPrompt));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let mut console = Console::stdout();
    runtime.block_on(command.run(&request, &mut console))?;
    Ok(())
}
