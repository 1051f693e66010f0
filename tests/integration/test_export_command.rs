//! Integration Tests for the db:export command
//!
//! These tests drive `ExportCommand` end to end with a recording runner and
//! a captured console.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use magexport::cli::{Console, FilenamePrompt};
use magexport::execution::ExecutionMode;
use magexport::models::{ExecutionStatus, ExportRequest, TableGroupCatalog};
use magexport::tables::StaticTableCatalog;
use magexport::{CommandAssembler, CompressionCodec, Error, ExportCommand, ExportOutcome};
use std::sync::Arc;
use test_utils::{create_test_connection, create_test_export, MockRunner, MAGENTO_TABLES};

const TS: &str = "2024-05-01_083000";

fn export_command(runner: Arc<MockRunner>) -> ExportCommand {
    ExportCommand::new(
        create_test_connection(),
        TableGroupCatalog::builtin(),
        CommandAssembler::new("mysqldump"),
        Box::new(StaticTableCatalog::new(MAGENTO_TABLES.iter().copied())),
        runner,
    )
    .with_timestamp(TS)
}

async fn run_export(
    command: &ExportCommand,
    request: &ExportRequest,
) -> (magexport::Result<ExportOutcome>, String) {
    let mut console = Console::new(Vec::new());
    let result = command.run(request, &mut console).await;
    let output = String::from_utf8(console.into_inner()).unwrap();
    (result, output)
}

#[tokio::test]
async fn test_only_command_prints_without_running() {
    let runner = Arc::new(MockRunner::new());
    let command = export_command(runner.clone());
    let request = ExportRequest {
        only_command: true,
        ..create_test_export("catalog_product_entity")
    };

    let (result, output) = run_export(&command, &request).await;

    assert!(matches!(result, Ok(ExportOutcome::CommandPrinted(_))));
    assert!(output.contains("mysqldump"));
    assert!(output.contains("catalog_product_entity"));
    assert!(output.contains(".sql"));
    assert!(!output.contains("Dump MySQL Database"));
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn test_successful_dump_reports_progress() {
    let runner = Arc::new(MockRunner::new());
    let command = export_command(runner.clone());
    let request = create_test_export("@log core_config_data");

    let (result, output) = run_export(&command, &request).await;

    let job = match result {
        Ok(ExportOutcome::Dumped(job)) => job,
        other => panic!("unexpected result: {:?}", other),
    };
    assert_eq!(job.status, ExecutionStatus::Succeeded);
    assert_eq!(job.command.output_path.as_deref(), Some("magento.sql"));

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "",
            "Dump MySQL Database",
            "===================",
            "",
            "Exporting data and structure for: log_url log_url_info log_visitor core_config_data",
            "Start dumping database magento to file magento.sql",
            "Finished",
        ]
    );

    let commands = runner.commands();
    assert_eq!(commands.len(), 1);
    assert!(commands[0].contains("log_url log_url_info log_visitor core_config_data "));
    assert_eq!(runner.modes(), vec![ExecutionMode::Captured]);
}

#[tokio::test]
async fn test_failed_dump_reports_return_code() {
    let runner = Arc::new(MockRunner::new());
    runner.push_outcome(2, &["Access denied"]);
    let command = export_command(runner.clone());
    let request = create_test_export("core_config_data");

    let (result, output) = run_export(&command, &request).await;

    match result {
        Err(err @ Error::ChildProcessFailed { .. }) => assert_eq!(err.exit_code(), 2),
        other => panic!("unexpected result: {:?}", other),
    }

    let denied = output.find("Access denied").unwrap();
    let aborted = output.find("Return Code: 2. ABORTED.").unwrap();
    assert!(denied < aborted);
    assert!(!output.contains("Finished"));
}

#[tokio::test]
async fn test_print_only_filename() {
    let runner = Arc::new(MockRunner::new());
    let command = export_command(runner.clone());
    let request = ExportRequest {
        print_only_filename: true,
        compression: CompressionCodec::Gzip,
        ..create_test_export("log_url")
    };

    let (result, output) = run_export(&command, &request).await;

    assert!(result.is_ok());
    assert_eq!(output, "magento.sql.gz\n");
    assert!(runner.commands()[0].contains("| gzip -c "));
}

#[tokio::test]
async fn test_no_tables_skips_dump() {
    let runner = Arc::new(MockRunner::new());
    let command = export_command(runner.clone());
    let request = create_test_export("");

    let (result, output) = run_export(&command, &request).await;

    assert!(matches!(result, Ok(ExportOutcome::NoTables)));
    assert!(output.contains("No tables for export."));
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn test_stdout_passes_output_through() {
    let runner = Arc::new(MockRunner::new());
    let command = export_command(runner.clone());
    let request = ExportRequest {
        stdout: true,
        ..create_test_export("log_url")
    };

    let (result, output) = run_export(&command, &request).await;

    assert!(result.is_ok());
    assert!(output.is_empty());
    assert_eq!(runner.modes(), vec![ExecutionMode::Passthrough]);
    assert!(!runner.commands()[0].contains(">>"));
}

#[tokio::test]
async fn test_strict_selectors_fail_before_running() {
    let runner = Arc::new(MockRunner::new());
    let command = export_command(runner.clone()).with_strict_selectors(true);
    let request = create_test_export("log_url missing_table");

    let (result, _) = run_export(&command, &request).await;

    assert!(matches!(result, Err(Error::NoTablesMatched { .. })));
    assert_eq!(runner.call_count(), 0);
}

#[tokio::test]
async fn test_add_time_and_explicit_name() {
    let runner = Arc::new(MockRunner::new());
    let command = export_command(runner.clone());
    let request = ExportRequest {
        filename: Some("shop.sql".to_string()),
        add_time: magexport::models::AddTime::Suffix,
        ..create_test_export("log_url")
    };

    let (result, output) = run_export(&command, &request).await;

    assert!(result.is_ok());
    assert!(output.contains("to file shop_2024-05-01_083000.sql"));
    assert!(runner.commands()[0].ends_with(">> 'shop_2024-05-01_083000.sql'"));
}

struct AnswerPrompt(&'static str);

impl FilenamePrompt for AnswerPrompt {
    fn ask(&self, _question: &str, _default: &str) -> magexport::Result<String> {
        Ok(self.0.to_string())
    }
}

#[tokio::test]
async fn test_prompt_is_used_without_force() {
    let runner = Arc::new(MockRunner::new());
    let command = export_command(runner.clone()).with_prompt(Box::new(AnswerPrompt("answer")));
    let request = ExportRequest {
        force: false,
        ..create_test_export("log_url")
    };

    let (result, _) = run_export(&command, &request).await;

    assert!(result.is_ok());
    assert!(runner.commands()[0].ends_with(">> 'answer.sql'"));
}
