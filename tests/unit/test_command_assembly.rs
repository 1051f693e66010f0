//! Unit tests for dump command assembly
//!
//! These tests build complete command lines from flags, tables and
//! connection settings the way `db:export` does.

#[path = "../test_utils/mod.rs"]
mod test_utils;

use magexport::config::DumpConfig;
use magexport::dump::{dump_file_name, strip_definers_stage};
use magexport::models::{AddTime, Destination};
use magexport::{CommandAssembler, CompressionCodec, DumpOptions};
use test_utils::{create_test_connection, table_names};

#[cfg(test)]
mod command_assembly_tests {
    use super::*;

    const TS: &str = "2024-05-01_083000";

    #[test]
    fn test_default_export_command() {
        let file = dump_file_name("magento", None, AddTime::No, TS, CompressionCodec::None);
        let command = CommandAssembler::new("mysqldump").assemble(
            &create_test_connection(),
            &DumpOptions::default().build_flags(),
            &table_names(&["catalog_product_entity"]),
            CompressionCodec::None,
            &Destination::File(file),
        );

        assert!(command
            .command_line
            .starts_with("mysqldump --single-transaction --quick "));
        assert!(command.command_line.contains("catalog_product_entity "));
        assert!(command.command_line.ends_with(">> 'magento.sql'"));
        assert_eq!(command.output_path.as_deref(), Some("magento.sql"));
    }

    #[test]
    fn test_connection_string_follows_flags() {
        let command = CommandAssembler::new("mysqldump").assemble(
            &create_test_connection(),
            &["--routines".to_string()],
            &table_names(&["core_config_data"]),
            CompressionCodec::None,
            &Destination::Stdout,
        );

        assert!(command.command_line.starts_with(
            "mysqldump --routines -h'localhost' -u'magento' -p'secret' 'magento' core_config_data "
        ));
    }

    #[test]
    fn test_stdout_has_no_redirect() {
        for codec in CompressionCodec::ALL {
            let command = CommandAssembler::new("mysqldump").assemble(
                &create_test_connection(),
                &[],
                &table_names(&["log_url"]),
                codec,
                &Destination::Stdout,
            );
            assert!(!command.command_line.contains(">>"), "{}", codec);
            assert!(command.output_path.is_none());
        }
    }

    #[test]
    fn test_configured_assembler_strips_definers_before_compression() {
        let config = DumpConfig {
            post_dump_pipe: vec!["grep -v '^--'".to_string()],
            ..Default::default()
        };
        let command = CommandAssembler::from_config(&config).assemble(
            &create_test_connection(),
            &[],
            &table_names(&["log_url"]),
            CompressionCodec::Bzip2,
            &Destination::File("dump.sql.bz2".to_string()),
        );

        let line = &command.command_line;
        let strip = line.find(&strip_definers_stage()).unwrap();
        let grep = line.find("grep -v").unwrap();
        let bzip = line.find("| bzip2 -c").unwrap();
        assert!(strip < grep && grep < bzip);
        assert!(line.ends_with(" >> 'dump.sql.bz2'"));
    }

    #[test]
    fn test_dollar_in_table_name_is_quoted() {
        let command = CommandAssembler::new("mysqldump").assemble(
            &create_test_connection(),
            &[],
            &table_names(&["cms$block"]),
            CompressionCodec::None,
            &Destination::Stdout,
        );
        assert!(command.command_line.contains(" 'cms$block' "));
        assert!(!command.command_line.contains(" cms$block"));
    }

    #[test]
    fn test_file_name_with_quotes_is_escaped() {
        let command = CommandAssembler::new("mysqldump").assemble(
            &create_test_connection(),
            &[],
            &table_names(&["log_url"]),
            CompressionCodec::None,
            &Destination::File("it's.sql".to_string()),
        );
        assert!(command.command_line.ends_with(r" >> 'it'\''s.sql'"));
    }

    #[test]
    fn test_non_default_port_and_socket() {
        let mut connection = create_test_connection();
        connection.port = Some(3307);
        connection.unix_socket = Some("/run/mysqld.sock".to_string());

        let command = CommandAssembler::new("mysqldump").assemble(
            &connection,
            &[],
            &table_names(&["log_url"]),
            CompressionCodec::None,
            &Destination::Stdout,
        );
        assert!(command
            .command_line
            .contains("-h'localhost' -P'3307' --socket='/run/mysqld.sock' -u'magento'"));
    }
}
