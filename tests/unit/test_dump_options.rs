//! Unit tests for mysqldump flag building
//!
//! These tests check the flag set and its canonical order.

use magexport::{DumpOptions, Error};

#[cfg(test)]
mod dump_options_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(
            DumpOptions::default().build_flags(),
            vec!["--single-transaction", "--quick"]
        );
    }

    #[test]
    fn test_no_single_transaction() {
        let options = DumpOptions {
            no_single_transaction: true,
            ..Default::default()
        };
        assert!(options.build_flags().is_empty());
    }

    #[test]
    fn test_all_options_in_canonical_order() {
        let options = DumpOptions {
            no_single_transaction: false,
            human_readable: true,
            add_routines: true,
            data_only: true,
            skip_add_locks: true,
            row_limit: Some(10),
        };

        assert_eq!(
            options.build_flags(),
            vec![
                "--single-transaction",
                "--quick",
                "--complete-insert",
                "--skip-extended-insert",
                "--routines",
                "--no-create-info",
                "--skip-add-locks",
                "--where=\"true LIMIT 10\"",
            ]
        );
    }

    #[test]
    fn test_zero_row_limit_is_kept() {
        let options = DumpOptions {
            row_limit: Some(0),
            ..Default::default()
        };
        assert!(options
            .build_flags()
            .contains(&"--where=\"true LIMIT 0\"".to_string()));
    }

    #[test]
    fn test_parse_row_limit() {
        assert_eq!(DumpOptions::parse_row_limit("25").unwrap(), 25);
        assert_eq!(DumpOptions::parse_row_limit(" 7 ").unwrap(), 7);
    }

    #[test]
    fn test_parse_row_limit_accepts_full_u64_range() {
        let max = u64::MAX.to_string();
        assert_eq!(DumpOptions::parse_row_limit(&max).unwrap(), u64::MAX);

        let above_i64 = (i64::MAX as u64 + 1).to_string();
        assert_eq!(
            DumpOptions::parse_row_limit(&above_i64).unwrap(),
            i64::MAX as u64 + 1
        );
    }

    #[test]
    fn test_parse_row_limit_rejects_garbage() {
        for value in ["ten", "1.5", "", "-1"] {
            match DumpOptions::parse_row_limit(value) {
                Err(Error::InvalidOption { option, .. }) => assert_eq!(option, "where-limit"),
                other => panic!("'{}' gave {:?}", value, other),
            }
        }
    }
}
