//! Property-based tests for dump options and file names

use magexport::dump::dump_file_name;
use magexport::models::AddTime;
use magexport::{CompressionCodec, DumpOptions};
use proptest::prelude::*;

fn add_time() -> impl Strategy<Value = AddTime> {
    prop_oneof![Just(AddTime::No), Just(AddTime::Prefix), Just(AddTime::Suffix)]
}

fn codec() -> impl Strategy<Value = CompressionCodec> {
    prop::sample::select(CompressionCodec::ALL.to_vec())
}

proptest! {
    #[test]
    fn test_parse_row_limit_accepts_non_negative(limit in any::<u64>()) {
        prop_assert_eq!(DumpOptions::parse_row_limit(&limit.to_string()).unwrap(), limit);
    }

    #[test]
    fn test_parse_row_limit_rejects_negative(limit in i64::MIN..0i64) {
        prop_assert!(DumpOptions::parse_row_limit(&limit.to_string()).is_err());
    }

    #[test]
    fn test_parse_row_limit_doesnt_panic(s in "\\PC*") {
        let _ = DumpOptions::parse_row_limit(&s);
    }

    #[test]
    fn test_flags_are_unique_and_transactional_first(
        no_single_transaction in any::<bool>(),
        human_readable in any::<bool>(),
        add_routines in any::<bool>(),
        data_only in any::<bool>(),
        skip_add_locks in any::<bool>(),
        row_limit in prop::option::of(0u64..1000),
    ) {
        let options = DumpOptions {
            no_single_transaction,
            human_readable,
            add_routines,
            data_only,
            skip_add_locks,
            row_limit,
        };
        let flags = options.build_flags();

        let mut sorted = flags.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), flags.len());

        if !no_single_transaction {
            prop_assert_eq!(&flags[0], "--single-transaction");
        }
        if row_limit.is_some() {
            prop_assert!(flags.last().unwrap().starts_with("--where="));
        }
    }

    #[test]
    fn test_file_name_carries_codec_extension(
        dbname in "[a-z][a-z0-9_]{0,15}",
        add_time in add_time(),
        codec in codec(),
    ) {
        let name = dump_file_name(&dbname, None, add_time, "2024-01-01_000000", codec);
        prop_assert!(name.ends_with(&codec.extension()));
        prop_assert!(name.contains(&dbname));
    }
}
