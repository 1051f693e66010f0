//! mysqldump invocation building
//!
//! Turns typed dump options, connection settings and a resolved table list
//! into one shell command line.

pub mod command;
pub mod compression;
pub mod connection;
pub mod options;

pub use command::{dump_file_name, shell_quote, strip_definers_stage, timestamp, CommandAssembler};
pub use compression::CompressionCodec;
pub use connection::ConnectionSettings;
pub use options::DumpOptions;
