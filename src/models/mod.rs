//! Core data models for magexport
//!
//! Domain entities created per `db:export` invocation: the validated
//! request, table groups, and the assembled dump job.

pub mod dump_job;
pub mod export_request;
pub mod table_group;

// Re-exports for convenience
pub use dump_job::{AssembledCommand, DumpJob, ExecutionStatus};
pub use export_request::{AddTime, Destination, ExportRequest};
pub use table_group::{TableGroup, TableGroupCatalog};
