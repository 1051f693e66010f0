//! Test Utilities and Mocks
//!
//! Mock command runners and fixtures shared by the magexport test suites.

#![allow(dead_code)]


// Re-exports for convenience
pub use fixtures::{create_test_connection, create_test_export, selectors, table_names, MAGENTO_TABLES};
pub use mock_runner::MockRunner;
