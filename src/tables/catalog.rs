//! Live table listings

use async_trait::async_trait;
use std::sync::Arc;

use crate::dump::ConnectionSettings;
use crate::error::{Error, Result};
use crate::execution::{CommandRunner, ExecutionMode};

/// Source of the tables that exist in the database
#[async_trait]
pub trait TableCatalog: Send + Sync {
    /// Table names in database order
    async fn list_tables(&self) -> Result<Vec<String>>;
}

/// Fixed table list
#[derive(Debug, Clone, Default)]
pub struct StaticTableCatalog {
    tables: Vec<String>,
}

impl StaticTableCatalog {
    pub fn new<I, S>(tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tables: tables.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl TableCatalog for StaticTableCatalog {
    async fn list_tables(&self) -> Result<Vec<String>> {
        Ok(self.tables.clone())
    }
}

/// Lists tables with `SHOW TABLES` through the mysql client
pub struct MysqlTableCatalog {
    runner: Arc<dyn CommandRunner>,
    mysql: String,
    connection: ConnectionSettings,
}

impl MysqlTableCatalog {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        mysql: impl Into<String>,
        connection: ConnectionSettings,
    ) -> Self {
        Self {
            runner,
            mysql: mysql.into(),
            connection,
        }
    }

    /// Command line listing all tables, one per line
    pub fn command_line(&self) -> String {
        format!(
            "{} -N -B -e 'SHOW TABLES' {}",
            self.mysql,
            self.connection.client_tool_connection_string()
        )
    }
}

#[async_trait]
impl TableCatalog for MysqlTableCatalog {
    async fn list_tables(&self) -> Result<Vec<String>> {
        let command_line = self.command_line();
        let outcome = self
            .runner
            .run(&command_line, ExecutionMode::Captured)
            .await?;

        if !outcome.success() {
            return Err(Error::ChildProcessFailed {
                command: self.mysql.clone(),
                exit_code: outcome.exit_code,
                output: outcome.output,
            });
        }

        let tables: Vec<String> = outcome
            .output
            .into_iter()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        debug!("Database '{}' has {} table(s)", self.connection.dbname, tables.len());
        Ok(tables)
    }
}
