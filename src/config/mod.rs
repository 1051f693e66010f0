//! Configuration management for magexport
//!
//! Configuration is read from a TOML (or JSON) file and layered over
//! built-in defaults. It carries the table-group catalog, dump defaults and
//! optional database overrides for the settings detected from Magento's
//! `app/etc/local.xml`.

pub mod loader;
pub mod local_xml;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::{TableGroup, TableGroupCatalog};

/// Main configuration structure for magexport
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Magento installation settings
    pub magento: MagentoConfig,

    /// Database connection overrides
    pub database: DatabaseConfig,

    /// Dump command settings
    pub dump: DumpConfig,

    /// Extra table groups, replacing built-in groups with the same id
    pub table_groups: Vec<TableGroup>,
}

impl Config {
    /// Table groups available to `@group` selectors
    pub fn table_group_catalog(&self) -> TableGroupCatalog {
        let mut catalog = if self.magento.builtin_table_groups {
            TableGroupCatalog::builtin()
        } else {
            TableGroupCatalog::default()
        };
        catalog.merge(TableGroupCatalog::new(self.table_groups.clone()));
        catalog
    }
}

/// Magento installation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MagentoConfig {
    /// Magento root directory, the current directory when unset
    pub root_dir: Option<PathBuf>,

    /// Database settings file, relative to the root directory
    pub local_xml: PathBuf,

    /// Whether the built-in table groups are available
    pub builtin_table_groups: bool,
}

impl Default for MagentoConfig {
    fn default() -> Self {
        Self {
            root_dir: None,
            local_xml: PathBuf::from("app/etc/local.xml"),
            builtin_table_groups: true,
        }
    }
}

/// Database connection overrides, each replacing the detected value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub unix_socket: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub dbname: Option<String>,
    pub table_prefix: Option<String>,
}

impl DatabaseConfig {
    /// Whether the overrides alone can describe a connection
    pub fn is_complete(&self) -> bool {
        self.username.is_some() && self.dbname.is_some()
    }
}

/// Dump command settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DumpConfig {
    /// mysqldump executable
    pub mysqldump: String,

    /// mysql client executable, used to list tables
    pub mysql: String,

    /// Remove DEFINER clauses from the dump
    pub strip_definers: bool,

    /// Extra shell stages piped after mysqldump
    pub post_dump_pipe: Vec<String>,

    /// Fail on selectors that match no table
    pub strict_selectors: bool,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            mysqldump: "mysqldump".to_string(),
            mysql: "mysql".to_string(),
            strip_definers: true,
            post_dump_pipe: Vec::new(),
            strict_selectors: false,
        }
    }
}
