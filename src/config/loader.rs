//! Configuration File Loading
//!
//! Finds and loads the configuration file from a fixed list of locations,
//! falling back to built-in defaults.

use super::Config;
use crate::error::{Error, Result};
use crate::platform::Platform;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }

    /// Format implied by a file extension, TOML by default
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Configuration file loader
pub struct ConfigLoader {
    /// Search paths for configuration files, without extension
    search_paths: Vec<PathBuf>,
    /// Supported configuration file formats
    supported_formats: Vec<ConfigFormat>,
}

impl ConfigLoader {
    /// Loader searching the default locations for a Magento root
    pub fn new(root_dir: &Path) -> Self {
        Self::with_search_paths(Self::default_search_paths(root_dir))
    }

    /// Loader searching the given locations, in order
    pub fn with_search_paths(search_paths: Vec<PathBuf>) -> Self {
        Self {
            search_paths,
            supported_formats: vec![ConfigFormat::Toml, ConfigFormat::Json],
        }
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Otherwise the first readable file on the
    /// search path wins, and defaults are used when there is none.
    pub fn load(&self, explicit: Option<&Path>) -> Result<Config> {
        let config = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::ConfigNotFound);
                }
                self.load_config_file(path, ConfigFormat::from_path(path))?
            }
            None => match self.find_and_load_config()? {
                Some((path, config)) => {
                    info!("Loaded configuration from {}", path.display());
                    config
                }
                None => {
                    debug!("No configuration file found, using defaults");
                    Config::default()
                }
            },
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Find and load configuration from search paths
    fn find_and_load_config(&self) -> Result<Option<(PathBuf, Config)>> {
        for path in &self.search_paths {
            for format in &self.supported_formats {
                let config_path = Self::path_for_format(path, *format);

                if config_path.exists() {
                    match self.load_config_file(&config_path, *format) {
                        Ok(config) => return Ok(Some((config_path, config))),
                        Err(e) => {
                            // Log warning but continue searching
                            warn!(
                                "Failed to load config from {}: {}",
                                config_path.display(),
                                e
                            );
                            continue;
                        }
                    }
                }
            }
        }

        Ok(None)
    }

    /// Load a specific configuration file
    fn load_config_file(&self, path: &Path, format: ConfigFormat) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let parsed = match format {
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str(&content).map_err(|e| e.to_string()),
        };

        parsed.map_err(|reason| Error::ConfigParseFailed {
            format: format.name().to_string(),
            reason,
        })
    }

    /// Append the format's extension to an extension-less base path
    fn path_for_format(base_path: &Path, format: ConfigFormat) -> PathBuf {
        let mut name = base_path.as_os_str().to_os_string();
        name.push(".");
        name.push(format.extension());
        PathBuf::from(name)
    }

    /// Default search paths for configuration files
    fn default_search_paths(root_dir: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        let path_ops = Platform::paths();

        if let Ok(config_dir) = path_ops.config_dir() {
            paths.push(config_dir.join("magexport"));
        }

        if let Some(home) = path_ops.home_dir() {
            paths.push(home.join(".magexport"));
        }

        // Project-local configuration next to the shop
        paths.push(root_dir.join(".magexport"));

        paths
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.dump.mysqldump.trim().is_empty() {
        return Err(Error::ConfigValidationFailed {
            field: "dump.mysqldump".to_string(),
            reason: "mysqldump executable cannot be empty".to_string(),
        });
    }

    if config.dump.mysql.trim().is_empty() {
        return Err(Error::ConfigValidationFailed {
            field: "dump.mysql".to_string(),
            reason: "mysql executable cannot be empty".to_string(),
        });
    }

    if config.dump.post_dump_pipe.iter().any(|stage| stage.trim().is_empty()) {
        return Err(Error::ConfigValidationFailed {
            field: "dump.post_dump_pipe".to_string(),
            reason: "pipe stages cannot be empty".to_string(),
        });
    }

    for group in &config.table_groups {
        if group.id.is_empty()
            || group.id.starts_with('@')
            || group.id.chars().any(char::is_whitespace)
        {
            return Err(Error::ConfigValidationFailed {
                field: "table_groups.id".to_string(),
                reason: format!("'{}' is not a valid group id", group.id),
            });
        }

        if group.patterns.iter().all(|pattern| pattern.trim().is_empty()) {
            return Err(Error::ConfigValidationFailed {
                field: format!("table_groups.{}.tables", group.id),
                reason: "a table group needs at least one pattern".to_string(),
            });
        }
    }

    Ok(())
}
