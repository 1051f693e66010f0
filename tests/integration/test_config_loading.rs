//! Integration Tests for configuration loading
//!
//! These tests write configuration and `local.xml` files into temporary
//! directories and load them the way the binary does.

use magexport::config::local_xml::detect_db_settings;
use magexport::config::DatabaseConfig;
use magexport::{ConfigLoader, Error};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LOCAL_XML: &str = r#"<?xml version="1.0"?>
<config>
    <global>
        <resources>
            <db>
                <table_prefix><![CDATA[]]></table_prefix>
            </db>
            <default_setup>
                <connection>
                    <host><![CDATA[localhost]]></host>
                    <username><![CDATA[magento]]></username>
                    <password><![CDATA[secret]]></password>
                    <dbname><![CDATA[magento]]></dbname>
                </connection>
            </default_setup>
        </resources>
    </global>
</config>"#;

fn shop_with_local_xml() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("app/etc")).unwrap();
    fs::write(dir.path().join("app/etc/local.xml"), LOCAL_XML).unwrap();
    dir
}

fn loader_for(dir: &Path) -> ConfigLoader {
    ConfigLoader::with_search_paths(vec![dir.join(".magexport")])
}

#[test]
fn test_defaults_without_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = loader_for(dir.path()).load(None).unwrap();

    assert_eq!(config.dump.mysqldump, "mysqldump");
    assert!(config.dump.strip_definers);
    assert!(config.table_group_catalog().get("development").is_some());
}

#[test]
fn test_toml_config_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".magexport.toml"),
        r#"
[dump]
mysqldump = "/usr/local/bin/mysqldump"
strip_definers = false
strict_selectors = true

[[table_groups]]
id = "log"
tables = ["log_url"]
description = "Only the URL log"

[[table_groups]]
id = "cms"
tables = ["cms_*"]
"#,
    )
    .unwrap();

    let config = loader_for(dir.path()).load(None).unwrap();
    assert_eq!(config.dump.mysqldump, "/usr/local/bin/mysqldump");
    assert!(!config.dump.strip_definers);
    assert!(config.dump.strict_selectors);

    let catalog = config.table_group_catalog();
    assert_eq!(catalog.get("log").unwrap().patterns, vec!["log_url"]);
    assert_eq!(catalog.get("cms").unwrap().patterns, vec!["cms_*"]);
    assert!(catalog.get("sales").is_some());
}

#[test]
fn test_json_config_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(".magexport.json"),
        r#"{ "magento": { "builtin_table_groups": false }, "database": { "dbname": "copy" } }"#,
    )
    .unwrap();

    let config = loader_for(dir.path()).load(None).unwrap();
    assert!(config.table_group_catalog().is_empty());
    assert_eq!(config.database.dbname.as_deref(), Some("copy"));
}

#[test]
fn test_broken_search_path_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(".magexport.toml"), "[dump\nmysqldump = ").unwrap();

    let config = loader_for(dir.path()).load(None).unwrap();
    assert_eq!(config.dump.mysql, "mysql");
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = loader_for(dir.path()).load(Some(&dir.path().join("missing.toml")));
    assert!(matches!(result, Err(Error::ConfigNotFound)));
}

#[test]
fn test_broken_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("magexport.json");
    fs::write(&path, "{ not json").unwrap();

    let result = loader_for(dir.path()).load(Some(&path));
    assert!(matches!(result, Err(Error::ConfigParseFailed { .. })));
}

#[test]
fn test_invalid_config_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("magexport.toml");
    fs::write(&path, "[dump]\nmysql = \"\"\n").unwrap();

    let result = loader_for(dir.path()).load(Some(&path));
    assert!(matches!(result, Err(Error::ConfigValidationFailed { .. })));
}

#[test]
fn test_detects_local_xml() {
    let shop = shop_with_local_xml();
    let settings = detect_db_settings(
        shop.path(),
        Path::new("app/etc/local.xml"),
        &DatabaseConfig::default(),
    )
    .unwrap();

    assert_eq!(
        settings.client_tool_connection_string(),
        "-h'localhost' -u'magento' -p'secret' 'magento'"
    );
}

#[test]
fn test_overrides_replace_detected_values() {
    let shop = shop_with_local_xml();
    let overrides = DatabaseConfig {
        host: Some("db:3308".to_string()),
        password: Some(String::new()),
        ..Default::default()
    };

    let settings = detect_db_settings(shop.path(), Path::new("app/etc/local.xml"), &overrides)
        .unwrap();
    assert_eq!(
        settings.client_tool_connection_string(),
        "-h'db' -P'3308' -u'magento' 'magento'"
    );
}

#[test]
fn test_missing_local_xml() {
    let dir = tempfile::tempdir().unwrap();
    let result = detect_db_settings(
        dir.path(),
        Path::new("app/etc/local.xml"),
        &DatabaseConfig::default(),
    );
    assert!(matches!(result, Err(Error::DbSettingsNotFound { .. })));
}

#[test]
fn test_complete_overrides_without_local_xml() {
    let dir = tempfile::tempdir().unwrap();
    let overrides = DatabaseConfig {
        username: Some("root".to_string()),
        dbname: Some("shop".to_string()),
        ..Default::default()
    };

    let settings =
        detect_db_settings(dir.path(), Path::new("app/etc/local.xml"), &overrides).unwrap();
    assert_eq!(settings.host, "localhost");
    assert_eq!(settings.dbname, "shop");
}
