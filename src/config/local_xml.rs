//! Magento database settings detection
//!
//! Reads the `default_setup` connection and the table prefix from
//! `app/etc/local.xml`, then applies the `[database]` overrides.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use zeroize::Zeroizing;

use super::DatabaseConfig;
use crate::dump::ConnectionSettings;
use crate::error::{Error, Result};

static CONNECTION_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<default_setup>.*?<connection>(.*?)</connection>")
        .expect("static regex is valid")
});

static DB_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<db>(.*?)</db>").expect("static regex is valid"));

/// CDATA sections are matched first so comment markers inside them survive
static COMMENT_OR_CDATA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)<!\[CDATA\[.*?\]\]>|<!--.*?-->").expect("static regex is valid")
});

static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(?:#x([0-9A-Fa-f]+)|#([0-9]+)|([A-Za-z]+));").expect("static regex is valid")
});

/// Remove `<!-- ... -->` comments outside CDATA sections
fn strip_comments(content: &str) -> String {
    COMMENT_OR_CDATA
        .replace_all(content, |caps: &regex::Captures| {
            let matched = &caps[0];
            if matched.starts_with("<!--") {
                String::new()
            } else {
                matched.to_string()
            }
        })
        .into_owned()
}

/// Decode the predefined XML entities and character references
fn decode_entities(value: &str) -> String {
    ENTITY
        .replace_all(value, |caps: &regex::Captures| {
            let code = match (caps.get(1), caps.get(2), caps.get(3)) {
                (Some(hex), _, _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (_, Some(dec), _) => dec.as_str().parse().ok(),
                (_, _, Some(name)) => match name.as_str() {
                    "lt" => Some('<' as u32),
                    "gt" => Some('>' as u32),
                    "amp" => Some('&' as u32),
                    "quot" => Some('"' as u32),
                    "apos" => Some('\'' as u32),
                    _ => None,
                },
                _ => None,
            };

            match code.and_then(char::from_u32) {
                Some(ch) => ch.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Text of `<name>`, unwrapping CDATA and decoding entities elsewhere
fn element(block: &str, name: &str) -> Result<Option<String>> {
    let re = Regex::new(&format!(
        r"(?s)<{name}>\s*(?:<!\[CDATA\[(.*?)\]\]>|([^<]*?))\s*</{name}>",
        name = regex::escape(name)
    ))?;

    Ok(re.captures(block).and_then(|caps| match (caps.get(1), caps.get(2)) {
        (Some(cdata), _) => Some(cdata.as_str().to_string()),
        (_, Some(text)) => Some(decode_entities(text.as_str())),
        _ => None,
    }))
}

/// Split `host:port` and `host:/path/to/socket`
fn split_host(settings: &mut ConnectionSettings) {
    let Some((host, rest)) = settings.host.split_once(':') else {
        return;
    };
    let (host, rest) = (host.to_string(), rest.to_string());

    if rest.starts_with('/') {
        settings.unix_socket = Some(rest);
        settings.host = host;
    } else if let Ok(port) = rest.parse::<u16>() {
        settings.port = Some(port);
        settings.host = host;
    }
}

/// Parse the contents of a Magento `local.xml`
pub fn parse_local_xml(content: &str) -> Result<ConnectionSettings> {
    let content = strip_comments(content);
    let content = content.as_str();
    let connection = CONNECTION_BLOCK
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|block| block.as_str())
        .ok_or_else(|| Error::DbSettingsIncomplete {
            field: "global/resources/default_setup/connection".to_string(),
        })?;

    let mut settings = ConnectionSettings {
        host: element(connection, "host")?.unwrap_or_else(|| "localhost".to_string()),
        username: element(connection, "username")?.unwrap_or_default(),
        password: Zeroizing::new(element(connection, "password")?.unwrap_or_default()),
        dbname: element(connection, "dbname")?.unwrap_or_default(),
        ..Default::default()
    };

    if let Some(db_block) = DB_BLOCK.captures(content).and_then(|caps| caps.get(1)) {
        settings.table_prefix = element(db_block.as_str(), "table_prefix")?.unwrap_or_default();
    }

    split_host(&mut settings);
    Ok(settings)
}

/// Apply `[database]` overrides
fn apply_overrides(settings: &mut ConnectionSettings, overrides: &DatabaseConfig) {
    if let Some(host) = &overrides.host {
        settings.host = host.clone();
        split_host(settings);
    }
    if let Some(port) = overrides.port {
        settings.port = Some(port);
    }
    if let Some(socket) = &overrides.unix_socket {
        settings.unix_socket = Some(socket.clone());
    }
    if let Some(username) = &overrides.username {
        settings.username = username.clone();
    }
    if let Some(password) = &overrides.password {
        settings.password = Zeroizing::new(password.clone());
    }
    if let Some(dbname) = &overrides.dbname {
        settings.dbname = dbname.clone();
    }
    if let Some(prefix) = &overrides.table_prefix {
        settings.table_prefix = prefix.clone();
    }
}

/// Detect the database settings of the shop at `root_dir`.
///
/// When `local.xml` is missing, complete `[database]` overrides are used on
/// their own.
pub fn detect_db_settings(
    root_dir: &Path,
    local_xml: &Path,
    overrides: &DatabaseConfig,
) -> Result<ConnectionSettings> {
    let path = root_dir.join(local_xml);

    let mut settings = if path.exists() {
        debug!("Reading database settings from {}", path.display());
        let content = fs::read_to_string(&path).map_err(|e| Error::ConfigLoadFailed {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        parse_local_xml(&content)?
    } else if overrides.is_complete() {
        debug!("{} not found, using configured database settings", path.display());
        ConnectionSettings {
            host: "localhost".to_string(),
            ..Default::default()
        }
    } else {
        return Err(Error::DbSettingsNotFound { path });
    };

    apply_overrides(&mut settings, overrides);

    if settings.username.is_empty() {
        return Err(Error::DbSettingsIncomplete {
            field: "username".to_string(),
        });
    }
    if settings.dbname.is_empty() {
        return Err(Error::DbSettingsIncomplete {
            field: "dbname".to_string(),
        });
    }

    info!(
        "Using database '{}' on {}",
        settings.dbname,
        settings.unix_socket.as_deref().unwrap_or(&settings.host)
    );
    Ok(settings)
}
