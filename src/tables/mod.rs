//! Table selection
//!
//! Expands table selectors (literal names, `*`/`?` wildcards and `@group`
//! references) into the literal table names of the live database.

pub mod catalog;

pub use catalog::{MysqlTableCatalog, StaticTableCatalog, TableCatalog};

use crate::error::{Error, Result};
use crate::models::TableGroupCatalog;
use regex::Regex;
use std::collections::HashSet;

/// Compile a shell-style wildcard into an anchored regex.
///
/// `*` matches any run of characters, `?` exactly one; everything else is
/// literal.
pub fn wildcard_regex(pattern: &str) -> Result<Regex> {
    let mut expr = String::with_capacity(pattern.len() + 2);
    expr.push('^');
    let mut literal = String::new();

    for ch in pattern.chars() {
        match ch {
            '*' | '?' => {
                expr.push_str(&regex::escape(&literal));
                literal.clear();
                expr.push_str(if ch == '*' { ".*" } else { "." });
            }
            _ => literal.push(ch),
        }
    }
    expr.push_str(&regex::escape(&literal));
    expr.push('$');

    Ok(Regex::new(&expr)?)
}

/// Resolves selectors against table groups and the actual table list
pub struct TableResolver<'a> {
    groups: &'a TableGroupCatalog,
    table_prefix: String,
    strict: bool,
}

/// Accumulated resolution state
struct Resolution<'t> {
    tables: Vec<&'t str>,
    seen: HashSet<&'t str>,
    /// Groups currently being expanded, for cycle detection
    expanding: Vec<String>,
}

impl<'a> TableResolver<'a> {
    pub fn new(groups: &'a TableGroupCatalog) -> Self {
        Self {
            groups,
            table_prefix: String::new(),
            strict: false,
        }
    }

    /// Match patterns as `prefix + pattern`
    pub fn with_prefix(mut self, table_prefix: impl Into<String>) -> Self {
        self.table_prefix = table_prefix.into();
        self
    }

    /// Fail on selectors that match no table
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Resolve selectors into table names, in first-seen order without
    /// duplicates.
    pub fn resolve(&self, selectors: &[String], actual_tables: &[String]) -> Result<Vec<String>> {
        let mut resolution = Resolution {
            tables: Vec::new(),
            seen: HashSet::new(),
            expanding: Vec::new(),
        };

        for selector in selectors.iter().map(|s| s.trim()).filter(|s| !s.is_empty()) {
            let matched = self.expand(selector, actual_tables, &mut resolution)?;
            if matched == 0 {
                if self.strict {
                    return Err(Error::NoTablesMatched {
                        selector: selector.to_string(),
                    });
                }
                warn!("Selector '{}' does not match any table", selector);
            }
        }

        debug!(
            "Resolved {} selector(s) to {} table(s)",
            selectors.len(),
            resolution.tables.len()
        );
        Ok(resolution.tables.into_iter().map(str::to_string).collect())
    }

    /// Expand one token, returning how many tables it matched (duplicates included)
    fn expand<'t>(
        &self,
        token: &str,
        actual_tables: &'t [String],
        resolution: &mut Resolution<'t>,
    ) -> Result<usize> {
        if let Some(id) = token.strip_prefix('@') {
            if resolution.expanding.iter().any(|open| open == id) {
                return Err(Error::TableGroupCycle {
                    group: id.to_string(),
                });
            }
            let group = self.groups.get(id).ok_or_else(|| Error::TableGroupNotFound {
                group: id.to_string(),
            })?;

            resolution.expanding.push(id.to_string());
            let mut matched = 0;
            for pattern in &group.patterns {
                matched += self.expand(pattern, actual_tables, resolution)?;
            }
            resolution.expanding.pop();

            trace!("Group @{} matched {} table(s)", id, matched);
            return Ok(matched);
        }

        let matcher = wildcard_regex(&format!("{}{}", self.table_prefix, token))?;
        let mut matched = 0;
        for table in actual_tables.iter().filter(|t| matcher.is_match(t)) {
            matched += 1;
            if resolution.seen.insert(table.as_str()) {
                resolution.tables.push(table.as_str());
            }
        }
        Ok(matched)
    }
}

/// Resolve selectors without a table prefix
pub fn resolve(
    selectors: &[String],
    groups: &TableGroupCatalog,
    actual_tables: &[String],
    strict: bool,
) -> Result<Vec<String>> {
    TableResolver::new(groups)
        .strict(strict)
        .resolve(selectors, actual_tables)
}

/// Help text describing selector syntax and the available groups
pub fn table_definition_help(groups: &TableGroupCatalog) -> String {
    let mut messages = vec![
        "Tables option".to_string(),
        "  Separate each table by a space.".to_string(),
        "  You can use wildcards like * and ? in the table names to export multiple tables.".to_string(),
        "  In addition you can specify pre-defined table groups, that start with an @".to_string(),
        "  Example: \"dataflow_batch_export unimportant_module_* @log\"".to_string(),
        String::new(),
        "Available Table Groups".to_string(),
    ];

    let width = groups.iter().map(|g| g.id.len() + 1).max().unwrap_or(0);
    for group in groups.iter() {
        messages.push(format!(
            "  {:<width$}  {}",
            format!("@{}", group.id),
            group.description,
            width = width
        ));
    }

    messages.join("\n")
}
