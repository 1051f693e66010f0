//! Table Group Model
//!
//! A table group is a named set of table-name patterns that can be selected
//! with `@id` on the command line. Patterns are shell-style wildcards or
//! further `@id` references.

use serde::{Deserialize, Serialize};

/// Named, pre-defined set of table-name patterns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableGroup {
    /// Group id, referenced as `@id`
    pub id: String,

    /// Ordered table-name patterns
    #[serde(rename = "tables")]
    pub patterns: Vec<String>,

    /// Human readable description shown in the help text
    #[serde(default)]
    pub description: String,
}

impl TableGroup {
    /// Create a group from a space-separated pattern list
    pub fn new(id: &str, patterns: &str, description: &str) -> Self {
        Self {
            id: id.to_string(),
            patterns: patterns.split_whitespace().map(str::to_string).collect(),
            description: description.to_string(),
        }
    }
}

/// Ordered collection of table groups, looked up by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableGroupCatalog {
    groups: Vec<TableGroup>,
}

impl TableGroupCatalog {
    /// Create a catalog from groups, later duplicates replace earlier ones
    pub fn new(groups: Vec<TableGroup>) -> Self {
        let mut catalog = Self::default();
        for group in groups {
            catalog.insert(group);
        }
        catalog
    }

    /// Built-in Magento table groups
    pub fn builtin() -> Self {
        Self::new(vec![
            TableGroup::new(
                "admin",
                "admin* oauth_token",
                "Admin tables",
            ),
            TableGroup::new(
                "log",
                "log_url log_url_info log_visitor log_visitor_info log_visitor_online \
                 report_event report_compared_product_index report_viewed_*",
                "Log tables",
            ),
            TableGroup::new(
                "dataflowtemp",
                "dataflow_batch_export dataflow_batch_import dataflow_import_data dataflow_session",
                "Temporary tables of the dataflow import/export tool",
            ),
            TableGroup::new(
                "importexporttemp",
                "importexport_importdata",
                "Temporary tables of the Import/Export module",
            ),
            TableGroup::new(
                "stripped",
                "@log @dataflowtemp @importexporttemp",
                "Standard definition for a stripped dump (logs and dataflow)",
            ),
            TableGroup::new(
                "sales",
                "sales_order_aggregated* sales_order_tax* sales_flat* sales_recurring_* \
                 sales_refunded_* sales_payment_* enterprise_sales_* enterprise_customer_sales_* \
                 sales_bestsellers_* paypal_billing_agreement* paypal_payment_transaction* \
                 paypal_settlement_report*",
                "Sales data (orders, invoices, creditmemos etc)",
            ),
            TableGroup::new(
                "quotes",
                "sales_flat_quote sales_flat_quote_*",
                "Cart (quote) data",
            ),
            TableGroup::new(
                "customers",
                "customer_address* customer_entity* customer_grid_flat customer_visitor \
                 newsletter_subscriber",
                "Customer data - Should not be used without @sales",
            ),
            TableGroup::new(
                "trade",
                "@customers @sales @quotes",
                "Current trade data (customers and orders)",
            ),
            TableGroup::new(
                "search",
                "catalogsearch_*",
                "Search related tables (catalogsearch_)",
            ),
            TableGroup::new(
                "development",
                "@admin @trade @stripped @search",
                "Removes logs and trade data so developers do not have to work with real customer data",
            ),
            TableGroup::new("idx", "*_idx", "Tables with _idx suffix"),
            TableGroup::new(
                "catalog",
                "catalog_category_entity* catalog_category_product* catalog_product_entity* \
                 catalog_product_link* catalog_product_super_* catalog_product_website \
                 catalog_eav_attribute eav_attribute* eav_entity_type",
                "The catalog tables",
            ),
        ])
    }

    /// Look up a group by its case-sensitive id
    pub fn get(&self, id: &str) -> Option<&TableGroup> {
        self.groups.iter().find(|group| group.id == id)
    }

    /// Insert a group, replacing an existing group with the same id in place
    pub fn insert(&mut self, group: TableGroup) {
        match self.groups.iter_mut().find(|existing| existing.id == group.id) {
            Some(existing) => *existing = group,
            None => self.groups.push(group),
        }
    }

    /// Merge another catalog on top of this one
    pub fn merge(&mut self, other: TableGroupCatalog) {
        for group in other.groups {
            self.insert(group);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TableGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
