//! Per-table configuration and the TOML table registry.
//!
//! A table supplies its configuration once at mount and never changes it.
//! The registry reads every table of the console from one file, e.g.:
//!
//! ```toml
//! [tables.orders]
//! reset_page_on_filter_change = true
//!
//! [tables.orders.pagination]
//! default_page_size = 20
//!
//! [[tables.orders.column_filters]]
//! column_id = "status"
//! search_key = "status"
//! type = "array"
//! ```

use crate::error::{TableError, TableResult};
use sellerdesk_search::FilterType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::info;

/// What happens to the page index when only the page size changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSizeChange {
    #[default]
    /// Keep the page index the grid asked for.
    KeepPageIndex,
    /// Jump back to the first page.
    ResetToFirstPage,
}

/// Pagination defaults and URL keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// 1-based page used when the URL has none (or a bad one).
    #[serde(default = "default_page")]
    pub default_page: usize,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_page_key")]
    pub page_key: String,
    #[serde(default = "default_page_size_key")]
    pub page_size_key: String,
    #[serde(default)]
    pub page_size_change: PageSizeChange,
}

fn default_page() -> usize {
    1
}

fn default_page_size() -> usize {
    10
}

fn default_page_key() -> String {
    "page".to_string()
}

fn default_page_size_key() -> String {
    "pageSize".to_string()
}

fn default_global_key() -> String {
    "filter".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: default_page(),
            default_page_size: default_page_size(),
            page_key: default_page_key(),
            page_size_key: default_page_size_key(),
            page_size_change: PageSizeChange::default(),
        }
    }
}

impl PaginationConfig {
    /// Default keys with the given page and page size.
    #[must_use]
    pub fn with_defaults(default_page: usize, default_page_size: usize) -> Self {
        Self {
            default_page,
            default_page_size,
            ..Self::default()
        }
    }

    /// Sets the page-size change policy.
    #[must_use]
    pub fn page_size_change(mut self, policy: PageSizeChange) -> Self {
        self.page_size_change = policy;
        self
    }
}

/// The optional free-text search key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalFilterConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_global_key")]
    pub key: String,
}

impl Default for GlobalFilterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            key: default_global_key(),
        }
    }
}

impl GlobalFilterConfig {
    /// An inert global filter.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// An enabled global filter under `key`.
    #[must_use]
    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            enabled: true,
            key: key.into(),
        }
    }
}

/// Binds one grid column to one URL key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnFilterSpec {
    pub column_id: String,
    pub search_key: String,
    #[serde(rename = "type")]
    pub filter_type: FilterType,
}

impl ColumnFilterSpec {
    /// A multi-select filter.
    #[must_use]
    pub fn array(column_id: impl Into<String>, search_key: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            search_key: search_key.into(),
            filter_type: FilterType::Array,
        }
    }

    /// A free-text filter.
    #[must_use]
    pub fn string(column_id: impl Into<String>, search_key: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            search_key: search_key.into(),
            filter_type: FilterType::String,
        }
    }
}

/// Everything one table instance needs to sync with the URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSearchConfig {
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub global_filter: GlobalFilterConfig,
    #[serde(default)]
    pub column_filters: Vec<ColumnFilterSpec>,
    /// Reset to the first page in the same update as a column filter change.
    #[serde(default)]
    pub reset_page_on_filter_change: bool,
}

impl TableSearchConfig {
    /// Creates a config with default pagination and global filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pagination(mut self, pagination: PaginationConfig) -> Self {
        self.pagination = pagination;
        self
    }

    #[must_use]
    pub fn with_global_filter(mut self, global_filter: GlobalFilterConfig) -> Self {
        self.global_filter = global_filter;
        self
    }

    #[must_use]
    pub fn with_column_filter(mut self, spec: ColumnFilterSpec) -> Self {
        self.column_filters.push(spec);
        self
    }

    #[must_use]
    pub fn reset_page_on_filter_change(mut self, reset: bool) -> Self {
        self.reset_page_on_filter_change = reset;
        self
    }

    /// Returns the filter spec for a grid column.
    #[must_use]
    pub fn spec_for_column(&self, column_id: &str) -> Option<&ColumnFilterSpec> {
        self.column_filters.iter().find(|s| s.column_id == column_id)
    }

    /// URL keys this table writes. Everything else belongs to someone else.
    pub fn owned_keys(&self) -> impl Iterator<Item = &str> {
        let global = self
            .global_filter
            .enabled
            .then_some(self.global_filter.key.as_str());
        [
            self.pagination.page_key.as_str(),
            self.pagination.page_size_key.as_str(),
        ]
        .into_iter()
        .chain(global)
        .chain(self.column_filters.iter().map(|s| s.search_key.as_str()))
    }

    /// Checks defaults are positive and that no two parameters share a key.
    pub fn validate(&self) -> TableResult<()> {
        if self.pagination.default_page == 0 {
            return Err(TableError::ZeroDefault {
                field: "default_page",
            });
        }
        if self.pagination.default_page_size == 0 {
            return Err(TableError::ZeroDefault {
                field: "default_page_size",
            });
        }
        if self.pagination.page_key.is_empty() {
            return Err(TableError::EmptyKey { field: "page_key" });
        }
        if self.pagination.page_size_key.is_empty() {
            return Err(TableError::EmptyKey {
                field: "page_size_key",
            });
        }
        if self.global_filter.enabled && self.global_filter.key.is_empty() {
            return Err(TableError::EmptyKey {
                field: "global_filter.key",
            });
        }

        let mut columns = HashSet::new();
        for spec in &self.column_filters {
            if spec.search_key.is_empty() {
                return Err(TableError::EmptyKey {
                    field: "column_filters.search_key",
                });
            }
            if !columns.insert(spec.column_id.as_str()) {
                return Err(TableError::DuplicateColumn(spec.column_id.clone()));
            }
        }

        let mut keys = HashSet::new();
        for key in self.owned_keys() {
            if !keys.insert(key) {
                return Err(TableError::DuplicateKey(key.to_string()));
            }
        }

        Ok(())
    }
}

/// Raw TOML structure matching the registry file format.
#[derive(Debug, Deserialize)]
struct RegistryFile {
    #[serde(default)]
    tables: BTreeMap<String, TableSearchConfig>,
}

/// Named table configurations for the whole console.
#[derive(Debug, Clone, Default)]
pub struct TableRegistry {
    tables: BTreeMap<String, TableSearchConfig>,
}

impl TableRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates a registry file.
    pub fn load_from(path: &Path) -> TableResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let registry = Self::from_toml_str(&contents)?;
        info!(path = %path.display(), tables = registry.len(), "Table registry loaded");
        Ok(registry)
    }

    /// Parses and validates registry TOML.
    pub fn from_toml_str(contents: &str) -> TableResult<Self> {
        let file: RegistryFile = toml::from_str(contents)?;
        let mut registry = Self::new();
        for (name, config) in file.tables {
            registry.insert(name, config)?;
        }
        Ok(registry)
    }

    /// Adds a validated table.
    pub fn insert(&mut self, name: impl Into<String>, config: TableSearchConfig) -> TableResult<()> {
        let name = name.into();
        if let Err(e) = config.validate() {
            return Err(TableError::Table {
                name,
                source: Box::new(e),
            });
        }
        self.tables.insert(name, config);
        Ok(())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TableSearchConfig> {
        self.tables.get(name)
    }

    /// Table names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
