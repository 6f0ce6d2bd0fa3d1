//! Error types for table configuration.
//!
//! Reads and writes of table state never fail; only configuration does,
//! and it fails at load time rather than while a table is rendering.

use thiserror::Error;

/// Result type for table configuration operations.
pub type TableResult<T> = Result<T, TableError>;

/// Errors that can occur when building or loading table configuration.
#[derive(Debug, Error)]
pub enum TableError {
    /// A default page or page size of zero.
    #[error("{field} must be at least 1")]
    ZeroDefault { field: &'static str },

    /// A URL key configured as an empty string.
    #[error("{field} must not be empty")]
    EmptyKey { field: &'static str },

    /// Two owned parameters map to the same URL key.
    #[error("URL key `{0}` is owned by more than one parameter")]
    DuplicateKey(String),

    /// Two filter specs for the same column.
    #[error("column `{0}` has more than one filter spec")]
    DuplicateColumn(String),

    /// A table in a registry file failed validation.
    #[error("table `{name}`: {source}")]
    Table {
        name: String,
        #[source]
        source: Box<TableError>,
    },

    /// The registry file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The registry file is not valid TOML for a table registry.
    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),
}
