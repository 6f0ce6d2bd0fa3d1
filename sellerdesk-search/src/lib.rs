//! URL search state for sellerdesk tables.
//!
//! This crate defines the primitives every table synchronizer is built on:
//! - [`SearchValue`]: a single query-string value (text, number, or list)
//! - [`SearchState`]: the ordered key/value view of a route's query string
//! - [`SearchPatch`]: a shallow merge that sets or deletes individual keys
//! - the query codec ([`codec`]) converting raw values into typed table values
//!
//! Nothing here knows about pagination or column filters; those live in
//! `sellerdesk-table`.

pub mod codec;
mod query;
mod state;
mod value;

pub use codec::{FilterType, FilterValue};
pub use state::{SearchPatch, SearchState};
pub use value::SearchValue;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building search state from router input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("search input must be a JSON object, got {0}")]
    NotAnObject(&'static str),
}
