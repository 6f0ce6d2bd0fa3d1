//! Shared async helpers for sellerdesk features.
//!
//! - [`OptionsCache`]: process-wide option lists (countries, warehouses)
//!   loaded at most once per key, with explicit invalidation
//! - [`Debouncer`]: delays a server search until typing settles
//!
//! Both run on the tokio runtime and are safe to share across tasks.

mod debounce;
mod options;

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use options::{CacheConfig, OptionsCache};
