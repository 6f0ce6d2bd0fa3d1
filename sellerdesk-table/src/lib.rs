//! Table URL-state synchronization for sellerdesk.
//!
//! Keeps a data grid's pagination, column filters and global search in
//! lockstep with the URL query string, so reloading, sharing, or going
//! back/forward reproduces the same table view.
//!
//! # Architecture
//!
//! The URL is the only source of truth. Nothing here stores table state:
//! every read is a projection of [`SearchState`], every write is a shallow
//! patch handed to the router through [`Navigate`].
//!
//! ## Components
//!
//! - **Pagination**: 1-based `page`/`pageSize` ⇄ 0-based grid state
//! - **Filters**: one URL key per declared column filter spec
//! - **Global**: an optional free-text key (`filter`)
//! - **Guard**: clamps the page index when the page count shrinks
//! - **Navigation**: the single mutation point (history replace)
//! - **Sync**: the bundle a feature table binds to its grid
//!
//! # Example
//!
//! ```
//! use sellerdesk_search::SearchState;
//! use sellerdesk_table::{ColumnFilterSpec, MemoryHistory, TableSearchConfig, TableUrlState};
//!
//! let config = TableSearchConfig::new()
//!     .with_column_filter(ColumnFilterSpec::array("status", "status"));
//! let search = SearchState::from_query("page=2&status=active&tab=details");
//! let mut history = MemoryHistory::new(search.clone());
//!
//! let mut table = TableUrlState::new(&search, &config, &mut history);
//! assert_eq!(table.pagination().page_index, 1);
//!
//! table.on_column_filters_change(Vec::new());
//! assert_eq!(history.current().to_query(), "page=2&tab=details");
//! ```

pub mod config;
mod error;
pub mod filters;
pub mod global;
pub mod guard;
pub mod navigation;
pub mod pagination;
pub mod sync;

pub use config::{
    ColumnFilterSpec, GlobalFilterConfig, PageSizeChange, PaginationConfig, TableRegistry,
    TableSearchConfig,
};
pub use error::{TableError, TableResult};
pub use filters::ColumnFilter;
pub use navigation::{MemoryHistory, Navigate, NavigateOptions, SearchUpdater};
pub use pagination::PaginationState;
pub use sync::{Batch, TableUrlState, TableView, read_view};

pub use sellerdesk_search::{FilterType, FilterValue, SearchPatch, SearchState, SearchValue};
