//! The controlled-state bundle a feature table binds to its grid.
//!
//! A `TableUrlState` is built once per render from the router's current
//! search state. Reads are derived eagerly; writes become a single
//! navigation whose updater re-plans against the router's state at apply
//! time, so a write never clobbers keys changed since the render.

use crate::config::TableSearchConfig;
use crate::filters::{self, ColumnFilter};
use crate::global;
use crate::guard;
use crate::navigation::{Navigate, NavigateOptions};
use crate::pagination::{self, PaginationState};
use sellerdesk_search::{FilterValue, SearchPatch, SearchState};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Serializable snapshot of everything a table reads from the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub pagination: PaginationState,
    pub column_filters: Vec<ColumnFilter>,
    pub global_filter: String,
}

/// A pending write, planned against the state it is eventually applied to.
#[derive(Debug, Clone, PartialEq)]
enum Write {
    Pagination(PaginationState),
    PageIndex(usize),
    PageSize(usize),
    ColumnFilters(Vec<ColumnFilter>),
    ColumnFilter {
        column_id: String,
        value: Option<FilterValue>,
    },
    GlobalFilter(String),
    Patch(SearchPatch),
}

/// Collects several writes into one navigation.
#[derive(Debug, Default)]
pub struct Batch {
    writes: Vec<Write>,
}

impl Batch {
    /// Sets page index and page size.
    pub fn set_pagination(&mut self, next: PaginationState) -> &mut Self {
        self.writes.push(Write::Pagination(next));
        self
    }

    /// Moves to a page, keeping the page size.
    pub fn set_page_index(&mut self, page_index: usize) -> &mut Self {
        self.writes.push(Write::PageIndex(page_index));
        self
    }

    /// Changes the page size, subject to the table's page-size policy.
    pub fn set_page_size(&mut self, page_size: usize) -> &mut Self {
        self.writes.push(Write::PageSize(page_size));
        self
    }

    /// Goes back to the first page.
    pub fn reset_page(&mut self) -> &mut Self {
        self.set_page_index(0)
    }

    /// Replaces the whole column filter list.
    pub fn set_column_filters(&mut self, next: Vec<ColumnFilter>) -> &mut Self {
        self.writes.push(Write::ColumnFilters(next));
        self
    }

    /// Sets or clears one column, leaving the others as they are.
    pub fn set_column_filter(
        &mut self,
        column_id: impl Into<String>,
        value: Option<FilterValue>,
    ) -> &mut Self {
        self.writes.push(Write::ColumnFilter {
            column_id: column_id.into(),
            value,
        });
        self
    }

    /// Sets the global search text.
    pub fn set_global_filter(&mut self, value: impl Into<String>) -> &mut Self {
        self.writes.push(Write::GlobalFilter(value.into()));
        self
    }

    /// Merges a raw patch. Changes to keys the table does not own are
    /// dropped.
    pub fn merge(&mut self, patch: SearchPatch) -> &mut Self {
        self.writes.push(Write::Patch(patch));
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }
}

/// Composes `writes` into one patch, each write seeing the effect of the
/// ones before it.
fn plan(prev: &SearchState, config: &TableSearchConfig, writes: &[Write]) -> SearchPatch {
    let mut acc = SearchPatch::new();

    for write in writes {
        let working = prev.apply(&acc);
        let patch = match write {
            Write::Pagination(next) => pagination::patch(&working, *next, &config.pagination),
            Write::PageIndex(page_index) => {
                let current = pagination::read(&working, &config.pagination);
                let next = PaginationState {
                    page_index: *page_index,
                    ..current
                };
                pagination::patch(&working, next, &config.pagination)
            }
            Write::PageSize(page_size) => {
                let current = pagination::read(&working, &config.pagination);
                let next = PaginationState {
                    page_size: *page_size,
                    ..current
                };
                pagination::patch(&working, next, &config.pagination)
            }
            Write::ColumnFilters(next) => {
                let mut patch = filters::patch(&working, next, &config.column_filters);
                if config.reset_page_on_filter_change && !patch.is_empty() {
                    patch.extend(reset_page_patch(&working.apply(&patch), config));
                }
                patch
            }
            Write::ColumnFilter { column_id, value } => {
                let mut patch = SearchPatch::new();
                match config.spec_for_column(column_id) {
                    Some(spec) => {
                        filters::patch_column(&mut patch, &working, spec, value.as_ref());
                    }
                    None => warn!(column = %column_id, "No filter spec for column"),
                }
                if config.reset_page_on_filter_change && !patch.is_empty() {
                    patch.extend(reset_page_patch(&working.apply(&patch), config));
                }
                patch
            }
            Write::GlobalFilter(value) => {
                global::patch(&working, value, &config.global_filter).unwrap_or_default()
            }
            Write::Patch(raw) => owned_changes(raw, config),
        };
        acc.extend(patch);
    }

    acc
}

fn owned_changes(raw: &SearchPatch, config: &TableSearchConfig) -> SearchPatch {
    let owned: Vec<&str> = config.owned_keys().collect();
    let mut patch = SearchPatch::new();
    for key in raw.keys() {
        if !owned.contains(&key) {
            warn!(key, "Dropping write to a key this table does not own");
            continue;
        }
        if let Some(change) = raw.change_for(key) {
            patch.set_or_remove(key, change.clone());
        }
    }
    patch
}

fn reset_page_patch(working: &SearchState, config: &TableSearchConfig) -> SearchPatch {
    let current = pagination::read(working, &config.pagination);
    pagination::patch(
        working,
        PaginationState {
            page_index: 0,
            ..current
        },
        &config.pagination,
    )
}

/// Live table state plus its write operations.
pub struct TableUrlState<'a, N: Navigate> {
    search: Cow<'a, SearchState>,
    config: &'a TableSearchConfig,
    navigator: &'a mut N,
    view: TableView,
}

impl<'a, N: Navigate> TableUrlState<'a, N> {
    /// Derives table state from the current search.
    pub fn new(search: &'a SearchState, config: &'a TableSearchConfig, navigator: &'a mut N) -> Self {
        let view = derive(search, config);
        Self {
            search: Cow::Borrowed(search),
            config,
            navigator,
            view,
        }
    }

    /// Current pagination.
    #[must_use]
    pub fn pagination(&self) -> PaginationState {
        self.view.pagination
    }

    /// Applied column filters, in spec order.
    #[must_use]
    pub fn column_filters(&self) -> &[ColumnFilter] {
        &self.view.column_filters
    }

    /// Current global search text.
    #[must_use]
    pub fn global_filter(&self) -> &str {
        &self.view.global_filter
    }

    /// Snapshot of all derived state.
    #[must_use]
    pub fn view(&self) -> &TableView {
        &self.view
    }

    /// The search state this bundle currently reflects.
    #[must_use]
    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn on_pagination_change(&mut self, next: PaginationState) -> bool {
        self.batch(|tx| {
            tx.set_pagination(next);
        })
    }

    pub fn on_column_filters_change(&mut self, next: Vec<ColumnFilter>) -> bool {
        self.batch(|tx| {
            tx.set_column_filters(next);
        })
    }

    pub fn on_global_filter_change(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        self.batch(|tx| {
            tx.set_global_filter(value);
        })
    }

    /// Clamps the page index after the grid recomputes its page count.
    /// Returns whether a navigation was issued.
    pub fn ensure_page_in_range(&mut self, page_count: usize) -> bool {
        match guard::clamp(self.view.pagination, page_count) {
            Some(clamped) => {
                debug!(
                    from = self.view.pagination.page_index,
                    to = clamped.page_index,
                    page_count,
                    "Page out of range, clamping"
                );
                self.on_pagination_change(clamped)
            }
            None => false,
        }
    }

    /// Runs several writes as one navigation.
    ///
    /// Returns whether a navigation was issued; writes that leave the URL
    /// unchanged issue none.
    pub fn batch(&mut self, build: impl FnOnce(&mut Batch)) -> bool {
        let mut batch = Batch::default();
        build(&mut batch);
        if batch.is_empty() {
            return false;
        }

        let expected = self.search.apply(&plan(&self.search, self.config, &batch.writes));
        if expected == *self.search {
            debug!("Table write leaves search unchanged, skipping navigation");
            return false;
        }

        let config = self.config;
        let writes = batch.writes;
        self.navigator.navigate(NavigateOptions::replace(move |prev| {
            let patch = plan(prev, config, &writes);
            debug!(keys = ?patch.keys().collect::<Vec<_>>(), "Navigating table search");
            prev.apply(&patch)
        }));

        self.view = derive(&expected, self.config);
        self.search = Cow::Owned(expected);
        true
    }
}

fn derive(search: &SearchState, config: &TableSearchConfig) -> TableView {
    TableView {
        pagination: pagination::read(search, &config.pagination),
        column_filters: filters::read(search, &config.column_filters),
        global_filter: global::read(search, &config.global_filter),
    }
}

/// Reads the table view without a navigator.
#[must_use]
pub fn read_view(search: &SearchState, config: &TableSearchConfig) -> TableView {
    derive(search, config)
}
