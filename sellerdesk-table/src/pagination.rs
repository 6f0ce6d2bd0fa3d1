//! Pagination synchronizer: 1-based `page`/`pageSize` in the URL, 0-based
//! `{page_index, page_size}` in the grid.

use crate::config::{PageSizeChange, PaginationConfig};
use sellerdesk_search::codec;
use sellerdesk_search::{SearchPatch, SearchState};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Grid pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl PaginationState {
    #[must_use]
    pub const fn new(page_index: usize, page_size: usize) -> Self {
        Self {
            page_index,
            page_size,
        }
    }

    /// The 1-based page number as it appears in the URL.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page_index.saturating_add(1)
    }
}

/// Reads pagination from the URL. Bad values fall back to the defaults.
#[must_use]
pub fn read(search: &SearchState, config: &PaginationConfig) -> PaginationState {
    let raw_page = search.get(&config.page_key);
    let raw_size = search.get(&config.page_size_key);

    if codec::is_malformed_positive(raw_page) {
        debug!(key = %config.page_key, value = ?raw_page, "Malformed page, using default");
    }
    if codec::is_malformed_positive(raw_size) {
        debug!(key = %config.page_size_key, value = ?raw_size, "Malformed page size, using default");
    }

    let page = codec::decode_positive(raw_page, config.default_page);
    PaginationState {
        page_index: page.saturating_sub(1),
        page_size: codec::decode_positive(raw_size, config.default_page_size),
    }
}

/// Computes the patch that moves `prev` to `next`.
///
/// Keys that already decode to the wanted value are left alone, even when
/// the raw text is malformed, and a value equal to its default is written
/// as a missing key.
#[must_use]
pub fn patch(prev: &SearchState, next: PaginationState, config: &PaginationConfig) -> SearchPatch {
    let current = read(prev, config);
    let next = if config.page_size_change == PageSizeChange::ResetToFirstPage
        && next.page_size != current.page_size
    {
        PaginationState {
            page_index: 0,
            ..next
        }
    } else {
        next
    };

    let mut patch = SearchPatch::new();
    put(
        &mut patch,
        prev,
        &config.page_key,
        next.page(),
        config.default_page,
    );
    put(
        &mut patch,
        prev,
        &config.page_size_key,
        next.page_size.max(1),
        config.default_page_size,
    );
    patch
}

fn put(patch: &mut SearchPatch, prev: &SearchState, key: &str, value: usize, default: usize) {
    if codec::decode_positive(prev.get(key), default) == value {
        return;
    }

    if value == default {
        patch.remove(key);
    } else {
        patch.set(key, codec::encode_positive(value));
    }
}
