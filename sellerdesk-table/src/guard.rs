//! Page-range guard.

use crate::pagination::PaginationState;

/// Returns the clamped pagination when `current` points past the last page.
///
/// `None` means no navigation is needed: the index is in range, or there
/// are no pages at all (an empty result keeps whatever page it was on).
#[must_use]
pub fn clamp(current: PaginationState, page_count: usize) -> Option<PaginationState> {
    if page_count == 0 || current.page_index < page_count {
        return None;
    }
    Some(PaginationState {
        page_index: page_count - 1,
        ..current
    })
}

/// Number of pages for `row_count` rows at `page_size` rows per page.
#[must_use]
pub fn page_count(row_count: usize, page_size: usize) -> usize {
    row_count.div_ceil(page_size.max(1))
}
