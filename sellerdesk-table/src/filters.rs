//! Column filter synchronizer.
//!
//! A column with no value is absent from the filter list and absent from
//! the URL. Empty lists never survive a write.

use crate::config::ColumnFilterSpec;
use sellerdesk_search::codec;
use sellerdesk_search::{FilterValue, SearchPatch, SearchState};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One applied column filter, as the grid sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnFilter {
    /// Grid column id.
    pub id: String,
    pub value: FilterValue,
}

impl ColumnFilter {
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Reads every declared filter, in spec order, skipping empty ones.
#[must_use]
pub fn read(search: &SearchState, specs: &[ColumnFilterSpec]) -> Vec<ColumnFilter> {
    specs
        .iter()
        .filter_map(|spec| {
            let value = codec::decode(search.get(&spec.search_key), spec.filter_type);
            (!value.is_empty()).then(|| ColumnFilter {
                id: spec.column_id.clone(),
                value,
            })
        })
        .collect()
}

/// Computes the patch that makes the URL reflect `next` for every spec.
///
/// Specs without an entry in `next` are cleared. Entries for undeclared
/// columns are ignored.
#[must_use]
pub fn patch(prev: &SearchState, next: &[ColumnFilter], specs: &[ColumnFilterSpec]) -> SearchPatch {
    for filter in next {
        if !specs.iter().any(|s| s.column_id == filter.id) {
            debug!(column = %filter.id, "Ignoring filter for undeclared column");
        }
    }

    let mut patch = SearchPatch::new();
    for spec in specs {
        let value = next.iter().find(|f| f.id == spec.column_id).map(|f| &f.value);
        patch_column(&mut patch, prev, spec, value);
    }
    patch
}

/// Writes (or clears) a single column's key.
pub fn patch_column(
    patch: &mut SearchPatch,
    prev: &SearchState,
    spec: &ColumnFilterSpec,
    value: Option<&FilterValue>,
) {
    if let Some(value) = value {
        if !value.matches(spec.filter_type) {
            warn!(
                column = %spec.column_id,
                expected = ?spec.filter_type,
                "Filter value has the wrong shape, coercing"
            );
        }
    }

    match value.and_then(|v| codec::encode(v, spec.filter_type)) {
        None => {
            if prev.contains_key(&spec.search_key) {
                patch.remove(spec.search_key.as_str());
            }
        }
        Some(raw) => {
            let current = codec::decode(prev.get(&spec.search_key), spec.filter_type);
            let wanted = codec::decode(Some(&raw), spec.filter_type);
            if current != wanted {
                patch.set(spec.search_key.as_str(), raw);
            }
        }
    }
}
