//! Global (free-text) filter synchronizer.

use crate::config::GlobalFilterConfig;
use sellerdesk_search::codec;
use sellerdesk_search::{SearchPatch, SearchState};

/// Reads the search text. Always `""` when the global filter is disabled.
#[must_use]
pub fn read(search: &SearchState, config: &GlobalFilterConfig) -> String {
    if !config.enabled {
        return String::new();
    }
    codec::decode_string(search.get(&config.key)).unwrap_or_default()
}

/// Computes the patch for a new search text; empty text deletes the key.
/// Returns `None` when the global filter is disabled.
#[must_use]
pub fn patch(prev: &SearchState, value: &str, config: &GlobalFilterConfig) -> Option<SearchPatch> {
    if !config.enabled {
        return None;
    }

    let mut patch = SearchPatch::new();
    if value.is_empty() {
        if prev.contains_key(&config.key) {
            patch.remove(config.key.as_str());
        }
    } else if read(prev, config) != value {
        patch.set(config.key.as_str(), value);
    }
    Some(patch)
}
