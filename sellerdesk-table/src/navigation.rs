//! Navigation adapter.
//!
//! Defines the single mutation point for URL search state. Synchronizers
//! never build the next state themselves: they hand the router an updater
//! that is applied to whatever state the router holds at that moment.

use sellerdesk_search::SearchState;
use tracing::debug;

/// Produces the next search state from the router's current one.
pub type SearchUpdater<'a> = Box<dyn FnOnce(&SearchState) -> SearchState + 'a>;

/// A navigation request.
pub struct NavigateOptions<'a> {
    /// Shallow-merging updater.
    pub search: SearchUpdater<'a>,
    /// Replace the current history entry instead of pushing a new one.
    pub replace: bool,
}

impl<'a> NavigateOptions<'a> {
    /// A history-replace navigation.
    pub fn replace(search: impl FnOnce(&SearchState) -> SearchState + 'a) -> Self {
        Self {
            search: Box::new(search),
            replace: true,
        }
    }

    /// A history-push navigation.
    pub fn push(search: impl FnOnce(&SearchState) -> SearchState + 'a) -> Self {
        Self {
            search: Box::new(search),
            replace: false,
        }
    }
}

impl std::fmt::Debug for NavigateOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigateOptions")
            .field("replace", &self.replace)
            .finish_non_exhaustive()
    }
}

/// A client-side router that can update the URL without a reload.
pub trait Navigate {
    fn navigate(&mut self, options: NavigateOptions<'_>);
}

impl<F> Navigate for F
where
    F: FnMut(NavigateOptions<'_>),
{
    fn navigate(&mut self, options: NavigateOptions<'_>) {
        self(options)
    }
}

/// In-memory history stack.
///
/// Stands in for the browser history in tests and tooling: it applies
/// updaters to the current entry and honours replace vs push.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<SearchState>,
    index: usize,
    navigations: usize,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(SearchState::new())
    }
}

impl MemoryHistory {
    /// Creates a history with a single entry.
    #[must_use]
    pub fn new(initial: SearchState) -> Self {
        Self {
            entries: vec![initial],
            index: 0,
            navigations: 0,
        }
    }

    /// The current entry.
    #[must_use]
    pub fn current(&self) -> &SearchState {
        &self.entries[self.index]
    }

    /// Number of history entries (back-button stops plus one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: a history has at least its initial entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total navigations issued, replace or push.
    #[must_use]
    pub fn navigation_count(&self) -> usize {
        self.navigations
    }

    /// Moves back one entry. Returns false at the first entry.
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Moves forward one entry. Returns false at the last entry.
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }
}

impl Navigate for MemoryHistory {
    fn navigate(&mut self, options: NavigateOptions<'_>) {
        let next = (options.search)(self.current());
        self.navigations += 1;

        if options.replace {
            debug!(entry = self.index, "Replacing history entry");
            self.entries[self.index] = next;
        } else {
            self.entries.truncate(self.index + 1);
            self.entries.push(next);
            self.index += 1;
            debug!(entry = self.index, "Pushed history entry");
        }
    }
}
