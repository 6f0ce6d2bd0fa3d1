//! The ordered key/value view of a route's query string.
//!
//! `SearchState` is owned by the router. Synchronizers never mutate it in
//! place: they describe their changes as a [`SearchPatch`] and the router
//! produces the next state with [`SearchState::apply`], which leaves every
//! key the patch does not mention exactly where it was.

use crate::{Error, Result, SearchValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Full set of URL query parameters for the current route.
///
/// Equality and serialization only look at the values. States parsed from a
/// query string also remember each key's original text, so untouched keys
/// serialize back exactly as they were written.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchState {
    entries: IndexMap<String, SearchValue>,
    #[serde(skip)]
    written: IndexMap<String, Written>,
}

/// A key's value as parsed, with the raw pairs it came from.
#[derive(Clone)]
struct Written {
    value: SearchValue,
    text: String,
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Eq for SearchState {}

impl std::fmt::Debug for SearchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}

impl SearchState {
    /// Creates an empty search state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for constructing fixtures.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<SearchValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builds search state from the JSON object a router hands over.
    ///
    /// `null` members are treated as absent keys.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(mut map) => {
                map.retain(|_, v| !v.is_null());
                Ok(serde_json::from_value(serde_json::Value::Object(map))?)
            }
            serde_json::Value::Null => Err(Error::NotAnObject("null")),
            serde_json::Value::Bool(_) => Err(Error::NotAnObject("a boolean")),
            serde_json::Value::Number(_) => Err(Error::NotAnObject("a number")),
            serde_json::Value::String(_) => Err(Error::NotAnObject("a string")),
            serde_json::Value::Array(_) => Err(Error::NotAnObject("an array")),
        }
    }

    /// Parses a JSON object string into search state.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Self::from_json(serde_json::from_str(raw)?)
    }

    /// Gets the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&SearchValue> {
        self.entries.get(key)
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Sets a key. An existing key keeps its position.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<SearchValue>,
    ) -> Option<SearchValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes a key, preserving the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<SearchValue> {
        self.entries.shift_remove(key)
    }

    /// Appends a value under `key`, turning repeated keys into a list.
    pub(crate) fn append(&mut self, key: String, value: SearchValue) {
        match self.entries.get_mut(&key) {
            Some(existing) => {
                let mut items = std::mem::replace(existing, SearchValue::List(Vec::new()))
                    .into_items();
                items.extend(value.into_items());
                *existing = SearchValue::List(items);
            }
            None => {
                self.entries.insert(key, value);
            }
        }
    }

    /// Records the raw `key=value` pairs `key` was parsed from.
    pub(crate) fn remember_written(&mut self, key: &str, text: String) {
        if let Some(value) = self.entries.get(key) {
            self.written.insert(
                key.to_string(),
                Written {
                    value: value.clone(),
                    text,
                },
            );
        }
    }

    /// The raw text `key` was parsed from, while its value is unchanged.
    pub(crate) fn written_text(&self, key: &str) -> Option<&str> {
        let written = self.written.get(key)?;
        (self.entries.get(key) == Some(&written.value)).then_some(written.text.as_str())
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates keys in URL order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterates key/value pairs in URL order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SearchValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Produces the next state: a shallow copy of `self` with the patch applied.
    #[must_use]
    pub fn apply(&self, patch: &SearchPatch) -> Self {
        let mut next = self.clone();
        for (key, change) in &patch.changes {
            match change {
                Some(value) => {
                    next.entries.insert(key.clone(), value.clone());
                }
                None => {
                    next.entries.shift_remove(key);
                }
            }
        }
        next
    }
}

impl<K, V> FromIterator<(K, V)> for SearchState
where
    K: Into<String>,
    V: Into<SearchValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = Self::new();
        for (key, value) in iter {
            state.insert(key, value);
        }
        state
    }
}

/// A shallow merge over [`SearchState`]: each entry either sets a key or
/// deletes it. Setting the same key twice keeps the last change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPatch {
    changes: IndexMap<String, Option<SearchValue>>,
}

impl SearchPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<SearchValue>) -> &mut Self {
        self.changes.insert(key.into(), Some(value.into()));
        self
    }

    /// Deletes `key`.
    pub fn remove(&mut self, key: impl Into<String>) -> &mut Self {
        self.changes.insert(key.into(), None);
        self
    }

    /// Sets `key` when `value` is `Some`, deletes it otherwise.
    pub fn set_or_remove(
        &mut self,
        key: impl Into<String>,
        value: Option<SearchValue>,
    ) -> &mut Self {
        self.changes.insert(key.into(), value);
        self
    }

    /// Folds another patch into this one; its changes win on conflicts.
    pub fn extend(&mut self, other: SearchPatch) {
        for (key, change) in other.changes {
            self.changes.insert(key, change);
        }
    }

    /// Returns the pending change for `key`, if any.
    #[must_use]
    pub fn change_for(&self, key: &str) -> Option<&Option<SearchValue>> {
        self.changes.get(key)
    }

    /// Keys touched by this patch.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.changes.keys().map(String::as_str)
    }

    /// True when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
