//! Query codec: converts raw [`SearchValue`]s into typed table values and back.
//!
//! Every decoder is total. Bad input falls back to "absent" or to the
//! caller's default instead of failing, because a stale bookmark must still
//! render a usable table.

use crate::SearchValue;
use serde::{Deserialize, Serialize};

/// The value shape a column filter stores in the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Multi-select: an ordered list of strings.
    Array,
    /// Free text.
    String,
}

/// A typed column filter value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    List(Vec<String>),
}

impl FilterValue {
    /// Creates a list value.
    #[must_use]
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Creates a text value.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for `""`, `[]` and lists holding only empty items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.iter().all(String::is_empty),
        }
    }

    /// Whether this value already has the shape `ty` expects.
    #[must_use]
    pub const fn matches(&self, ty: FilterType) -> bool {
        matches!(
            (self, ty),
            (Self::Text(_), FilterType::String) | (Self::List(_), FilterType::Array)
        )
    }

    /// Coerces into `ty`'s shape: text becomes a one-item list (none if
    /// empty), a list becomes its items joined with `,`.
    #[must_use]
    pub fn coerce(self, ty: FilterType) -> Self {
        match (self, ty) {
            (Self::Text(s), FilterType::Array) if s.is_empty() => Self::List(Vec::new()),
            (Self::Text(s), FilterType::Array) => Self::List(vec![s]),
            (Self::List(items), FilterType::String) => Self::Text(items.join(",")),
            (value, _) => value,
        }
    }

    /// Returns the items, if this is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            Self::Text(_) => None,
        }
    }

    /// Returns the text, if this is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::List(_) => None,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

impl From<Vec<&str>> for FilterValue {
    fn from(value: Vec<&str>) -> Self {
        Self::list(value)
    }
}

/// Decodes a multi-select value. Missing or empty input yields `[]`;
/// duplicates are kept in URL order.
#[must_use]
pub fn decode_array(raw: Option<&SearchValue>) -> Vec<String> {
    match raw {
        None => Vec::new(),
        Some(SearchValue::List(items)) => items.clone(),
        Some(SearchValue::Text(s)) if s.is_empty() => Vec::new(),
        Some(SearchValue::Text(s)) => vec![s.clone()],
        Some(SearchValue::Number(n)) => vec![n.to_string()],
    }
}

/// Decodes a free-text value. Missing input yields `None`.
#[must_use]
pub fn decode_string(raw: Option<&SearchValue>) -> Option<String> {
    raw.map(ToString::to_string)
}

/// Decodes a positive integer, falling back to `default` when the value is
/// missing, non-numeric, zero, or negative.
#[must_use]
pub fn decode_positive(raw: Option<&SearchValue>, default: usize) -> usize {
    let parsed = match raw {
        Some(SearchValue::Number(n)) => Some(*n),
        Some(SearchValue::Text(s)) => s.trim().parse::<i64>().ok(),
        Some(SearchValue::List(_)) | None => None,
    };

    parsed
        .filter(|n| *n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(default)
}

/// Returns true when `decode_positive` would have to fall back.
#[must_use]
pub fn is_malformed_positive(raw: Option<&SearchValue>) -> bool {
    raw.is_some() && decode_positive(raw, 0) == 0
}

/// Decodes a raw value by filter type. An empty result means "absent".
#[must_use]
pub fn decode(raw: Option<&SearchValue>, ty: FilterType) -> FilterValue {
    match ty {
        FilterType::Array => FilterValue::List(decode_array(raw)),
        FilterType::String => FilterValue::Text(decode_string(raw).unwrap_or_default()),
    }
}

/// Encodes a typed value for the URL. Empty list items are dropped; empty
/// values encode to `None`, which callers turn into a key deletion.
#[must_use]
pub fn encode(value: &FilterValue, ty: FilterType) -> Option<SearchValue> {
    match value.clone().coerce(ty) {
        FilterValue::List(mut items) => {
            items.retain(|item| !item.is_empty());
            (!items.is_empty()).then_some(SearchValue::List(items))
        }
        FilterValue::Text(s) if s.is_empty() => None,
        FilterValue::Text(s) => Some(SearchValue::Text(s)),
    }
}

/// Encodes a positive integer.
#[must_use]
pub fn encode_positive(value: usize) -> SearchValue {
    SearchValue::from(value)
}
