//! Raw query-string parsing and serialization.
//!
//! Parsing is total: malformed escapes are kept verbatim and empty keys are
//! skipped, so any bookmark still produces a usable state.

use crate::{SearchState, SearchValue};
use indexmap::IndexMap;

impl SearchState {
    /// Parses a raw query string (`?page=2&status=a&status=b`).
    ///
    /// - repeated keys become a [`SearchValue::List`] in URL order
    /// - an unescaped `,` splits a value into a list (`status=a,b`)
    /// - integers whose canonical form matches the raw text become numbers,
    ///   so `page=2` is numeric while `id=007` stays text
    #[must_use]
    pub fn from_query(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut state = Self::new();
        let mut pairs: IndexMap<String, Vec<&str>> = IndexMap::new();

        for pair in raw.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let key = decode_component(raw_key);
            if key.is_empty() {
                continue;
            }
            pairs.entry(key.clone()).or_default().push(pair);
            state.append(key, parse_value(raw_value));
        }

        for (key, written) in pairs {
            state.remember_written(&key, written.join("&"));
        }
        state
    }

    /// Serializes to a query string without the leading `?`.
    ///
    /// Keys still holding the value they were parsed with are emitted as
    /// originally written. Otherwise list items become repeated pairs and
    /// every component is percent-encoded, so commas inside items never
    /// read back as delimiters.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut pairs = Vec::with_capacity(self.len());
        for (key, value) in self.iter() {
            if let Some(text) = self.written_text(key) {
                pairs.push(text.to_string());
                continue;
            }
            let key = urlencoding::encode(key);
            match value {
                SearchValue::Number(n) => pairs.push(format!("{key}={n}")),
                SearchValue::Text(s) => pairs.push(format!("{key}={}", urlencoding::encode(s))),
                SearchValue::List(items) => {
                    for item in items {
                        pairs.push(format!("{key}={}", urlencoding::encode(item)));
                    }
                }
            }
        }
        pairs.join("&")
    }
}

fn parse_value(raw: &str) -> SearchValue {
    if raw.contains(',') {
        return SearchValue::List(
            raw.split(',')
                .filter(|item| !item.is_empty())
                .map(decode_component)
                .collect(),
        );
    }

    let decoded = decode_component(raw);
    match decoded.parse::<i64>() {
        Ok(n) if n.to_string() == decoded => SearchValue::Number(n),
        _ => SearchValue::Text(decoded),
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
