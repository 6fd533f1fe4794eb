//! Ordered query mapping and the query-string codec.
//!
//! [`Query`] preserves insertion order, keeps keys unique (last `set` wins,
//! position is kept), and distinguishes a key that is *present with no
//! value* ([`QueryValue::Null`]) from an absent key.
//!
//! The encode direction is the deliberate part of this module.  Generic
//! form serializers tend to (a) always emit `=` even for empty values,
//! (b) encode spaces as `+`, and (c) mishandle null-like values.  This
//! encoder avoids all three for RFC 3986 fidelity: spaces become `%20`,
//! null and empty values render as a bare key, and list values render as
//! PHP-compatible bracket-indexed keys (`items%5B0%5D=x&items%5B1%5D=y`)
//! so the wire format stays interoperable with array-style parameters.
//!
//! Decoding delegates the standard form-encoded part to
//! [`form_urlencoded`] and layers the bracket-index grouping on top.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Percent-encode set for query keys and values: the RFC 3986 unreserved
/// characters pass through, everything else is escaped.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A single query parameter value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// A key with no value; renders as the bare key, without `=`.
    Null,
    /// A plain string value.  An empty string renders the same way as
    /// [`Null`](QueryValue::Null).
    Text(String),
    /// An ordered list of values; renders as bracket-indexed keys
    /// (`key[0]=..&key[1]=..`).
    List(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_owned())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::List(values)
    }
}

impl From<Vec<&str>> for QueryValue {
    fn from(values: Vec<&str>) -> Self {
        QueryValue::List(values.into_iter().map(str::to_owned).collect())
    }
}

/// An ordered key-value mapping of query parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query {
    pairs: Vec<(String, QueryValue)>,
}

impl Query {
    /// Create an empty query mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys in the mapping.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if the mapping holds no keys.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns `true` if `key` is present, including when its value is
    /// [`QueryValue::Null`].  Key existence, not truthiness.
    pub fn has(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// The value stored under `key`, or `None` when absent.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.position(key).map(|i| &self.pairs[i].1)
    }

    /// Mutable access to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut QueryValue> {
        self.position(key).map(|i| &mut self.pairs[i].1)
    }

    /// Insert or replace the value under `key`.
    ///
    /// An existing key keeps its position; a new key is appended.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(i) => self.pairs[i].1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    /// Upsert every pair from `pairs`, overwriting collisions.
    pub fn extend<K, V, I>(&mut self, pairs: I)
    where
        K: Into<String>,
        V: Into<QueryValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (key, value) in pairs {
            self.set(key, value);
        }
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        let i = self.position(key)?;
        Some(self.pairs.remove(i).1)
    }

    /// Remove every key.
    pub fn clear(&mut self) {
        self.pairs.clear();
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> + '_ {
        self.pairs.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Decode a raw (still percent-encoded) query string.
    ///
    /// Standard form decoding via [`form_urlencoded`]: `+` decodes to a
    /// space, a bare key or empty value decodes to
    /// [`QueryValue::Null`].  Bracket-suffixed keys (`k[0]`, `k[]`) are
    /// grouped into a [`QueryValue::List`] under the base key in encounter
    /// order.
    pub fn decode(input: &str) -> Self {
        let mut query = Query::new();
        for (key, value) in form_urlencoded::parse(input.as_bytes()) {
            match bracket_base(&key) {
                Some(base) => {
                    let element = value.into_owned();
                    match query.position(base) {
                        Some(i) => match &mut query.pairs[i].1 {
                            QueryValue::List(items) => items.push(element),
                            slot => *slot = QueryValue::List(vec![element]),
                        },
                        None => {
                            let list = QueryValue::List(vec![element]);
                            query.pairs.push((base.to_owned(), list));
                        }
                    }
                }
                None => {
                    let value = if value.is_empty() {
                        QueryValue::Null
                    } else {
                        QueryValue::Text(value.into_owned())
                    };
                    query.set(key.into_owned(), value);
                }
            }
        }
        query
    }

    /// Encode the mapping into its canonical query-string form.
    ///
    /// An empty mapping encodes to `""` (no stray `&` or `?`).
    pub fn encode(&self) -> String {
        let mut pieces: Vec<String> = Vec::with_capacity(self.pairs.len());
        for (key, value) in &self.pairs {
            match value {
                QueryValue::Null => pieces.push(encode_component(key)),
                QueryValue::Text(text) if text.is_empty() => pieces.push(encode_component(key)),
                QueryValue::Text(text) => {
                    pieces.push(format!(
                        "{}={}",
                        encode_component(key),
                        encode_component(text)
                    ));
                }
                QueryValue::List(items) => {
                    for (index, item) in items.iter().enumerate() {
                        let indexed = encode_component(&format!("{key}[{index}]"));
                        if item.is_empty() {
                            pieces.push(indexed);
                        } else {
                            pieces.push(format!("{indexed}={}", encode_component(item)));
                        }
                    }
                }
            }
        }
        pieces.join("&")
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.pairs.iter().position(|(k, _)| k == key)
    }
}

impl fmt::Display for Query {
    /// Same output as [`Query::encode`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// The base key of a bracket-suffixed key (`"items[0]"` -> `"items"`), or
/// `None` for a plain key.
fn bracket_base(key: &str) -> Option<&str> {
    if !key.ends_with(']') {
        return None;
    }
    let open = key.find('[')?;
    if open == 0 {
        return None;
    }
    Some(&key[..open])
}

fn encode_component(input: &str) -> String {
    utf8_percent_encode(input, COMPONENT).to_string()
}
