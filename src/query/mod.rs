//! The bracketed nested-query dialect.
//!
//! One query has two views: an ordered sequence of [`QueryToken`]s
//! (duplicates allowed, order significant) and a tree of scalars,
//! sequences and mappings derived from the bracket suffixes of the token
//! names. [`decode`] turns tokens into a tree, [`encode`] turns a tree
//! back into tokens; both reject keys used with conflicting shapes.

mod codec;
mod token;

pub use codec::{decode, encode};
pub use token::{tokenize, QueryToken};

use core::fmt;

/// One node of a decoded query tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryValue {
    /// A leaf value; `None` for a token that had no `=`.
    Scalar(Option<String>),
    /// A `key[]`-style sequence.
    Seq(Vec<QueryValue>),
    /// A `key[sub]`-style mapping with insertion-ordered keys.
    Map(QueryMap),
}

impl QueryValue {
    /// A scalar carrying no value.
    pub const NONE: QueryValue = QueryValue::Scalar(None);

    /// Returns `true` for an empty sequence or mapping.
    pub fn is_empty_container(&self) -> bool {
        match self {
            QueryValue::Seq(seq) => seq.is_empty(),
            QueryValue::Map(map) => map.is_empty(),
            QueryValue::Scalar(_) => false,
        }
    }

    /// Returns the scalar value, if this node is a scalar.
    pub fn as_scalar(&self) -> Option<Option<&str>> {
        match self {
            QueryValue::Scalar(v) => Some(v.as_deref()),
            _ => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        QueryValue::Scalar(Some(s.to_string()))
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        QueryValue::Scalar(Some(s))
    }
}

impl From<Option<String>> for QueryValue {
    fn from(s: Option<String>) -> Self {
        QueryValue::Scalar(s)
    }
}

impl From<bool> for QueryValue {
    fn from(b: bool) -> Self {
        QueryValue::Scalar(Some(b.to_string()))
    }
}

impl From<i64> for QueryValue {
    fn from(n: i64) -> Self {
        QueryValue::Scalar(Some(n.to_string()))
    }
}

impl From<u32> for QueryValue {
    fn from(n: u32) -> Self {
        QueryValue::Scalar(Some(n.to_string()))
    }
}

impl From<QueryMap> for QueryValue {
    fn from(m: QueryMap) -> Self {
        QueryValue::Map(m)
    }
}

impl<T: Into<QueryValue>> From<Vec<T>> for QueryValue {
    fn from(items: Vec<T>) -> Self {
        QueryValue::Seq(items.into_iter().map(Into::into).collect())
    }
}

/// A string-keyed mapping that preserves insertion order.
///
/// Key order is significant when encoding, so a hash map would not do;
/// lookups walk the entries, which is fine at query-string sizes.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: Vec<(String, QueryValue)>,
}

impl QueryMap {
    /// Creates an empty map.
    pub fn new() -> QueryMap {
        QueryMap::default()
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when the map has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a key.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Looks up a key mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut QueryValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if the key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Inserts a value, overwriting in place when the key exists and
    /// appending otherwise.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        let key = key.into();
        let value = value.into();
        match self.get_mut(&key) {
            Some(slot) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Returns the slot for `key`, inserting `default` when absent.
    pub(crate) fn slot(&mut self, key: &str, default: QueryValue) -> &mut QueryValue {
        let i = match self.entries.iter().position(|(k, _)| k == key) {
            Some(i) => i,
            None => {
                self.entries.push((key.to_string(), default));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }

    /// Removes a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        let i = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(i).1)
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merges `other` into `self`: mappings merge recursively key by key,
    /// everything else overwrites on key collision.
    pub fn deep_merge(&mut self, other: QueryMap) {
        for (key, value) in other.entries {
            let existing = self.entries.iter().position(|(k, _)| *k == key);
            match (existing, value) {
                (Some(i), QueryValue::Map(incoming)) => {
                    if let QueryValue::Map(current) = &mut self.entries[i].1 {
                        current.deep_merge(incoming);
                    } else {
                        self.entries[i].1 = QueryValue::Map(incoming);
                    }
                }
                (Some(i), value) => self.entries[i].1 = value,
                (None, value) => self.entries.push((key, value)),
            }
        }
    }
}

impl IntoIterator for QueryMap {
    type Item = (String, QueryValue);
    type IntoIter = std::vec::IntoIter<(String, QueryValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl fmt::Debug for QueryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = QueryMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<K: Into<String>, V: Into<QueryValue>, const N: usize> From<[(K, V); N]> for QueryMap {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let map = QueryMap::from([("b", "2"), ("a", "1")]);
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a"]);
    }

    #[test]
    fn insert_overwrites_in_place() {
        let mut map = QueryMap::from([("a", "1"), ("b", "2")]);
        map.insert("a", "3");
        assert_eq!(map.get("a"), Some(&QueryValue::from("3")));
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn deep_merge_recurses_into_mappings() {
        let mut base = QueryMap::from([(
            "a",
            QueryMap::from([("x", "1"), ("y", "2")]),
        )]);
        base.deep_merge(QueryMap::from([(
            "a",
            QueryMap::from([("y", "3"), ("z", "4")]),
        )]));
        let QueryValue::Map(inner) = base.get("a").unwrap() else {
            panic!("expected mapping");
        };
        assert_eq!(inner.get("x"), Some(&QueryValue::from("1")));
        assert_eq!(inner.get("y"), Some(&QueryValue::from("3")));
        assert_eq!(inner.get("z"), Some(&QueryValue::from("4")));
    }

    #[test]
    fn deep_merge_overwrites_shape_changes() {
        let mut base = QueryMap::from([("a", "1")]);
        base.deep_merge(QueryMap::from([("a", QueryMap::from([("b", "2")]))]));
        assert!(matches!(base.get("a"), Some(QueryValue::Map(_))));
    }
}
