//! Flat key/value views over environment variables

use std::collections::btree_map;
use std::collections::BTreeMap;
use std::env;
use std::ops::Bound;

/// An immutable set of flat `KEY=value` entries.
///
/// A namespace is built once per decode (from the process environment or from
/// any iterator of pairs) and never mutated afterwards. Nested values are decoded
/// from *narrowed* copies: [`Namespace::narrow`] keeps the entries below a prefix
/// and strips that prefix from their keys.
///
/// Each view remembers the prefixes stripped on the way down (its origin), so a
/// key found in a narrowed view can always be reported by its full name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    entries: BTreeMap<String, String>,
    origin: String,
}

impl Namespace {
    /// Create an empty namespace
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the environment of the current process.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_env() -> Self {
        env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    /// Look up the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Derive the view of all entries whose key starts with `prefix`, with the
    /// prefix removed from their keys.
    ///
    /// An empty prefix yields a copy of this view.
    pub fn narrow(&self, prefix: &str) -> Namespace {
        if prefix.is_empty() {
            return self.clone();
        }

        let entries = self
            .entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key[prefix.len()..].to_owned(), value.clone()))
            .collect();

        Namespace {
            entries,
            origin: format!("{}{}", self.origin, prefix),
        }
    }

    /// Prefixes stripped from the original keys to reach this view
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Full name of `key` in the namespace this view was narrowed from
    pub fn qualify(&self, key: &str) -> String {
        format!("{}{}", self.origin, key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the view holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in ascending key order
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }
}

/// Iterator over the entries of a [`Namespace`]
#[derive(Debug)]
pub struct Iter<'a> {
    inner: btree_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Namespace {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> FromIterator<(K, V)> for Namespace
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut namespace = Namespace::new();
        namespace.extend(iter);
        namespace
    }
}

impl<K, V> Extend<(K, V)> for Namespace
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(key, value)| (key.into(), value.into())));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn sample() -> Namespace {
        Namespace::from_iter([
            ("ACME_FOO", "1"),
            ("ACME_BAR", "2"),
            ("ACMEX", "3"),
            ("OTHER", "4"),
        ])
    }

    #[test]
    fn test_narrow_strips_prefix() {
        let narrowed = sample().narrow("ACME_");
        assert_eq!(narrowed.len(), 2);
        assert_eq!(narrowed.get("FOO"), Some("1"));
        assert_eq!(narrowed.get("BAR"), Some("2"));
        assert_eq!(narrowed.get("ACMEX"), None);
    }

    #[test]
    fn test_narrow_keeps_original_untouched() {
        let namespace = sample();
        let _ = namespace.narrow("ACME_");
        assert_eq!(namespace.len(), 4);
        assert_eq!(namespace.get("ACME_FOO"), Some("1"));
    }

    #[test]
    fn test_narrow_accumulates_origin() {
        let narrowed = sample().narrow("ACME_").narrow("F");
        assert_eq!(narrowed.origin(), "ACME_F");
        assert_eq!(narrowed.qualify("OO"), "ACME_FOO");
        assert_eq!(narrowed.get("OO"), Some("1"));
    }

    #[test]
    fn test_narrow_empty_prefix_is_identity() {
        let namespace = sample();
        assert_eq!(namespace.narrow(""), namespace);
    }

    #[test]
    fn test_narrow_without_matches_is_empty() {
        let narrowed = sample().narrow("NOPE_");
        assert!(narrowed.is_empty());
        assert_eq!(narrowed.origin(), "NOPE_");
    }

    #[test]
    fn test_iter_is_sorted() {
        let keys: Vec<_> = sample().keys().map(str::to_owned).collect();
        assert_eq!(keys, ["ACMEX", "ACME_BAR", "ACME_FOO", "OTHER"]);
    }

    #[test]
    #[serial]
    fn test_from_env_snapshot() {
        std::env::set_var("NESTENV_NS_SNAPSHOT", "present");
        let namespace = Namespace::from_env();
        std::env::remove_var("NESTENV_NS_SNAPSHOT");

        assert_eq!(namespace.get("NESTENV_NS_SNAPSHOT"), Some("present"));
        assert!(Namespace::from_env().get("NESTENV_NS_SNAPSHOT").is_none());
    }
}
