//! String-keyed run configuration with silent-default accessors.
//!
//! Analysis settings arrive as untyped key/value pairs (typically lifted
//! from a model file's annotation block). [`Properties`] stores them in
//! insertion order and hands out typed values: a missing key *or* a value
//! that fails to parse falls back to the caller's default. Callers that
//! need to distinguish the two cases use [`Properties::get`] directly.

use indexmap::IndexMap;
use std::str::FromStr;

/// Insertion-ordered string map holding analysis configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Properties {
    entries: IndexMap<String, String>,
}

impl Properties {
    /// Create an empty property map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a property.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Chainable form of [`set`](Self::set), for building maps inline.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Raw string value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// `f64` value for `key`; `default` when missing or unparsable.
    pub fn f64_or(&self, key: &str, default: f64) -> f64 {
        self.parse_or(key, default)
    }

    /// `u64` value for `key`; `default` when missing or unparsable.
    pub fn u64_or(&self, key: &str, default: u64) -> u64 {
        self.parse_or(key, default)
    }

    /// `usize` value for `key`; `default` when missing or unparsable.
    pub fn usize_or(&self, key: &str, default: usize) -> usize {
        self.parse_or(key, default)
    }

    /// String value for `key`; `default` when missing.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Number of stored properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn parse_or<T: FromStr>(&self, key: &str, default: T) -> T {
        match self.entries.get(key) {
            Some(raw) => raw.trim().parse().unwrap_or(default),
            None => default,
        }
    }
}

impl FromIterator<(String, String)> for Properties {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn missing_key_yields_default() {
        let p = Properties::new();
        assert_eq!(p.f64_or("tolerance", 1e-4), 1e-4);
        assert_eq!(p.u64_or("seed", 314_159), 314_159);
        assert_eq!(p.str_or("analysis", "transient"), "transient");
    }

    #[test]
    fn present_key_parses() {
        let p = Properties::new()
            .with("tolerance", "0.5")
            .with("runs", "12")
            .with("analysis", "stationary");
        assert_eq!(p.f64_or("tolerance", 1e-4), 0.5);
        assert_eq!(p.usize_or("runs", 1), 12);
        assert_eq!(p.str_or("analysis", "transient"), "stationary");
    }

    #[test]
    fn unparsable_value_falls_back_silently() {
        let p = Properties::new().with("tolerance", "lots");
        assert_eq!(p.f64_or("tolerance", 1e-4), 1e-4);
    }

    #[test]
    fn whitespace_is_tolerated() {
        let p = Properties::new().with("timeLimit", " 2100.0 ");
        assert_eq!(p.f64_or("timeLimit", 0.0), 2100.0);
    }

    #[test]
    fn later_set_overwrites() {
        let mut p = Properties::new();
        p.set("runs", "3");
        p.set("runs", "5");
        assert_eq!(p.usize_or("runs", 1), 5);
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn iteration_preserves_insertion_order() {
        let p = Properties::new().with("b", "2").with("a", "1");
        let keys: Vec<&str> = p.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    proptest! {
        // `Display` for numbers is the shortest exactly-parsing form,
        // so stored values must survive the string map unchanged.
        #[test]
        fn displayed_numbers_roundtrip_through_typed_getters(
            f in -1.0e12f64..1.0e12,
            u in any::<u64>(),
            n in any::<usize>(),
        ) {
            let p = Properties::new()
                .with("f", f.to_string())
                .with("u", u.to_string())
                .with("n", n.to_string());
            prop_assert_eq!(p.f64_or("f", 0.0), f);
            prop_assert_eq!(p.u64_or("u", 0), u);
            prop_assert_eq!(p.usize_or("n", 0), n);
        }
    }
}
