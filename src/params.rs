//! Request parameter collection with typed accessors.
//!
//! Query-string values and path captures land in the same ordered,
//! multi-valued collection. Duplicate keys are kept: path captures are
//! appended after any pre-existing query values, and [`Params::get`] returns
//! the first-appended value, so an explicit query parameter is never shadowed
//! by a capture.

use std::collections::HashMap;

use smallvec::SmallVec;

/// Maximum number of parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Values accepted as `true` by [`Params::bool`].
const TRUTHY: [&str; 6] = ["true", "t", "yes", "y", "on", "1"];

/// Ordered, multi-valued parameter collection.
///
/// Stack-allocated for the common case of `<=` [`MAX_INLINE_PARAMS`] entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: SmallVec<[(String, String); MAX_INLINE_PARAMS]>,
}

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value, keeping any existing entries for the same key.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.push((key.into(), value.into()));
    }

    /// First-appended value for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Parse the value as `i64`, defaulting to zero when absent or malformed.
    #[must_use]
    pub fn int64(&self, key: &str) -> i64 {
        self.get(key).unwrap_or("").parse().unwrap_or(0)
    }

    /// Truncating 32-bit variant of [`Params::int64`].
    #[must_use]
    pub fn int32(&self, key: &str) -> i32 {
        self.int64(key) as i32
    }

    /// True when the value is one of `true t yes y on 1`.
    #[must_use]
    pub fn bool(&self, key: &str) -> bool {
        match self.get(key) {
            Some(v) => TRUTHY.contains(&v),
            None => false,
        }
    }

    /// Parse a comma-separated value list as `i64`s, skipping entries that do
    /// not parse.
    #[must_use]
    pub fn int64s(&self, key: &str) -> Vec<i64> {
        self.get(key)
            .unwrap_or("")
            .split(',')
            .filter_map(|s| s.parse().ok())
            .collect()
    }

    /// Collapse to a single-valued map, keeping only keys that appear exactly
    /// once with a non-empty value.
    #[must_use]
    pub fn map(&self) -> HashMap<String, String> {
        let mut grouped: HashMap<&str, Vec<&str>> = HashMap::new();
        for (k, v) in &self.entries {
            grouped.entry(k.as_str()).or_default().push(v.as_str());
        }
        grouped
            .into_iter()
            .filter(|(k, vs)| !k.is_empty() && vs.len() == 1 && !vs[0].is_empty())
            .map(|(k, vs)| (k.to_string(), vs[0].to_string()))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Params {
        let mut p = Params::new();
        for (k, v) in pairs {
            p.append(*k, *v);
        }
        p
    }

    #[test]
    fn get_returns_first_appended_value() {
        let p = params(&[("id", "101405"), ("id", "7")]);
        assert_eq!(p.get("id"), Some("101405"));
        assert_eq!(p.get("z"), None);
    }

    #[test]
    fn int64_defaults_to_zero() {
        let p = params(&[("id", "101405")]);
        assert_eq!(p.int64("id"), 101405);
        assert_eq!(p.int64("z"), 0);
    }

    #[test]
    fn int32_truncates() {
        let p = params(&[("id", "101405")]);
        assert_eq!(p.int32("id"), 101405);
        assert_eq!(p.int32("z"), 0);
    }

    #[test]
    fn bool_matches_truthy_set() {
        let p = params(&[("a", "yes"), ("b", "1"), ("c", "nope"), ("d", "")]);
        assert!(p.bool("a"));
        assert!(p.bool("b"));
        assert!(!p.bool("c"));
        assert!(!p.bool("d"));
        assert!(!p.bool("missing"));
    }

    #[test]
    fn int64s_skips_unparsable_entries() {
        let p = params(&[("ids", "101405,90210,99999")]);
        assert_eq!(p.int64s("ids"), vec![101405, 90210, 99999]);

        let p = params(&[("ids", "101405,john,monkey,banana,32124")]);
        assert_eq!(p.int64s("ids"), vec![101405, 32124]);

        assert_eq!(p.int64s("z"), Vec::<i64>::new());
    }

    #[test]
    fn map_keeps_single_non_empty_values() {
        let p = params(&[("id", "101405"), ("name", "Jason")]);
        let expect: HashMap<String, String> = [
            ("id".to_string(), "101405".to_string()),
            ("name".to_string(), "Jason".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(p.map(), expect);

        let p = params(&[("id", "1"), ("id", "2"), ("empty", "")]);
        assert!(p.map().is_empty());
    }
}
