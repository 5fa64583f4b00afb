//! Ordered header collection with case-insensitive names.

use serde::Deserialize;
use std::collections::BTreeMap;

const REDACTED: &str = "***";

/// Ordered set of HTTP headers.
///
/// Names compare case-insensitively: inserting `accept` replaces an existing
/// `Accept` entry in place. Insertion order is otherwise preserved so that
/// logged headers read the way they were composed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "BTreeMap<String, String>")]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl HeaderSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a header, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(idx) => {
                let slot = &mut self.entries[idx];
                slot.0 = name;
                Some(std::mem::replace(&mut slot.1, value))
            }
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|idx| self.entries[idx].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|idx| self.entries.remove(idx).1)
    }

    /// Apply every entry of `overrides` on top of `self`; `overrides` wins on collision.
    pub fn merge(&mut self, overrides: &HeaderSet) {
        for (name, value) in overrides.iter() {
            self.insert(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy with credential-bearing values masked, for logging.
    pub fn redacted(&self) -> HeaderSet {
        let entries = self
            .entries
            .iter()
            .map(|(name, value)| {
                if is_sensitive(name) {
                    let masked = match value.split_once(' ') {
                        Some((scheme, _)) => format!("{} {}", scheme, REDACTED),
                        None => REDACTED.to_string(),
                    };
                    (name.clone(), masked)
                } else {
                    (name.clone(), value.clone())
                }
            })
            .collect();
        HeaderSet { entries }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(name))
    }
}

fn is_sensitive(name: &str) -> bool {
    ["authorization", "proxy-authorization", "cookie", "x-api-key"]
        .iter()
        .any(|s| name.eq_ignore_ascii_case(s))
}

impl std::fmt::Display for HeaderSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = HeaderSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

impl From<BTreeMap<String, String>> for HeaderSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a HeaderSet {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_case_insensitively() {
        let mut headers = HeaderSet::new().with("Accept", "application/json");
        let previous = headers.insert("accept", "text/plain");
        assert_eq!(previous.as_deref(), Some("application/json"));
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("ACCEPT"), Some("text/plain"));
    }

    #[test]
    fn test_merge_overrides_win_and_order_kept() {
        let mut base = HeaderSet::new()
            .with("Accept", "application/json")
            .with("Authorization", "Bearer a");
        let overrides = HeaderSet::new()
            .with("X-Custom", "1")
            .with("authorization", "Bearer b");
        base.merge(&overrides);

        let names: Vec<&str> = base.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["Accept", "authorization", "X-Custom"]);
        assert_eq!(base.get("Authorization"), Some("Bearer b"));
    }

    #[test]
    fn test_redacted_masks_credentials_only() {
        let headers = HeaderSet::new()
            .with("Accept", "application/json")
            .with("Authorization", "Bearer secret-token")
            .with("X-Api-Key", "k");
        let shown = headers.redacted().to_string();
        assert!(!shown.contains("secret-token"));
        assert!(shown.contains("Authorization: Bearer ***"));
        assert!(shown.contains("X-Api-Key: ***"));
        assert!(shown.contains("Accept: application/json"));
    }

    #[test]
    fn test_deserialize_from_json_object() {
        let headers: HeaderSet =
            serde_json::from_str(r#"{"X-One": "1", "Accept": "text/csv"}"#).unwrap();
        assert_eq!(headers.get("x-one"), Some("1"));
        assert_eq!(headers.get("accept"), Some("text/csv"));
    }

    #[test]
    fn test_remove() {
        let mut headers = HeaderSet::new().with("A", "1").with("B", "2");
        assert_eq!(headers.remove("a").as_deref(), Some("1"));
        assert!(!headers.contains("A"));
        assert_eq!(headers.len(), 1);
    }
}
