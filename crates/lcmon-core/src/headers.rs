//! Header fields presented on connect.
//!
//! The collaboration socket is fronted by anti-automation checks, so the
//! default set mirrors what a desktop Chrome sends for a WebSocket upgrade
//! from leetcode.com.

use std::collections::BTreeMap;

const DEFAULT_HEADERS: &[(&str, &str)] = &[
    (
        "User-Agent",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    ),
    ("Accept", "*/*"),
    ("Accept-Language", "en-US,en;q=0.9"),
    ("Accept-Encoding", "gzip, deflate, br"),
    ("Origin", "https://leetcode.com"),
    ("Sec-Fetch-Dest", "websocket"),
    ("Sec-Fetch-Mode", "websocket"),
    ("Sec-Fetch-Site", "same-site"),
    ("Pragma", "no-cache"),
    ("Cache-Control", "no-cache"),
];

/// Ordered list of `(name, value)` pairs. Static configuration, never
/// mutated while fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSet {
    entries: Vec<(String, String)>,
}

impl Default for HeaderSet {
    fn default() -> Self {
        Self::browser()
    }
}

impl HeaderSet {
    /// The browser-like default set.
    pub fn browser() -> Self {
        DEFAULT_HEADERS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for HeaderSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<BTreeMap<String, String>> for HeaderSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}
