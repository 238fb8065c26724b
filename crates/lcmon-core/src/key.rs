//! Resource keys and the endpoint template they are substituted into.

use crate::error::FetchError;
use std::fmt;
use url::Url;

/// Placeholder replaced by the resource key in an endpoint template.
pub const KEY_PLACEHOLDER: &str = "{key}";

/// Default endpoint of the collaboration socket.
pub const DEFAULT_ENDPOINT: &str = "wss://collaboration-ws.leetcode.com/problems/{key}";

/// Identifier of the item whose live viewer count is requested (a problem slug).
/// Never empty and never carries surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey(String);

impl ResourceKey {
    /// Build a key from a raw input line. Blank lines yield `None`.
    pub fn from_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(ResourceKey(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// URI template with a `{key}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    template: String,
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl Endpoint {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Substitute the key verbatim and parse the result.
    pub fn address_for(&self, key: &ResourceKey) -> Result<Url, FetchError> {
        let address = self.template.replace(KEY_PLACEHOLDER, key.as_str());
        Url::parse(&address).map_err(|source| FetchError::InvalidAddress { address, source })
    }
}
