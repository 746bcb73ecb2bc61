use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Caller-supplied data attached to a single report
pub type ExtraData = BTreeMap<String, serde_json::Value>;

/// The request an error was raised in
///
/// Only the pieces the reporting pipeline reads are kept: the raw body for
/// report context, and the host and headers for referer-based voting.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpRequest {
    pub method: String,
    pub uri: String,
    pub host: Option<String>,
    /// Header names are stored lowercase
    #[serde(deserialize_with = "lowercase_keys")]
    pub headers: BTreeMap<String, String>,
    pub content: String,
}

impl HttpRequest {
    pub fn new<M: Into<String>, U: Into<String>>(method: M, uri: U) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            ..Self::default()
        }
    }

    pub fn with_host<H: Into<String>>(mut self, host: H) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_header<K: AsRef<str>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.insert(name.as_ref().to_lowercase(), value.into());
        self
    }

    pub fn with_content<C: Into<String>>(mut self, content: C) -> Self {
        self.content = content.into();
        self
    }

    /// Raw request body
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .or_else(|| {
                // Headers set directly on the struct may keep their original case
                self.headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(String::as_str)
    }

    pub fn referer(&self) -> Option<&str> {
        self.header("referer")
    }

    /// Target host, falling back to the `Host` header
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref().or_else(|| self.header("host"))
    }
}

fn lowercase_keys<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let headers = BTreeMap::<String, String>::deserialize(deserializer)?;
    Ok(headers
        .into_iter()
        .map(|(name, value)| (name.to_lowercase(), value))
        .collect())
}
