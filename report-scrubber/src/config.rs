// Scrubbing configuration
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Which exceptions get scrubbed, and which values count as sensitive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrubConfig {
    /// Exception classes to scrub (exact class match)
    #[serde(default)]
    pub exceptions: BTreeSet<String>,
    /// Lookup key -> sensitive value; the key names the placeholder
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

impl ScrubConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exception<C: Into<String>>(mut self, class: C) -> Self {
        self.exceptions.insert(class.into());
        self
    }

    pub fn with_parameter<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Register bare values under their position, starting at `0`
    pub fn with_parameter_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        for (index, value) in values.into_iter().enumerate() {
            self.parameters.insert(index.to_string(), value.into());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.exceptions.is_empty() && self.parameters.is_empty()
    }
}
