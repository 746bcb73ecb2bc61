//! Reporter configuration
//!
//! Recognized options:
//! - `error_level`: runtime error levels worth reporting (bitmask, `-1` for all)
//! - `scrub_exceptions`: exception classes whose traces get scrubbed
//! - `scrub_parameters`: sensitive values keyed by their placeholder name
//! - `ignored_status_codes`: HTTP client-error statuses never reported

use error_common::{ErrorLevel, ReporterError, Result};
use report_scrubber::ScrubConfig;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    pub error_level: ErrorLevel,
    pub scrub_exceptions: BTreeSet<String>,
    pub scrub_parameters: BTreeMap<String, String>,
    pub ignored_status_codes: Vec<u16>,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            error_level: ErrorLevel::EVERYTHING,
            scrub_exceptions: BTreeSet::new(),
            scrub_parameters: BTreeMap::new(),
            ignored_status_codes: vec![404],
        }
    }
}

impl ReporterConfig {
    /// Create a configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ReporterError::Configuration`] when a variable is set but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ReporterConfig::from_env`] with an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns [`ReporterError::Configuration`] on malformed values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup("REPORTER_ERROR_LEVEL") {
            config.error_level = level.parse()?;
        }

        if let Some(classes) = lookup("REPORTER_SCRUB_EXCEPTIONS") {
            config.scrub_exceptions = split_list(&classes).map(str::to_string).collect();
        }

        if let Some(parameters) = lookup("REPORTER_SCRUB_PARAMETERS") {
            config.scrub_parameters = parse_parameters(&parameters)?;
        }

        if let Some(codes) = lookup("REPORTER_IGNORED_STATUS_CODES") {
            config.ignored_status_codes = split_list(&codes)
                .map(|code| {
                    code.parse::<u16>().map_err(|_| {
                        ReporterError::Configuration(format!("Invalid HTTP status code: {}", code))
                    })
                })
                .collect::<Result<_>>()?;
        }

        Ok(config)
    }

    pub fn scrub_config(&self) -> ScrubConfig {
        ScrubConfig {
            exceptions: self.scrub_exceptions.clone(),
            parameters: self.scrub_parameters.clone(),
        }
    }
}

fn split_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// `key=value` entries keep their key; bare values are keyed by their
/// position among the bare values only
fn parse_parameters(value: &str) -> Result<BTreeMap<String, String>> {
    let mut parameters = BTreeMap::new();
    let mut next_index = 0usize;

    for entry in split_list(value) {
        let (key, value) = match entry.split_once('=') {
            Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
            None => {
                let key = next_index.to_string();
                next_index += 1;
                (key, entry.to_string())
            }
        };

        if parameters.insert(key.clone(), value).is_some() {
            return Err(ReporterError::Configuration(format!(
                "Duplicate scrub parameter key: {}",
                key
            )));
        }
    }

    Ok(parameters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ReporterConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, ReporterConfig::default());
        assert_eq!(config.error_level, ErrorLevel::EVERYTHING);
        assert_eq!(config.ignored_status_codes, vec![404]);
    }

    #[test]
    fn test_reads_all_options() {
        let config = ReporterConfig::from_lookup(lookup_from(&[
            ("REPORTER_ERROR_LEVEL", "E_WARNING|E_USER_NOTICE"),
            ("REPORTER_SCRUB_EXCEPTIONS", "LoginException, PaymentException"),
            ("REPORTER_SCRUB_PARAMETERS", "password=secret123, api_token = tok-42"),
            ("REPORTER_IGNORED_STATUS_CODES", "403,404"),
        ]))
        .unwrap();

        assert_eq!(config.error_level, ErrorLevel::WARNING | ErrorLevel::USER_NOTICE);
        assert!(config.scrub_exceptions.contains("PaymentException"));
        assert_eq!(config.scrub_parameters.get("password").map(String::as_str), Some("secret123"));
        assert_eq!(config.scrub_parameters.get("api_token").map(String::as_str), Some("tok-42"));
        assert_eq!(config.ignored_status_codes, vec![403, 404]);

        let scrub = config.scrub_config();
        assert!(scrub.exceptions.contains("LoginException"));
    }

    #[test]
    fn test_bare_parameters_keyed_by_index() {
        let config = ReporterConfig::from_lookup(lookup_from(&[(
            "REPORTER_SCRUB_PARAMETERS",
            "alpha,beta",
        )]))
        .unwrap();

        assert_eq!(config.scrub_parameters.get("0").map(String::as_str), Some("alpha"));
        assert_eq!(config.scrub_parameters.get("1").map(String::as_str), Some("beta"));
    }

    #[test]
    fn test_bare_parameters_ignore_named_entries() {
        let config = ReporterConfig::from_lookup(lookup_from(&[(
            "REPORTER_SCRUB_PARAMETERS",
            "password=x, alpha, api_token=y, beta",
        )]))
        .unwrap();

        assert_eq!(config.scrub_parameters.get("0").map(String::as_str), Some("alpha"));
        assert_eq!(config.scrub_parameters.get("1").map(String::as_str), Some("beta"));
        assert_eq!(config.scrub_parameters.len(), 4);
    }

    #[test]
    fn test_rejects_duplicate_parameter_keys() {
        let positional_clash = ReporterConfig::from_lookup(lookup_from(&[(
            "REPORTER_SCRUB_PARAMETERS",
            "alpha, 0=beta",
        )]));
        assert!(matches!(positional_clash, Err(ReporterError::Configuration(_))));

        let named_clash = ReporterConfig::from_lookup(lookup_from(&[(
            "REPORTER_SCRUB_PARAMETERS",
            "password=x, password=y",
        )]));
        assert!(matches!(named_clash, Err(ReporterError::Configuration(_))));
    }

    #[test]
    fn test_rejects_malformed_values() {
        let bad_level = ReporterConfig::from_lookup(lookup_from(&[("REPORTER_ERROR_LEVEL", "E_LOUD")]));
        assert!(matches!(bad_level, Err(ReporterError::Configuration(_))));

        let bad_code =
            ReporterConfig::from_lookup(lookup_from(&[("REPORTER_IGNORED_STATUS_CODES", "40x")]));
        assert!(matches!(bad_code, Err(ReporterError::Configuration(_))));
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let config: ReporterConfig = serde_json::from_str(
            r#"{ "error_level": -1, "scrub_exceptions": ["LoginException"] }"#,
        )
        .unwrap();

        assert_eq!(config.error_level, ErrorLevel::EVERYTHING);
        assert_eq!(config.ignored_status_codes, vec![404]);
    }

    #[test]
    fn test_deserializes_named_error_level() {
        let config: ReporterConfig =
            serde_json::from_str(r#"{ "error_level": "E_WARNING|E_NOTICE" }"#).unwrap();

        assert_eq!(config.error_level, ErrorLevel::WARNING | ErrorLevel::NOTICE);
    }
}
