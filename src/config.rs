use std::collections::HashMap;
use std::time::Duration;

use crate::delegate::DelegateTopic;
use crate::error::ConfigError;

pub const ENV_DELEGATE_TIMEOUT_SECS: &str = "AILA_DELEGATE_TIMEOUT_SECS";
pub const ENV_MAX_QUERY_CHARS: &str = "AILA_MAX_QUERY_CHARS";
pub const ENV_ENDPOINT_PREFIX: &str = "AILA_ENDPOINT_";

/// Assistant configuration.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Upper bound on a single delegate round-trip. Must be non-zero.
    pub delegate_timeout: Duration,
    /// Truncate delegate queries to this many characters. `None` sends them whole.
    pub max_query_chars: Option<usize>,
    /// Replacement URLs for individual delegate topics.
    pub endpoint_overrides: HashMap<DelegateTopic, String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            delegate_timeout: Duration::from_secs(30),
            max_query_chars: None,
            endpoint_overrides: HashMap::new(),
        }
    }
}

impl AssistantConfig {
    /// Defaults overlaid with `AILA_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each known key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_DELEGATE_TIMEOUT_SECS) {
            let secs = parse_or_invalid::<u64>(ENV_DELEGATE_TIMEOUT_SECS, &raw)?;
            if secs == 0 {
                return Err(invalid(ENV_DELEGATE_TIMEOUT_SECS, &raw));
            }
            config.delegate_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(ENV_MAX_QUERY_CHARS) {
            config.max_query_chars = Some(parse_or_invalid::<usize>(ENV_MAX_QUERY_CHARS, &raw)?);
        }

        for topic in DelegateTopic::ALL {
            let key = format!("{ENV_ENDPOINT_PREFIX}{}", topic.env_key());
            if let Some(url) = lookup(&key) {
                let url = url.trim();
                if url.is_empty() {
                    return Err(invalid(&key, url));
                }
                config.endpoint_overrides.insert(topic, url.to_string());
            }
        }

        Ok(config)
    }
}

fn parse_or_invalid<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| invalid(key, raw))
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_overrides() {
        let config = AssistantConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.delegate_timeout, Duration::from_secs(30));
        assert_eq!(config.max_query_chars, None);
        assert!(config.endpoint_overrides.is_empty());
    }

    #[test]
    fn reads_all_overrides() {
        let config = AssistantConfig::from_lookup(lookup_from(&[
            ("AILA_DELEGATE_TIMEOUT_SECS", "5"),
            ("AILA_MAX_QUERY_CHARS", "100"),
            ("AILA_ENDPOINT_KONG", "http://localhost:8080/kong"),
        ]))
        .unwrap();

        assert_eq!(config.delegate_timeout, Duration::from_secs(5));
        assert_eq!(config.max_query_chars, Some(100));
        assert_eq!(
            config.endpoint_overrides.get(&DelegateTopic::Kong).map(String::as_str),
            Some("http://localhost:8080/kong")
        );
    }

    #[test]
    fn zero_timeout_is_invalid() {
        let err = AssistantConfig::from_lookup(lookup_from(&[("AILA_DELEGATE_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("AILA_DELEGATE_TIMEOUT_SECS"));
    }

    #[test]
    fn garbage_number_is_invalid() {
        assert!(
            AssistantConfig::from_lookup(lookup_from(&[("AILA_MAX_QUERY_CHARS", "lots")])).is_err()
        );
    }

    #[test]
    fn blank_endpoint_is_invalid() {
        assert!(
            AssistantConfig::from_lookup(lookup_from(&[("AILA_ENDPOINT_CNAI", "  ")])).is_err()
        );
    }
}
