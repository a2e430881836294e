//! Evaluator configuration.
//!
//! Defaults match production behavior; [`EvaluatorConfig::from_env`] layers
//! environment overrides on top. A missing WHOIS API key disables the WHOIS
//! signal and is not an error.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Env var holding the WHOIS API key.
pub const WHOIS_API_KEY_ENV: &str = "WHOISXML_API_KEY";
/// Env var overriding the WHOIS endpoint.
pub const WHOIS_ENDPOINT_ENV: &str = "SITE_SAFETY_WHOIS_ENDPOINT";
/// Env var enabling caching of failed WHOIS cycles.
pub const CACHE_WHOIS_FAILURES_ENV: &str = "SITE_SAFETY_CACHE_WHOIS_FAILURES";

const DEFAULT_WHOIS_ENDPOINT: &str = "https://www.whoisxmlapi.com/whoisserver/WhoisService";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EvaluatorConfig {
    /// WHOIS API credential; `None` disables the WHOIS signal.
    pub whois_api_key: Option<String>,
    /// WHOIS-style JSON endpoint.
    pub whois_endpoint: String,
    /// Per-attempt timeouts; one attempt per entry.
    pub whois_attempt_timeouts_ms: Vec<u64>,
    /// Timeout of the single HTTPS probe.
    pub https_probe_timeout_ms: u64,
    /// Lifetime of a cached WHOIS age.
    pub whois_cache_ttl_secs: u64,
    /// Also cache `None` after every attempt failed.
    pub cache_failed_whois: bool,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            whois_api_key: None,
            whois_endpoint: DEFAULT_WHOIS_ENDPOINT.to_string(),
            whois_attempt_timeouts_ms: vec![5000, 3500],
            https_probe_timeout_ms: 3000,
            whois_cache_ttl_secs: 24 * 60 * 60,
            cache_failed_whois: false,
        }
    }
}

impl EvaluatorConfig {
    /// Defaults overlaid with process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        config.whois_api_key = lookup(WHOIS_API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        if let Some(endpoint) = lookup(WHOIS_ENDPOINT_ENV).filter(|e| !e.trim().is_empty()) {
            config.whois_endpoint = endpoint.trim().to_string();
        }
        if let Some(flag) = lookup(CACHE_WHOIS_FAILURES_ENV) {
            config.cache_failed_whois = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        config
    }

    pub fn with_whois_api_key(mut self, key: impl Into<String>) -> Self {
        self.whois_api_key = Some(key.into());
        self
    }

    pub const fn whois_enabled(&self) -> bool {
        self.whois_api_key.is_some()
    }

    pub fn whois_attempt_timeouts(&self) -> Vec<Duration> {
        self.whois_attempt_timeouts_ms
            .iter()
            .map(|&ms| Duration::from_millis(ms))
            .collect()
    }

    pub const fn https_probe_timeout(&self) -> Duration {
        Duration::from_millis(self.https_probe_timeout_ms)
    }

    pub const fn whois_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.whois_cache_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EvaluatorConfig::default();
        assert!(!config.whois_enabled());
        assert_eq!(
            config.whois_attempt_timeouts(),
            vec![Duration::from_millis(5000), Duration::from_millis(3500)]
        );
        assert_eq!(config.https_probe_timeout(), Duration::from_millis(3000));
        assert_eq!(config.whois_cache_ttl(), Duration::from_secs(86_400));
        assert!(!config.cache_failed_whois);
    }

    #[test]
    fn test_from_lookup_reads_key() {
        let config = EvaluatorConfig::from_lookup(lookup_from(&[(WHOIS_API_KEY_ENV, " abc ")]));
        assert_eq!(config.whois_api_key.as_deref(), Some("abc"));
        assert!(config.whois_enabled());
    }

    #[test]
    fn test_from_lookup_empty_key_disables() {
        let config = EvaluatorConfig::from_lookup(lookup_from(&[(WHOIS_API_KEY_ENV, "  ")]));
        assert!(!config.whois_enabled());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = EvaluatorConfig::from_lookup(lookup_from(&[
            (WHOIS_ENDPOINT_ENV, "http://127.0.0.1:9/whois"),
            (CACHE_WHOIS_FAILURES_ENV, "TRUE"),
        ]));
        assert_eq!(config.whois_endpoint, "http://127.0.0.1:9/whois");
        assert!(config.cache_failed_whois);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: EvaluatorConfig =
            serde_json::from_str(r#"{"whoisApiKey":"k","httpsProbeTimeoutMs":1000}"#).unwrap();
        assert_eq!(config.whois_api_key.as_deref(), Some("k"));
        assert_eq!(config.https_probe_timeout_ms, 1000);
        assert_eq!(config.whois_attempt_timeouts_ms, vec![5000, 3500]);
    }
}
