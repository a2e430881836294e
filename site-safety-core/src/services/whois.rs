//! WHOIS registration-age lookup module.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::{debug, warn};
use reqwest::Client;
use serde_json::Value;
use tokio::time::timeout;
use url::Url;

use crate::cache::WhoisCache;
use crate::error::{EvaluatorError, EvaluatorResult};
use crate::traits::{Clock, RegistrationSource};
use crate::types::WhoisAge;

const CLIENT_TIMEOUT_SECS: u64 = 10;

/// Shared HTTP client for WHOIS API calls. Per-attempt deadlines are applied by the caller.
static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
        .build()
        .unwrap_or_default()
});

/// Client for a WhoisXML-style JSON endpoint.
pub struct WhoisXmlClient {
    endpoint: String,
    api_key: String,
}

impl WhoisXmlClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    fn request_url(&self, domain: &str) -> EvaluatorResult<Url> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("apiKey", self.api_key.as_str()),
                ("domainName", domain),
                ("outputFormat", "JSON"),
            ],
        )
        .map_err(|e| EvaluatorError::ConfigError(format!("Invalid WHOIS endpoint: {e}")))
    }
}

#[async_trait]
impl RegistrationSource for WhoisXmlClient {
    async fn fetch_created_date(&self, domain: &str) -> EvaluatorResult<Option<DateTime<Utc>>> {
        let url = self.request_url(domain)?;

        let response = HTTP_CLIENT
            .get(url)
            .send()
            .await
            // without_url: the query string carries the API key
            .map_err(|e| {
                EvaluatorError::NetworkError(format!("WHOIS request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EvaluatorError::NetworkError(format!(
                "WHOIS API returned HTTP {}",
                status.as_u16()
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            EvaluatorError::NetworkError(format!("Invalid WHOIS response: {}", e.without_url()))
        })?;

        Ok(extract_created_date(&body))
    }
}

/// Find the creation date in any of the known WHOIS response shapes.
///
/// The record sits under `WhoisRecord` or `whoisRecord`; the date under
/// `createdDate`, `registryData.createdDate` or `audit.createdDate`.
fn extract_created_date(body: &Value) -> Option<DateTime<Utc>> {
    let record = ["WhoisRecord", "whoisRecord"]
        .iter()
        .find_map(|key| body.get(*key).filter(|v| v.is_object()))?;

    [
        "/createdDate",
        "/registryData/createdDate",
        "/audit/createdDate",
    ]
    .iter()
    .filter_map(|pointer| record.pointer(pointer).and_then(Value::as_str))
    .map(str::trim)
    .find(|raw| !raw.is_empty())
    .and_then(parse_whois_date)
}

/// Parse the date formats WHOIS registries actually emit.
fn parse_whois_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    // e.g. 1997-09-15T07:00:00+0000
    if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.with_timezone(&Utc));
    }
    let naive = raw.trim_end_matches(" UTC").trim_end_matches('Z');
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Whole days between `created` and `now`, clamped at zero.
fn age_in_days(created: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - created).num_days()).unwrap_or(0)
}

/// Cached, retrying registration-age lookup.
pub struct WhoisAgeLookup {
    source: Option<Arc<dyn RegistrationSource>>,
    cache: WhoisCache,
    clock: Arc<dyn Clock>,
    attempt_timeouts: Vec<Duration>,
    cache_failures: bool,
}

impl WhoisAgeLookup {
    pub fn new(
        source: Option<Arc<dyn RegistrationSource>>,
        cache: WhoisCache,
        clock: Arc<dyn Clock>,
        attempt_timeouts: Vec<Duration>,
        cache_failures: bool,
    ) -> Self {
        Self {
            source,
            cache,
            clock,
            attempt_timeouts,
            cache_failures,
        }
    }

    pub const fn cache(&self) -> &WhoisCache {
        &self.cache
    }

    pub const fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// Look up the registration age of a normalized domain.
    ///
    /// Never fails: a disabled source yields `used = false`, and exhausted
    /// attempts yield `age_days = None` with `used = true`.
    pub async fn lookup(&self, domain: &str) -> WhoisAge {
        let Some(source) = &self.source else {
            return WhoisAge {
                age_days: None,
                used: false,
            };
        };

        if let Some(age_days) = self.cache.get(domain).await {
            debug!("[WHOIS] Cache hit for {domain}");
            return WhoisAge {
                age_days,
                used: true,
            };
        }

        for (attempt, &limit) in self.attempt_timeouts.iter().enumerate() {
            let attempt = attempt + 1;
            match timeout(limit, source.fetch_created_date(domain)).await {
                Ok(Ok(Some(created))) => {
                    let age_days = age_in_days(created, self.clock.now());
                    debug!(
                        "[WHOIS] {domain} created {created}, age {age_days} days (attempt {attempt})"
                    );
                    self.cache.insert(domain, Some(age_days)).await;
                    return WhoisAge {
                        age_days: Some(age_days),
                        used: true,
                    };
                }
                Ok(Ok(None)) => {
                    warn!("[WHOIS] Attempt {attempt} for {domain}: no parseable creation date");
                }
                Ok(Err(e)) => warn!("[WHOIS] Attempt {attempt} for {domain} failed: {e}"),
                Err(_) => warn!("[WHOIS] Attempt {attempt} for {domain} timed out ({limit:?})"),
            }
        }

        if self.cache_failures {
            self.cache.insert(domain, None).await;
        }
        WhoisAge {
            age_days: None,
            used: true,
        }
    }
}
