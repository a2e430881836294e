//! Network signal source traits
//!
//! Implementations:
//! - `WhoisXmlClient` / `HttpsProber` (reqwest, production)
//! - mocks with call counters (tests)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::EvaluatorResult;

/// Registration-date lookup for a domain.
#[async_trait]
pub trait RegistrationSource: Send + Sync {
    /// Fetch the registration (creation) date of a normalized domain.
    ///
    /// # Returns
    /// * `Ok(Some(date))` - a parseable creation date was found
    /// * `Ok(None)` - the response carried no usable date
    /// * `Err(_)` - transport failure or non-success response
    async fn fetch_created_date(&self, domain: &str) -> EvaluatorResult<Option<DateTime<Utc>>>;
}

/// Direct reachability check against the candidate host.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Request `https://{domain}` and return the final HTTP status code.
    ///
    /// Timeouts, DNS, connection and TLS failures are all `Err`.
    async fn probe(&self, domain: &str) -> EvaluatorResult<u16>;
}
