//! HTTPS reachability probe module.

use std::sync::LazyLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use tokio::time::timeout;

use crate::error::{EvaluatorError, EvaluatorResult};
use crate::traits::ReachabilityProbe;
use crate::types::HttpsProbe;

const CLIENT_TIMEOUT_SECS: u64 = 10;

/// Shared HTTP client; the probe deadline is applied per call.
///
/// Redirects are not followed: a completed TLS handshake answering 3xx
/// already confirms HTTPS, and chasing the chain could only turn that into
/// a redirect-limit error.
static HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap_or_default()
});

/// Probe that issues a single real `GET https://{domain}`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpsProber;

#[async_trait]
impl ReachabilityProbe for HttpsProber {
    async fn probe(&self, domain: &str) -> EvaluatorResult<u16> {
        fetch_status(&format!("https://{domain}")).await
    }
}

/// Status of one GET to `url`, without following redirects.
async fn fetch_status(url: &str) -> EvaluatorResult<u16> {
    let start = Instant::now();

    let response = HTTP_CLIENT
        .get(url)
        .send()
        .await
        .map_err(|e| EvaluatorError::NetworkError(format!("HTTPS request failed: {e}")))?;

    let status = response.status().as_u16();
    debug!(
        "[HTTPS] {url} -> status={status}, time={:?}",
        start.elapsed()
    );
    Ok(status)
}

/// Whether a final status code counts as a confirmed HTTPS endpoint.
pub fn is_confirming_status(status: u16) -> bool {
    (200..400).contains(&status)
}

/// Run a probe under `limit`, folding every failure into `has_https = false`.
pub async fn check_https(
    probe: &dyn ReachabilityProbe,
    domain: &str,
    limit: Duration,
) -> HttpsProbe {
    let has_https = match timeout(limit, probe.probe(domain)).await {
        Ok(Ok(status)) => is_confirming_status(status),
        Ok(Err(e)) => {
            debug!("[HTTPS] Probe for {domain} failed: {e}");
            false
        }
        Err(_) => {
            debug!("[HTTPS] Probe for {domain} timed out ({limit:?})");
            false
        }
    };
    HttpsProbe {
        has_https,
        used: true,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;
    use crate::test_utils::MockReachabilityProbe;

    const LIMIT: Duration = Duration::from_millis(3000);

    #[test]
    fn test_is_confirming_status() {
        assert!(!is_confirming_status(199));
        assert!(is_confirming_status(200));
        assert!(is_confirming_status(204));
        assert!(is_confirming_status(301));
        assert!(is_confirming_status(399));
        assert!(!is_confirming_status(403));
        assert!(!is_confirming_status(500));
    }

    #[tokio::test]
    async fn test_check_https_ok() {
        let probe = MockReachabilityProbe::status(200);
        let result = check_https(&probe, "example.com", LIMIT).await;
        assert!(result.has_https);
        assert!(result.used);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_check_https_client_error_status() {
        let probe = MockReachabilityProbe::status(404);
        let result = check_https(&probe, "example.com", LIMIT).await;
        assert!(!result.has_https);
        assert!(result.used);
    }

    #[tokio::test]
    async fn test_check_https_transport_error() {
        let probe = MockReachabilityProbe::failing();
        let result = check_https(&probe, "example.com", LIMIT).await;
        assert!(!result.has_https);
        assert!(result.used);
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_https_timeout() {
        let probe = MockReachabilityProbe::status(200).with_delay(Duration::from_secs(5));
        let started = tokio::time::Instant::now();
        let result = check_https(&probe, "example.com", LIMIT).await;
        assert!(!result.has_https);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    /// Local server answering every request with a redirect to the next hop.
    async fn spawn_redirect_chain() -> (String, Arc<AtomicUsize>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let hop = counter.fetch_add(1, Ordering::SeqCst) + 1;
                let mut buf = [0_u8; 1024];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 301 Moved Permanently\r\nLocation: /hop{hop}\r\n\
                     Content-Length: 0\r\nConnection: close\r\n\r\n"
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        (format!("http://{addr}/"), hits)
    }

    #[tokio::test]
    async fn test_fetch_status_does_not_follow_redirects() {
        let (url, hits) = spawn_redirect_chain().await;

        let status = fetch_status(&url).await.unwrap();

        assert_eq!(status, 301);
        assert!(is_confirming_status(status));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_redirect_status_confirms_https() {
        let probe = MockReachabilityProbe::status(301);
        let result = check_https(&probe, "example.com", LIMIT).await;
        assert!(result.has_https);
    }

    // NOTE: depends on external network; failures may be due to network issues, not code bugs

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_https_prober_real() {
        let result = check_https(&HttpsProber, "example.com", LIMIT).await;
        assert!(result.has_https);
    }

    #[tokio::test]
    #[ignore = "requires network access"]
    async fn test_https_prober_unresolvable_host() {
        let status = HttpsProber.probe("does-not-exist.invalid").await;
        assert!(status.is_err());
    }
}
