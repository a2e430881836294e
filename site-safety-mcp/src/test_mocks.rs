use super::*;

use site_safety_core::Verdict;
use tokio::sync::Mutex;

/// Canned evaluation for `domain`.
pub fn safety_result(domain: &str) -> SafetyResult {
    SafetyResult {
        domain: domain.to_string(),
        has_https: true,
        domain_age_days: Some(1200),
        scam_score: 0,
        popularity_score: 72,
        verdict: Verdict::Safe,
        reasons: vec!["No major red flags detected in current live checks.".to_string()],
        used_whois: true,
        used_https_probe: true,
        used_popularity_fallback: true,
    }
}

#[derive(Default)]
pub struct MockSafetyGateway {
    calls: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
    error: Mutex<Option<EvaluatorError>>,
}

impl MockSafetyGateway {
    pub async fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.lock().await = delay;
    }

    pub async fn set_error(&self, error: Option<EvaluatorError>) {
        *self.error.lock().await = error;
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl SafetyGateway for MockSafetyGateway {
    async fn check(&self, domain: &str) -> EvaluatorResult<SafetyResult> {
        self.calls.lock().await.push(domain.to_string());

        if let Some(delay) = *self.delay.lock().await {
            tokio::time::sleep(delay).await;
        }

        if let Some(error) = self.error.lock().await.take() {
            return Err(error);
        }

        Ok(safety_result(domain))
    }
}

pub(super) fn build_server(gateway: Arc<dyn SafetyGateway>, check_timeout: Duration) -> SiteSafetyMcp {
    SiteSafetyMcp::with_gateway_and_timeout(gateway, check_timeout)
}

pub(super) fn default_timeout() -> Duration {
    Duration::from_secs(CHECK_DOMAIN_SAFETY_TIMEOUT_SECS)
}
