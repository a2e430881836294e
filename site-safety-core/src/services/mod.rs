//! Safety evaluator façade.
//!
//! [`SafetyEvaluator`] owns its collaborators (WHOIS source, HTTPS probe,
//! clock, cache) so each instance is independently testable.

mod domain;
mod heuristics;
mod https_probe;
mod scoring;
mod trusted;
mod whois;

use std::sync::Arc;
use std::time::Duration;

use futures::future::join;
use log::{debug, info};

use crate::cache::WhoisCache;
use crate::config::EvaluatorConfig;
use crate::error::{EvaluatorError, EvaluatorResult};
use crate::traits::{Clock, ReachabilityProbe, RegistrationSource, SystemClock};
use crate::types::{SafetyResult, TrustedDomainProfile, Verdict};

pub use domain::{
    canonical_report_path, is_likely_domain, normalize_domain, parse_report_slug, report_slug,
};
pub use heuristics::{popularity_score, scan_scam_keywords, SCAM_KEYWORDS};
pub use https_probe::{check_https, is_confirming_status, HttpsProber};
pub use scoring::{age_penalty, build_reasons, compute_score, https_penalty, popularity_adjust};
pub use trusted::trusted_profile;
pub use whois::{WhoisAgeLookup, WhoisXmlClient};

const TRUSTED_REASON: &str = "Recognized high-trust domain.";

/// Normalize and validate raw input, rejecting anything not domain-shaped.
pub fn validate_domain(raw: &str) -> EvaluatorResult<String> {
    let domain = normalize_domain(raw);
    if domain.is_empty() {
        return Err(EvaluatorError::ValidationError(
            "Domain name is required".to_string(),
        ));
    }
    if !is_likely_domain(&domain) {
        return Err(EvaluatorError::ValidationError(format!(
            "Invalid domain name: {domain}"
        )));
    }
    Ok(domain)
}

/// Entry point for domain safety evaluation.
///
/// ```rust,no_run
/// use site_safety_core::{EvaluatorConfig, SafetyEvaluator};
/// # async fn demo() -> site_safety_core::EvaluatorResult<()> {
/// let evaluator = SafetyEvaluator::new(&EvaluatorConfig::from_env());
/// let result = evaluator.check("https://example.com/login").await?;
/// println!("{} -> {}", result.domain, result.verdict);
/// # Ok(())
/// # }
/// ```
pub struct SafetyEvaluator {
    whois: WhoisAgeLookup,
    probe: Arc<dyn ReachabilityProbe>,
    https_probe_timeout: Duration,
}

impl SafetyEvaluator {
    /// Build an evaluator backed by the real WHOIS API and HTTPS probe.
    pub fn new(config: &EvaluatorConfig) -> Self {
        let registration = config.whois_api_key.as_ref().map(|key| {
            Arc::new(WhoisXmlClient::new(config.whois_endpoint.clone(), key.clone()))
                as Arc<dyn RegistrationSource>
        });
        Self::with_sources(
            config,
            registration,
            Arc::new(HttpsProber),
            Arc::new(SystemClock),
        )
    }

    /// Build an evaluator with injected collaborators.
    ///
    /// `registration` is ignored when `config` carries no WHOIS API key.
    pub fn with_sources(
        config: &EvaluatorConfig,
        registration: Option<Arc<dyn RegistrationSource>>,
        probe: Arc<dyn ReachabilityProbe>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let registration = registration.filter(|_| config.whois_enabled());
        if registration.is_none() {
            debug!("[EVAL] WHOIS disabled, domain age falls back to the unknown-age penalty");
        }
        let cache = WhoisCache::new(config.whois_cache_ttl(), Arc::clone(&clock));
        Self {
            whois: WhoisAgeLookup::new(
                registration,
                cache,
                clock,
                config.whois_attempt_timeouts(),
                config.cache_failed_whois,
            ),
            probe,
            https_probe_timeout: config.https_probe_timeout(),
        }
    }

    pub const fn whois_enabled(&self) -> bool {
        self.whois.is_enabled()
    }

    pub const fn whois_cache(&self) -> &WhoisCache {
        self.whois.cache()
    }

    /// Validate raw input, then evaluate it.
    ///
    /// Invalid input is rejected before any network call.
    pub async fn check(&self, raw: &str) -> EvaluatorResult<SafetyResult> {
        let domain = validate_domain(raw)?;
        Ok(self.evaluate(&domain).await)
    }

    /// Score a domain. Always returns a complete result, even when every
    /// network signal fails.
    ///
    /// Callers should reject malformed input with [`is_likely_domain`] first.
    pub async fn evaluate(&self, raw: &str) -> SafetyResult {
        let domain = normalize_domain(raw);

        if let Some(profile) = trusted_profile(&domain) {
            debug!("[EVAL] {domain} is allowlisted, skipping live checks");
            return trusted_result(domain, profile);
        }

        let (whois, https) = join(
            self.whois.lookup(&domain),
            check_https(self.probe.as_ref(), &domain, self.https_probe_timeout),
        )
        .await;

        let popularity = popularity_score(&domain);
        let keywords = scan_scam_keywords(&domain);
        let score = compute_score(whois.age_days, https.has_https, popularity, &keywords);
        let verdict = Verdict::from_score(score.scam_score);
        let reasons = build_reasons(&whois, &https, popularity, &keywords);

        info!(
            "[EVAL] {domain}: verdict={verdict}, score={} (raw={}), https={}, age={:?}",
            score.scam_score, score.raw_score, https.has_https, whois.age_days
        );

        SafetyResult {
            domain,
            has_https: https.has_https,
            domain_age_days: whois.age_days,
            scam_score: score.scam_score,
            popularity_score: popularity,
            verdict,
            reasons,
            used_whois: whois.used,
            used_https_probe: https.used,
            used_popularity_fallback: true,
        }
    }
}

fn trusted_result(domain: String, profile: TrustedDomainProfile) -> SafetyResult {
    SafetyResult {
        domain,
        has_https: true,
        domain_age_days: Some(profile.age_days),
        scam_score: 0,
        popularity_score: profile.popularity,
        verdict: Verdict::Safe,
        reasons: vec![TRUSTED_REASON.to_string()],
        used_whois: false,
        used_https_probe: false,
        used_popularity_fallback: false,
    }
}
