//! Heuristic domain trust scoring.
//!
//! Combines a live HTTPS reachability probe, a cached WHOIS registration-age
//! lookup, a deterministic popularity proxy and a scam keyword scan into a
//! bounded scam score and a `safe` / `caution` / `risky` verdict.
//!
//! Network collaborators sit behind traits so the evaluator can be driven
//! entirely by mocks in tests.

mod cache;
mod config;
mod error;
mod services;
mod traits;
mod types;

#[cfg(test)]
mod test_utils;

pub use cache::WhoisCache;
pub use config::{
    EvaluatorConfig, CACHE_WHOIS_FAILURES_ENV, WHOIS_API_KEY_ENV, WHOIS_ENDPOINT_ENV,
};
pub use error::{EvaluatorError, EvaluatorResult};
pub use services::{
    age_penalty, build_reasons, canonical_report_path, check_https, compute_score, https_penalty,
    is_confirming_status, is_likely_domain, normalize_domain, parse_report_slug, popularity_adjust,
    popularity_score, report_slug, scan_scam_keywords, trusted_profile, validate_domain,
    HttpsProber, SafetyEvaluator, WhoisAgeLookup, WhoisXmlClient, SCAM_KEYWORDS,
};
pub use traits::{Clock, ReachabilityProbe, RegistrationSource, SystemClock};
pub use types::{
    HttpsProbe, KeywordScan, SafetyResult, ScoreBreakdown, TrustedDomainProfile, Verdict,
    WhoisAge, CAUTION_THRESHOLD, RISKY_THRESHOLD,
};
