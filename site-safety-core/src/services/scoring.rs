//! Score aggregation and reason assembly.
//!
//! Everything here is pure; the evaluator feeds it the collected signals.

use crate::types::{HttpsProbe, KeywordScan, ScoreBreakdown, WhoisAge};

const BASE_SCORE: i32 = 5;
const MAX_SCORE: i32 = 100;

const UNKNOWN_AGE_PENALTY: i32 = 10;
const HTTPS_PENALTY: i32 = 25;

const HIGH_POPULARITY: u8 = 70;
const LOW_POPULARITY: u8 = 20;

/// Age buckets as `(exclusive upper bound in days, penalty)`, checked in order.
const AGE_BUCKETS: &[(u64, i32)] = &[(30, 30), (180, 15), (365, 8)];

const HTTPS_UNCONFIRMED_REASON: &str = "HTTPS did not confirm in a live probe.";

pub const NO_RED_FLAGS_REASON: &str = "No major red flags detected in current live checks.";

pub fn age_penalty(age_days: Option<u64>) -> i32 {
    let Some(age) = age_days else {
        return UNKNOWN_AGE_PENALTY;
    };
    AGE_BUCKETS
        .iter()
        .find(|(upper, _)| age < *upper)
        .map_or(0, |&(_, penalty)| penalty)
}

pub const fn https_penalty(has_https: bool) -> i32 {
    if has_https {
        0
    } else {
        HTTPS_PENALTY
    }
}

pub const fn popularity_adjust(popularity: u8) -> i32 {
    if popularity > HIGH_POPULARITY {
        -10
    } else if popularity < LOW_POPULARITY {
        10
    } else {
        0
    }
}

/// Combine all signals into a bounded scam score.
pub fn compute_score(
    age_days: Option<u64>,
    has_https: bool,
    popularity: u8,
    keywords: &KeywordScan,
) -> ScoreBreakdown {
    let age_penalty = age_penalty(age_days);
    let https_penalty = https_penalty(has_https);
    let popularity_adjust = popularity_adjust(popularity);
    let keyword_score = i32::try_from(keywords.score).unwrap_or(i32::MAX);

    let raw_score = BASE_SCORE
        .saturating_add(keyword_score)
        .saturating_add(https_penalty)
        .saturating_add(age_penalty)
        .saturating_add(popularity_adjust);
    let scam_score = u8::try_from(raw_score.clamp(0, MAX_SCORE)).unwrap_or(u8::MAX);

    ScoreBreakdown {
        age_penalty,
        https_penalty,
        popularity_adjust,
        keyword_score,
        raw_score,
        scam_score,
    }
}

/// Human-readable factors, in a fixed order. Never empty.
pub fn build_reasons(
    whois: &WhoisAge,
    probe: &HttpsProbe,
    popularity: u8,
    keywords: &KeywordScan,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if !probe.has_https {
        reasons.push(HTTPS_UNCONFIRMED_REASON.to_string());
    }

    match whois.age_days {
        None if whois.used => {
            reasons.push("Domain age unavailable; WHOIS lookup failed or timed out.".to_string());
        }
        None => reasons.push(
            "Domain age unavailable; WHOIS lookup is not configured (fallback penalty applied)."
                .to_string(),
        ),
        Some(age) if age < 30 => reasons.push("Domain is brand new (live WHOIS).".to_string()),
        Some(age) if age < 180 => {
            reasons.push("Domain is relatively new (live WHOIS).".to_string());
        }
        Some(_) => {}
    }

    if !keywords.hits.is_empty() {
        reasons.push(format!(
            "Suspicious keywords detected: {}.",
            keywords.hits.join(", ")
        ));
    }

    if popularity < LOW_POPULARITY {
        reasons.push(
            "Low popularity (fallback heuristic; add a traffic API for accuracy).".to_string(),
        );
    }

    if reasons.is_empty() {
        reasons.push(NO_RED_FLAGS_REASON.to_string());
    }
    reasons
}
