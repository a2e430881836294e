//! Public types returned by evaluator operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Final human-facing classification of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No significant risk signals.
    Safe,
    /// Some risk signals; verify before trusting.
    Caution,
    /// Strong risk signals.
    Risky,
}

/// Lower bound (inclusive) of the `caution` tier.
pub const CAUTION_THRESHOLD: u8 = 35;

/// Lower bound (inclusive) of the `risky` tier.
pub const RISKY_THRESHOLD: u8 = 60;

impl Verdict {
    /// Map a clamped scam score onto a verdict tier.
    pub const fn from_score(scam_score: u8) -> Self {
        if scam_score >= RISKY_THRESHOLD {
            Self::Risky
        } else if scam_score >= CAUTION_THRESHOLD {
            Self::Caution
        } else {
            Self::Safe
        }
    }

    /// Display label shown next to the verdict badge.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Safe => "Likely Safe",
            Self::Caution => "Proceed With Caution",
            Self::Risky => "High Risk",
        }
    }

    /// Advice shown to the user for this verdict, most important first.
    pub const fn recommended_actions(self) -> &'static [&'static str] {
        match self {
            Self::Safe => &[
                "Still verify URLs manually before payments.",
                "Use a password manager and 2FA.",
            ],
            Self::Caution => &[
                "Avoid entering payment details until you confirm ownership and HTTPS.",
                "Look for real customer reviews on third-party sites.",
                "Check refund/returns policy and contact options.",
            ],
            Self::Risky => &[
                "Do not enter personal or payment information.",
                "Close unsolicited pop-ups and exit the site.",
                "Report suspected scams to local cyber authorities.",
            ],
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => write!(f, "safe"),
            Self::Caution => write!(f, "caution"),
            Self::Risky => write!(f, "risky"),
        }
    }
}

impl FromStr for Verdict {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "safe" => Ok(Self::Safe),
            "caution" => Ok(Self::Caution),
            "risky" => Ok(Self::Risky),
            _ => Err(format!("Unsupported verdict: {s}")),
        }
    }
}

/// Outcome of a full safety evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyResult {
    /// Normalized host that was evaluated.
    pub domain: String,
    /// Whether the live HTTPS probe succeeded.
    pub has_https: bool,
    /// Days since registration; `None` when registration data was unavailable.
    pub domain_age_days: Option<u64>,
    /// Risk score in `0..=100`, higher is worse.
    pub scam_score: u8,
    /// Popularity proxy in `0..=100`.
    pub popularity_score: u8,
    /// Verdict derived from `scam_score`.
    pub verdict: Verdict,
    /// Contributing factors, in a fixed order. Never empty.
    pub reasons: Vec<String>,
    /// Whether a WHOIS lookup was attempted (or served from cache).
    pub used_whois: bool,
    /// Whether the HTTPS probe ran.
    pub used_https_probe: bool,
    /// Whether popularity came from the fallback heuristic.
    pub used_popularity_fallback: bool,
}

/// Static profile for an allowlisted high-trust host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrustedDomainProfile {
    pub age_days: u64,
    pub popularity: u8,
    pub https: bool,
}

/// Registration-age signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WhoisAge {
    /// Age in whole days, `None` when unknown.
    pub age_days: Option<u64>,
    /// `false` only when WHOIS is disabled (no API credential).
    pub used: bool,
}

/// Reachability signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpsProbe {
    pub has_https: bool,
    pub used: bool,
}

/// Scam keywords found in a domain.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeywordScan {
    /// Matched keywords, in keyword-list order.
    pub hits: Vec<&'static str>,
    /// `20 × hits.len()`.
    pub score: u32,
}

/// Individual score components, kept for diagnostics and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreBreakdown {
    pub age_penalty: i32,
    pub https_penalty: i32,
    pub popularity_adjust: i32,
    pub keyword_score: i32,
    /// Unclamped sum, may fall outside `0..=100`.
    pub raw_score: i32,
    /// `raw_score` clamped to `0..=100`.
    pub scam_score: u8,
}
