//! Offline heuristics: popularity proxy and scam keyword scan.

use super::trusted::trusted_profile;
use crate::types::KeywordScan;

/// Popularity buckets indexed by a hash of the domain length.
const POPULARITY_TABLE: [u8; 7] = [12, 28, 45, 60, 72, 84, 92];

/// Substrings that commonly show up in scam hostnames.
pub const SCAM_KEYWORDS: &[&str] = &[
    "giveaway",
    "free-money",
    "crypto-doubler",
    "login-now",
    "urgent",
    "claim-prize",
    "verify-account",
];

const KEYWORD_WEIGHT: u32 = 20;

/// Deterministic popularity proxy until a real traffic ranking is wired in.
///
/// Allowlisted hosts return their fixed popularity. The seed is the byte
/// length, so hosts are expected to be ASCII (as `is_likely_domain` enforces).
pub fn popularity_score(domain: &str) -> u8 {
    if let Some(profile) = trusted_profile(domain) {
        return profile.popularity;
    }
    let seed = domain.len() % 7;
    POPULARITY_TABLE[(seed + 3) % 7]
}

/// Find scam keywords contained in the domain.
pub fn scan_scam_keywords(domain: &str) -> KeywordScan {
    let lowered = domain.to_lowercase();
    let hits: Vec<&'static str> = SCAM_KEYWORDS
        .iter()
        .copied()
        .filter(|kw| lowered.contains(kw))
        .collect();
    // At most SCAM_KEYWORDS.len() hits.
    #[allow(clippy::cast_possible_truncation)]
    let score = hits.len() as u32 * KEYWORD_WEIGHT;
    KeywordScan { hits, score }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popularity_table_lookup() {
        // len 10 -> seed 3 -> index 6
        assert_eq!(popularity_score("example.io"), 92);
        // len 11 -> seed 4 -> index 0
        assert_eq!(popularity_score("abcdefg.com"), 12);
        // len 7 -> seed 0 -> index 3
        assert_eq!(popularity_score("abc.com"), 60);
        // len 4 -> seed 4 -> index 0
        assert_eq!(popularity_score("a.io"), 12);
    }

    #[test]
    fn test_popularity_deterministic() {
        assert_eq!(popularity_score("shop.example"), popularity_score("shop.example"));
    }

    #[test]
    fn test_popularity_trusted_override() {
        assert_eq!(popularity_score("paypal.com"), 95);
        assert_eq!(popularity_score("www.youtube.com"), 99);
    }

    #[test]
    fn test_scan_no_hits() {
        let scan = scan_scam_keywords("example.com");
        assert!(scan.hits.is_empty());
        assert_eq!(scan.score, 0);
    }

    #[test]
    fn test_scan_single_hit() {
        let scan = scan_scam_keywords("big-giveaway.shop");
        assert_eq!(scan.hits, vec!["giveaway"]);
        assert_eq!(scan.score, 20);
    }

    #[test]
    fn test_scan_hits_in_list_order() {
        let scan = scan_scam_keywords("urgent-verify-account-giveaway.xyz");
        assert_eq!(scan.hits, vec!["giveaway", "urgent", "verify-account"]);
        assert_eq!(scan.score, 60);
    }

    #[test]
    fn test_scan_case_insensitive() {
        let scan = scan_scam_keywords("CLAIM-PRIZE.net");
        assert_eq!(scan.hits, vec!["claim-prize"]);
    }

    #[test]
    fn test_popularity_seed_counts_bytes() {
        // "ü" is two bytes: len 6 -> seed 6 -> index 2
        assert_eq!(popularity_score("ü.com"), 45);
        assert!(!crate::services::is_likely_domain("ü.com"));
    }
}
