//! Allowlist of well-known high-trust hosts.
//!
//! Keeps major brands from being scored as risky when a live probe
//! degrades. Lookup is by exact normalized host.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::types::TrustedDomainProfile;

const TRUSTED_AGE_DAYS: u64 = 5000;

/// `(host, popularity)` pairs. Every entry is HTTPS-enabled.
const TRUSTED_HOSTS: &[(&str, u8)] = &[
    ("youtube.com", 99),
    ("www.youtube.com", 99),
    ("google.com", 99),
    ("www.google.com", 99),
    ("facebook.com", 97),
    ("www.facebook.com", 97),
    ("amazon.com", 97),
    ("www.amazon.com", 97),
    ("wikipedia.org", 96),
    ("www.wikipedia.org", 96),
    ("spotify.com", 95),
    ("www.spotify.com", 95),
    ("open.spotify.com", 95),
    ("paypal.com", 95),
    ("www.paypal.com", 95),
];

static TRUSTED_DOMAINS: LazyLock<HashMap<&'static str, TrustedDomainProfile>> =
    LazyLock::new(|| {
        TRUSTED_HOSTS
            .iter()
            .map(|&(host, popularity)| {
                (
                    host,
                    TrustedDomainProfile {
                        age_days: TRUSTED_AGE_DAYS,
                        popularity,
                        https: true,
                    },
                )
            })
            .collect()
    });

/// Look up the allowlist profile for an already-normalized host.
pub fn trusted_profile(domain: &str) -> Option<TrustedDomainProfile> {
    TRUSTED_DOMAINS.get(domain).copied()
}
