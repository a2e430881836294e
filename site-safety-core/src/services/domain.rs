//! Domain input normalization and format validation.

use std::sync::LazyLock;

use regex::Regex;

/// One or more `[a-z0-9-]{1,63}` labels followed by an alphabetic TLD of 2+ chars.
/// Labels starting with `-` are rejected separately.
static DOMAIN_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([a-z0-9-]{1,63}\.)+[a-z]{2,}$").ok());

const REPORT_SLUG_SUFFIX: &str = "-safe";

/// Normalize arbitrary user input to a candidate host.
///
/// Trims, lowercases, strips an `http://`/`https://` scheme, drops the
/// fragment and query, and keeps only the first path segment. A leading
/// `www.` is preserved. The final trim keeps the function idempotent for
/// inputs like `"example.com /path"`.
pub fn normalize_domain(value: &str) -> String {
    let lowered = value.trim().to_lowercase();
    let without_scheme = lowered
        .strip_prefix("https://")
        .or_else(|| lowered.strip_prefix("http://"))
        .unwrap_or(&lowered);
    let without_fragment = without_scheme
        .split_once('#')
        .map_or(without_scheme, |(head, _)| head);
    let without_query = without_fragment
        .split_once('?')
        .map_or(without_fragment, |(head, _)| head);
    let host = without_query.split('/').next().unwrap_or_default();
    host.trim().to_string()
}

/// Whether the input normalizes to something domain-shaped.
///
/// Must be checked before evaluation so malformed input never costs a
/// network round-trip.
pub fn is_likely_domain(value: &str) -> bool {
    let domain = normalize_domain(value);
    if domain.split('.').any(|label| label.starts_with('-')) {
        return false;
    }
    DOMAIN_RE
        .as_ref()
        .is_some_and(|re| re.is_match(&domain))
}

/// Build the report slug for a domain, e.g. `example.com-safe`.
pub fn report_slug(domain: &str) -> String {
    format!("{domain}{REPORT_SLUG_SUFFIX}")
}

/// Strip a trailing `-safe` (any case) from a report slug.
pub fn parse_report_slug(slug: &str) -> &str {
    let split = slug.len().saturating_sub(REPORT_SLUG_SUFFIX.len());
    match slug.get(split..) {
        Some(tail) if tail.eq_ignore_ascii_case(REPORT_SLUG_SUFFIX) => &slug[..split],
        _ => slug,
    }
}

/// Canonical report path for raw input; invalid input maps to a fixed placeholder.
pub fn canonical_report_path(raw: &str) -> String {
    let domain = normalize_domain(raw);
    if is_likely_domain(&domain) {
        format!("/is/{}", report_slug(&domain))
    } else {
        format!("/is/{}", report_slug("invalid-domain"))
    }
}
