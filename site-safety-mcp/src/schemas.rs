//! MCP tool parameter and result schemas
//!
//! Parameter structs derive `Debug`, `Deserialize`, and `JsonSchema` as required by rmcp.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use site_safety_core::{
    canonical_report_path, is_likely_domain, normalize_domain, SafetyResult,
};

/// Parameters for `check_domain_safety` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CheckDomainSafetyParams {
    /// Domain or URL to evaluate.
    #[schemars(description = "Domain or URL to evaluate (e.g. example.com or https://example.com/login)")]
    pub domain: String,
}

/// Parameters for `normalize_domain` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct NormalizeDomainParams {
    /// Raw user input.
    #[schemars(description = "Raw domain or URL input to normalize")]
    pub input: String,
}

/// Result of `check_domain_safety`: the evaluation plus presentation hints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyReport {
    #[serde(flatten)]
    pub result: SafetyResult,
    pub label: &'static str,
    pub recommended_actions: &'static [&'static str],
    pub report_path: String,
}

impl From<SafetyResult> for SafetyReport {
    fn from(result: SafetyResult) -> Self {
        Self {
            label: result.verdict.label(),
            recommended_actions: result.verdict.recommended_actions(),
            report_path: canonical_report_path(&result.domain),
            result,
        }
    }
}

/// Result of `normalize_domain`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedDomain {
    pub input: String,
    pub domain: String,
    pub valid: bool,
    pub report_path: String,
}

impl NormalizedDomain {
    pub fn from_input(input: String) -> Self {
        let domain = normalize_domain(&input);
        Self {
            valid: is_likely_domain(&domain),
            report_path: canonical_report_path(&input),
            domain,
            input,
        }
    }
}
