//! MCP Server implementation for domain safety checks.
//!
//! Exposes 2 tools: a full safety evaluation and a side-effect free
//! normalization preview.

use async_trait::async_trait;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::time::{timeout, Duration};

use site_safety_core::{
    validate_domain, EvaluatorConfig, EvaluatorError, EvaluatorResult, SafetyEvaluator,
    SafetyResult,
};

use crate::schemas::{CheckDomainSafetyParams, NormalizeDomainParams, NormalizedDomain, SafetyReport};

/// Upper bound on one `check_domain_safety` call, covering WHOIS retries and the probe.
const CHECK_DOMAIN_SAFETY_TIMEOUT_SECS: u64 = 15;

#[async_trait]
trait SafetyGateway: Send + Sync {
    /// Evaluate an already validated domain.
    async fn check(&self, domain: &str) -> EvaluatorResult<SafetyResult>;
}

struct EvaluatorGateway {
    evaluator: SafetyEvaluator,
}

#[async_trait]
impl SafetyGateway for EvaluatorGateway {
    async fn check(&self, domain: &str) -> EvaluatorResult<SafetyResult> {
        self.evaluator.check(domain).await
    }
}

/// Sanitize error messages to prevent sensitive information leakage.
///
/// Logs the full error to stderr but returns a generic message to the client.
fn sanitize_internal_error(error: impl std::fmt::Display, context: &str) -> McpError {
    tracing::error!("{context} error: {error}");
    McpError::internal_error(
        format!("{context} failed - check server logs for details"),
        None,
    )
}

fn map_evaluator_error(context: &str, error: &EvaluatorError) -> McpError {
    if error.is_expected() {
        tracing::warn!("{context} rejected: {error}");
        McpError::invalid_params(error.to_string(), None)
    } else {
        sanitize_internal_error(error, context)
    }
}

fn json_result<T: Serialize>(value: &T, context: &str) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| sanitize_internal_error(e, &format!("Serialize {context} result")))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// MCP Server for domain safety checks.
#[derive(Clone)]
pub struct SiteSafetyMcp {
    /// Evaluator behind a seam so tests can substitute it.
    gateway: Arc<dyn SafetyGateway>,
    check_timeout: Duration,
    /// Tool router generated by macro.
    tool_router: ToolRouter<Self>,
}

impl SiteSafetyMcp {
    /// Create a new MCP server instance backed by live network checks.
    #[must_use]
    pub fn new(config: &EvaluatorConfig) -> Self {
        Self::with_gateway_and_timeout(
            Arc::new(EvaluatorGateway {
                evaluator: SafetyEvaluator::new(config),
            }),
            Duration::from_secs(CHECK_DOMAIN_SAFETY_TIMEOUT_SECS),
        )
    }

    fn with_gateway_and_timeout(gateway: Arc<dyn SafetyGateway>, check_timeout: Duration) -> Self {
        Self {
            gateway,
            check_timeout,
            tool_router: Self::tool_router(),
        }
    }
}

#[tool_router]
impl SiteSafetyMcp {
    /// Evaluate how trustworthy a domain looks.
    #[tool(
        description = "Evaluate a domain's scam risk from live HTTPS, WHOIS age, popularity and keyword signals. Returns a 0-100 scam score, a safe/caution/risky verdict, reasons and recommended actions"
    )]
    async fn check_domain_safety(
        &self,
        Parameters(params): Parameters<CheckDomainSafetyParams>,
    ) -> Result<CallToolResult, McpError> {
        // Reject malformed input before any network work.
        let domain = validate_domain(&params.domain)
            .map_err(|e| map_evaluator_error("Domain safety check", &e))?;

        let result = timeout(self.check_timeout, self.gateway.check(&domain))
            .await
            .map_err(|_| McpError::internal_error("Domain safety check timeout", None))?
            .map_err(|e| map_evaluator_error("Domain safety check", &e))?;

        json_result(&SafetyReport::from(result), "domain safety check")
    }

    /// Preview how input will be normalized.
    #[tool(
        description = "Normalize a raw domain or URL the way check_domain_safety does, without any network access"
    )]
    async fn normalize_domain(
        &self,
        Parameters(params): Parameters<NormalizeDomainParams>,
    ) -> Result<CallToolResult, McpError> {
        json_result(&NormalizedDomain::from_input(params.input), "normalize domain")
    }
}

#[tool_handler]
impl ServerHandler for SiteSafetyMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Site Safety MCP Server - heuristic trust checks for domains. \
                 Use check_domain_safety to score a domain (safe / caution / risky) before \
                 visiting or paying on it, and normalize_domain to preview how input is parsed. \
                 Results are heuristics, not guarantees."
                    .into(),
            ),
        }
    }
}

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod test_mocks;

#[cfg(test)]
#[path = "server_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;

#[cfg(test)]
#[path = "client_integration_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod client_integration_tests;
