//! MCP Server entry point for site safety checks
//!
//! Starts the MCP server with stdio transport. Configuration comes from the
//! environment; without a WHOIS API key the server still runs and applies
//! the age-unknown penalty instead.

mod schemas;
mod server;

use std::process::ExitCode;

use rmcp::ServiceExt;
use server::SiteSafetyMcp;
use site_safety_core::{EvaluatorConfig, WHOIS_API_KEY_ENV};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing to stderr (MCP uses stdout for protocol)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    tracing::info!("Starting Site Safety MCP Server");

    let config = EvaluatorConfig::from_env();
    if config.whois_enabled() {
        tracing::info!("WHOIS lookups enabled via {}", config.whois_endpoint);
    } else {
        tracing::warn!(
            "{WHOIS_API_KEY_ENV} is not set; domain age will be reported as unavailable"
        );
    }

    let mcp_server = SiteSafetyMcp::new(&config);

    tracing::info!("MCP server initialized with 2 tools");

    // Start serving via stdio
    tracing::info!("Starting MCP server on stdio transport");
    let service = match mcp_server.serve(rmcp::transport::stdio()).await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to start MCP server: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Wait for the server to complete
    if let Err(e) = service.waiting().await {
        tracing::error!("MCP server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
