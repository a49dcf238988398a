use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::sync::Arc;

use hcloud_mcp::catalog::build_registry;
use hcloud_mcp::cli::Cli;
use hcloud_mcp::config::Config;
use hcloud_mcp::hcloud::HcloudClient;
use hcloud_mcp::logging;
use hcloud_mcp::mcp::McpServer;

#[tokio::main]
async fn main() -> Result<()> {
    let _cli = Cli::parse();

    // Stdout is reserved for protocol frames
    let log_file = logging::init(&logging::default_log_dir());

    let config = Config::from_env().context("Failed to load configuration")?;
    match &log_file {
        Some(path) => info!("Starting hcloud-mcp, logging to {}", path.display()),
        None => info!("Starting hcloud-mcp, logging to stderr"),
    }
    info!("Using endpoint {}", config.endpoint);

    let client = HcloudClient::from_config(&config).context("Failed to create Hetzner Cloud client")?;
    let registry = build_registry(Arc::new(client));
    let tool_count = registry.len();

    let server = Arc::new(McpServer::new(registry));
    eprintln!(
        "{} running on stdio ({} tools)",
        "Hetzner MCP Server".green().bold(),
        tool_count
    );

    server.serve_stdio().await.context("Server failed")?;
    info!("Shutting down");
    Ok(())
}
