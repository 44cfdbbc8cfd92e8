use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ynab_api::{Config, YnabClient};
use ynab_server::{run_stdio, McpServer};
use ynab_tools::registry::create_tool_manager;

/// Logs go to stderr so stdout stays clean for protocol frames.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("configuration error: {e}");
            return Err(e.into());
        }
    };

    let client = YnabClient::new(&config)?;
    let tool_manager = create_tool_manager(Arc::new(client));
    info!(
        tools = tool_manager.len(),
        base_url = %config.base_url,
        "starting ynab-mcp server"
    );

    run_stdio(McpServer::new(tool_manager)).await
}
