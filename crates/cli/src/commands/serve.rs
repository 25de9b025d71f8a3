use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use hai_mcp_core::config::ServerConfig;
use hai_mcp_server::McpServer;
use hai_mcp_tencent::TencentProvider;
use tracing::info;

pub async fn serve(provider: TencentProvider, bundle_types: Option<PathBuf>) -> Result<()> {
    let config = ServerConfig::load(bundle_types).await?;
    let server = McpServer::new(Arc::new(provider), config);
    info!("HAI MCP server ready");
    server.serve_stdio().await?;
    Ok(())
}
