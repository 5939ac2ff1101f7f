//! `precis serve` command - Start the web page and JSON API

use anyhow::Result;
use precis_core::{server, Config};
use std::sync::Arc;
use tracing::{info, warn};

pub async fn run(config: Config, open: bool) -> Result<()> {
    info!("Starting Precis server...");

    let state = Arc::new(server::AppState::new(config.clone())?);
    let url = config.server_url();

    println!("🚀 Precis server starting on {}", url);
    println!("   Summarization page: {}/", url);
    println!("   JSON API:           {}/v1/summarize", url);
    println!("   OpenAPI document:   {}/openapi.json", url);
    println!("   Press Ctrl+C to stop");

    if open {
        if let Err(e) = open::that(&url) {
            warn!("Could not open a browser: {}", e);
        }
    }

    server::start_server(state).await?;

    Ok(())
}
