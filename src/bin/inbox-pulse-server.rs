// ABOUTME: Server binary: loads configuration, initializes logging, and serves the HTTP API
// ABOUTME: Lists every available endpoint at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Inbox Pulse Server Binary
//!
//! Starts the webhook, summary, stream, assistant, and mail endpoints on a
//! single HTTP port.

use anyhow::Result;
use clap::Parser;
use inbox_pulse::{
    config::ServerConfig,
    logging,
    server::{self, ServerResources},
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "inbox-pulse-server")]
#[command(about = "Inbox Pulse - email summaries pushed to the browser as they arrive")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    info!("Starting Inbox Pulse");
    info!("{}", config.summary());
    display_available_endpoints(&config);

    let resources = Arc::new(ServerResources::from_config(config)?);

    if let Err(e) = server::run(resources).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Display all available API endpoints
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let host = &config.host;
    let port = config.http_port;

    info!("=== Available API Endpoints ===");
    info!("   Status:           GET  http://{host}:{port}/");
    info!("   Health:           GET  http://{host}:{port}/health");
    info!("   Mail Webhook:     POST http://{host}:{port}/summarize");
    info!("   Latest Summary:   GET  http://{host}:{port}/summary/{{user_id}}");
    info!("   Summary Stream:   GET  http://{host}:{port}/stream");
    info!("   Draft Reply:      POST http://{host}:{port}/draft-reply");
    info!("   Extract Tasks:    POST http://{host}:{port}/tasks");
    info!("   Extract Events:   POST http://{host}:{port}/events");
    info!("   OAuth Authorize:  GET  http://{host}:{port}/oauth/authorize");
    info!("   OAuth Callback:   GET  http://{host}:{port}/oauth/callback");
    info!("   Inbox:            GET  http://{host}:{port}/inbox");
    info!("=== End of Endpoint List ===");
}
