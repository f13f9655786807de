// ABOUTME: Composition root: shared server resources, router assembly, and the serve loop
// ABOUTME: Wires cache, registry, broadcaster, LLM provider, and mail client into every route group
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server
//!
//! [`ServerResources`] is built once at startup and shared by every handler
//! through axum state. The cache and registry are owned here, so there is no
//! process-global state and tests can build as many isolated servers as they
//! like.

use crate::cache::ResultCache;
use crate::config::ServerConfig;
use crate::errors::{AppError, AppResult};
use crate::llm::{LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider};
use crate::mail::ZohoMailClient;
use crate::middleware::{make_request_span, setup_cors};
use crate::routes::{
    AssistantRoutes, HealthRoutes, MailRoutes, StreamRoutes, SummaryRoutes, WebhookRoutes,
};
use crate::sse::{Broadcaster, SubscriberRegistry};
use axum::{body::Body, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared resources handed to every route group
#[derive(Clone)]
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Latest summary per user
    pub cache: Arc<ResultCache>,
    /// Live stream channels
    pub registry: Arc<SubscriberRegistry>,
    /// Single writer into `cache` and `registry`
    pub broadcaster: Broadcaster,
    /// Chat completion backend
    pub llm: Arc<dyn LlmProvider>,
    /// Zoho OAuth and inbox client
    pub mail: ZohoMailClient,
}

impl ServerResources {
    /// Build resources around an already constructed LLM provider
    ///
    /// Must be called inside a Tokio runtime for the cache cleanup task to run.
    #[must_use]
    pub fn new(config: ServerConfig, llm: Arc<dyn LlmProvider>) -> Self {
        let cache = Arc::new(ResultCache::new(&config.cache));
        let registry = Arc::new(SubscriberRegistry::new(config.sse.channel_capacity));
        let broadcaster = Broadcaster::new(Arc::clone(&cache), Arc::clone(&registry));
        let mail = ZohoMailClient::new(config.zoho.clone());

        Self {
            config: Arc::new(config),
            cache,
            registry,
            broadcaster,
            llm,
            mail,
        }
    }

    /// Build resources with the `OpenRouter` provider described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the LLM HTTP client cannot be created
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let provider =
            OpenAiCompatibleProvider::new(OpenAiCompatibleConfig::from(&config.llm))?;
        Ok(Self::new(config, Arc::new(provider)))
    }
}

/// Merge every route group and apply the HTTP middleware stack
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(WebhookRoutes::routes(Arc::clone(&resources)))
        .merge(SummaryRoutes::routes(Arc::clone(&resources)))
        .merge(StreamRoutes::routes(Arc::clone(&resources)))
        .merge(AssistantRoutes::routes(Arc::clone(&resources)))
        .merge(MailRoutes::routes(resources))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span::<Body>))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(cors)
}

/// Bind the configured address and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the address is invalid, the port cannot be bound, or
/// the server fails while running
pub async fn run(resources: Arc<ServerResources>) -> AppResult<()> {
    let addr: SocketAddr = format!("{}:{}", resources.config.host, resources.config.http_port)
        .parse()
        .map_err(|e| AppError::config(format!("Invalid listen address: {e}")))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")).with_source(e))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, build_router(resources))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server error: {e}")).with_source(e))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
