// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Reports liveness plus live subscriber and cached summary counts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use crate::constants::service::APP_NAME;
use crate::server::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_root))
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_root() -> Json<Value> {
        Json(json!({
            "status": "running",
            "app": APP_NAME
        }))
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        Json(json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "subscribers": resources.registry.len(),
            "cached_summaries": resources.cache.len()
        }))
    }
}
