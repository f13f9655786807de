// ABOUTME: Lookup of the most recent summary computed for a user
// ABOUTME: Serves cache hits and a not_found body once the entry is missing or expired
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::server::ServerResources;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Summary lookup routes
pub struct SummaryRoutes;

impl SummaryRoutes {
    /// Create the lookup route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/summary/:user_id", get(Self::handle_get_summary))
            .with_state(resources)
    }

    async fn handle_get_summary(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<String>,
    ) -> Response {
        match resources.cache.get(&user_id) {
            Some(data) => (
                StatusCode::OK,
                Json(json!({ "status": "success", "data": data })),
            )
                .into_response(),
            None => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "status": "not_found",
                    "message": "No recent summary found"
                })),
            )
                .into_response(),
        }
    }
}
