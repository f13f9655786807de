// ABOUTME: Zoho OAuth flow and inbox proxy endpoints
// ABOUTME: Hands tokens back to the caller and lists the inbox with a caller-supplied token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::defaults::INBOX_LIMIT;
use crate::constants::zoho::TOKEN_HEADER;
use crate::errors::AppError;
use crate::server::ServerResources;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Query parameters for the OAuth callback
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    /// Authorization code issued by Zoho
    pub code: String,
}

/// Query parameters for the inbox listing
#[derive(Debug, Default, Deserialize)]
pub struct InboxQuery {
    /// Number of messages to return
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Mail routes
pub struct MailRoutes;

impl MailRoutes {
    /// Create all mail routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/oauth/authorize", get(Self::handle_authorize))
            .route("/oauth/callback", get(Self::handle_callback))
            .route("/inbox", get(Self::handle_inbox))
            .with_state(resources)
    }

    async fn handle_authorize(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let auth_url = resources.mail.authorization_url()?;
        Ok(Json(json!({ "auth_url": auth_url })).into_response())
    }

    async fn handle_callback(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<CallbackQuery>,
    ) -> Result<Response, AppError> {
        let tokens = resources.mail.exchange_code(&query.code).await?;
        Ok(Json(json!({ "tokens": tokens })).into_response())
    }

    async fn handle_inbox(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<InboxQuery>,
    ) -> Result<Response, AppError> {
        let token = headers
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::auth_required(format!("Missing {TOKEN_HEADER} header")))?;

        let emails = resources
            .mail
            .inbox(token, query.limit.unwrap_or(INBOX_LIMIT))
            .await?;
        Ok(Json(json!({ "emails": emails })).into_response())
    }
}
