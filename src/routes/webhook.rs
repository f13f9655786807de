// ABOUTME: Inbound mail webhook: summarize the email and publish the result
// ABOUTME: Answers provider pings and validation handshakes without touching the LLM
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Webhook ingestion
//!
//! The mail provider posts here for every new message. Anything that is not
//! an email with body text is acknowledged with `{"status":"ok"}` so the
//! provider does not retry. A real email is summarized, stored, and fanned
//! out to every stream subscriber exactly once.

use crate::cache::CachedResult;
use crate::constants::defaults::NEUTRAL_SENTIMENT;
use crate::errors::AppError;
use crate::ingest::{clean_summary, WebhookPayload};
use crate::logging::AppLogger;
use crate::server::ServerResources;
use crate::services;
use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Webhook routes
pub struct WebhookRoutes;

impl WebhookRoutes {
    /// Create the webhook route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/summarize", post(Self::handle_summarize))
            .with_state(resources)
    }

    async fn handle_summarize(
        State(resources): State<Arc<ServerResources>>,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let email = match WebhookPayload::classify(&body) {
            WebhookPayload::Ping => {
                debug!("Webhook ping without JSON body");
                return Ok(Json(json!({ "status": "ok" })).into_response());
            }
            WebhookPayload::Validation => {
                info!("Webhook validation ping");
                return Ok(Json(json!({ "status": "pong" })).into_response());
            }
            WebhookPayload::Empty => {
                warn!("Webhook payload has no body text, ignoring");
                return Ok(Json(json!({ "status": "ok" })).into_response());
            }
            WebhookPayload::Email(email) => email,
        };

        debug!(
            user_id = %email.user_id,
            subject = %email.subject,
            body_len = email.body.len(),
            "Summarizing inbound email"
        );

        let parsed =
            services::summarize(resources.llm.as_ref(), &email.subject, &email.body).await?;

        let summary = clean_summary(&parsed.summary);
        let sentiment = parsed
            .sentiment
            .filter(|sentiment| !sentiment.is_empty())
            .unwrap_or_else(|| NEUTRAL_SENTIMENT.to_owned());

        let result = CachedResult::new(
            email.user_id.as_str(),
            email.subject,
            summary.as_str(),
            sentiment.as_str(),
        )
        .with_action_items(parsed.action_items);

        let report = resources.broadcaster.publish(&email.user_id, result);
        AppLogger::log_webhook_event(&email.user_id, "summarized", report.delivered);

        Ok(Json(json!({
            "status": "success",
            "summary": summary,
            "sentiment": sentiment
        }))
        .into_response())
    }
}
