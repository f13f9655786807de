// ABOUTME: Assistant endpoints for reply drafts, task extraction, and event extraction
// ABOUTME: Thin handlers over the LLM-backed services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::defaults::DEFAULT_TONE;
use crate::errors::AppError;
use crate::server::ServerResources;
use crate::services;
use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Request body for `/draft-reply`
#[derive(Debug, Deserialize)]
pub struct DraftRequest {
    /// Email being replied to
    #[serde(default)]
    pub body: Option<String>,
    /// Desired tone, `"polite"` when omitted
    #[serde(default)]
    pub tone: Option<String>,
}

/// Request body for `/tasks` and `/events`
#[derive(Debug, Deserialize)]
pub struct EmailBodyRequest {
    /// Email text to analyze
    #[serde(default)]
    pub body: Option<String>,
}

/// Decoded request or the `AppError` for a malformed one
fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(request)| request)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}

fn required_body(body: Option<String>) -> Result<String, AppError> {
    body.ok_or_else(|| AppError::missing_field("body"))
}

/// Assistant routes
pub struct AssistantRoutes;

impl AssistantRoutes {
    /// Create all assistant routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/draft-reply", post(Self::handle_draft_reply))
            .route("/tasks", post(Self::handle_tasks))
            .route("/events", post(Self::handle_events))
            .with_state(resources)
    }

    async fn handle_draft_reply(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<DraftRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = parse_body(payload)?;
        let body = required_body(request.body)?;
        let tone = request
            .tone
            .as_deref()
            .filter(|tone| !tone.trim().is_empty())
            .unwrap_or(DEFAULT_TONE);
        let reply = services::draft_reply(resources.llm.as_ref(), &body, tone).await?;

        Ok(Json(json!({ "reply_text": reply })).into_response())
    }

    async fn handle_tasks(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<EmailBodyRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let body = required_body(parse_body(payload)?.body)?;
        let tasks = services::extract_tasks(resources.llm.as_ref(), &body).await?;
        Ok(Json(json!({ "tasks": tasks })).into_response())
    }

    async fn handle_events(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<EmailBodyRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let body = required_body(parse_body(payload)?.body)?;
        let events = services::extract_events(resources.llm.as_ref(), &body).await?;
        Ok(Json(json!({ "events": events })).into_response())
    }
}
