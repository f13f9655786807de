// ABOUTME: Route module organization for the Inbox Pulse HTTP endpoints
// ABOUTME: Each domain module owns its routes and thin handlers over the service layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! HTTP routes
//!
//! Every group exposes `routes(resources) -> Router`; the groups are merged
//! in [`crate::server::build_router`].

/// Draft, task, and event assistant endpoints
pub mod assistant;
/// Liveness and status endpoints
pub mod health;
/// Zoho OAuth and inbox proxy endpoints
pub mod mail;
/// Server-Sent Events stream of new summaries
pub mod stream;
/// Latest-summary lookup
pub mod summary;
/// Inbound mail webhook
pub mod webhook;

pub use assistant::AssistantRoutes;
pub use health::HealthRoutes;
pub use mail::MailRoutes;
pub use stream::StreamRoutes;
pub use summary::SummaryRoutes;
pub use webhook::WebhookRoutes;
