// ABOUTME: Main library entry point for the Inbox Pulse email summary relay
// ABOUTME: Exposes webhook ingestion, the result cache, SSE fan-out, and the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Inbox Pulse
//!
//! A mail provider posts every new message to `/summarize`. The server asks
//! an LLM for a short summary, keeps the newest result per user in a bounded
//! TTL cache, and pushes it to every browser connected to `/stream`.
//!
//! ## Architecture
//!
//! - **Cache**: latest summary per user, LRU bounded with a TTL
//! - **SSE**: subscriber registry, broadcaster, and per-connection sessions
//! - **Services**: summarize, draft reply, task and event extraction
//! - **Mail**: Zoho OAuth and inbox listing
//! - **Routes**: thin axum handlers composed in [`server::build_router`]
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use inbox_pulse::config::ServerConfig;
//! use inbox_pulse::errors::AppResult;
//! use inbox_pulse::server::{self, ServerResources};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     let resources = Arc::new(ServerResources::from_config(config)?);
//!     server::run(resources).await
//! }
//! ```

/// Bounded TTL cache of the latest summary per user
pub mod cache;

/// Environment-driven configuration
pub mod config;

/// Application constants and defaults
pub mod constants;

/// Unified error type and HTTP error bodies
pub mod errors;

/// Webhook payload normalization and HTML cleanup
pub mod ingest;

/// LLM provider abstraction and the `OpenRouter` client
pub mod llm;

/// Structured logging setup
pub mod logging;

/// Zoho OAuth and Mail API client
pub mod mail;

/// HTTP middleware (CORS, request tracing)
pub mod middleware;

/// Route groups
pub mod routes;

/// Resource wiring, router assembly, and the serve loop
pub mod server;

/// LLM-backed email assistant services
pub mod services;

/// Subscriber registry, broadcaster, and stream sessions
pub mod sse;

/// Shared utilities
pub mod utils;
