// ABOUTME: HTTP middleware for cross-origin access and request tracing
// ABOUTME: Builds the CORS layer and the per-request tracing span
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// CORS configuration for browser clients
pub mod cors;
/// Request id and span construction
pub mod tracing;

pub use cors::setup_cors;
pub use self::tracing::make_request_span;
