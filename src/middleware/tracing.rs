// ABOUTME: Request tracing helpers for correlation and structured logging
// ABOUTME: Creates one span per HTTP request carrying method, path, and request id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use http::Request;
use tracing::Span;

/// Header set by the request id layer
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Span for one HTTP request, used with `TraceLayer::make_span_with`
///
/// The request id layer runs first, so the header is normally present; a
/// client-supplied id is kept as is.
#[must_use]
pub fn make_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
