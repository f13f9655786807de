// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Allows the mail web client and local extension origins to call the API and open the stream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::CorsConfig;
use crate::constants::zoho::TOKEN_HEADER;
use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Configure CORS from the allowed origin list
///
/// `["*"]` (or an empty list) allows any origin without credentials. A
/// concrete list allows credentials, which the browser needs to reuse
/// cookies on the stream connection.
///
/// # Examples
///
/// ```bash
/// # Allow all origins (development)
/// export CORS_ALLOWED_ORIGINS="*"
///
/// # Allow specific origins (production)
/// export CORS_ALLOWED_ORIGINS="https://mail.zoho.com,https://mail.zoho.in"
/// ```
#[must_use]
pub fn setup_cors(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    let wildcard = origins.is_empty() || config.allowed_origins.iter().any(|o| o == "*");

    let layer = CorsLayer::new()
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("cache-control"),
            HeaderName::from_static("last-event-id"),
            HeaderName::from_static(TOKEN_HEADER),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS]);

    if wildcard {
        layer.allow_origin(AllowOrigin::any())
    } else {
        layer
            .allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
    }
}
