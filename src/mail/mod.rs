// ABOUTME: Zoho Mail integration: OAuth authorization and inbox retrieval
// ABOUTME: Wraps the Zoho accounts server and Mail REST API behind one client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Zoho Mail client
//!
//! The server never stores tokens. `/oauth/callback` hands the token
//! response back to the caller, who then presents the access token on
//! `/inbox` through the `x-zoho-oauthtoken` header.

/// Inbox listing
pub mod inbox;
/// Authorization URL and code exchange
pub mod oauth;

pub use inbox::InboxMessage;

use crate::config::ZohoConfig;
use crate::constants::llm::CONNECT_TIMEOUT_SECS;
use crate::constants::zoho::REQUEST_TIMEOUT_SECS;
use crate::utils::http_client::create_client_with_timeout;
use reqwest::Client;

/// Service label used in error messages
pub(crate) const SERVICE: &str = "Zoho Mail";

/// Client for the Zoho accounts server and Mail API
#[derive(Debug, Clone)]
pub struct ZohoMailClient {
    client: Client,
    config: ZohoConfig,
}

impl ZohoMailClient {
    /// Create a client from Zoho settings
    #[must_use]
    pub fn new(config: ZohoConfig) -> Self {
        Self {
            client: create_client_with_timeout(REQUEST_TIMEOUT_SECS, CONNECT_TIMEOUT_SECS),
            config,
        }
    }

    /// Settings this client was built with
    #[must_use]
    pub const fn config(&self) -> &ZohoConfig {
        &self.config
    }

    fn accounts_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.config.accounts_base.trim_end_matches('/'),
            endpoint
        )
    }

    fn mail_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.config.mail_api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}
