// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Defaults for the cache, SSE streaming, LLM access, and the Zoho Mail API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Defaults are grouped by domain. Every value here can be overridden from
//! the environment through [`crate::config::ServerConfig`].

/// Application identity
pub mod service {
    /// Display name returned by the root endpoint
    pub const APP_NAME: &str = "Inbox Pulse";
    /// Service name used in structured logs
    pub const SERVICE_NAME: &str = "inbox-pulse";
    /// Crate version
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// HTTP listener defaults
pub mod network_config {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8000;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Per-subscriber SSE channel buffer size
    pub const SSE_CHANNEL_CAPACITY: usize = 1000;
    /// Keep-alive comment interval for SSE connections
    pub const SSE_KEEP_ALIVE_SECS: u64 = 15;
}

/// Summary cache defaults
pub mod cache {
    /// Time after which an unrefreshed summary becomes unavailable
    pub const SUMMARY_TTL_SECS: u64 = 600;
    /// Maximum number of users with a cached summary
    pub const SUMMARY_MAX_ENTRIES: usize = 100;
    /// Interval between background purges of expired entries
    pub const CLEANUP_INTERVAL_SECS: u64 = 60;
}

/// Placeholders used when a webhook payload or LLM reply leaves a field empty
pub mod defaults {
    /// Subject shown when the payload carries none
    pub const NO_SUBJECT: &str = "No Subject";
    /// Sentiment used when the model does not report one
    pub const NEUTRAL_SENTIMENT: &str = "Neutral";
    /// User id used when the webhook does not identify the recipient
    pub const ANONYMOUS_USER: &str = "anonymous";
    /// Tone used for reply drafts when none is requested
    pub const DEFAULT_TONE: &str = "polite";
    /// Number of inbox messages fetched by default
    pub const INBOX_LIMIT: u32 = 5;
}

/// LLM access defaults
pub mod llm {
    /// `OpenRouter` API base
    pub const OPENROUTER_BASE: &str = "https://openrouter.ai/api/v1";
    /// Model used for every completion
    pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.1-8b-instruct";
    /// Referer reported to `OpenRouter`
    pub const DEFAULT_REFERER: &str = "http://localhost";
    /// Application title reported to `OpenRouter`
    pub const DEFAULT_APP_TITLE: &str = "Inbox Pulse";
    /// Request timeout for completions
    pub const REQUEST_TIMEOUT_SECS: u64 = 60;
    /// Connect timeout for completions
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
}

/// Zoho Mail OAuth and REST endpoints
pub mod zoho {
    /// Accounts server base for authorization and token exchange
    pub const ACCOUNTS_BASE: &str = "https://accounts.zoho.in/oauth/v2";
    /// Mail REST API base
    pub const MAIL_API_BASE: &str = "https://mail.zoho.com/api";
    /// Redirect URI registered with Zoho when none is configured
    pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8000/oauth/callback";
    /// Timeout for Zoho API calls
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
    /// Scopes requested during authorization
    pub const SCOPES: &str = "ZohoMail.messages.ALL,ZohoMail.accounts.READ,ZohoMail.folders.READ";
    /// Header carrying the caller's access token on `/inbox`
    pub const TOKEN_HEADER: &str = "x-zoho-oauthtoken";
    /// Authorization scheme expected by the Zoho Mail API
    pub const AUTH_SCHEME: &str = "Zoho-oauthtoken";
}

/// Origins allowed by CORS when `CORS_ALLOWED_ORIGINS` is unset
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "https://mail.zoho.com",
    "https://mail.zoho.in",
    "https://mail.zoho.eu",
    "https://mail.zoho.jp",
    "https://mail.zoho.com.cn",
    "http://127.0.0.1:5000",
    "https://127.0.0.1:5000",
    "http://localhost:5000",
    "https://localhost:5000",
];
