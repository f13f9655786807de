// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::cache::CacheConfig;
use crate::constants::{cache, llm, network_config, zoho, DEFAULT_CORS_ORIGINS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// CORS settings
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Allowed origins; `["*"]` allows any
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: DEFAULT_CORS_ORIGINS
                .iter()
                .map(|origin| (*origin).to_owned())
                .collect(),
        }
    }
}

/// `OpenAI`-compatible LLM endpoint settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Bearer token for the endpoint
    pub api_key: Option<String>,
    /// API base, without the `/chat/completions` suffix
    pub base_url: String,
    /// Model used for every completion
    pub model: String,
    /// Value of the `HTTP-Referer` header
    pub referer: String,
    /// Value of the `X-Title` header
    pub app_title: String,
    /// Whole-request timeout
    pub request_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: llm::OPENROUTER_BASE.to_owned(),
            model: llm::DEFAULT_MODEL.to_owned(),
            referer: llm::DEFAULT_REFERER.to_owned(),
            app_title: llm::DEFAULT_APP_TITLE.to_owned(),
            request_timeout: Duration::from_secs(llm::REQUEST_TIMEOUT_SECS),
        }
    }
}

/// Zoho OAuth client and Mail API settings
#[derive(Debug, Clone)]
pub struct ZohoConfig {
    /// OAuth client id
    pub client_id: Option<String>,
    /// OAuth client secret
    pub client_secret: Option<String>,
    /// Redirect URI registered with Zoho
    pub redirect_uri: String,
    /// Accounts server base (`/auth`, `/token`)
    pub accounts_base: String,
    /// Mail REST API base
    pub mail_api_base: String,
}

impl Default for ZohoConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: zoho::DEFAULT_REDIRECT_URI.to_owned(),
            accounts_base: zoho::ACCOUNTS_BASE.to_owned(),
            mail_api_base: zoho::MAIL_API_BASE.to_owned(),
        }
    }
}

/// Stream endpoint settings
#[derive(Debug, Clone)]
pub struct SseConfig {
    /// Per-subscriber buffer size
    pub channel_capacity: usize,
    /// Interval between keep-alive comments
    pub keep_alive: Duration,
}

impl Default for SseConfig {
    fn default() -> Self {
        Self {
            channel_capacity: network_config::SSE_CHANNEL_CAPACITY,
            keep_alive: Duration::from_secs(network_config::SSE_KEEP_ALIVE_SECS),
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// CORS settings
    pub cors: CorsConfig,
    /// LLM endpoint settings
    pub llm: LlmConfig,
    /// Zoho settings
    pub zoho: ZohoConfig,
    /// Summary cache settings
    pub cache: CacheConfig,
    /// Stream settings
    pub sse: SseConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: network_config::DEFAULT_HTTP_PORT,
            host: network_config::DEFAULT_HOST.to_owned(),
            environment: Environment::default(),
            cors: CorsConfig::default(),
            llm: LlmConfig::default(),
            zoho: ZohoConfig::default(),
            cache: CacheConfig::default(),
            sse: SseConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first when present.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let cors = env_opt("CORS_ALLOWED_ORIGINS").map_or_else(CorsConfig::default, |origins| {
            CorsConfig {
                allowed_origins: parse_origins(&origins),
            }
        });

        let config = Self {
            http_port: env_parse("HTTP_PORT", network_config::DEFAULT_HTTP_PORT)?,
            host: env_var_or("HOST", network_config::DEFAULT_HOST),
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            cors,

            llm: LlmConfig {
                api_key: env_opt("OPEN_ROUTER_KEY"),
                base_url: env_var_or("OPENROUTER_BASE", llm::OPENROUTER_BASE),
                model: env_var_or("OPENROUTER_MODEL", llm::DEFAULT_MODEL),
                referer: env_var_or("LLM_REFERER", llm::DEFAULT_REFERER),
                app_title: env_var_or("LLM_APP_TITLE", llm::DEFAULT_APP_TITLE),
                request_timeout: Duration::from_secs(llm::REQUEST_TIMEOUT_SECS),
            },

            zoho: ZohoConfig {
                client_id: env_opt("ZOHO_CLIENT_ID"),
                client_secret: env_opt("ZOHO_CLIENT_SECRET"),
                redirect_uri: env_var_or("ZOHO_REDIRECT_URI", zoho::DEFAULT_REDIRECT_URI),
                accounts_base: env_var_or("ZOHO_ACCOUNTS_BASE", zoho::ACCOUNTS_BASE),
                mail_api_base: env_var_or("ZOHO_MAIL_API_BASE", zoho::MAIL_API_BASE),
            },

            cache: CacheConfig {
                ttl: Duration::from_secs(env_parse(
                    "SUMMARY_CACHE_TTL_SECS",
                    cache::SUMMARY_TTL_SECS,
                )?),
                max_entries: env_parse("SUMMARY_CACHE_MAX_ENTRIES", cache::SUMMARY_MAX_ENTRIES)?,
                cleanup_interval: Duration::from_secs(env_parse(
                    "SUMMARY_CACHE_CLEANUP_INTERVAL_SECS",
                    cache::CLEANUP_INTERVAL_SECS,
                )?),
                enable_background_cleanup: true,
            },

            sse: SseConfig {
                channel_capacity: env_parse(
                    "SSE_CHANNEL_CAPACITY",
                    network_config::SSE_CHANNEL_CAPACITY,
                )?,
                keep_alive: Duration::from_secs(env_parse(
                    "SSE_KEEP_ALIVE_SECS",
                    network_config::SSE_KEEP_ALIVE_SECS,
                )?),
            },
        };

        if config.llm.api_key.is_none() {
            warn!("OPEN_ROUTER_KEY is not set; summarization requests will be rejected upstream");
        }

        Ok(config)
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Inbox Pulse Configuration:\n\
             - Listen: {}:{}\n\
             - Environment: {}\n\
             - LLM: {} via {} (key {})\n\
             - Zoho OAuth: {}\n\
             - Summary Cache: {} entries, {}s TTL\n\
             - SSE: {} slots per subscriber, {}s keep-alive\n\
             - CORS Origins: {}",
            self.host,
            self.http_port,
            self.environment,
            self.llm.model,
            self.llm.base_url,
            if self.llm.api_key.is_some() {
                "set"
            } else {
                "missing"
            },
            if self.zoho.client_id.is_some() && self.zoho.client_secret.is_some() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.cache.max_entries,
            self.cache.ttl.as_secs(),
            self.sse.channel_capacity,
            self.sse.keep_alive.as_secs(),
            self.cors.allowed_origins.join(", ")
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Non-empty environment variable
fn env_opt(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// Parse an environment variable, falling back to `default` when unset
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    env_opt(key).map_or(Ok(default), |value| {
        value
            .parse()
            .with_context(|| format!("Invalid {key} value: {value}"))
    })
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
