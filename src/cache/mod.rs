// ABOUTME: Per-user summary cache types and configuration
// ABOUTME: Holds the most recent CachedResult for each user with TTL expiry and a capacity bound
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory result cache implementation
pub mod memory;

pub use memory::ResultCache;

use crate::constants::cache::{CLEANUP_INTERVAL_SECS, SUMMARY_MAX_ENTRIES, SUMMARY_TTL_SECS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Lifetime of an entry after its last write
    pub ttl: Duration,
    /// Maximum number of users held at once
    pub max_entries: usize,
    /// Interval between background purges
    pub cleanup_interval: Duration,
    /// Spawn a task that purges expired entries periodically
    pub enable_background_cleanup: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(SUMMARY_TTL_SECS),
            max_entries: SUMMARY_MAX_ENTRIES,
            cleanup_interval: Duration::from_secs(CLEANUP_INTERVAL_SECS),
            enable_background_cleanup: true,
        }
    }
}

/// One follow-up extracted from an email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// What needs doing
    pub text: String,
    /// Free-form due date as written by the model
    #[serde(default)]
    pub due: Option<String>,
}

/// Latest computed summary for one user
///
/// This is what `/summary/:user_id` returns and what every stream
/// subscriber receives inside a `summary` frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedResult {
    /// Recipient the summary belongs to
    pub user_id: String,
    /// Email subject, `"No Subject"` when the payload had none
    pub subject: String,
    /// Cleaned summary text, possibly empty
    pub summary: String,
    /// Sentiment label reported by the model
    pub sentiment: String,
    /// Follow-ups extracted alongside the summary
    #[serde(default)]
    pub action_items: Vec<ActionItem>,
    /// When the summary was computed
    pub created_at: DateTime<Utc>,
    /// `created_at` as fractional epoch seconds
    pub timestamp: f64,
}

impl CachedResult {
    /// Build a result stamped with the current time
    #[must_use]
    pub fn new(
        user_id: impl Into<String>,
        subject: impl Into<String>,
        summary: impl Into<String>,
        sentiment: impl Into<String>,
    ) -> Self {
        let created_at = Utc::now();
        Self {
            user_id: user_id.into(),
            subject: subject.into(),
            summary: summary.into(),
            sentiment: sentiment.into(),
            action_items: Vec::new(),
            timestamp: created_at.timestamp_millis() as f64 / 1000.0,
            created_at,
        }
    }

    /// Attach extracted action items
    #[must_use]
    pub fn with_action_items(mut self, action_items: Vec<ActionItem>) -> Self {
        self.action_items = action_items;
        self
    }
}
