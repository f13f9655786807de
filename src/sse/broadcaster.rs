// ABOUTME: Publishes a new result to the cache and to every live subscriber channel
// ABOUTME: Never blocks: full or closed channels are collected and reaped after the fan-out pass
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::protocol::BroadcastEnvelope;
use super::registry::SubscriberRegistry;
use crate::cache::{CachedResult, ResultCache};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc::error::TrySendError;

/// Outcome of one [`Broadcaster::publish`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    /// Channels that accepted the envelope
    pub delivered: usize,
    /// Channels removed because they were full or closed
    pub reaped: usize,
}

/// Single writer for new results
#[derive(Clone)]
pub struct Broadcaster {
    cache: Arc<ResultCache>,
    registry: Arc<SubscriberRegistry>,
}

impl Broadcaster {
    /// Create a broadcaster writing into `cache` and `registry`
    #[must_use]
    pub const fn new(cache: Arc<ResultCache>, registry: Arc<SubscriberRegistry>) -> Self {
        Self { cache, registry }
    }

    /// Store `result` for `user_id` and enqueue it on every live channel
    ///
    /// Synchronous and non-blocking. A channel that cannot take the envelope
    /// right now is treated as dead; it is unregistered once every other
    /// channel has been offered the envelope.
    pub fn publish(&self, user_id: &str, result: CachedResult) -> PublishReport {
        self.cache.put(user_id, result.clone());

        let envelope = BroadcastEnvelope {
            user_id: user_id.to_owned(),
            data: result,
        };

        let mut delivered = 0;
        let mut dead = Vec::new();
        for (id, sender) in self.registry.snapshot() {
            match sender.try_send(envelope.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::debug!(subscriber_id = %id, "Subscriber channel full, reaping");
                    dead.push(id);
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::debug!(subscriber_id = %id, "Subscriber channel closed, reaping");
                    dead.push(id);
                }
            }
        }

        for id in &dead {
            self.registry.unregister(*id);
        }

        let report = PublishReport {
            delivered,
            reaped: dead.len(),
        };
        tracing::debug!(
            user_id,
            delivered = report.delivered,
            reaped = report.reaped,
            "Published summary"
        );
        report
    }

    /// Cache the broadcaster writes to
    #[must_use]
    pub const fn cache(&self) -> &Arc<ResultCache> {
        &self.cache
    }

    /// Registry the broadcaster fans out to
    #[must_use]
    pub const fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }
}
