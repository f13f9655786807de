// ABOUTME: Registry of live SSE subscriber channels keyed by connection id
// ABOUTME: Supports concurrent register/unregister and point-in-time snapshots for fan-out
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::protocol::BroadcastEnvelope;
use crate::constants::network_config::SSE_CHANNEL_CAPACITY;
use dashmap::DashMap;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Identifier of one streaming connection
pub type SubscriberId = Uuid;

/// Sending half of a subscriber channel
pub type SubscriberSender = mpsc::Sender<BroadcastEnvelope>;

/// Handle returned to a newly connected client
#[derive(Debug)]
pub struct Subscription {
    /// Registry key, used to unregister
    pub id: SubscriberId,
    /// Receiving half of the channel the broadcaster writes to
    pub receiver: mpsc::Receiver<BroadcastEnvelope>,
}

/// Live set of subscriber channels
///
/// The registry exclusively owns the sending halves. Dropping an entry closes
/// the channel, which ends the matching session once its buffer is drained.
#[derive(Debug)]
pub struct SubscriberRegistry {
    channels: DashMap<SubscriberId, SubscriberSender>,
    channel_capacity: usize,
}

impl SubscriberRegistry {
    /// Create a registry whose channels buffer up to `channel_capacity` payloads
    #[must_use]
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            channels: DashMap::new(),
            channel_capacity: channel_capacity.max(1),
        }
    }

    /// Add a fresh, empty channel to the live set
    #[must_use]
    pub fn register(&self) -> Subscription {
        let (sender, receiver) = mpsc::channel(self.channel_capacity);
        let id = Uuid::new_v4();
        self.channels.insert(id, sender);

        tracing::info!(
            subscriber_id = %id,
            subscribers = self.channels.len(),
            "Registered SSE subscriber"
        );
        Subscription { id, receiver }
    }

    /// Remove a channel; returns whether it was still registered
    pub fn unregister(&self, id: SubscriberId) -> bool {
        let removed = self.channels.remove(&id).is_some();
        if removed {
            tracing::info!(
                subscriber_id = %id,
                subscribers = self.channels.len(),
                "Unregistered SSE subscriber"
            );
        }
        removed
    }

    /// Point-in-time copy of the live channels
    #[must_use]
    pub fn snapshot(&self) -> Vec<(SubscriberId, SubscriberSender)> {
        self.channels
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    /// Whether `id` is currently registered
    #[must_use]
    pub fn contains(&self, id: SubscriberId) -> bool {
        self.channels.contains_key(&id)
    }

    /// Number of live channels
    #[must_use]
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    /// Whether no client is connected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Per-channel buffer size
    #[must_use]
    pub const fn channel_capacity(&self) -> usize {
        self.channel_capacity
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new(SSE_CHANNEL_CAPACITY)
    }
}
