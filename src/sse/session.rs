// ABOUTME: One SSE connection: register, handshake, drain the channel, unregister on exit
// ABOUTME: A drop guard guarantees the channel leaves the registry however the stream ends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::protocol::StreamMessage;
use super::registry::{SubscriberId, SubscriberRegistry, Subscription};
use async_stream::stream;
use futures_util::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Removes the subscriber when the session is dropped
struct SessionGuard {
    id: SubscriberId,
    registry: Arc<SubscriberRegistry>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
        tracing::info!(subscriber_id = %self.id, "SSE session ended");
    }
}

/// Stream of frames for one connected client
///
/// The channel is registered when the session is opened, not on first poll,
/// so a published result is never missed between connect and handshake. The
/// first item is always the handshake; after that one `summary` frame follows
/// per envelope received, in channel order. Dropping the session (client
/// disconnect) or closing the channel ends it and unregisters the channel.
pub struct StreamSession {
    id: SubscriberId,
    inner: Pin<Box<dyn Stream<Item = StreamMessage> + Send>>,
}

impl StreamSession {
    /// Register a new channel with `registry` and start the session
    #[must_use]
    pub fn open(registry: Arc<SubscriberRegistry>) -> Self {
        let Subscription { id, mut receiver } = registry.register();
        let guard = SessionGuard { id, registry };

        let inner = stream! {
            let _guard = guard;
            yield StreamMessage::connected();

            while let Some(envelope) = receiver.recv().await {
                yield StreamMessage::summary(envelope);
            }
            tracing::debug!(subscriber_id = %id, "Subscriber channel closed");
        };

        Self {
            id,
            inner: Box::pin(inner),
        }
    }

    /// Registry id of this session's channel
    #[must_use]
    pub const fn id(&self) -> SubscriberId {
        self.id
    }
}

impl Stream for StreamSession {
    type Item = StreamMessage;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}
