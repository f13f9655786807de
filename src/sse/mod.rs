// ABOUTME: Server-Sent Events fan-out of freshly computed summaries to connected browsers
// ABOUTME: Subscriber registry, non-blocking broadcaster, wire protocol, and per-connection sessions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Real-time summary distribution
//!
//! A single writer ([`Broadcaster::publish`]) stores each new result in the
//! [`crate::cache::ResultCache`] and pushes it onto every channel held by the
//! [`SubscriberRegistry`]. Each connected client owns one [`StreamSession`]
//! that drains its channel and emits SSE frames. Delivery is best effort: a
//! channel that is full or closed is dropped from the registry and its client
//! is expected to reconnect.

/// Single-writer fan-out of new results
pub mod broadcaster;
/// Frame types and text encoding for the stream
pub mod protocol;
/// Live set of per-connection delivery channels
pub mod registry;
/// One streaming connection's lifecycle
pub mod session;

pub use broadcaster::{Broadcaster, PublishReport};
pub use protocol::{encode_frame, BroadcastEnvelope, StreamMessage};
pub use registry::{SubscriberId, SubscriberRegistry, Subscription};
pub use session::StreamSession;
