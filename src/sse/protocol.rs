// ABOUTME: Messages carried over the summary stream and their SSE text encoding
// ABOUTME: Defines the broadcast envelope, the connected/summary frames, and frame serialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cache::CachedResult;
use axum::response::sse::Event;
use serde::{Deserialize, Serialize};

/// A result in transit from the broadcaster to one subscriber
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastEnvelope {
    /// User the result belongs to
    pub user_id: String,
    /// The result itself
    pub data: CachedResult,
}

/// One frame sent to a streaming client
///
/// Serializes as `{"type":"connected","message":"connected"}` or
/// `{"type":"summary","payload":{"user_id":...,"data":{...}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    /// Handshake emitted once, right after the channel is registered
    Connected {
        /// Always `"connected"`
        message: String,
    },
    /// A newly published result
    Summary {
        /// Envelope delivered by the broadcaster
        payload: BroadcastEnvelope,
    },
}

impl StreamMessage {
    /// Handshake frame
    #[must_use]
    pub fn connected() -> Self {
        Self::Connected {
            message: "connected".to_owned(),
        }
    }

    /// Summary frame wrapping `payload`
    #[must_use]
    pub const fn summary(payload: BroadcastEnvelope) -> Self {
        Self::Summary { payload }
    }

    /// JSON text of the frame
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Axum SSE event carrying the frame's JSON as its data
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized
    pub fn to_event(&self) -> serde_json::Result<Event> {
        Ok(Event::default().data(self.to_json()?))
    }

    /// Complete SSE text block for the frame
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized
    pub fn to_frame(&self) -> serde_json::Result<String> {
        Ok(encode_frame(&self.to_json()?, None))
    }
}

/// Encode `data` as one SSE message
///
/// An optional `event:` line comes first, then one `data:` line per line of
/// `data`, then the blank line that terminates the message.
#[must_use]
pub fn encode_frame(data: &str, event: Option<&str>) -> String {
    let mut frame = String::with_capacity(data.len() + 16);
    if let Some(event) = event {
        frame.push_str("event: ");
        frame.push_str(event);
        frame.push('\n');
    }
    for line in data.lines() {
        frame.push_str("data: ");
        frame.push_str(line);
        frame.push('\n');
    }
    frame.push('\n');
    frame
}
