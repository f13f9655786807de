// ABOUTME: Integration tests for a single SSE session lifecycle
// ABOUTME: Checks the handshake frame, summary delivery, and unregistering on drop
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use futures_util::StreamExt;
use inbox_pulse::cache::{CacheConfig, CachedResult, ResultCache};
use inbox_pulse::sse::{encode_frame, Broadcaster, StreamMessage, StreamSession, SubscriberRegistry};
use std::sync::Arc;

fn registry() -> Arc<SubscriberRegistry> {
    Arc::new(SubscriberRegistry::new(8))
}

#[tokio::test]
async fn test_session_registers_before_first_poll() {
    let registry = registry();

    let session = StreamSession::open(Arc::clone(&registry));

    assert!(registry.contains(session.id()));
    assert_eq!(registry.len(), 1);
}

#[tokio::test]
async fn test_first_frame_is_connected_handshake() {
    let mut session = StreamSession::open(registry());

    let first = session.next().await.unwrap();

    assert_eq!(first, StreamMessage::connected());
    assert_eq!(
        first.to_frame().unwrap(),
        "data: {\"type\":\"connected\",\"message\":\"connected\"}\n\n"
    );
}

#[tokio::test]
async fn test_published_result_follows_handshake() {
    let registry = registry();
    let cache = Arc::new(ResultCache::new(&CacheConfig {
        enable_background_cleanup: false,
        ..CacheConfig::default()
    }));
    let broadcaster = Broadcaster::new(cache, Arc::clone(&registry));
    let mut session = StreamSession::open(Arc::clone(&registry));

    broadcaster.publish(
        "alice",
        CachedResult::new("alice", "Hello", "S", "Neutral"),
    );

    assert_eq!(session.next().await.unwrap(), StreamMessage::connected());
    let StreamMessage::Summary { payload } = session.next().await.unwrap() else {
        panic!("expected summary frame");
    };
    assert_eq!(payload.user_id, "alice");
    assert_eq!(payload.data.summary, "S");

    let json: serde_json::Value =
        serde_json::from_str(&StreamMessage::summary(payload).to_json().unwrap()).unwrap();
    assert_eq!(json["type"], "summary");
    assert_eq!(json["payload"]["data"]["subject"], "Hello");
}

#[tokio::test]
async fn test_drop_unregisters_even_if_never_polled() {
    let registry = registry();
    let session = StreamSession::open(Arc::clone(&registry));
    let id = session.id();

    drop(session);

    assert!(!registry.contains(id));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_connect_disconnect_cycles_leave_registry_empty() {
    let registry = registry();

    for _ in 0..50 {
        let mut session = StreamSession::open(Arc::clone(&registry));
        session.next().await.unwrap();
    }

    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_session_ends_when_channel_reaped() {
    let registry = registry();
    let mut session = StreamSession::open(Arc::clone(&registry));
    session.next().await.unwrap();

    registry.unregister(session.id());

    assert!(session.next().await.is_none());
}

#[test]
fn test_encode_frame_with_event_and_multiline_data() {
    assert_eq!(
        encode_frame("line one\nline two", Some("summary")),
        "event: summary\ndata: line one\ndata: line two\n\n"
    );
}
