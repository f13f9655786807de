// ABOUTME: Integration tests for the subscriber registry
// ABOUTME: Verifies register/unregister bookkeeping and bounded channel capacity
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use inbox_pulse::cache::CachedResult;
use inbox_pulse::sse::{BroadcastEnvelope, SubscriberRegistry};

fn envelope(user_id: &str) -> BroadcastEnvelope {
    BroadcastEnvelope {
        user_id: user_id.to_owned(),
        data: CachedResult::new(user_id, "S", "sum", "Neutral"),
    }
}

#[tokio::test]
async fn test_register_adds_distinct_channels() {
    let registry = SubscriberRegistry::new(8);

    let first = registry.register();
    let second = registry.register();

    assert_ne!(first.id, second.id);
    assert_eq!(registry.len(), 2);
    assert!(registry.contains(first.id));
    assert!(registry.contains(second.id));
}

#[tokio::test]
async fn test_unregister_is_idempotent() {
    let registry = SubscriberRegistry::new(8);
    let subscription = registry.register();

    assert!(registry.unregister(subscription.id));
    assert!(!registry.unregister(subscription.id));
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_unregister_closes_receiver() {
    let registry = SubscriberRegistry::new(8);
    let mut subscription = registry.register();

    registry.unregister(subscription.id);

    assert!(subscription.receiver.recv().await.is_none());
}

#[tokio::test]
async fn test_snapshot_senders_reach_receivers() {
    let registry = SubscriberRegistry::new(8);
    let mut subscription = registry.register();

    let snapshot = registry.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].0, subscription.id);
    snapshot[0].1.try_send(envelope("alice")).unwrap();

    let received = subscription.receiver.recv().await.unwrap();
    assert_eq!(received.user_id, "alice");
}

#[tokio::test]
async fn test_channel_capacity_is_enforced() {
    let registry = SubscriberRegistry::new(2);
    let _subscription = registry.register();
    let (_, sender) = registry.snapshot().pop().unwrap();

    assert!(sender.try_send(envelope("a")).is_ok());
    assert!(sender.try_send(envelope("b")).is_ok());
    assert!(sender.try_send(envelope("c")).is_err());
}

#[test]
fn test_zero_capacity_is_clamped() {
    assert_eq!(SubscriberRegistry::new(0).channel_capacity(), 1);
    assert_eq!(SubscriberRegistry::default().channel_capacity(), 1000);
}
