// ABOUTME: Integration tests for the per-user result cache
// ABOUTME: Covers TTL expiry under a paused clock, overwrite semantics, and bounded eviction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use inbox_pulse::cache::{ActionItem, CacheConfig, CachedResult, ResultCache};
use std::time::Duration;

fn cache_with(ttl_secs: u64, max_entries: usize) -> ResultCache {
    ResultCache::new(&CacheConfig {
        ttl: Duration::from_secs(ttl_secs),
        max_entries,
        cleanup_interval: Duration::from_secs(60),
        enable_background_cleanup: false,
    })
}

fn result(user_id: &str, summary: &str) -> CachedResult {
    CachedResult::new(user_id, "Subject", summary, "Neutral")
}

// ============================================================================
// Basic lookups
// ============================================================================

#[tokio::test]
async fn test_get_returns_stored_result() {
    let cache = cache_with(600, 100);
    let stored = result("alice", "Lunch moved to noon").with_action_items(vec![ActionItem {
        text: "Confirm".to_owned(),
        due: Some("Friday".to_owned()),
    }]);

    cache.put("alice", stored.clone());

    assert_eq!(cache.get("alice"), Some(stored));
    assert!(cache.get("bob").is_none());
}

#[tokio::test]
async fn test_last_write_wins() {
    let cache = cache_with(600, 100);

    cache.put("alice", result("alice", "first"));
    cache.put("alice", result("alice", "second"));

    assert_eq!(cache.get("alice").unwrap().summary, "second");
    assert_eq!(cache.len(), 1);
}

// ============================================================================
// Expiry
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_entry_expires_after_ttl() {
    let cache = cache_with(600, 100);
    cache.put("alice", result("alice", "S"));

    tokio::time::advance(Duration::from_secs(599)).await;
    assert!(cache.get("alice").is_some());

    tokio::time::advance(Duration::from_secs(2)).await;
    assert!(cache.get("alice").is_none());
    assert!(cache.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_overwrite_resets_expiry() {
    let cache = cache_with(10, 100);
    cache.put("alice", result("alice", "old"));

    tokio::time::advance(Duration::from_secs(8)).await;
    cache.put("alice", result("alice", "new"));

    tokio::time::advance(Duration::from_secs(8)).await;
    assert_eq!(cache.get("alice").unwrap().summary, "new");
}

#[tokio::test(start_paused = true)]
async fn test_purge_expired_reports_removed_count() {
    let cache = cache_with(5, 100);
    cache.put("alice", result("alice", "a"));
    cache.put("bob", result("bob", "b"));

    tokio::time::advance(Duration::from_secs(3)).await;
    cache.put("carol", result("carol", "c"));

    tokio::time::advance(Duration::from_secs(3)).await;
    assert_eq!(cache.purge_expired(), 2);
    assert_eq!(cache.len(), 1);
}

// ============================================================================
// Capacity
// ============================================================================

#[tokio::test]
async fn test_capacity_evicts_least_recently_used() {
    let cache = cache_with(600, 2);

    cache.put("alice", result("alice", "a"));
    cache.put("bob", result("bob", "b"));
    // Touch alice so bob becomes the eviction candidate
    assert!(cache.get("alice").is_some());
    cache.put("carol", result("carol", "c"));

    assert_eq!(cache.len(), 2);
    assert!(cache.get("alice").is_some());
    assert!(cache.get("bob").is_none());
    assert!(cache.get("carol").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_expired_entries_make_room_before_lru_eviction() {
    let cache = cache_with(10, 2);

    cache.put("alice", result("alice", "a"));
    tokio::time::advance(Duration::from_secs(6)).await;
    cache.put("bob", result("bob", "b"));
    tokio::time::advance(Duration::from_secs(3)).await;
    // alice becomes most recently used, bob least recently used
    assert!(cache.get("alice").is_some());

    tokio::time::advance(Duration::from_secs(2)).await;
    cache.put("carol", result("carol", "c"));

    assert!(cache.get("bob").is_some());
    assert!(cache.get("carol").is_some());
    assert!(cache.get("alice").is_none());
}

#[tokio::test]
async fn test_overwrite_at_capacity_does_not_evict() {
    let cache = cache_with(600, 2);
    cache.put("alice", result("alice", "a"));
    cache.put("bob", result("bob", "b"));

    cache.put("alice", result("alice", "a2"));

    assert!(cache.get("bob").is_some());
    assert_eq!(cache.get("alice").unwrap().summary, "a2");
}

#[test]
fn test_zero_capacity_falls_back_to_default() {
    let cache = cache_with(600, 0);
    assert_eq!(cache.capacity(), 100);
    assert_eq!(cache.ttl(), Duration::from_secs(600));
}
