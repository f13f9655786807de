// ABOUTME: Shared test helpers and utilities for integration tests
// ABOUTME: Exports the axum request harness and a scripted LLM provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(dead_code)]

pub mod axum_test;
pub mod mock_llm;

use inbox_pulse::config::ServerConfig;
use inbox_pulse::server::ServerResources;
use mock_llm::MockLlm;
use std::sync::Arc;

/// Resources wired to a scripted LLM and no background cache cleanup
pub fn test_resources(llm: MockLlm) -> Arc<ServerResources> {
    let mut config = ServerConfig::default();
    config.cache.enable_background_cleanup = false;
    Arc::new(ServerResources::new(config, Arc::new(llm)))
}
