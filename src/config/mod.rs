// ABOUTME: Configuration module for environment-driven server settings
// ABOUTME: Exposes ServerConfig and its per-concern sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment-based configuration
pub mod environment;

pub use environment::{CorsConfig, Environment, LlmConfig, ServerConfig, SseConfig, ZohoConfig};
