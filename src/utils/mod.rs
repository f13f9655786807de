// ABOUTME: Utility modules shared across the server
// ABOUTME: Currently HTTP client construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// HTTP client construction
pub mod http_client;
