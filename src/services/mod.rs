// ABOUTME: Domain service layer for the LLM-backed email assistant features
// ABOUTME: Summaries, reply drafts, task extraction, and calendar event extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Each service builds a prompt, sends it through an [`crate::llm::LlmProvider`]
//! and parses the model's free-text answer. Parsing is tolerant: lines that do
//! not match the requested format are skipped rather than rejected.

/// Reply drafting
pub mod draft;
/// Meeting and event extraction
pub mod events;
/// Summary, action items, and sentiment
pub mod summarize;
/// Checkbox task extraction
pub mod tasks;

pub use draft::draft_reply;
pub use events::{extract_events, CalendarEvent};
pub use summarize::{summarize, EmailSummary};
pub use tasks::{extract_tasks, ExtractedTask};
