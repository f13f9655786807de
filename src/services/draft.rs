// ABOUTME: Reply drafting service
// ABOUTME: Asks the model for a short reply in the requested tone
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;
use crate::llm::{ChatRequest, LlmProvider};

const SYSTEM_PROMPT: &str = "You are an email drafting assistant. \
Compose a short, polite, and professional reply to the given email. \
Keep it under 150 words.";

/// Completion cap for a reply of at most 150 words
pub const DRAFT_MAX_TOKENS: u32 = 400;

/// Draft a reply to `original` in `tone`
///
/// # Errors
///
/// Returns an error if the LLM call fails
pub async fn draft_reply(llm: &dyn LlmProvider, original: &str, tone: &str) -> AppResult<String> {
    let prompt = format!("Tone: {tone}\n\nEmail to reply:\n{original}\n\nReply:\n");
    let request = ChatRequest::prompt(SYSTEM_PROMPT, prompt).with_max_tokens(DRAFT_MAX_TOKENS);
    let response = llm.complete(&request).await?;
    Ok(response.content.trim().to_owned())
}
