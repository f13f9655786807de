// ABOUTME: Task extraction service parsing checkbox-formatted model output
// ABOUTME: Each "- [ ] text [due: X]" line becomes one ExtractedTask
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;
use crate::llm::{ChatRequest, LlmProvider};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const SYSTEM_PROMPT: &str = "You are a task extraction assistant. \
Given an email body, extract actionable tasks and due dates if mentioned. \
Respond in this format:\n- [ ] Task description [due: <date?>]";

const CHECKBOX: &str = "- [ ]";

static DUE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\[due:\s*(.*?)\]").ok());

/// One actionable task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedTask {
    /// Task description
    pub task: String,
    /// Due date as written by the model
    pub due: Option<String>,
}

/// Extract tasks from an email body
///
/// # Errors
///
/// Returns an error if the LLM call fails
pub async fn extract_tasks(llm: &dyn LlmProvider, body: &str) -> AppResult<Vec<ExtractedTask>> {
    let prompt = format!("Email Body:\n{body}\n\nReturn tasks in checkbox format:");
    let response = llm.complete(&ChatRequest::prompt(SYSTEM_PROMPT, prompt)).await?;
    Ok(parse_tasks(&response.content))
}

/// Parse checkbox lines, ignoring everything else
#[must_use]
pub fn parse_tasks(raw: &str) -> Vec<ExtractedTask> {
    raw.lines()
        .map(str::trim)
        .filter(|line| line.starts_with(CHECKBOX))
        .map(|line| {
            let due = DUE
                .as_ref()
                .and_then(|re| re.captures(line))
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_owned())
                .filter(|due| !due.is_empty());
            let task = line
                .replacen(CHECKBOX, "", 1)
                .split("[due:")
                .next()
                .unwrap_or_default()
                .trim()
                .to_owned();
            ExtractedTask { task, due }
        })
        .collect()
}
