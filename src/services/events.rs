// ABOUTME: Calendar event extraction service
// ABOUTME: Pulls the first JSON array out of the model answer and validates start times
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::AppResult;
use crate::llm::{ChatRequest, LlmProvider};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const SYSTEM_PROMPT: &str = "You are an intelligent email event extractor. \
Extract meeting details such as title, date, start time, end time, and location \
from the email body. \
Return only valid JSON in this format: \
[{\"title\": \"string\", \"start\": \"ISO8601 datetime\", \"end\": \"ISO8601 datetime or null\", \"location\": \"string or null\"}]. \
If nothing is found, return []. \
Example input and output:\n\
Input: 'Let's meet on Monday, December 2nd at 3 PM at Zoho Chennai office.'\n\
Output: [{\"title\": \"Meeting\", \"start\": \"2025-12-02T15:00:00\", \"end\": null, \"location\": \"Zoho Chennai office\"}]";

static JSON_ARRAY: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)\[.*\]").ok());

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// One meeting or event mentioned in an email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    /// Event title
    #[serde(default)]
    pub title: Option<String>,
    /// ISO-8601 start, `None` when missing or unparseable
    #[serde(default)]
    pub start: Option<String>,
    /// ISO-8601 end
    #[serde(default)]
    pub end: Option<String>,
    /// Where it takes place
    #[serde(default)]
    pub location: Option<String>,
}

/// Extract events from an email body
///
/// # Errors
///
/// Returns an error if the LLM call fails; an unparseable answer yields an
/// empty list instead
pub async fn extract_events(llm: &dyn LlmProvider, body: &str) -> AppResult<Vec<CalendarEvent>> {
    let prompt = format!(
        "Extract meetings or events from this email:\n\n{body}\n\nReturn strictly formatted JSON list only."
    );
    let response = llm.complete(&ChatRequest::prompt(SYSTEM_PROMPT, prompt)).await?;
    Ok(parse_events(&response.content))
}

/// Parse the model answer into events
#[must_use]
pub fn parse_events(raw: &str) -> Vec<CalendarEvent> {
    let trimmed = raw.trim();
    let candidate = JSON_ARRAY
        .as_ref()
        .and_then(|re| re.find(trimmed))
        .map_or(trimmed, |m| m.as_str());

    let Ok(mut events) = serde_json::from_str::<Vec<CalendarEvent>>(candidate) else {
        tracing::debug!("Event extraction answer was not a JSON list");
        return Vec::new();
    };

    for event in &mut events {
        if event.start.as_deref().is_some_and(|start| !is_iso_datetime(start)) {
            event.start = None;
        }
    }
    events
}

/// Whether `value` parses as an ISO-8601 date or datetime
#[must_use]
pub fn is_iso_datetime(value: &str) -> bool {
    if DateTime::parse_from_rfc3339(value).is_ok() {
        return true;
    }
    let naive = value.trim_end_matches('Z');
    NAIVE_FORMATS
        .iter()
        .any(|format| NaiveDateTime::parse_from_str(naive, format).is_ok())
        || NaiveDate::parse_from_str(naive, "%Y-%m-%d").is_ok()
}
