// ABOUTME: Email summarization service producing a summary, action items, and sentiment
// ABOUTME: Prompts the model for a sectioned answer and parses SUMMARY/ACTIONS/SENTIMENT blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::cache::ActionItem;
use crate::errors::AppResult;
use crate::llm::{ChatRequest, LlmProvider};
use regex::Regex;
use std::sync::LazyLock;

const SYSTEM_PROMPT: &str = "You are an AI email summarizer. \
Given a subject and body, return a short summary (<=100 words), \
a bullet list of action items with optional due dates, \
and the overall sentiment (positive, neutral, or negative).";

static DUE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\[due:(.*?)\]").ok());

/// Parsed summarizer output
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmailSummary {
    /// Summary text, lines joined with spaces
    pub summary: String,
    /// Bullet points from the ACTIONS section
    pub action_items: Vec<ActionItem>,
    /// Sentiment label, `None` when the model gave none
    pub sentiment: Option<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Summary,
    Actions,
}

/// Summarize one email
///
/// # Errors
///
/// Returns an error if the LLM call fails
pub async fn summarize(llm: &dyn LlmProvider, subject: &str, body: &str) -> AppResult<EmailSummary> {
    let prompt = format!(
        "Subject: {subject}\n\nBody:\n{body}\n\n\
         Format output as:\nSUMMARY:\n- ...\nACTIONS:\n- ...\nSENTIMENT: ..."
    );
    let response = llm.complete(&ChatRequest::prompt(SYSTEM_PROMPT, prompt)).await?;
    Ok(parse_summary(&response.content))
}

/// Parse a sectioned model answer
#[must_use]
pub fn parse_summary(raw: &str) -> EmailSummary {
    let mut summary_parts: Vec<&str> = Vec::new();
    let mut action_items = Vec::new();
    let mut sentiment = None;
    let mut section = Section::Preamble;

    for line in raw.lines().map(str::trim) {
        let upper = line.to_uppercase();
        if upper.starts_with("SUMMARY") {
            section = Section::Summary;
            if let Some(inline) = after_colon(line) {
                summary_parts.push(inline);
            }
            continue;
        }
        if upper.starts_with("ACTIONS") {
            section = Section::Actions;
            continue;
        }
        if upper.starts_with("SENTIMENT") {
            sentiment = after_colon(line).map(str::to_owned);
            continue;
        }

        match section {
            Section::Summary if !line.is_empty() => {
                summary_parts.push(line.trim_start_matches('-').trim_start());
            }
            Section::Actions if line.starts_with('-') => {
                if let Some(item) = parse_action(line) {
                    action_items.push(item);
                }
            }
            _ => {}
        }
    }

    EmailSummary {
        summary: summary_parts.join(" ").trim().to_owned(),
        action_items,
        sentiment,
    }
}

/// Non-empty text after the first colon
fn after_colon(line: &str) -> Option<&str> {
    line.split_once(':')
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty())
}

fn parse_action(line: &str) -> Option<ActionItem> {
    let due = DUE
        .as_ref()
        .and_then(|re| re.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_owned())
        .filter(|due| !due.is_empty());

    let text = line
        .trim_start_matches(|c: char| c == '-' || c == ' ')
        .split("[due:")
        .next()
        .unwrap_or_default()
        .trim();

    if text.is_empty() || text == "..." {
        return None;
    }
    Some(ActionItem {
        text: text.to_owned(),
        due,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_answer() {
        let raw = "SUMMARY:\n- Budget review moved to Friday.\nThe deck needs numbers.\n\
                   ACTIONS:\n- Send the deck [due: Thursday]\n- Book a room\n\
                   SENTIMENT: Positive";
        let parsed = parse_summary(raw);

        assert_eq!(
            parsed.summary,
            "Budget review moved to Friday. The deck needs numbers."
        );
        assert_eq!(
            parsed.action_items,
            vec![
                ActionItem {
                    text: "Send the deck".to_owned(),
                    due: Some("Thursday".to_owned()),
                },
                ActionItem {
                    text: "Book a room".to_owned(),
                    due: None,
                },
            ]
        );
        assert_eq!(parsed.sentiment.as_deref(), Some("Positive"));
    }

    #[test]
    fn test_inline_summary_and_missing_sentiment() {
        let parsed = parse_summary("Summary: All good here.\nActions:\n- ...");
        assert_eq!(parsed.summary, "All good here.");
        assert!(parsed.action_items.is_empty());
        assert!(parsed.sentiment.is_none());
    }

    #[test]
    fn test_summary_keeps_inline_text_and_drops_bullets() {
        let parsed = parse_summary("SUMMARY: Lunch moved.\n- Bring slides.\n-- Room 4B.\nACTIONS:");
        assert_eq!(parsed.summary, "Lunch moved. Bring slides. Room 4B.");
    }

    #[test]
    fn test_unstructured_answer_yields_empty_summary() {
        let parsed = parse_summary("I cannot help with that.");
        assert_eq!(parsed, EmailSummary::default());
    }
}
