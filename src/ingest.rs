// ABOUTME: Normalizes inbound mail webhook payloads into a subject, body, and recipient
// ABOUTME: Includes HTML-to-text cleanup for bodies and model output that arrive as markup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Webhook payload handling
//!
//! Mail providers are inconsistent about field names and frequently deliver
//! the body as (sometimes entity-escaped) HTML. [`WebhookPayload::classify`]
//! turns raw JSON into one of the outcomes the webhook route acts on.

use crate::constants::defaults::{ANONYMOUS_USER, NO_SUBJECT};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

const SUBJECT_KEYS: &[&str] = &["subject", "Subject", "summary", "subjectText"];
const BODY_KEYS: &[&str] = &["body", "content", "message", "html", "text"];

static SCRIPT_STYLE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)<(script|style)\b[^>]*>.*?</(script|style)\s*>").ok());
static BLOCK_BREAK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)<\s*(br\s*/?|/p|/div|/li|/tr|/h[1-6]|p|div|li|tr|h[1-6])\b[^>]*>").ok()
});
static TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").ok());

/// What the webhook should do with a request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookPayload {
    /// Body was not JSON: a liveness ping
    Ping,
    /// `{"status":"ok"}`: a validation handshake
    Validation,
    /// JSON without usable body text
    Empty,
    /// An email to summarize
    Email(InboundEmail),
}

/// Normalized inbound email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEmail {
    /// Recipient key, `"anonymous"` when absent
    pub user_id: String,
    /// Subject, `"No Subject"` when absent
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

impl WebhookPayload {
    /// Classify a raw request body
    #[must_use]
    pub fn classify(raw: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(raw) {
            Ok(value) => Self::from_json(&value),
            Err(_) => Self::Ping,
        }
    }

    /// Classify an already parsed JSON value
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        if value.get("status").and_then(Value::as_str) == Some("ok") {
            return Self::Validation;
        }

        let subject = first_text(value, SUBJECT_KEYS).unwrap_or(NO_SUBJECT).to_owned();
        let raw_body = first_text(value, BODY_KEYS).unwrap_or_default();

        let body = if looks_escaped_or_html(raw_body) {
            html_to_text(raw_body)
        } else {
            raw_body.to_owned()
        };

        if body.trim().is_empty() {
            return Self::Empty;
        }

        let user_id = match value.get("user_id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => ANONYMOUS_USER.to_owned(),
        };

        Self::Email(InboundEmail {
            user_id,
            subject,
            body,
        })
    }
}

/// First non-empty string among `keys`
fn first_text<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|key| value.get(*key).and_then(Value::as_str))
        .find(|text| !text.is_empty())
}

fn looks_escaped_or_html(text: &str) -> bool {
    text.contains('<') || text.contains("&lt;")
}

/// Unescape entities, then reduce markup to newline-separated text
#[must_use]
pub fn html_to_text(html: &str) -> String {
    let unescaped = html_escape::decode_html_entities(html);
    let mut text = unescaped.into_owned();

    if let Some(re) = SCRIPT_STYLE.as_ref() {
        text = re.replace_all(&text, "").into_owned();
    }
    if let Some(re) = BLOCK_BREAK.as_ref() {
        text = re.replace_all(&text, "\n").into_owned();
    }
    if let Some(re) = TAG.as_ref() {
        text = re.replace_all(&text, "").into_owned();
    }
    // Tags can hide entities that were double-escaped
    let text = html_escape::decode_html_entities(&text);

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Clean model output that may carry entities or markup
#[must_use]
pub fn clean_summary(raw: &str) -> String {
    let unescaped = html_escape::decode_html_entities(raw).trim().to_owned();
    if unescaped.contains('<') && unescaped.contains('>') {
        html_to_text(&unescaped)
    } else {
        unescaped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_non_json_is_ping() {
        assert_eq!(WebhookPayload::classify(b"not json"), WebhookPayload::Ping);
        assert_eq!(WebhookPayload::classify(b""), WebhookPayload::Ping);
    }

    #[test]
    fn test_status_ok_is_validation() {
        assert_eq!(
            WebhookPayload::from_json(&json!({"status": "ok"})),
            WebhookPayload::Validation
        );
    }

    #[test]
    fn test_field_fallbacks() {
        let payload = WebhookPayload::from_json(&json!({
            "subjectText": "Quarterly review",
            "content": "Please send the deck",
        }));
        assert_eq!(
            payload,
            WebhookPayload::Email(InboundEmail {
                user_id: "anonymous".to_owned(),
                subject: "Quarterly review".to_owned(),
                body: "Please send the deck".to_owned(),
            })
        );
    }

    #[test]
    fn test_empty_subject_falls_through() {
        let WebhookPayload::Email(email) = WebhookPayload::from_json(&json!({
            "subject": "",
            "body": "hello",
            "user_id": "alice",
        })) else {
            panic!("expected email");
        };
        assert_eq!(email.subject, "No Subject");
        assert_eq!(email.user_id, "alice");
    }

    #[test]
    fn test_user_id_normalization() {
        let user_id = |value: Value| {
            let WebhookPayload::Email(email) =
                WebhookPayload::from_json(&json!({"body": "hello", "user_id": value}))
            else {
                panic!("expected email");
            };
            email.user_id
        };
        assert_eq!(user_id(json!("")), "anonymous");
        assert_eq!(user_id(Value::Null), "anonymous");
        assert_eq!(user_id(json!(42)), "42");
        assert_eq!(user_id(json!(["alice"])), "anonymous");
    }

    #[test]
    fn test_escaped_html_body_is_cleaned() {
        let WebhookPayload::Email(email) = WebhookPayload::from_json(&json!({
            "html": "&lt;div&gt;Hi &amp; welcome&lt;/div&gt;&lt;p&gt;Line two&lt;/p&gt;",
        })) else {
            panic!("expected email");
        };
        assert_eq!(email.body, "Hi & welcome\nLine two");
    }

    #[test]
    fn test_markup_only_body_is_empty() {
        assert_eq!(
            WebhookPayload::from_json(&json!({"body": "<div>  </div><br/>"})),
            WebhookPayload::Empty
        );
        assert_eq!(
            WebhookPayload::from_json(&json!({"subject": "x"})),
            WebhookPayload::Empty
        );
    }

    #[test]
    fn test_clean_summary() {
        assert_eq!(clean_summary("  Tom &amp; Jerry  "), "Tom & Jerry");
        assert_eq!(clean_summary("<b>Bold</b> move"), "Bold move");
    }
}
