// ABOUTME: Zoho Mail inbox listing for the caller's primary account
// ABOUTME: Resolves the account id, then fetches the newest inbox message summaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ZohoMailClient, SERVICE};
use crate::constants::zoho::AUTH_SCHEME;
use crate::errors::{AppError, AppResult, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One inbox entry as returned to the browser
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxMessage {
    /// Subject line
    pub subject: Option<String>,
    /// Sender address
    pub from: Option<String>,
    /// Provider-generated preview of the body
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ZohoMessage {
    subject: Option<String>,
    #[serde(rename = "fromAddress")]
    from_address: Option<String>,
    #[serde(rename = "contentSummary")]
    content_summary: Option<String>,
}

impl From<ZohoMessage> for InboxMessage {
    fn from(message: ZohoMessage) -> Self {
        Self {
            subject: message.subject,
            from: message.from_address,
            content: message.content_summary,
        }
    }
}

impl ZohoMailClient {
    /// Newest `limit` messages in the inbox of the token owner's first account
    ///
    /// # Errors
    ///
    /// Returns an error if Zoho rejects the token, a request fails, or the
    /// account has no mailbox
    pub async fn inbox(&self, access_token: &str, limit: u32) -> AppResult<Vec<InboxMessage>> {
        let accounts = self.get_json(access_token, "accounts", &[]).await?;
        let account_id = first_account_id(&accounts)
            .ok_or_else(|| AppError::external_service(SERVICE, "No mail account found"))?;
        debug!(account_id = %account_id, "Resolved Zoho mail account");

        let limit = limit.to_string();
        let listing = self
            .get_json(
                access_token,
                &format!("accounts/{account_id}/messages/view"),
                &[("folder", "Inbox"), ("limit", limit.as_str())],
            )
            .await?;

        let messages: Vec<ZohoMessage> = listing
            .get("data")
            .cloned()
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                AppError::external_service(SERVICE, format!("Unexpected inbox format: {e}"))
            })?
            .unwrap_or_default();

        Ok(messages.into_iter().map(InboxMessage::from).collect())
    }

    async fn get_json(&self, access_token: &str, path: &str, query: &[(&str, &str)]) -> AppResult<Value> {
        let response = self
            .client
            .get(self.mail_url(path))
            .header("Authorization", format!("{AUTH_SCHEME} {access_token}"))
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("Request failed: {e}")))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AppError::new(
                ErrorCode::ExternalAuthFailed,
                "Zoho rejected the access token",
            ));
        }
        if !status.is_success() {
            return Err(AppError::external_service(
                SERVICE,
                format!("GET {path} returned {status}"),
            ));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::external_service(SERVICE, format!("Invalid JSON: {e}")))
    }
}

/// `data[0].accountId`, which Zoho sends as a string or a number
fn first_account_id(accounts: &Value) -> Option<String> {
    match accounts.get("data")?.get(0)?.get("accountId")? {
        Value::String(id) if !id.is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_account_id() {
        assert_eq!(
            first_account_id(&json!({"data": [{"accountId": "123"}]})).as_deref(),
            Some("123")
        );
        assert_eq!(
            first_account_id(&json!({"data": [{"accountId": 456}]})).as_deref(),
            Some("456")
        );
        assert!(first_account_id(&json!({"data": []})).is_none());
    }

    #[test]
    fn test_message_mapping() {
        let message: ZohoMessage = serde_json::from_value(json!({
            "subject": "Invoice",
            "fromAddress": "billing@example.com",
            "contentSummary": "Your invoice is ready",
            "messageId": "1"
        }))
        .unwrap();
        assert_eq!(
            InboxMessage::from(message),
            InboxMessage {
                subject: Some("Invoice".to_owned()),
                from: Some("billing@example.com".to_owned()),
                content: Some("Your invoice is ready".to_owned()),
            }
        );
    }
}
