// ABOUTME: Zoho OAuth 2.0 authorization URL construction and authorization code exchange
// ABOUTME: Requests offline access to messages, accounts, and folders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{ZohoMailClient, SERVICE};
use crate::constants::zoho::SCOPES;
use crate::errors::{AppError, AppResult, ErrorCode};
use serde_json::Value;
use tracing::{error, info};
use url::Url;

impl ZohoMailClient {
    /// URL the user visits to grant access
    ///
    /// # Errors
    ///
    /// Returns an error if `ZOHO_CLIENT_ID` is unset or the accounts base is not a URL
    pub fn authorization_url(&self) -> AppResult<String> {
        let client_id = self.config.client_id.as_deref().ok_or_else(|| {
            AppError::new(ErrorCode::ConfigMissing, "ZOHO_CLIENT_ID is not configured")
        })?;

        let mut url = Url::parse(&self.accounts_url("auth"))
            .map_err(|e| AppError::config(format!("Invalid Zoho accounts URL: {e}")))?;

        url.query_pairs_mut()
            .append_pair("scope", SCOPES)
            .append_pair("client_id", client_id)
            .append_pair("response_type", "code")
            .append_pair("access_type", "offline")
            .append_pair("redirect_uri", &self.config.redirect_uri);

        Ok(url.to_string())
    }

    /// Exchange an authorization code for tokens
    ///
    /// Returns the token endpoint's JSON unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if credentials are missing, the request fails, or the
    /// response is not JSON
    pub async fn exchange_code(&self, code: &str) -> AppResult<Value> {
        let (Some(client_id), Some(client_secret)) = (
            self.config.client_id.as_deref(),
            self.config.client_secret.as_deref(),
        ) else {
            return Err(AppError::new(
                ErrorCode::ConfigMissing,
                "ZOHO_CLIENT_ID and ZOHO_CLIENT_SECRET must be configured",
            ));
        };

        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("code", code),
        ];

        let response = self
            .client
            .post(self.accounts_url("token"))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                error!("Zoho token exchange request failed: {}", e);
                AppError::external_service(SERVICE, format!("Token exchange failed: {e}"))
            })?;

        let status = response.status();
        let tokens: Value = response.json().await.map_err(|e| {
            AppError::external_service(SERVICE, format!("Invalid token response: {e}"))
        })?;

        if !status.is_success() {
            return Err(AppError::external_service(
                SERVICE,
                format!("Token endpoint returned {status}"),
            )
            .with_details(tokens));
        }

        info!("Exchanged Zoho authorization code for tokens");
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ZohoConfig;
    use crate::errors::ErrorCode;
    use crate::mail::ZohoMailClient;

    #[test]
    fn test_authorization_url_parameters() {
        let client = ZohoMailClient::new(ZohoConfig {
            client_id: Some("1000.ABC".to_owned()),
            redirect_uri: "https://example.com/oauth/callback".to_owned(),
            ..ZohoConfig::default()
        });
        let url = url::Url::parse(&client.authorization_url().unwrap()).unwrap();
        let pairs: std::collections::HashMap<_, _> = url.query_pairs().into_owned().collect();

        assert_eq!(url.path(), "/oauth/v2/auth");
        assert_eq!(pairs["client_id"], "1000.ABC");
        assert_eq!(pairs["response_type"], "code");
        assert_eq!(pairs["access_type"], "offline");
        assert_eq!(pairs["redirect_uri"], "https://example.com/oauth/callback");
        assert_eq!(
            pairs["scope"],
            "ZohoMail.messages.ALL,ZohoMail.accounts.READ,ZohoMail.folders.READ"
        );
    }

    #[test]
    fn test_authorization_url_requires_client_id() {
        let client = ZohoMailClient::new(ZohoConfig::default());
        let err = client.authorization_url().unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigMissing);
    }
}
