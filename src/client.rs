//! Marketplace API HTTP Client
//!
//! Thin JSON client over the deployment under test. Holds the bearer
//! credential for the session and attaches it to every request while set.

use crate::config::Config;
use crate::error::ApiError;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Parsed outcome of one API call
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// The backend marks every payload with a boolean `success` flag
    pub fn success_flag(&self) -> bool {
        self.body
            .get("success")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// 200 with success=true in the payload
    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK && self.success_flag()
    }

    /// Human-readable message the backend attaches to failure payloads
    pub fn message(&self) -> String {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string()
    }

    /// Extract and deserialize a top-level field
    pub fn field<T: DeserializeOwned>(&self, name: &'static str) -> Result<T, ApiError> {
        let value = self.body.get(name).ok_or(ApiError::MissingField(name))?;
        serde_json::from_value(value.clone()).map_err(|_| ApiError::MissingField(name))
    }

    /// Extract a top-level string field
    pub fn str_field(&self, name: &'static str) -> Result<String, ApiError> {
        self.field(name)
    }
}

/// HTTP client for the marketplace API
pub struct ApiClient {
    http: reqwest::Client,
    api_base: String,
    bearer: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            api_base: config.api_base(),
            bearer: None,
        })
    }

    /// Attach a bearer credential to all subsequent requests
    pub fn set_bearer(&mut self, token: &str) {
        self.bearer = Some(token.to_string());
    }

    /// Stop sending the bearer credential
    pub fn clear_bearer(&mut self) {
        self.bearer = None;
    }

    pub fn has_bearer(&self) -> bool {
        self.bearer.is_some()
    }

    /// GET an API path (relative to the `/api` prefix)
    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.api_base, path);
        let mut request = self.http.get(&url);
        if let Some(ref token) = self.bearer {
            request = request.bearer_auth(token);
        }
        self.execute("GET", &url, request).await
    }

    /// POST a JSON body to an API path
    pub async fn post(&self, path: &str, body: &Value) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.api_base, path);
        let mut request = self.http.post(&url).json(body);
        if let Some(ref token) = self.bearer {
            request = request.bearer_auth(token);
        }
        self.execute("POST", &url, request).await
    }

    async fn execute(
        &self,
        method: &str,
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<ApiResponse, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        log::debug!("{} {} -> {}", method, url, status);

        let body: Value = serde_json::from_str(&text)
            .map_err(|_| ApiError::MalformedBody(snippet(&text)))?;

        Ok(ApiResponse { status, body })
    }
}

/// Truncate a non-JSON body for error messages
fn snippet(text: &str) -> String {
    const MAX: usize = 200;
    if text.len() <= MAX {
        text.to_string()
    } else {
        let cut = text
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &text[..cut])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: Value) -> ApiResponse {
        ApiResponse {
            status: StatusCode::from_u16(status).unwrap(),
            body,
        }
    }

    #[test]
    fn success_flag_requires_explicit_true() {
        assert!(response(200, json!({"success": true})).success_flag());
        assert!(!response(200, json!({"success": false})).success_flag());
        assert!(!response(200, json!({})).success_flag());
        assert!(!response(200, json!({"success": "yes"})).success_flag());
    }

    #[test]
    fn is_ok_needs_both_status_and_flag() {
        assert!(response(200, json!({"success": true})).is_ok());
        assert!(!response(401, json!({"success": true})).is_ok());
        assert!(!response(200, json!({"success": false})).is_ok());
    }

    #[test]
    fn message_falls_back_when_absent() {
        assert_eq!(
            response(400, json!({"message": "bad email"})).message(),
            "bad email"
        );
        assert_eq!(response(400, json!({})).message(), "Unknown error");
    }

    #[test]
    fn field_extraction_reports_missing() {
        let resp = response(200, json!({"token": "abc123"}));
        assert_eq!(resp.str_field("token").unwrap(), "abc123");

        let err = resp.str_field("user").unwrap_err();
        assert!(err.to_string().contains("missing field `user`"));
    }

    #[test]
    fn snippet_truncates_long_bodies() {
        let long = "x".repeat(500);
        let s = snippet(&long);
        assert!(s.ends_with("..."));
        assert!(s.len() <= 203);
        assert_eq!(snippet("<html>"), "<html>");
    }
}
