//
//  cms-client
//  config/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Client Configuration
//!
//! [`ClientConfig`] holds everything the client needs to build a request:
//! the API base path, the project identifier sent with every request, an
//! optional bearer token, and the per-request timeout.
//!
//! The configuration is immutable once built. Builder methods consume and
//! return `self`, and [`ClientConfig::validate`] reports every violated
//! constraint at once.
//!
//! ```rust
//! use std::time::Duration;
//! use cms_client::config::ClientConfig;
//!
//! let config = ClientConfig::new("https://cms.example.com/api/", "p-123")
//!     .with_token("cms_live_3f9a")
//!     .with_timeout(Duration::from_secs(10));
//!
//! assert_eq!(config.base_path(), "https://cms.example.com/api");
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use reqwest::header::HeaderValue;
use serde_json::{json, Value};
use url::Url;

use crate::api::common::{ApiError, ErrorInfo};
use crate::auth::ApiToken;

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Name of the header carrying the project identifier.
pub const PROJECT_HEADER: &str = "project-id";

/// Immutable connection settings for [`CmsClient`](crate::api::CmsClient).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    base_path: String,
    project_id: String,
    token: Option<ApiToken>,
    timeout: Duration,
}

impl ClientConfig {
    /// Creates a configuration with the default timeout and no token.
    ///
    /// Trailing slashes are stripped from `base_path` so that paths starting
    /// with `/` can be appended directly.
    pub fn new(base_path: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into().trim().trim_end_matches('/').to_string(),
            project_id: project_id.into().trim().to_string(),
            token: None,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }

    /// Sets the bearer token. An empty token means no token.
    pub fn with_token(self, token: impl Into<ApiToken>) -> Self {
        let token = token.into();
        Self {
            token: (!token.expose().is_empty()).then_some(token),
            ..self
        }
    }

    /// Sets or clears the bearer token.
    pub fn with_optional_token(self, token: Option<String>) -> Self {
        match token {
            Some(token) => self.with_token(token),
            None => Self {
                token: None,
                ..self
            },
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timeout_ms(self, timeout_ms: u64) -> Self {
        self.with_timeout(Duration::from_millis(timeout_ms))
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn token(&self) -> Option<&ApiToken> {
        self.token.as_ref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Builds the absolute URL for an API path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }

    /// Checks every constraint and reports all violations together.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] with code `invalid_config`. Its
    /// `details` is an array of `{"field": ..., "message": ...}` objects, one
    /// per violation.
    ///
    /// ```rust
    /// use cms_client::config::ClientConfig;
    ///
    /// let err = ClientConfig::new("", "").validate().unwrap_err();
    /// let details = err.details().unwrap().as_array().unwrap();
    /// assert_eq!(details.len(), 2);
    /// ```
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut violations: Vec<(&str, &str)> = Vec::new();

        if self.base_path.is_empty() {
            violations.push(("base_path", "base_path is required"));
        } else if !is_http_url(&self.base_path) {
            violations.push((
                "base_path",
                "base_path must be an absolute http(s) URL with a host",
            ));
        }
        if self.project_id.is_empty() {
            violations.push(("project_id", "project_id is required"));
        } else if HeaderValue::from_str(&self.project_id).is_err() {
            violations.push((
                "project_id",
                "project_id must not contain control characters",
            ));
        }
        if self.timeout.is_zero() {
            violations.push(("timeout", "timeout must be greater than zero"));
        }
        if self.token.as_ref().is_some_and(|t| !t.is_valid()) {
            violations.push(("token", "token must not contain whitespace"));
        }

        if violations.is_empty() {
            return Ok(());
        }

        let message = format!(
            "Invalid client configuration: {}",
            violations
                .iter()
                .map(|(_, message)| *message)
                .collect::<Vec<_>>()
                .join("; ")
        );
        let details: Vec<Value> = violations
            .iter()
            .map(|(field, message)| json!({ "field": field, "message": message }))
            .collect();

        Err(ApiError::Validation(
            ErrorInfo::new(message)
                .with_code(Some("invalid_config".to_string()))
                .with_details(Some(Value::Array(details))),
        ))
    }
}

fn is_http_url(value: &str) -> bool {
    Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}
