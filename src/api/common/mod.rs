//
//  cms-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Content API
//!
//! This module provides the types shared by every resource operation: the
//! error taxonomy, the per-call request context carried into errors, and the
//! pagination envelope used by list endpoints.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ErrorInfo`] - Diagnostic payload carried by every [`ApiError`] variant
//! - [`ErrorKind`] - Fieldless discriminant for matching on error categories
//! - [`RequestContext`] - Snapshot of the request that produced an error
//! - [`ApiResponse`] - Envelope of single-resource responses
//! - Classification of failed exchanges (re-exported from [`classify`])
//! - Pagination types (re-exported from [`pagination`])
//!
//! # Example
//!
//! ```rust
//! use cms_client::api::common::{ApiError, ErrorKind};
//!
//! fn handle<T>(result: Result<T, ApiError>) {
//!     match result {
//!         Ok(_) => println!("Success!"),
//!         Err(e) if e.kind() == ErrorKind::Authentication => println!("Check your token"),
//!         Err(ApiError::NotFound { resource, .. }) => println!("Missing: {}", resource),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

use std::fmt;
use std::time::Duration;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

mod classify;
mod pagination;

pub use classify::*;
pub use pagination::*;

/// Resource label used when the caller has no more specific knowledge.
pub const DEFAULT_RESOURCE: &str = "Resource";

/// Envelope of single-resource responses.
///
/// The API wraps every single resource in a `data` field:
///
/// ```rust
/// use cms_client::api::common::ApiResponse;
///
/// let json = r#"{"data": {"slug": "blog"}}"#;
/// let response: ApiResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
/// assert_eq!(response.data["slug"], "blog");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// The response payload.
    pub data: T,
}

/// Snapshot of a single outgoing request.
///
/// Created once per call by the client and moved into any error that call
/// produces, so failures can be diagnosed without re-running the request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// HTTP method of the request.
    pub method: Method,

    /// Fully-qualified URL, without the query string.
    pub url: String,

    /// Query parameters in the order they were sent.
    pub query: Vec<(String, String)>,

    /// JSON body, if one was sent. Multipart uploads leave this empty.
    pub body: Option<Value>,

    /// Timeout applied to the whole exchange.
    pub timeout: Duration,
}

impl RequestContext {
    /// Returns the configured timeout in whole milliseconds.
    pub fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Diagnostic payload shared by every [`ApiError`] variant.
///
/// # Fields
///
/// | Field | Description |
/// |-------|-------------|
/// | `message` | Human-readable message, never empty |
/// | `status` | HTTP status code, when a response was received |
/// | `code` | Machine-readable error code from the response body |
/// | `details` | Structured details (field errors, violations) |
/// | `context` | The request that failed, absent for configuration errors |
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorInfo {
    pub message: String,
    pub status: Option<u16>,
    pub code: Option<String>,
    pub details: Option<Value>,
    pub context: Option<Box<RequestContext>>,
}

impl ErrorInfo {
    /// Creates an error payload carrying only a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
            code: None,
            details: None,
            context: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    pub fn with_details(mut self, details: Option<Value>) -> Self {
        self.details = details;
        self
    }

    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = Some(Box::new(context));
        self
    }
}

impl fmt::Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Unified error type for all content API operations.
///
/// Each variant corresponds to one failure category. The variant is decided
/// exactly once, where the failure is observed, and then propagated to the
/// caller unchanged. The only exception is [`ApiError::with_resource`], which
/// resource-aware lookups use to give a `NotFound` a precise label.
///
/// # Variants
///
/// | Variant | Description | HTTP Status |
/// |---------|-------------|-------------|
/// | `Authentication` | Missing, invalid or expired token | 401 |
/// | `Authorization` | Token lacks permission | 403 |
/// | `NotFound` | Resource does not exist | 404 |
/// | `Validation` | Request or configuration rejected | 422 |
/// | `RateLimited` | Too many requests | 429 |
/// | `Server` | Backend failure | 500, 502, 503, 504 |
/// | `Network` | Connection could not be established or broke | N/A |
/// | `Timeout` | Exchange exceeded the configured timeout | N/A |
/// | `Api` | Anything else, with whatever was recovered | any |
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request was not authenticated (401).
    #[error("Authentication failed: {0}")]
    Authentication(ErrorInfo),

    /// The authenticated token is not allowed to perform the operation (403).
    #[error("Permission denied: {0}")]
    Authorization(ErrorInfo),

    /// The requested resource does not exist (404).
    ///
    /// `resource` defaults to [`DEFAULT_RESOURCE`] and is replaced by
    /// lookups that know what they were looking for, e.g. `Collection 'blog'`.
    #[error("{resource} not found: {info}")]
    NotFound { resource: String, info: ErrorInfo },

    /// The request or the client configuration was rejected (422).
    ///
    /// Field-level problems are carried in `details`.
    #[error("Validation failed: {0}")]
    Validation(ErrorInfo),

    /// Too many requests (429).
    #[error("Rate limit exceeded: {0}")]
    RateLimited(ErrorInfo),

    /// The backend failed to handle the request (5xx).
    #[error("Server error: {0}")]
    Server(ErrorInfo),

    /// The exchange failed before a response was received.
    #[error("Network error: {0}")]
    Network(ErrorInfo),

    /// The exchange exceeded its timeout budget.
    #[error("Request timed out after {}ms: {info}", .timeout.as_millis())]
    Timeout { timeout: Duration, info: ErrorInfo },

    /// Any failure that does not fit another category.
    #[error("API error: {0}")]
    Api(ErrorInfo),
}

/// Fieldless discriminant of [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Authentication,
    Authorization,
    NotFound,
    Validation,
    RateLimited,
    Server,
    Network,
    Timeout,
    Api,
}

impl ApiError {
    /// Creates a `NotFound` error with the default resource label.
    pub fn not_found(info: ErrorInfo) -> Self {
        Self::NotFound {
            resource: DEFAULT_RESOURCE.to_string(),
            info,
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::Authorization(_) => ErrorKind::Authorization,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation(_) => ErrorKind::Validation,
            Self::RateLimited(_) => ErrorKind::RateLimited,
            Self::Server(_) => ErrorKind::Server,
            Self::Network(_) => ErrorKind::Network,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Api(_) => ErrorKind::Api,
        }
    }

    /// Returns the diagnostic payload of this error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            Self::Authentication(info)
            | Self::Authorization(info)
            | Self::Validation(info)
            | Self::RateLimited(info)
            | Self::Server(info)
            | Self::Network(info)
            | Self::Api(info) => info,
            Self::NotFound { info, .. } | Self::Timeout { info, .. } => info,
        }
    }

    pub fn message(&self) -> &str {
        &self.info().message
    }

    pub fn status(&self) -> Option<u16> {
        self.info().status
    }

    pub fn code(&self) -> Option<&str> {
        self.info().code.as_deref()
    }

    pub fn details(&self) -> Option<&Value> {
        self.info().details.as_ref()
    }

    pub fn context(&self) -> Option<&RequestContext> {
        self.info().context.as_deref()
    }

    /// Returns the resource label of a `NotFound` error.
    pub fn resource(&self) -> Option<&str> {
        match self {
            Self::NotFound { resource, .. } => Some(resource),
            _ => None,
        }
    }

    /// Re-labels a `NotFound` error with a specific resource name.
    ///
    /// The diagnostic payload, including the request context, is kept as is.
    /// Every other variant is returned unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cms_client::api::common::{ApiError, ErrorInfo};
    ///
    /// let err = ApiError::not_found(ErrorInfo::new("No such row").with_status(404));
    /// let err = err.with_resource("Collection 'blog'");
    /// assert_eq!(err.resource(), Some("Collection 'blog'"));
    /// assert_eq!(err.to_string(), "Collection 'blog' not found: No such row");
    /// ```
    pub fn with_resource(self, resource: impl Into<String>) -> Self {
        match self {
            Self::NotFound { info, .. } => Self::NotFound {
                resource: resource.into(),
                info,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn context() -> RequestContext {
        RequestContext {
            method: Method::GET,
            url: "https://cms.example.com/api/collections/blog".to_string(),
            query: Vec::new(),
            body: None,
            timeout: Duration::from_millis(30_000),
        }
    }

    #[test]
    fn test_with_resource_relabels_not_found_and_keeps_context() {
        let info = ErrorInfo::new("Not Found")
            .with_status(404)
            .with_code(Some("not_found".to_string()))
            .with_context(context());
        let err = ApiError::not_found(info.clone()).with_resource("Collection 'blog'");

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.resource(), Some("Collection 'blog'"));
        assert_eq!(err.info(), &info);
        assert_eq!(err.context(), Some(&context()));
    }

    #[test]
    fn test_with_resource_leaves_other_errors_alone() {
        let err = ApiError::Server(ErrorInfo::new("boom").with_status(500));
        let relabeled = err.clone().with_resource("Entry 'x'");
        assert_eq!(relabeled, err);
        assert_eq!(relabeled.resource(), None);
    }

    #[test]
    fn test_accessors_expose_info() {
        let err = ApiError::Validation(
            ErrorInfo::new("Invalid")
                .with_status(422)
                .with_details(Some(json!({"title": ["required"]}))),
        );
        assert_eq!(err.message(), "Invalid");
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.code(), None);
        assert_eq!(err.details(), Some(&json!({"title": ["required"]})));
        assert!(err.context().is_none());
    }

    #[test]
    fn test_display_formats() {
        let err = ApiError::Timeout {
            timeout: Duration::from_millis(1500),
            info: ErrorInfo::new("deadline elapsed"),
        };
        assert_eq!(err.to_string(), "Request timed out after 1500ms: deadline elapsed");

        let err = ApiError::not_found(ErrorInfo::new("gone"));
        assert_eq!(err.to_string(), "Resource not found: gone");
    }

    #[test]
    fn test_timeout_ms() {
        assert_eq!(context().timeout_ms(), 30_000);
    }
}
