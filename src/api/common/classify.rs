//
//  cms-client
//  api/common/classify.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Classification of failed HTTP exchanges into [`ApiError`] variants.
//!
//! There are two entry points:
//!
//! - [`classify_response`] for exchanges that produced a non-success response
//! - [`classify_transport`] for exchanges that failed before any response
//!
//! Classification never fails. A body that cannot be parsed degrades to a
//! best-effort message instead of producing a secondary error.
//!
//! The content API reports errors in one of these shapes:
//!
//! ```json
//! {"message": "Entry not found", "code": "not_found"}
//! {"error": "Unauthenticated"}
//! {"error": {"message": "Invalid data", "code": 1042, "details": {...}}}
//! {"message": "The given data was invalid.", "errors": {"title": ["required"]}}
//! ```

use std::error::Error as StdError;

use reqwest::StatusCode;
use serde_json::Value;

use super::{ApiError, ErrorInfo, RequestContext};

/// Message used when neither the body nor the transport offers one.
pub const FALLBACK_MESSAGE: &str = "An unexpected error occurred";

/// Transport-level failure reduced to what classification needs.
///
/// Built from a [`reqwest::Error`] raised before a response was complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    /// The exchange exceeded its timeout budget.
    TimedOut(String),

    /// The host could not be resolved or refused the connection.
    Unreachable(String),

    /// The request could not be built (bad URL or header value).
    InvalidRequest(String),

    /// Any other transport problem.
    Other(String),
}

impl From<&reqwest::Error> for TransportFailure {
    fn from(err: &reqwest::Error) -> Self {
        let description = describe(err);
        if err.is_timeout() {
            Self::TimedOut(description)
        } else if err.is_connect() {
            Self::Unreachable(description)
        } else if err.is_builder() {
            Self::InvalidRequest(description)
        } else {
            Self::Other(description)
        }
    }
}

/// Error fields recovered from a response body.
#[derive(Debug, Default, PartialEq)]
struct ErrorBody {
    message: Option<String>,
    code: Option<String>,
    details: Option<Value>,
}

impl ErrorBody {
    fn parse(body: &str) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(map)) => {
                let nested = map.get("error").and_then(Value::as_object);

                let message = string_field(map.get("message"))
                    .or_else(|| string_field(map.get("error")))
                    .or_else(|| nested.and_then(|e| string_field(e.get("message"))));

                let code = code_field(map.get("code"))
                    .or_else(|| nested.and_then(|e| code_field(e.get("code"))));

                let details = non_null(map.get("details"))
                    .or_else(|| non_null(map.get("errors")))
                    .or_else(|| nested.and_then(|e| non_null(e.get("details"))));

                Self {
                    message,
                    code,
                    details,
                }
            }
            Ok(Value::String(message)) if !message.trim().is_empty() => Self {
                message: Some(message),
                ..Self::default()
            },
            Ok(_) => Self::default(),
            // Not structured data: the raw text is the message
            Err(_) => Self {
                message: Some(trimmed.to_string()),
                ..Self::default()
            },
        }
    }
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn code_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn non_null(value: Option<&Value>) -> Option<Value> {
    value.filter(|v| !v.is_null()).cloned()
}

/// Maps a non-success response to a typed error.
///
/// The message is taken from `message`, then `error`, then the raw body when
/// it is not JSON, then the status reason phrase, then [`FALLBACK_MESSAGE`].
/// `NotFound` errors carry the default `"Resource"` label; callers that know
/// what they were looking up re-label them with [`ApiError::with_resource`].
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use cms_client::api::common::{classify_response, ErrorKind, RequestContext};
/// use reqwest::{Method, StatusCode};
///
/// let context = RequestContext {
///     method: Method::GET,
///     url: "https://cms.example.com/api/files/7".to_string(),
///     query: Vec::new(),
///     body: None,
///     timeout: Duration::from_secs(30),
/// };
///
/// let err = classify_response(StatusCode::FORBIDDEN, r#"{"error":"Forbidden"}"#, context);
/// assert_eq!(err.kind(), ErrorKind::Authorization);
/// assert_eq!(err.message(), "Forbidden");
/// ```
pub fn classify_response(status: StatusCode, body: &str, context: RequestContext) -> ApiError {
    let parsed = ErrorBody::parse(body);

    let message = parsed
        .message
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string());

    let info = ErrorInfo::new(message)
        .with_status(status.as_u16())
        .with_code(parsed.code)
        .with_details(parsed.details)
        .with_context(context);

    let err = match status.as_u16() {
        401 => ApiError::Authentication(info),
        403 => ApiError::Authorization(info),
        404 => ApiError::not_found(info),
        422 => ApiError::Validation(info),
        429 => ApiError::RateLimited(info),
        500 | 502 | 503 | 504 => ApiError::Server(info),
        _ => ApiError::Api(info),
    };

    tracing::debug!(kind = ?err.kind(), status = status.as_u16(), "classified error response");
    err
}

/// Maps a failure that happened before a response was received.
///
/// Timeouts carry the timeout configured for the request. Resolution and
/// connection failures get a connectivity-oriented message naming the host.
/// A request that could not be built is an [`ApiError::Api`] with code
/// `invalid_request`.
pub fn classify_transport(failure: TransportFailure, context: RequestContext) -> ApiError {
    let err = match failure {
        TransportFailure::TimedOut(_) => {
            let timeout = context.timeout;
            let info = ErrorInfo::new(format!(
                "No response within the configured timeout of {}ms",
                context.timeout_ms()
            ))
            .with_code(Some("timeout".to_string()))
            .with_context(context);
            ApiError::Timeout { timeout, info }
        }
        TransportFailure::Unreachable(cause) => {
            let host = host_of(&context.url);
            ApiError::Network(
                ErrorInfo::new(format!(
                    "Unable to connect to {}. Check the base path and your network connection",
                    host
                ))
                .with_code(Some("connection_failed".to_string()))
                .with_details(Some(Value::String(cause)))
                .with_context(context),
            )
        }
        TransportFailure::InvalidRequest(cause) => ApiError::Api(
            ErrorInfo::new(format!("Invalid request: {}", cause))
                .with_code(Some("invalid_request".to_string()))
                .with_context(context),
        ),
        TransportFailure::Other(cause) => {
            let message = if cause.trim().is_empty() {
                FALLBACK_MESSAGE.to_string()
            } else {
                cause
            };
            ApiError::Network(ErrorInfo::new(message).with_context(context))
        }
    };

    tracing::debug!(kind = ?err.kind(), "classified transport failure");
    err
}

fn host_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.host_str().map(|host| match u.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            })
        })
        .unwrap_or_else(|| url.to_string())
}

/// Flattens an error and its sources into one line.
fn describe(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::{ErrorKind, DEFAULT_RESOURCE};
    use reqwest::Method;
    use serde_json::json;
    use std::time::Duration;

    fn context() -> RequestContext {
        RequestContext {
            method: Method::GET,
            url: "http://127.0.0.1:9/api/collections".to_string(),
            query: vec![("page".to_string(), "2".to_string())],
            body: None,
            timeout: Duration::from_millis(2500),
        }
    }

    fn status(code: u16) -> StatusCode {
        StatusCode::from_u16(code).unwrap()
    }

    #[test]
    fn test_status_codes_map_to_variants() {
        let cases = [
            (401, ErrorKind::Authentication),
            (403, ErrorKind::Authorization),
            (404, ErrorKind::NotFound),
            (422, ErrorKind::Validation),
            (429, ErrorKind::RateLimited),
            (500, ErrorKind::Server),
            (502, ErrorKind::Server),
            (503, ErrorKind::Server),
            (504, ErrorKind::Server),
        ];

        for (code, kind) in cases {
            let err = classify_response(status(code), r#"{"message":"nope"}"#, context());
            assert_eq!(err.kind(), kind, "status {}", code);
            assert_eq!(err.status(), Some(code));
            assert_eq!(err.context(), Some(&context()));
        }
    }

    #[test]
    fn test_other_statuses_fall_back_to_generic() {
        for code in [400, 405, 409, 418, 501, 505] {
            let err = classify_response(
                status(code),
                r#"{"message":"odd","code":"weird","details":{"a":1}}"#,
                context(),
            );
            assert_eq!(err.kind(), ErrorKind::Api, "status {}", code);
            assert_eq!(err.status(), Some(code));
            assert_eq!(err.code(), Some("weird"));
            assert_eq!(err.details(), Some(&json!({"a": 1})));
        }
    }

    #[test]
    fn test_not_found_uses_default_resource_label() {
        let err = classify_response(StatusCode::NOT_FOUND, "", context());
        assert_eq!(err.resource(), Some(DEFAULT_RESOURCE));
        assert_eq!(err.message(), "Not Found");
    }

    #[test]
    fn test_message_prefers_message_then_error() {
        let err = classify_response(
            StatusCode::UNAUTHORIZED,
            r#"{"message":"Token expired","error":"Unauthenticated"}"#,
            context(),
        );
        assert_eq!(err.message(), "Token expired");

        let err = classify_response(
            StatusCode::UNAUTHORIZED,
            r#"{"error":"Unauthenticated"}"#,
            context(),
        );
        assert_eq!(err.message(), "Unauthenticated");
    }

    #[test]
    fn test_nested_error_object() {
        let err = classify_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"error":{"message":"Invalid data","code":1042,"details":{"slug":"taken"}}}"#,
            context(),
        );
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Invalid data");
        assert_eq!(err.code(), Some("1042"));
        assert_eq!(err.details(), Some(&json!({"slug": "taken"})));
    }

    #[test]
    fn test_validation_errors_field_becomes_details() {
        let err = classify_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"The given data was invalid.","errors":{"title":["required"]}}"#,
            context(),
        );
        assert_eq!(err.details(), Some(&json!({"title": ["required"]})));
    }

    #[test]
    fn test_unparseable_body_degrades_to_raw_text() {
        let err = classify_response(
            StatusCode::BAD_GATEWAY,
            "<html><body>Bad Gateway</body></html>\n",
            context(),
        );
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.message(), "<html><body>Bad Gateway</body></html>");
        assert!(err.code().is_none());
    }

    #[test]
    fn test_unhelpful_json_uses_reason_phrase() {
        let err = classify_response(StatusCode::TOO_MANY_REQUESTS, "[1,2,3]", context());
        assert_eq!(err.message(), "Too Many Requests");

        let err = classify_response(StatusCode::FORBIDDEN, r#"{"message":""}"#, context());
        assert_eq!(err.message(), "Forbidden");
    }

    #[test]
    fn test_unknown_status_without_reason_uses_fallback() {
        let err = classify_response(status(599), "", context());
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.message(), FALLBACK_MESSAGE);
        assert_eq!(err.status(), Some(599));
    }

    #[test]
    fn test_transport_timeout_carries_configured_timeout() {
        let err = classify_transport(
            TransportFailure::TimedOut("operation timed out".to_string()),
            context(),
        );
        match &err {
            ApiError::Timeout { timeout, .. } => assert_eq!(*timeout, Duration::from_millis(2500)),
            other => panic!("expected timeout, got {:?}", other),
        }
        assert!(err.message().contains("2500ms"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_transport_unreachable_mentions_host() {
        let err = classify_transport(
            TransportFailure::Unreachable("tcp connect error: Connection refused".to_string()),
            context(),
        );
        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.message().contains("Unable to connect to 127.0.0.1:9"));
        assert_eq!(err.code(), Some("connection_failed"));
    }

    #[test]
    fn test_transport_other_keeps_transport_message() {
        let err = classify_transport(
            TransportFailure::Other("connection closed before message completed".to_string()),
            context(),
        );
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.message(), "connection closed before message completed");

        let err = classify_transport(TransportFailure::Other(String::new()), context());
        assert_eq!(err.message(), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_builder_errors_are_invalid_requests() {
        let err = reqwest::Client::new()
            .get("cms.example.com/api")
            .build()
            .unwrap_err();
        assert!(matches!(
            TransportFailure::from(&err),
            TransportFailure::InvalidRequest(_)
        ));
    }

    #[test]
    fn test_transport_invalid_request_is_not_network() {
        let err = classify_transport(
            TransportFailure::InvalidRequest("builder error: failed to parse header value".to_string()),
            context(),
        );
        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.code(), Some("invalid_request"));
        assert!(err.message().contains("failed to parse header value"));
        assert!(err.context().is_some());
    }
}
