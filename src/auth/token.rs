//
//  cms-client
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Token Handling
//!
//! The content API authenticates with project-scoped API tokens sent as
//! `Authorization: Bearer <token>`. Tokens are optional: public projects can
//! be read anonymously, in which case no `Authorization` header is sent.
//!
//! ## Example
//!
//! ```rust
//! use cms_client::auth::{validate_token, ApiToken};
//!
//! assert!(validate_token("cms_live_3f9a"));
//!
//! let token = ApiToken::new("cms_live_3f9a");
//! assert_eq!(format!("{:?}", token), "ApiToken(\"cms_***\")");
//! ```

use std::fmt;

use reqwest::RequestBuilder;

/// Validates the format of a token string.
///
/// A token must not be empty and must not contain whitespace. This is a
/// format check only; the server decides whether the token is accepted.
///
/// # Example
///
/// ```rust
/// use cms_client::auth::validate_token;
///
/// assert!(validate_token("abc123"));
/// assert!(!validate_token(""));
/// assert!(!validate_token("has space"));
/// assert!(!validate_token("has\nnewline"));
/// ```
pub fn validate_token(token: &str) -> bool {
    !token.is_empty() && !token.chars().any(char::is_whitespace)
}

/// A bearer token for the content API.
///
/// The `Debug` output only shows the first four characters so tokens do not
/// leak into logs or error reports.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a token. Surrounding whitespace is trimmed.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into().trim().to_string())
    }

    /// Returns the raw token string.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        validate_token(&self.0)
    }

    /// Adds the `Authorization: Bearer` header to a request.
    pub fn apply_to_request(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.0)
    }

    /// Returns a redacted form safe for display.
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(4).collect();
        format!("{}***", prefix)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiToken").field(&self.redacted()).finish()
    }
}

impl From<&str> for ApiToken {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for ApiToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_trimmed() {
        let token = ApiToken::new("  secret-token\n");
        assert_eq!(token.expose(), "secret-token");
        assert!(token.is_valid());
    }

    #[test]
    fn test_debug_is_redacted() {
        let token = ApiToken::new("supersecret");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("supersecret"));
        assert!(debug.contains("supe***"));
    }

    #[test]
    fn test_invalid_tokens() {
        assert!(!ApiToken::new("").is_valid());
        assert!(!ApiToken::new("two words").is_valid());
    }
}
