//
//  cms-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for the Content API
//!
//! This module provides the request executor every resource operation goes
//! through. One call issues exactly one HTTP exchange.
//!
//! ## Features
//!
//! - Absolute URL built as `base_path + path`
//! - `project-id` header on every request
//! - `Authorization: Bearer <token>` only when a token is configured
//! - `Accept: application/json` on every request
//! - Query string only when parameters were given
//! - JSON or multipart request bodies
//! - Configured timeout applied to the whole exchange
//! - Failures classified into [`ApiError`] variants
//!
//! The client holds no mutable state. Concurrent calls on a shared
//! `&CmsClient` are independent of each other.

use reqwest::header::ACCEPT;
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::api::common::{
    classify_response, classify_transport, ApiError, ErrorInfo, QueryParams, RequestContext,
    TransportFailure,
};
use crate::config::{ClientConfig, PROJECT_HEADER};

/// The main HTTP client for the content API.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use cms_client::api::CmsClient;
/// use cms_client::config::ClientConfig;
///
/// let client = CmsClient::new(
///     ClientConfig::new("https://cms.example.com/api", "p-123").with_token("cms_live_3f9a"),
/// )?;
/// # Ok::<(), cms_client::api::ApiError>(())
/// ```
///
/// Construction validates the configuration and fails with
/// [`ApiError::Validation`] listing every problem found.
#[derive(Debug, Clone)]
pub struct CmsClient {
    /// The underlying HTTP client
    http: Client,
    /// Immutable connection settings
    config: ClientConfig,
}

impl CmsClient {
    /// Creates a client after validating the configuration.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] when the configuration is invalid
    /// - [`ApiError::Api`] with code `client_init` when the HTTP client
    ///   cannot be initialised (e.g. no TLS backend available)
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        config.validate()?;

        let http = Client::builder()
            .user_agent(format!("{}/{}", crate::APP_NAME, crate::VERSION))
            .build()
            .map_err(|e| {
                ApiError::Api(
                    ErrorInfo::new(format!("Failed to initialise HTTP client: {}", e))
                        .with_code(Some("client_init".to_string())),
                )
            })?;

        Ok(Self { http, config })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sends a request and decodes the response body.
    ///
    /// This is the primitive every resource operation is built on. `path`
    /// is appended to the base path as is, so callers must encode any
    /// user-supplied segments.
    ///
    /// A successful response is decoded into `T` without further checks;
    /// use `serde_json::Value` to receive the body untouched. An empty body
    /// decodes as JSON `null`, and a body that is not JSON decodes as a JSON
    /// string.
    ///
    /// # Errors
    ///
    /// - A non-success status is classified by
    ///   [`classify_response`](crate::api::common::classify_response)
    /// - A failure before the response completed is classified by
    ///   [`classify_transport`](crate::api::common::classify_transport)
    /// - A success body that does not fit `T` yields [`ApiError::Api`] with
    ///   code `invalid_response`
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use cms_client::api::CmsClient;
    /// use cms_client::api::common::QueryParams;
    /// use reqwest::Method;
    ///
    /// # async fn example(client: CmsClient) -> Result<(), cms_client::api::ApiError> {
    /// let mut query = QueryParams::new();
    /// query.push("limit", 5);
    /// let page: serde_json::Value = client.request(Method::GET, "/blog", &query, None).await?;
    /// println!("{}", page["data"]);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<Value>,
    ) -> Result<T, ApiError> {
        let (mut request, context) = self.prepare(method, path, query, body);
        if let Some(body) = &context.body {
            request = request.json(body);
        }
        self.execute(request, context).await
    }

    /// Sends a request with a serializable JSON body.
    pub async fn request_with_body<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = to_body(body)?;
        self.request(method, path, query, Some(body)).await
    }

    /// Sends a multipart `POST`.
    ///
    /// Headers, timeout and error handling are identical to
    /// [`request`](Self::request); the form replaces the JSON body.
    pub async fn request_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let (request, context) = self.prepare(Method::POST, path, &QueryParams::new(), None);
        self.execute(request.multipart(form), context).await
    }

    /// Builds the request with the standard headers and its context.
    ///
    /// The body is recorded in the context but not attached.
    pub(crate) fn prepare(
        &self,
        method: Method,
        path: &str,
        query: &QueryParams,
        body: Option<Value>,
    ) -> (RequestBuilder, RequestContext) {
        let url = self.config.url_for(path);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json")
            .header(PROJECT_HEADER, self.config.project_id())
            .timeout(self.config.timeout());

        if let Some(token) = self.config.token() {
            request = token.apply_to_request(request);
        }

        if !query.is_empty() {
            request = request.query(query.as_slice());
        }

        let context = RequestContext {
            method,
            url,
            query: query.as_slice().to_vec(),
            body,
            timeout: self.config.timeout(),
        };

        (request, context)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        context: RequestContext,
    ) -> Result<T, ApiError> {
        tracing::debug!(
            method = %context.method,
            url = %context.url,
            query = context.query.len(),
            "sending request"
        );

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => return Err(classify_transport(TransportFailure::from(&e), context)),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Err(classify_transport(TransportFailure::from(&e), context)),
        };

        tracing::debug!(status = status.as_u16(), bytes = text.len(), "received response");

        if !status.is_success() {
            return Err(classify_response(status, &text, context));
        }

        decode(status.as_u16(), &text).map_err(|e| {
            ApiError::Api(
                ErrorInfo::new(format!("Failed to decode response body: {}", e))
                    .with_status(status.as_u16())
                    .with_code(Some("invalid_response".to_string()))
                    .with_context(context),
            )
        })
    }
}

/// Serializes a request body.
pub(crate) fn to_body<B: Serialize>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| {
        ApiError::Validation(
            ErrorInfo::new(format!("Failed to encode request body: {}", e))
                .with_code(Some("invalid_body".to_string())),
        )
    })
}

fn decode<T: DeserializeOwned>(status: u16, text: &str) -> Result<T, serde_json::Error> {
    let trimmed = text.trim();
    let value = if trimmed.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(trimmed).unwrap_or_else(|_| {
            tracing::debug!(status, "response body is not JSON, passing it through as text");
            Value::String(trimmed.to_string())
        })
    };
    serde_json::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ErrorKind;
    use mockito::Matcher;
    use serde_json::json;
    use std::time::Duration;

    fn client_for(base: &str, token: Option<&str>) -> CmsClient {
        let config = ClientConfig::new(base, "p-123")
            .with_optional_token(token.map(str::to_string))
            .with_timeout_ms(5_000);
        CmsClient::new(config).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = CmsClient::new(ClientConfig::new("", "")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.details().and_then(Value::as_array).map(Vec::len), Some(2));
    }

    #[test]
    fn test_prepare_sets_standard_headers_without_token() {
        let client = client_for("https://cms.example.com/api/", None);
        let (builder, context) =
            client.prepare(Method::GET, "/collections", &QueryParams::new(), None);
        let request = builder.build().unwrap();

        assert_eq!(request.url().as_str(), "https://cms.example.com/api/collections");
        assert_eq!(request.url().query(), None);
        assert_eq!(request.headers()["project-id"], "p-123");
        assert_eq!(request.headers()["accept"], "application/json");
        assert!(request.headers().get("authorization").is_none());
        assert_eq!(request.timeout(), Some(&Duration::from_millis(5_000)));

        assert_eq!(context.method, Method::GET);
        assert_eq!(context.url, "https://cms.example.com/api/collections");
        assert!(context.query.is_empty());
    }

    #[test]
    fn test_prepare_sets_bearer_token_and_query() {
        let client = client_for("https://cms.example.com/api", Some("secret"));
        let query: QueryParams = [("page", "2"), ("search", "hello world")]
            .into_iter()
            .collect();
        let (builder, context) = client.prepare(Method::GET, "/blog", &query, None);
        let request = builder.build().unwrap();

        assert_eq!(request.headers()["authorization"], "Bearer secret");
        assert_eq!(request.url().query(), Some("page=2&search=hello+world"));
        assert_eq!(context.query, query.into_vec());
    }

    #[tokio::test]
    async fn test_request_returns_parsed_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/collections")
            .match_header("project-id", "p-123")
            .match_header("accept", "application/json")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data":[{"slug":"blog"}]}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let body: Value = client
            .request(Method::GET, "/collections", &QueryParams::new(), None)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body, json!({"data": [{"slug": "blog"}]}));
    }

    #[tokio::test]
    async fn test_request_sends_json_body_and_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/blog")
            .match_header("authorization", "Bearer secret")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"data": {"title": "Hi"}})))
            .with_status(201)
            .with_body(r#"{"data":{"uuid":"e-1"}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), Some("secret"));
        let body: Value = client
            .request_with_body(
                Method::POST,
                "/blog",
                &QueryParams::new(),
                &json!({"data": {"title": "Hi"}}),
            )
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body["data"]["uuid"], "e-1");
    }

    #[tokio::test]
    async fn test_empty_and_plain_text_success_bodies() {
        let mut server = mockito::Server::new_async().await;
        let _empty = server
            .mock("DELETE", "/blog/e-1")
            .with_status(204)
            .create_async()
            .await;
        let _text = server
            .mock("GET", "/ping")
            .with_status(200)
            .with_body("pong")
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let deleted: Value = client
            .request(Method::DELETE, "/blog/e-1", &QueryParams::new(), None)
            .await
            .unwrap();
        assert_eq!(deleted, Value::Null);

        let pong: Value = client
            .request(Method::GET, "/ping", &QueryParams::new(), None)
            .await
            .unwrap();
        assert_eq!(pong, json!("pong"));
    }

    #[tokio::test]
    async fn test_error_response_is_classified_with_context() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("PATCH", "/blog/e-1")
            .with_status(422)
            .with_body(r#"{"message":"Invalid","errors":{"title":["required"]}}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let err = client
            .request::<Value>(
                Method::PATCH,
                "/blog/e-1",
                &QueryParams::new(),
                Some(json!({"data": {}})),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.message(), "Invalid");
        assert_eq!(err.details(), Some(&json!({"title": ["required"]})));

        let context = err.context().unwrap();
        assert_eq!(context.method, Method::PATCH);
        assert_eq!(context.url, format!("{}/blog/e-1", server.url()));
        assert_eq!(context.body, Some(json!({"data": {}})));
        assert_eq!(context.timeout, Duration::from_millis(5_000));
    }

    #[tokio::test]
    async fn test_success_body_of_wrong_shape_is_invalid_response() {
        #[derive(Debug, serde::Deserialize)]
        struct Strict {
            #[allow(dead_code)]
            count: u32,
        }

        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .with_status(200)
            .with_body(r#"{"count":"many"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), None);
        let err = client
            .request::<Strict>(Method::GET, "/", &QueryParams::new(), None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Api);
        assert_eq!(err.code(), Some("invalid_response"));
        assert_eq!(err.status(), Some(200));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let client = client_for(&format!("http://127.0.0.1:{}", port), None);
        let err = client
            .request::<Value>(Method::GET, "/collections", &QueryParams::new(), None)
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Network);
        assert!(err.message().starts_with("Unable to connect to 127.0.0.1"));
        assert!(err.status().is_none());
    }

    #[tokio::test]
    async fn test_slow_backend_is_timeout_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = ClientConfig::new(format!("http://{}", addr), "p-123").with_timeout_ms(200);
        let client = CmsClient::new(config).unwrap();
        let err = client
            .request::<Value>(Method::GET, "/collections", &QueryParams::new(), None)
            .await
            .unwrap_err();
        server.abort();

        match &err {
            ApiError::Timeout { timeout, .. } => assert_eq!(*timeout, Duration::from_millis(200)),
            other => panic!("expected timeout, got {:?}", other),
        }
        assert_eq!(err.context().unwrap().timeout_ms(), 200);
    }
}
