//
//  cms-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module provides the HTTP client for the content-management REST API.
//!
//! ## Architecture
//!
//! - [`client`]: Request executor with authentication, timeouts and decoding
//! - [`common`]: Shared types (errors, error classification, pagination)
//! - [`content`]: Typed operations for projects, collections, entries and assets
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cms_client::api::CmsClient;
//! use cms_client::config::ClientConfig;
//!
//! # async fn example() -> Result<(), cms_client::api::ApiError> {
//! let config = ClientConfig::new("https://cms.example.com/api", "my-project")
//!     .with_token("secret-token");
//! let client = CmsClient::new(config)?;
//!
//! for collection in client.get_collections().await? {
//!     println!("{:?}", collection.slug);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every failure is an [`ApiError`]. HTTP statuses map to variants:
//!
//! - `Authentication`: 401 Unauthorized
//! - `Authorization`: 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `Validation`: 422 Unprocessable Entity
//! - `RateLimited`: 429 Too Many Requests
//! - `Server`: 500, 502, 503, 504
//! - `Api`: any other non-success status
//!
//! Transport failures become `Timeout` or `Network`.

/// Request executor.
///
/// Provides the [`CmsClient`] struct which handles:
/// - Configuration validation
/// - `project-id` and bearer token headers
/// - Per-request timeout
/// - Response decoding and error classification
pub mod client;

/// Shared types: [`ApiError`], [`ErrorInfo`], [`RequestContext`],
/// [`ApiResponse`] and pagination helpers.
pub mod common;

/// Typed content operations.
pub mod content;

pub use client::CmsClient;

pub use common::{ApiError, ApiResponse, ErrorInfo, ErrorKind, RequestContext};
