//
//  cms-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # CMS Client Library
//!
//! A typed client for a headless content-management REST API, plus the
//! `cms` command-line tool built on top of it.
//!
//! ## Overview
//!
//! A [`CmsClient`] is bound to one project (sent as the `project-id`
//! header) and optionally authenticates with a bearer token. Every
//! operation returns either a typed model or an [`ApiError`] classified
//! from the HTTP status or transport failure.
//!
//! ## Module Structure
//!
//! - [`api`]: Request executor, error classification and content operations
//! - [`auth`]: API token handling
//! - [`config`]: Client configuration and the profiles file
//! - [`cli`]: Command-line interface definitions using clap
//! - [`output`]: Output formatting (Table, JSON)
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cms_client::api::content::EntryQuery;
//! use cms_client::{ClientConfig, CmsClient};
//!
//! # async fn example() -> Result<(), cms_client::ApiError> {
//! let client = CmsClient::new(
//!     ClientConfig::new("https://cms.example.com/api", "my-project").with_token("secret"),
//! )?;
//!
//! let page = client
//!     .get_entries("blog", &EntryQuery::new().locale("en").page(1, 20))
//!     .await?;
//! for entry in page.data {
//!     println!("{:?}", entry.uuid);
//! }
//! # Ok(())
//! # }
//! ```

/// API client, error taxonomy and typed content operations.
pub mod api;

/// API token handling.
pub mod auth;

/// Command-line interface definitions.
///
/// Contains all CLI commands, arguments, and subcommands defined using the clap derive API.
pub mod cli;

/// Configuration management.
///
/// Holds the validated [`ClientConfig`] and the profiles file stored in
/// platform-specific locations:
/// - Linux: `~/.config/cms/config.toml`
/// - macOS: `~/Library/Application Support/cms/config.toml`
/// - Windows: `%APPDATA%\cms\config.toml`
pub mod config;

/// Output formatting for table and JSON modes.
pub mod output;

pub use api::{ApiError, CmsClient, ErrorKind};
pub use cli::Cli;
pub use config::{ClientConfig, Config};

/// Application name constant.
///
/// The name of the CLI binary, used for the user agent and configuration paths.
pub const APP_NAME: &str = "cms";

/// Application version constant, derived from Cargo.toml at compile time.
///
/// # Example
///
/// ```rust
/// use cms_client::VERSION;
///
/// println!("cms version {}", VERSION);
/// ```
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Exit codes for the CLI.
///
/// Standardized exit codes allowing scripts to detect the outcome of a
/// command.
///
/// # Exit Code Ranges
///
/// - `0`: Success
/// - `1-3`: General errors and usage issues
/// - `4-7`: Authentication-related issues
/// - `8-15`: Resource-related issues
/// - `32+`: External service issues
///
/// # Example
///
/// ```rust,no_run
/// use cms_client::exit_codes;
/// use std::process;
///
/// process::exit(exit_codes::AUTH_ERROR);
/// ```
pub mod exit_codes {
    use crate::api::{ApiError, ErrorKind};

    /// Successful execution.
    pub const SUCCESS: i32 = 0;

    /// General error. Check stderr for details.
    pub const ERROR: i32 = 1;

    /// Invalid usage or arguments.
    pub const USAGE: i32 = 2;

    /// Authentication failed or permission denied.
    ///
    /// The token is missing, invalid, or lacks access to the project.
    pub const AUTH_ERROR: i32 = 4;

    /// Resource not found.
    pub const NOT_FOUND: i32 = 8;

    /// The request or the client configuration was rejected as invalid.
    pub const VALIDATION: i32 = 10;

    /// API rate limit exceeded.
    pub const RATE_LIMIT: i32 = 32;

    /// The API could not be reached or did not answer in time.
    pub const NETWORK: i32 = 33;

    /// The API answered with a server error.
    pub const SERVER: i32 = 34;

    /// Maps an [`ApiError`] to the exit code of its category.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cms_client::api::{ApiError, ErrorInfo};
    /// use cms_client::exit_codes;
    ///
    /// let err = ApiError::RateLimited(ErrorInfo::new("slow down"));
    /// assert_eq!(exit_codes::for_error(&err), exit_codes::RATE_LIMIT);
    /// ```
    pub fn for_error(error: &ApiError) -> i32 {
        match error.kind() {
            ErrorKind::Authentication | ErrorKind::Authorization => AUTH_ERROR,
            ErrorKind::NotFound => NOT_FOUND,
            ErrorKind::Validation => VALIDATION,
            ErrorKind::RateLimited => RATE_LIMIT,
            ErrorKind::Network | ErrorKind::Timeout => NETWORK,
            ErrorKind::Server => SERVER,
            ErrorKind::Api => ERROR,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::api::ErrorInfo;
        use std::time::Duration;

        #[test]
        fn test_for_error() {
            let info = || ErrorInfo::new("x");
            assert_eq!(for_error(&ApiError::Authentication(info())), AUTH_ERROR);
            assert_eq!(for_error(&ApiError::Authorization(info())), AUTH_ERROR);
            assert_eq!(for_error(&ApiError::not_found(info())), NOT_FOUND);
            assert_eq!(for_error(&ApiError::Validation(info())), VALIDATION);
            assert_eq!(for_error(&ApiError::Server(info())), SERVER);
            assert_eq!(
                for_error(&ApiError::Timeout {
                    timeout: Duration::from_millis(5),
                    info: info(),
                }),
                NETWORK
            );
            assert_eq!(for_error(&ApiError::Api(info())), ERROR);
        }
    }
}
