//
//  cms-client
//  api/content/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Content API resources.
//!
//! Each submodule holds the models of one resource and the [`CmsClient`]
//! operations that read and write it:
//!
//! | Module | Operations |
//! |--------|------------|
//! | [`projects`] | `get_project` |
//! | [`collections`] | `get_collections`, `get_collection` |
//! | [`entries`] | `get_entries`, `get_entry`, `create_entry`, `update_entry`, `patch_entry`, `delete_entry` |
//! | [`assets`] | `get_assets`, `get_asset`, `get_asset_by_filename`, `upload_asset`, `delete_asset` |
//!
//! Models are lenient: fields the backend may omit are optional, and fields
//! this crate does not know about are kept in a flattened `extra` map.
//!
//! [`CmsClient`]: crate::api::CmsClient

pub mod assets;
pub mod collections;
pub mod entries;
pub mod projects;

pub use assets::*;
pub use collections::*;
pub use entries::*;
pub use projects::*;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::api::common::{ApiResponse, QueryParams};
use crate::api::{ApiError, CmsClient};

/// Percent-encodes a caller-supplied path segment.
///
/// Everything except ASCII alphanumerics and `-._*` is encoded, including
/// `/`, so a segment can never change the shape of the path.
pub(crate) fn segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Query for the `force` flag of delete operations.
///
/// Soft delete sends nothing; hard delete sends `force=true`.
pub(crate) fn force_query(force: bool) -> QueryParams {
    let mut query = QueryParams::new();
    if force {
        query.push("force", true);
    }
    query
}

/// Accepts identifiers sent either as strings or as numbers.
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

impl CmsClient {
    /// Sends a `DELETE` and discards whatever the API answers.
    pub(crate) async fn delete_resource(&self, path: &str, force: bool) -> Result<(), ApiError> {
        self.request::<Value>(reqwest::Method::DELETE, path, &force_query(force), None)
            .await
            .map(|_| ())
    }

    /// Sends a `GET` for a single resource wrapped in `{"data": ...}`.
    pub(crate) async fn get_single<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryParams,
    ) -> Result<T, ApiError> {
        self.request::<ApiResponse<T>>(reqwest::Method::GET, path, query, None)
            .await
            .map(|response| response.data)
    }
}
