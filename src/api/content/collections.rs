//
//  cms-client
//  api/content/collections.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Collection API types and operations.
//!
//! A collection defines the schema of a group of entries (e.g. `blog`,
//! `authors`). Its slug is also the first path segment of its entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{de_id, segment};
use crate::api::common::{ApiResponse, QueryParams};
use crate::api::{ApiError, CmsClient};

/// A collection of entries sharing one schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default, deserialize_with = "de_id")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    /// URL-safe identifier, used in entry paths.
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Whether the collection holds exactly one entry.
    #[serde(default)]
    pub is_singleton: Option<bool>,

    /// Field definitions, as returned by the API.
    #[serde(default)]
    pub fields: Vec<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Resource label used when a collection lookup answers 404.
pub fn collection_label(slug: &str) -> String {
    format!("Collection '{}'", slug)
}

impl CmsClient {
    /// Lists every collection of the project.
    pub async fn get_collections(&self) -> Result<Vec<Collection>, ApiError> {
        self.request::<ApiResponse<Vec<Collection>>>(
            reqwest::Method::GET,
            "/collections",
            &QueryParams::new(),
            None,
        )
        .await
        .map(|response| response.data)
    }

    /// Fetches one collection by slug.
    ///
    /// # Errors
    ///
    /// A 404 becomes [`ApiError::NotFound`] labelled `Collection '<slug>'`.
    pub async fn get_collection(&self, slug: &str) -> Result<Collection, ApiError> {
        self.get_single(&format!("/collections/{}", segment(slug)), &QueryParams::new())
            .await
            .map_err(|e| e.with_resource(collection_label(slug)))
    }
}
