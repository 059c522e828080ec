//
//  cms-client
//  api/content/assets.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Asset API types and operations.
//!
//! Assets are uploaded files (images, documents) stored under `/files`.
//! Uploads are sent as `multipart/form-data` with the file in the `file`
//! field and optional JSON metadata in the `metadata` field.
//!
//! # Example
//!
//! ```rust,no_run
//! use cms_client::api::content::AssetUpload;
//! use serde_json::json;
//!
//! # async fn example(client: cms_client::api::CmsClient) -> anyhow::Result<()> {
//! let upload = AssetUpload::from_path("logo.png")
//!     .await?
//!     .with_mime_type("image/png")
//!     .with_metadata(json!({"alt": "Company logo"}));
//! let asset = client.upload_asset(upload).await?;
//! println!("Uploaded as {:?}", asset.id);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{de_id, segment};
use crate::api::common::{ApiError, ApiResponse, ErrorInfo, PageParams, Paginated, QueryParams};
use crate::api::CmsClient;

/// An uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default, deserialize_with = "de_id")]
    pub id: Option<String>,

    /// Stored file name, used by `get_asset_by_filename`.
    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default)]
    pub original_filename: Option<String>,

    #[serde(default)]
    pub mime_type: Option<String>,

    /// Size in bytes.
    #[serde(default)]
    pub size: Option<u64>,

    /// Public URL of the file.
    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub metadata: Option<Value>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Search, type filter and paging for `get_assets`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetQuery {
    pub search: Option<String>,
    /// Asset type filter (e.g. `image`, `document`), sent as `type`.
    pub asset_type: Option<String>,
    pub sort: Option<String>,
    pub page: PageParams,
}

impl AssetQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn asset_type(mut self, asset_type: impl Into<String>) -> Self {
        self.asset_type = Some(asset_type.into());
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = PageParams::new(page, limit);
        self
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_opt("search", self.search.as_deref())
            .push_opt("type", self.asset_type.as_deref())
            .push_opt("sort", self.sort.as_deref());
        self.page.append_to(&mut params);
        params
    }
}

/// A file to upload.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetUpload {
    /// File name sent with the `file` part.
    pub file_name: String,
    /// Raw file content.
    pub content: Vec<u8>,
    /// MIME type of the content. The transport default applies when unset.
    pub mime_type: Option<String>,
    /// Metadata sent as JSON text in the `metadata` field.
    pub metadata: Option<Value>,
}

impl AssetUpload {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
            mime_type: None,
            metadata: None,
        }
    }

    /// Reads a file from disk, naming the upload after the file.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, content))
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Builds the multipart form.
    ///
    /// # Errors
    ///
    /// [`ApiError::Validation`] when the MIME type cannot be parsed or the
    /// metadata cannot be encoded.
    pub fn into_form(self) -> Result<Form, ApiError> {
        let mut part = Part::bytes(self.content).file_name(self.file_name);
        if let Some(mime) = &self.mime_type {
            part = part.mime_str(mime).map_err(|e| {
                ApiError::Validation(
                    ErrorInfo::new(format!("Invalid MIME type '{}': {}", mime, e))
                        .with_code(Some("invalid_mime_type".to_string())),
                )
            })?;
        }

        let mut form = Form::new().part("file", part);
        if let Some(metadata) = &self.metadata {
            let text = serde_json::to_string(metadata).map_err(|e| {
                ApiError::Validation(
                    ErrorInfo::new(format!("Failed to encode asset metadata: {}", e))
                        .with_code(Some("invalid_metadata".to_string())),
                )
            })?;
            form = form.text("metadata", text);
        }
        Ok(form)
    }
}

/// Resource label used when an asset lookup answers 404.
pub fn asset_label(id_or_filename: &str) -> String {
    format!("Asset '{}'", id_or_filename)
}

impl CmsClient {
    /// Lists assets.
    pub async fn get_assets(&self, query: &AssetQuery) -> Result<Paginated<Asset>, ApiError> {
        self.request(Method::GET, "/files", &query.to_params(), None)
            .await
    }

    /// Fetches one asset by id.
    ///
    /// # Errors
    ///
    /// A 404 becomes [`ApiError::NotFound`] labelled `Asset '<id>'`.
    pub async fn get_asset(&self, id: &str) -> Result<Asset, ApiError> {
        self.get_single(&format!("/files/{}", segment(id)), &QueryParams::new())
            .await
            .map_err(|e| e.with_resource(asset_label(id)))
    }

    /// Fetches one asset by its stored file name.
    ///
    /// # Errors
    ///
    /// A 404 becomes [`ApiError::NotFound`] labelled `Asset '<filename>'`.
    pub async fn get_asset_by_filename(&self, filename: &str) -> Result<Asset, ApiError> {
        self.get_single(
            &format!("/files/name/{}", segment(filename)),
            &QueryParams::new(),
        )
        .await
        .map_err(|e| e.with_resource(asset_label(filename)))
    }

    /// Uploads a file.
    pub async fn upload_asset(&self, upload: AssetUpload) -> Result<Asset, ApiError> {
        let form = upload.into_form()?;
        self.request_multipart::<ApiResponse<Asset>>("/files", form)
            .await
            .map(|response| response.data)
    }

    /// Deletes an asset. `force` selects a hard delete over a soft delete.
    pub async fn delete_asset(&self, id: &str, force: bool) -> Result<(), ApiError> {
        self.delete_resource(&format!("/files/{}", segment(id)), force)
            .await
    }
}
