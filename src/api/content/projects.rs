//
//  cms-client
//  api/content/projects.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Project API types and operations.
//!
//! A project is the root of the content tree. The client is bound to one
//! project through the `project-id` header, so the project endpoint is the
//! API root (`GET /`).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{de_id, Collection};
use crate::api::common::QueryParams;
use crate::api::{ApiError, CmsClient};

/// The project the client is bound to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    #[serde(default, deserialize_with = "de_id")]
    pub id: Option<String>,

    /// Display name of the project.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Locale used when an entry does not specify one.
    #[serde(default)]
    pub default_locale: Option<String>,

    /// All locales enabled for the project.
    #[serde(default)]
    pub locales: Vec<String>,

    /// Collections, present when requested with `with=collections`.
    #[serde(default)]
    pub collections: Option<Vec<Collection>>,

    /// Any other fields returned by the API.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CmsClient {
    /// Fetches the project.
    ///
    /// `with` names relations to include, comma-separated
    /// (e.g. `"collections"`).
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # async fn example(client: cms_client::api::CmsClient) -> Result<(), cms_client::api::ApiError> {
    /// let project = client.get_project(Some("collections")).await?;
    /// println!("{:?}", project.name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_project(&self, with: Option<&str>) -> Result<Project, ApiError> {
        let mut query = QueryParams::new();
        query.push_opt("with", with.filter(|w| !w.is_empty()));
        self.get_single("/", &query).await
    }
}
