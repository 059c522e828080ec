//
//  cms-client
//  api/content/entries.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Entry API types and operations.
//!
//! Entries are the content items of a collection, addressed as
//! `/{collection}/{uuid}`.
//!
//! # Example
//!
//! ```rust,no_run
//! use cms_client::api::content::{EntryInput, EntryQuery, EntryState};
//! use serde_json::json;
//!
//! # async fn example(client: cms_client::api::CmsClient) -> Result<(), cms_client::api::ApiError> {
//! let query = EntryQuery::new()
//!     .locale("en")
//!     .state(EntryState::Published)
//!     .filter("author", "ada")
//!     .sort("-published_at")
//!     .page(1, 20);
//! let page = client.get_entries("blog", &query).await?;
//!
//! let input = EntryInput::new(json!({"title": "Hello"}).as_object().cloned().unwrap_or_default())
//!     .with_locale("en");
//! let created = client.create_entry("blog", &input).await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::segment;
use crate::api::common::{ApiResponse, PageParams, Paginated, QueryParams};
use crate::api::{ApiError, CmsClient};

/// A content entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub uuid: Option<String>,

    #[serde(default)]
    pub locale: Option<String>,

    /// Publication state as reported by the API (e.g. `draft`).
    #[serde(default)]
    pub state: Option<String>,

    /// ISO 8601 timestamp of publication.
    #[serde(default)]
    pub published_at: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    /// Field values of the entry.
    #[serde(default)]
    pub data: Map<String, Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Publication state of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryState {
    Draft,
    Published,
    Scheduled,
}

impl EntryState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for EntryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "scheduled" => Ok(Self::Scheduled),
            other => Err(format!(
                "invalid entry state '{}' (expected draft, published or scheduled)",
                other
            )),
        }
    }
}

/// Body of `create_entry` and `update_entry`.
///
/// `update_entry` replaces the entry, so fields left out are cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<EntryState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    pub data: Map<String, Value>,
}

impl EntryInput {
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            data,
            ..Self::default()
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_state(mut self, state: EntryState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn with_published_at(mut self, published_at: DateTime<Utc>) -> Self {
        self.published_at = Some(published_at);
        self
    }
}

/// Body of `patch_entry`. Only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EntryPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<EntryState>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// Field values to merge into the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Map<String, Value>>,
}

/// Filters, sorting and paging for `get_entries`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryQuery {
    pub locale: Option<String>,
    pub state: Option<EntryState>,
    /// Sort field, prefixed with `-` for descending order.
    pub sort: Option<String>,
    pub search: Option<String>,
    /// Relations to include, comma-separated.
    pub with: Option<String>,
    pub page: PageParams,
    /// Field filters, sent as `filter[<field>]=<value>`.
    pub filters: Vec<(String, String)>,
}

impl EntryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn state(mut self, state: EntryState) -> Self {
        self.state = Some(state);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with(mut self, with: impl Into<String>) -> Self {
        self.with = Some(with.into());
        self
    }

    pub fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = PageParams::new(page, limit);
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Converts the query into request parameters. Unset fields are omitted.
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .push_opt("locale", self.locale.as_deref())
            .push_opt("state", self.state)
            .push_opt("sort", self.sort.as_deref())
            .push_opt("search", self.search.as_deref())
            .push_opt("with", self.with.as_deref());
        self.page.append_to(&mut params);
        for (field, value) in &self.filters {
            params.push(format!("filter[{}]", field), value);
        }
        params
    }
}

/// Resource label used when an entry lookup answers 404.
pub fn entry_label(uuid: &str) -> String {
    format!("Entry '{}'", uuid)
}

fn entry_path(collection: &str, uuid: &str) -> String {
    format!("/{}/{}", segment(collection), segment(uuid))
}

impl CmsClient {
    /// Lists entries of a collection.
    pub async fn get_entries(
        &self,
        collection: &str,
        query: &EntryQuery,
    ) -> Result<Paginated<Entry>, ApiError> {
        self.request(
            Method::GET,
            &format!("/{}", segment(collection)),
            &query.to_params(),
            None,
        )
        .await
    }

    /// Fetches one entry.
    ///
    /// # Errors
    ///
    /// A 404 becomes [`ApiError::NotFound`] labelled `Entry '<uuid>'`.
    pub async fn get_entry(&self, collection: &str, uuid: &str) -> Result<Entry, ApiError> {
        self.get_single(&entry_path(collection, uuid), &QueryParams::new())
            .await
            .map_err(|e| e.with_resource(entry_label(uuid)))
    }

    /// Creates an entry in a collection.
    pub async fn create_entry(
        &self,
        collection: &str,
        input: &EntryInput,
    ) -> Result<Entry, ApiError> {
        self.request_with_body::<ApiResponse<Entry>, _>(
            Method::POST,
            &format!("/{}", segment(collection)),
            &QueryParams::new(),
            input,
        )
        .await
        .map(|response| response.data)
    }

    /// Replaces an entry.
    pub async fn update_entry(
        &self,
        collection: &str,
        uuid: &str,
        input: &EntryInput,
    ) -> Result<Entry, ApiError> {
        self.request_with_body::<ApiResponse<Entry>, _>(
            Method::PUT,
            &entry_path(collection, uuid),
            &QueryParams::new(),
            input,
        )
        .await
        .map(|response| response.data)
    }

    /// Updates only the given fields of an entry.
    pub async fn patch_entry(
        &self,
        collection: &str,
        uuid: &str,
        patch: &EntryPatch,
    ) -> Result<Entry, ApiError> {
        self.request_with_body::<ApiResponse<Entry>, _>(
            Method::PATCH,
            &entry_path(collection, uuid),
            &QueryParams::new(),
            patch,
        )
        .await
        .map(|response| response.data)
    }

    /// Deletes an entry. `force` selects a hard delete over a soft delete.
    pub async fn delete_entry(
        &self,
        collection: &str,
        uuid: &str,
        force: bool,
    ) -> Result<(), ApiError> {
        self.delete_resource(&entry_path(collection, uuid), force)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::common::ErrorKind;
    use crate::api::content::force_query;
    use crate::config::ClientConfig;
    use chrono::TimeZone;
    use mockito::Matcher;
    use serde_json::json;

    fn client(server: &mockito::Server) -> CmsClient {
        CmsClient::new(ClientConfig::new(server.url(), "p-1")).unwrap()
    }

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_entry_query_params() {
        let params = EntryQuery::new()
            .locale("en")
            .state(EntryState::Published)
            .sort("-published_at")
            .filter("author", "ada")
            .page(2, 10)
            .to_params();

        assert_eq!(params.get("locale"), Some("en"));
        assert_eq!(params.get("state"), Some("published"));
        assert_eq!(params.get("sort"), Some("-published_at"));
        assert_eq!(params.get("filter[author]"), Some("ada"));
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("limit"), Some("10"));
        assert_eq!(params.get("search"), None);
        assert!(EntryQuery::new().to_params().is_empty());
    }

    #[test]
    fn test_entry_state_parse() {
        assert_eq!("Published".parse::<EntryState>(), Ok(EntryState::Published));
        assert!("archived".parse::<EntryState>().is_err());
    }

    #[test]
    fn test_entry_input_serialization() {
        let input = EntryInput::new(data(json!({"title": "Hi"})))
            .with_locale("en")
            .with_state(EntryState::Scheduled)
            .with_published_at(Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap());

        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({
                "locale": "en",
                "state": "scheduled",
                "published_at": "2025-03-01T09:30:00Z",
                "data": {"title": "Hi"}
            })
        );

        let patch = EntryPatch {
            state: Some(EntryState::Draft),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"state": "draft"}));
    }

    #[tokio::test]
    async fn test_get_entries_sends_filters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/blog")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("locale".into(), "en".into()),
                Matcher::UrlEncoded("filter[author]".into(), "ada".into()),
                Matcher::UrlEncoded("limit".into(), "5".into()),
            ]))
            .with_status(200)
            .with_body(
                r#"{"data":[{"uuid":"e-1","locale":"en","state":"published","data":{"title":"Hi"}}],
                    "meta":{"current_page":1,"last_page":2,"per_page":5,"total":7}}"#,
            )
            .create_async()
            .await;

        let query = EntryQuery::new().locale("en").filter("author", "ada").page(1, 5);
        let page = client(&server).get_entries("blog", &query).await.unwrap();

        mock.assert_async().await;
        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].data["title"], "Hi");
        assert!(page.has_next());
        assert_eq!(page.total(), Some(7));
    }

    #[tokio::test]
    async fn test_get_entry_not_found_is_relabelled() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/blog/e-404")
            .with_status(404)
            .create_async()
            .await;

        let err = client(&server).get_entry("blog", "e-404").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.resource(), Some("Entry 'e-404'"));
        assert_eq!(err.to_string(), "Entry 'e-404' not found: Not Found");
    }

    #[tokio::test]
    async fn test_create_update_patch_entry() {
        let mut server = mockito::Server::new_async().await;
        let create = server
            .mock("POST", "/blog")
            .match_body(Matcher::Json(json!({"locale": "en", "data": {"title": "Hi"}})))
            .with_status(201)
            .with_body(r#"{"data":{"uuid":"e-1","data":{"title":"Hi"}}}"#)
            .create_async()
            .await;
        let update = server
            .mock("PUT", "/blog/e-1")
            .match_body(Matcher::Json(json!({"data": {"title": "Replaced"}})))
            .with_status(200)
            .with_body(r#"{"data":{"uuid":"e-1","data":{"title":"Replaced"}}}"#)
            .create_async()
            .await;
        let patch = server
            .mock("PATCH", "/blog/e-1")
            .match_body(Matcher::Json(json!({"state": "published"})))
            .with_status(200)
            .with_body(r#"{"data":{"uuid":"e-1","state":"published"}}"#)
            .create_async()
            .await;

        let client = client(&server);
        let created = client
            .create_entry("blog", &EntryInput::new(data(json!({"title": "Hi"}))).with_locale("en"))
            .await
            .unwrap();
        assert_eq!(created.uuid.as_deref(), Some("e-1"));

        let updated = client
            .update_entry("blog", "e-1", &EntryInput::new(data(json!({"title": "Replaced"}))))
            .await
            .unwrap();
        assert_eq!(updated.data["title"], "Replaced");

        let patched = client
            .patch_entry(
                "blog",
                "e-1",
                &EntryPatch {
                    state: Some(EntryState::Published),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.state.as_deref(), Some("published"));

        create.assert_async().await;
        update.assert_async().await;
        patch.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_entry_force_flag() {
        let mut server = mockito::Server::new_async().await;
        let hard = server
            .mock("DELETE", "/blog/e-1")
            .match_query(Matcher::UrlEncoded("force".into(), "true".into()))
            .with_status(204)
            .create_async()
            .await;

        let client = client(&server);
        client.delete_entry("blog", "e-1", true).await.unwrap();
        hard.assert_async().await;

        let (builder, context) =
            client.prepare(Method::DELETE, "/blog/e-1", &force_query(false), None);
        assert!(context.query.is_empty());
        assert_eq!(builder.build().unwrap().url().query(), None);
    }

    #[tokio::test]
    async fn test_soft_delete_sends_no_force() {
        let mut server = mockito::Server::new_async().await;
        let soft = server
            .mock("DELETE", "/blog/e-2")
            .with_status(200)
            .with_body(r#"{"message":"Entry moved to trash"}"#)
            .create_async()
            .await;

        client(&server).delete_entry("blog", "e-2", false).await.unwrap();
        soft.assert_async().await;
    }
}
