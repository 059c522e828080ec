//
//  cms-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination and query-string types for list endpoints.
//!
//! List endpoints (`/{collection}`, `/files`) answer with a page envelope:
//!
//! ```json
//! {
//!     "data": [ ... ],
//!     "meta": {"current_page": 1, "last_page": 4, "per_page": 25, "total": 90},
//!     "links": {"next": "https://cms.example.com/api/blog?page=2", "prev": null}
//! }
//! ```
//!
//! Pages are requested with the `page` and `limit` query parameters, which
//! [`PageParams`] appends to a [`QueryParams`] list.

use serde::{Deserialize, Serialize};

/// One page of results from a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items in the current page. May be empty.
    pub data: Vec<T>,

    /// Page position and totals, when the endpoint reports them.
    #[serde(default)]
    pub meta: Option<PageMeta>,

    /// Navigation links, when the endpoint reports them.
    #[serde(default)]
    pub links: Option<PageLinks>,
}

/// Page position and totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub total: Option<u64>,
}

/// Navigation links between pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub first: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
    #[serde(default)]
    pub next: Option<String>,
}

impl<T> Paginated<T> {
    /// Checks if there are more pages after this one.
    ///
    /// Uses the `next` link when present, otherwise compares the current
    /// page with the last page.
    pub fn has_next(&self) -> bool {
        if let Some(next) = self.links.as_ref().and_then(|l| l.next.as_ref()) {
            return !next.is_empty();
        }
        match &self.meta {
            Some(PageMeta {
                current_page: Some(current),
                last_page: Some(last),
                ..
            }) => current < last,
            _ => false,
        }
    }

    /// Returns the page number to request next, if any.
    pub fn next_page(&self) -> Option<u32> {
        if !self.has_next() {
            return None;
        }
        self.meta
            .as_ref()
            .and_then(|m| m.current_page)
            .and_then(|current| current.checked_add(1))
    }

    /// Total number of items across all pages, when reported.
    pub fn total(&self) -> Option<u64> {
        self.meta.as_ref().and_then(|m| m.total)
    }
}

/// Ordered list of query parameters.
///
/// Only parameters that were actually set are pushed, so an empty list
/// produces no query string at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) -> &mut Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    /// Appends a parameter only when a value is present.
    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }

    /// Returns the value of the first parameter named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn into_vec(self) -> Vec<(String, String)> {
        self.0
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}

/// Page selection shared by list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    /// 1-indexed page number.
    pub page: Option<u32>,
    /// Items per page.
    pub limit: Option<u32>,
}

impl PageParams {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    pub fn append_to(&self, params: &mut QueryParams) {
        params.push_opt("page", self.page);
        params.push_opt("limit", self.limit);
    }
}
