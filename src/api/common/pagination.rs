//
//  bitbucket-client
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination for Bitbucket Cloud collections.
//!
//! Bitbucket Cloud splits collection endpoints (watchers, forks, commits,
//! comments, activity, ...) into pages. Each page is a JSON object with a
//! `values` array and, unless it is the last page, a fully-qualified `next`
//! URL pointing at the following page.
//!
//! [`PageWalker`] follows those links and concatenates the pages into a
//! single `Vec`, stopping early once an optional maximum is reached.
//!
//! # Example
//!
//! ```rust
//! use bitbucket_client::api::common::PaginatedResponse;
//!
//! let json = r#"{
//!     "values": [{"name": "one"}, {"name": "two"}],
//!     "page": 1,
//!     "pagelen": 2,
//!     "next": "https://api.bitbucket.org/2.0/repositories/ws/repo/forks?page=2"
//! }"#;
//!
//! let page: PaginatedResponse<serde_json::Value> = serde_json::from_str(json).unwrap();
//! assert_eq!(page.values.len(), 2);
//! assert!(page.has_next());
//! ```

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::{ApiError, QueryParams};
use crate::api::transport::{ApiRequest, Transport};

/// A single page of a Bitbucket Cloud collection.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `values` | `Vec<T>` | Items in the current page, in server order |
/// | `page` | `Option<u32>` | Current page number (1-indexed) |
/// | `pagelen` | `Option<u32>` | Number of items per page |
/// | `size` | `Option<u32>` | Total number of items, when Bitbucket computes it |
/// | `next` | `Option<String>` | URL of the next page; absent on the last page |
/// | `previous` | `Option<String>` | URL of the previous page |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Items in the current page.
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,

    /// Current page number (1-indexed).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Number of items per page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagelen: Option<u32>,

    /// Total number of items across all pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,

    /// URL to fetch the next page of results.
    ///
    /// When `None`, this is the last page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,

    /// URL to fetch the previous page of results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
}

impl<T> PaginatedResponse<T> {
    /// Checks if there are more pages of results available.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Returns the URL for the next page of results.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }
}

/// A listing to walk: where the first page lives and how much to collect.
///
/// Built fresh for every call and consumed by [`PageWalker::walk`].
///
/// # Fields
///
/// * `url` - URL of the first page
/// * `query` - Query parameters for the first page only
/// * `max` - Optional upper bound on the number of items returned
#[derive(Debug, Clone)]
pub struct ListRequest {
    /// URL of the first page.
    pub url: Url,

    /// Query parameters sent with the first page.
    ///
    /// `next` links already carry the full query, so these are not repeated
    /// on later pages.
    pub query: QueryParams,

    /// Upper bound on the number of items. `None` walks the whole collection.
    pub max: Option<usize>,
}

impl ListRequest {
    /// Creates an unbounded listing of `url`.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            query: QueryParams::new(),
            max: None,
        }
    }

    /// Sets the first-page query parameters.
    pub fn query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Sets the maximum number of items to collect.
    pub fn max(mut self, max: Option<usize>) -> Self {
        self.max = max;
        self
    }
}

/// Walks a paged collection by following `next` links.
///
/// Pages are fetched one after another, never concurrently, so items from
/// page N always precede items from page N+1 in the result.
///
/// # Behavior
///
/// - `max == Some(0)` returns an empty `Vec` without issuing any request
/// - Once `max` items have been collected the result is truncated to exactly
///   `max` and no further page is requested
/// - A 404 (or an empty 2xx body) on the first page yields an empty `Vec`:
///   listing under a parent that does not exist is not an error
/// - A 404 on any later page, and every other failure, is returned as-is
/// - A `next` link to a page already fetched fails with
///   [`ApiError::RepeatedPage`] instead of looping
/// - No retries
pub struct PageWalker<'a> {
    transport: &'a dyn Transport,
}

impl<'a> PageWalker<'a> {
    /// Creates a walker sending its requests through `transport`.
    pub fn new(transport: &'a dyn Transport) -> Self {
        Self { transport }
    }

    /// Collects the items of `request`, decoding each one as `T`.
    ///
    /// # Errors
    ///
    /// Returns an error if a request fails, a page after the first is not
    /// found, a page cannot be decoded, or a `next` link is not a valid URL.
    pub async fn walk<T: DeserializeOwned>(&self, request: ListRequest) -> Result<Vec<T>, ApiError> {
        let ListRequest { url, query, max } = request;

        if max == Some(0) {
            return Ok(Vec::new());
        }

        let mut items: Vec<T> = Vec::new();
        let mut next = Some(ApiRequest::get(url).with_query(query.into_pairs()));
        let mut page_number = 0usize;
        let mut visited: HashSet<Url> = HashSet::new();

        while let Some(page_request) = next.take() {
            page_number += 1;
            let page_url = page_request.url.clone();
            if !visited.insert(page_request.full_url()) {
                return Err(ApiError::RepeatedPage(page_request.full_url()));
            }
            let response = self.transport.send(page_request).await?;

            if page_number == 1 && (response.status == 404 || response.is_empty_success()) {
                debug!(url = %page_url, status = response.status, "collection absent, returning empty listing");
                return Ok(Vec::new());
            }

            let response = response.error_for_status()?;
            let page: PaginatedResponse<T> = serde_json::from_str(&response.body)?;

            debug!(
                url = %page_url,
                page = page_number,
                received = page.values.len(),
                has_next = page.has_next(),
                "fetched page"
            );

            let next_url = page.next_url().map(str::to_owned);
            items.extend(page.values);

            if let Some(max) = max {
                if items.len() >= max {
                    items.truncate(max);
                    break;
                }
            }

            if let Some(next_url) = next_url {
                next = Some(ApiRequest::get(Url::parse(&next_url)?));
            }
        }

        Ok(items)
    }
}
