//
//  bitbucket-client
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Client Wrapper for Bitbucket API
//!
//! This module provides the core client for the Bitbucket Cloud API. It
//! builds request URLs, sends them through a [`Transport`], maps non-2xx
//! responses to [`ApiError`] and decodes JSON bodies.
//!
//! ## Features
//!
//! - Pluggable transport ([`HttpTransport`] by default)
//! - Generic GET/POST/PUT/DELETE helpers
//! - Soft-404 helpers for operations where absence is not an error
//! - Paged listings through [`PageWalker`]

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use super::cloud::{PullRequestsResource, RepositoriesResource, RepositoryResource, UsersResource};
use super::common::{ApiError, ListRequest, PageWalker, QueryParams};
use super::transport::{ApiRequest, HttpTransport, RawResponse, Transport};
use crate::auth::AuthCredential;
use crate::config::{Config, DEFAULT_API_URL};

/// The client for the Bitbucket Cloud REST API.
///
/// Cheap to clone: clones share the same transport.
///
/// # Creating a Client
///
/// ```rust,no_run
/// use bitbucket_client::api::BitbucketClient;
/// use bitbucket_client::auth::AuthCredential;
///
/// let client = BitbucketClient::cloud(Some(AuthCredential::bearer("your-token")))?;
/// let repo = client.repository("my-team", "my-repo");
/// # Ok::<(), bitbucket_client::api::ApiError>(())
/// ```
#[derive(Clone)]
pub struct BitbucketClient {
    /// Sends the requests
    transport: Arc<dyn Transport>,
    /// API root, e.g. `https://api.bitbucket.org/2.0`
    base_url: String,
}

impl BitbucketClient {
    /// Creates a client for Bitbucket Cloud at `https://api.bitbucket.org/2.0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client could not be created.
    pub fn cloud(auth: Option<AuthCredential>) -> Result<Self, ApiError> {
        Self::new(DEFAULT_API_URL, auth)
    }

    /// Creates a client for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// could not be created.
    pub fn new(base_url: &str, auth: Option<AuthCredential>) -> Result<Self, ApiError> {
        let mut transport = HttpTransport::new(&format!("bbc/{}", crate::VERSION), None)?;
        if let Some(auth) = auth {
            transport = transport.with_auth(auth);
        }
        Self::with_transport(base_url, transport)
    }

    /// Creates a client from loaded configuration.
    ///
    /// Uses the configured API URL, timeout, user agent and credential.
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| format!("bbc/{}", crate::VERSION));
        let mut transport = HttpTransport::new(&user_agent, config.timeout())?;
        if let Some(auth) = config.credential() {
            transport = transport.with_auth(auth);
        }
        Self::with_transport(&config.api_url, transport)
    }

    /// Creates a client sending its requests through `transport`.
    pub fn with_transport(
        base_url: &str,
        transport: impl Transport + 'static,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let parsed = Url::parse(&base_url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiError::Config(format!(
                "API URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self {
            transport: Arc::new(transport),
            base_url,
        })
    }

    /// Returns the API root, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the absolute URL of an API path such as `/repositories/ws`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }

    /// Repositories of a workspace.
    pub fn repositories(&self, workspace: &str) -> RepositoriesResource<'_> {
        RepositoriesResource::new(self, workspace)
    }

    /// A single repository.
    pub fn repository(&self, workspace: &str, repo_slug: &str) -> RepositoryResource<'_> {
        RepositoryResource::new(self, workspace, repo_slug)
    }

    /// Pull requests of a repository.
    pub fn pull_requests(&self, workspace: &str, repo_slug: &str) -> PullRequestsResource<'_> {
        PullRequestsResource::new(self, workspace, repo_slug)
    }

    /// Users.
    pub fn users(&self) -> UsersResource<'_> {
        UsersResource::new(self)
    }

    /// Sends a request and fails on non-2xx statuses.
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        debug!(method = %request.method, url = %request.url, "api request");
        self.transport.send(request).await?.error_for_status()
    }

    /// Sends a request, treating 404 and empty 2xx bodies as absence.
    async fn execute_optional(&self, request: ApiRequest) -> Result<Option<RawResponse>, ApiError> {
        let url = request.url.clone();
        let response = self.transport.send(request).await?;

        if response.status == 404 || response.is_empty_success() {
            debug!(url = %url, status = response.status, "resource absent");
            return Ok(None);
        }

        response.error_for_status().map(Some)
    }

    /// Makes a GET request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is not 2xx, or the
    /// body cannot be decoded as `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: QueryParams) -> Result<T, ApiError> {
        let request = ApiRequest::get(self.endpoint(path)?).with_query(query.into_pairs());
        let response = self.execute(request).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Makes a GET request where a missing resource is `Ok(None)`.
    ///
    /// A 404, or a 2xx with an empty body, is reported as absence. Every
    /// other failure is returned as an error.
    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let request = ApiRequest::get(self.endpoint(path)?);
        match self.execute_optional(request).await? {
            Some(response) => Ok(Some(serde_json::from_str(&response.body)?)),
            None => Ok(None),
        }
    }

    /// Makes a GET request for a plain-text body (diffs, patches).
    ///
    /// A missing resource yields `Ok(None)`.
    pub async fn get_text_optional(&self, path: &str) -> Result<Option<String>, ApiError> {
        let request = ApiRequest::get(self.endpoint(path)?);
        Ok(self.execute_optional(request).await?.map(|r| r.body))
    }

    /// Makes a POST request with a JSON body and decodes the JSON response.
    pub async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.send_json(Method::POST, path, Some(serde_json::to_value(body)?))
            .await
    }

    /// Makes a POST request without a body and decodes the JSON response.
    ///
    /// Used by action endpoints such as `/approve` and `/decline`.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(Method::POST, path, None).await
    }

    /// Makes a PUT request with a JSON body and decodes the JSON response.
    pub async fn put<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        self.send_json(Method::PUT, path, Some(serde_json::to_value(body)?))
            .await
    }

    /// Makes a DELETE request, ignoring any response body.
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = ApiRequest::new(Method::DELETE, self.endpoint(path)?);
        self.execute(request).await?;
        Ok(())
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T, ApiError> {
        let mut request = ApiRequest::new(method, self.endpoint(path)?);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        let response = self.execute(request).await?;
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Lists a paged collection, following `next` links.
    ///
    /// See [`PageWalker`] for the exact stopping and soft-404 rules.
    ///
    /// # Parameters
    ///
    /// * `path` - API path of the collection
    /// * `query` - Query parameters for the first page
    /// * `max` - Upper bound on the number of items; `None` lists everything
    pub async fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        query: QueryParams,
        max: Option<usize>,
    ) -> Result<Vec<T>, ApiError> {
        let request = ListRequest::new(self.endpoint(path)?).query(query).max(max);
        PageWalker::new(self.transport.as_ref()).walk(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_and_path() {
        let client = BitbucketClient::new("https://api.bitbucket.org/2.0/", None).unwrap();
        assert_eq!(client.base_url(), "https://api.bitbucket.org/2.0");
        assert_eq!(
            client.endpoint("/repositories/ws/repo").unwrap().as_str(),
            "https://api.bitbucket.org/2.0/repositories/ws/repo"
        );
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let err = BitbucketClient::new("not a url", None).err().unwrap();
        assert!(matches!(err, ApiError::InvalidUrl(_)));
    }

    #[test]
    fn test_non_http_base_url_is_rejected() {
        let err = BitbucketClient::new("ftp://api.bitbucket.org/2.0", None).err().unwrap();
        assert!(matches!(err, ApiError::Config(_)));
    }
}
