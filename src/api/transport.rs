//
//  bitbucket-client
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The client core talks to Bitbucket through the narrow [`Transport`] trait:
//! one request in, one status code and raw body out. [`HttpTransport`] is the
//! production implementation on top of `reqwest`; tests plug in their own.
//!
//! A transport never interprets status codes. Mapping non-2xx responses to
//! [`ApiError`] happens in the client so every transport behaves the same.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use tracing::debug;
use url::Url;

use crate::api::common::ApiError;
use crate::auth::AuthCredential;

/// A single request to the Bitbucket API.
///
/// # Fields
///
/// * `method` - HTTP method
/// * `url` - Fully-qualified URL, possibly already carrying a query string
/// * `query` - Extra query pairs appended to `url`, in order
/// * `body` - Optional JSON body
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,

    /// Fully-qualified request URL.
    pub url: Url,

    /// Query pairs appended to `url`, in order. Repeated keys are allowed.
    pub query: Vec<(String, String)>,

    /// JSON body, for POST and PUT.
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a request with no query and no body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            query: Vec::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    pub fn get(url: Url) -> Self {
        Self::new(Method::GET, url)
    }

    /// Sets the query pairs.
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Sets the JSON body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// The URL with `query` appended, as it goes on the wire.
    pub fn full_url(&self) -> Url {
        let mut url = self.url.clone();
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        url
    }
}

/// Status code and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,

    /// Response body as text. Empty when the server sent no body.
    pub body: String,
}

impl RawResponse {
    /// Creates a response.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Checks for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Checks for a 2xx status with nothing in the body.
    pub fn is_empty_success(&self) -> bool {
        self.is_success() && self.body.trim().is_empty()
    }

    /// Converts a non-2xx response into an error.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ApiError::from_response(self.status, &self.body))
        }
    }
}

/// Sends requests to the Bitbucket API.
///
/// Implementations must be usable from any task; the client holds one behind
/// an `Arc` and shares it between resources.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the status and body, whatever the status.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] (or another transport-level error) when
    /// no response was received at all.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError>;
}

/// `reqwest`-backed transport with optional authentication.
///
/// The credential is applied to every request, including requests that
/// follow `next` links, so paged listings stay authenticated. An access
/// token past its known expiry is never sent; `send` fails with
/// [`ApiError::CredentialExpired`] instead.
pub struct HttpTransport {
    http: Client,
    auth: Option<AuthCredential>,
}

impl HttpTransport {
    /// Creates a transport with the given user agent and request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built
    /// (for example when the TLS backend fails to initialise).
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            auth: None,
        })
    }

    /// Sets the credential applied to every request.
    pub fn with_auth(mut self, auth: AuthCredential) -> Self {
        self.auth = Some(auth);
        self
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        if self.auth.as_ref().is_some_and(AuthCredential::is_expired) {
            return Err(ApiError::CredentialExpired);
        }

        debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self.http.request(request.method, request.url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        if let Some(auth) = &self.auth {
            builder = auth.apply_to_request(builder);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status, bytes = body.len(), "received response");

        Ok(RawResponse { status, body })
    }
}
