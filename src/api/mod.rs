//
//  bitbucket-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Typed access to the Bitbucket Cloud REST API v2.0 at `api.bitbucket.org`.
//!
//! ## Architecture
//!
//! - [`client`]: [`BitbucketClient`], URL building, status mapping, JSON decoding
//! - [`transport`]: the [`Transport`] seam and its `reqwest` implementation
//! - [`cloud`]: resource structs (repositories, commits, pull requests, users)
//! - [`common`]: errors, pagination, query parameters, shared reference types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bitbucket_client::api::BitbucketClient;
//! use bitbucket_client::auth::AuthCredential;
//!
//! # async fn example() -> Result<(), bitbucket_client::api::ApiError> {
//! let client = BitbucketClient::cloud(Some(AuthCredential::bearer("your-token")))?;
//! let watchers = client.repository("my-team", "my-repo").list_watchers(Some(50)).await?;
//! println!("{} watchers", watchers.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Failures are returned as [`ApiError`] variants that map to HTTP status
//! classes:
//!
//! - `AuthFailed`: 401 Unauthorized
//! - `Forbidden`: 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `RateLimited`: 429 Too Many Requests
//! - `ServerError`: 5xx Server Errors

pub mod client;

pub mod cloud;

pub mod common;

pub mod transport;

pub use client::BitbucketClient;

pub use common::{ApiError, PaginatedResponse, QueryParams};

pub use transport::{ApiRequest, HttpTransport, RawResponse, Transport};
